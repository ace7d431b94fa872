use tonic_health::{server::HealthReporter, proto::health_server::{Health, HealthServer}};

const LIVELINESS: &str = "LIVELINESS";
const READINESS:  &str = "READINESS";

///
/// Create liveliness/readiness probes for the server.
///
/// There are no downstream services to monitor - the stores are in-process -
/// so the service is ready as soon as it is live.
///
pub async fn start() -> (HealthReporter, HealthServer<impl Health>) {
    let (mut health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter.set_service_status(LIVELINESS, tonic_health::ServingStatus::Serving).await;
    health_reporter.set_service_status(READINESS, tonic_health::ServingStatus::Serving).await;

    tracing::info!("Health probe enabled for services {} and {}", LIVELINESS, READINESS);
    (health_reporter, health_service)
}

pub async fn shutdown(mut health_reporter: HealthReporter) {
    health_reporter.set_service_status(LIVELINESS, tonic_health::ServingStatus::NotServing).await;
    health_reporter.set_service_status(READINESS, tonic_health::ServingStatus::NotServing).await;
}
