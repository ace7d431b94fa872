mod model;
mod services;
mod store;
pub mod utils;

use tokio::signal;
use dotenv::dotenv;
use std::sync::Arc;
use utils::health;
use utils::errors::WardenError;
use utils::context::ServiceContext;
use crate::utils::errors::ErrorCode;
use utils::config::{Configuration, self};
use tokio::sync::oneshot::{self};
use grpc::api::warden_server::WardenServer;
use grpc::internal::internal_server::InternalServer;
use tonic::transport::{Identity, Server, ServerTlsConfig};
use tracing_subscriber::{prelude::__tracing_subscriber_SubscriberExt, Registry, util::SubscriberInitExt};

///
/// These are the generated gRPC/protobuf modules which give us access to the message structures, services,
/// servers and clients to talk to our APIs. The services are implemented in services/mod.rs
///
pub mod grpc {
    pub mod common {
        tonic::include_proto!("grpc.common");
    }

    pub mod api {
        tonic::include_proto!("grpc.warden");
    }

    pub mod internal {
        tonic::include_proto!("grpc.internal");
    }
}

const APP_NAME: &str = "Warden";

///
/// Entry point to start the app.
///
pub async fn lib_main() -> Result<(), WardenError> {

    // Load any local dev settings as environment variables from a .env file.
    dotenv().ok();

    // Default log level to INFO if it's not specified.
    config::default_env("RUST_LOG", "INFO");

    // SIGINT/ctrl+c handling for graceful shutdown.
    let (signal_tx, signal_rx) = oneshot::channel();
    let _signal = tokio::spawn(wait_for_signal(signal_tx));

    // Load the service configuration into struct.
    let config = Configuration::from_env().expect("The service configuration is not correct");

    init_tracing();

    tracing::info!("{}\n{}", BANNER, config.fmt_console()?);

    // The service context allows any gRPC service access to shared stuff (stores, the signer,
    // the event bus, etc.).
    let ctx = Arc::new(ServiceContext::new(config.clone())?);

    let (health_reporter, health_service) = health::start().await;

    // The address we'll serve on.
    let addr = config.address.parse().unwrap();

    let mut builder = Server::builder();

    if config.tls {
        let identity = init_tls().await?;
        builder = builder.tls_config(ServerTlsConfig::new().identity(identity))?;
        tracing::info!("{} listening on {} and using tls", APP_NAME, addr);
    } else {
        tracing::info!("{} listening on {}", APP_NAME, addr);
    }

    let server = builder
        .add_service(WardenServer::new(ctx.clone()))
        .add_service(InternalServer::new(ctx.clone()))
        .add_service(health_service)
        .serve_with_shutdown(addr, async {
            signal_rx.await.ok();
            tracing::info!("Graceful shutdown");
        });

    server.await?;

    health::shutdown(health_reporter).await;

    Ok(())
}

///
/// Sends a oneshot signal when a SIGINT is received (Ctrl+C)
///
async fn wait_for_signal(tx: oneshot::Sender<()>) {
    let _ = signal::ctrl_c().await;
    tracing::info!("SIGINT received: shutting down");
    let _ = tx.send(());
}

///
/// Bind to the server-side key and certificate.
///
async fn init_tls() -> Result<Identity, WardenError> {

    tracing::info!("Initialising TLS config");

    let cert = tokio::fs::read("certs/cert.pem")
        .await
        .map_err(|e| ErrorCode::IOError.with_msg(&format!("Failed to open pem: {}", e.to_string())))?;

    let key = tokio::fs::read("certs/key.pem")
        .await
        .map_err(|e| ErrorCode::IOError.with_msg(&format!("Failed to open key: {}", e.to_string())))?;

    Ok(Identity::from_pem(cert, key))
}

///
/// Initialise tracing from the RUST_LOG environment variable.
///
fn init_tracing() {
    if let Err(err) = Registry::default()
        .with(tracing_subscriber::EnvFilter::from_default_env()) // Set the tracing level to match RUST_LOG env variable.
        .with(tracing_subscriber::fmt::layer().with_test_writer().with_ansi(true))
        .try_init() {
            tracing::info!("Tracing already initialised: {}", err.to_string()); // Allowed error here - tests call this fn repeatedly.
    }
}

const BANNER: &str = r#"
 __      __                 .___
/  \    /  \_____ _______ __| _/____   ____
\   \/\/   /\__  \\_  __ \/ __ |/ __ \ /    \
 \        /  / __ \|  | \/ /_/ \  ___/|   |  \
  \__/\  /  (____  /__|  \____ |\___  >___|  /
       \/        \/           \/    \/     \/
"#;
