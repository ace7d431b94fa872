use tokio::sync::broadcast;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status};
use crate::{grpc::{common, internal}, utils::context::ServiceContext};
use super::EventStream;

///
/// The audit surface: every PasswordChanged event published since start-up,
/// in publish order.
///
pub async fn list_events(ctx: &ServiceContext, _request: Request<common::Empty>)
    -> Result<Response<internal::ListEventsResponse>, Status> {

    let events = ctx.events().log()
        .into_iter()
        .map(internal::PasswordChangedEvent::from)
        .collect();

    Ok(Response::new(internal::ListEventsResponse { events }))
}

///
/// The notification surface: stream PasswordChanged events to a collaborator
/// as they happen. A slow consumer that lags the broadcast buffer misses the
/// skipped events - the audit log is the complete record.
///
pub async fn subscribe_events(ctx: &ServiceContext, _request: Request<common::Empty>)
    -> Result<Response<EventStream>, Status> {

    let mut receiver = ctx.events().subscribe();
    let (tx, rx) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if tx.send(Ok(event.into())).await.is_err() {
                        break; // The subscriber hung up.
                    }
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("Event subscriber lagged, skipped {} events", skipped);
                },
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    Ok(Response::new(Box::pin(ReceiverStream::new(rx))))
}
