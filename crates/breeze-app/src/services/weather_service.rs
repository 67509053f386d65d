//! Weather backend: async weather fetching.
//! All network work runs off the UI thread; results sent via mpsc.

use std::sync::Arc;

use breeze_weather::{fetch_weather, Coordinates, LocationProvider, WeatherFetchResult, WeatherService};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Result of one fetch. `ticket` identifies the request that produced it.
    FetchDone {
        ticket: u64,
        result: WeatherFetchResult,
    },
}

/// Request current weather and the forecast asynchronously.
/// Sends `FetchDone` on the channel unless `cancel` fires first.
pub fn request_fetch(
    runtime: &Handle,
    tx: &UnboundedSender<WeatherServiceMessage>,
    service: Arc<dyn WeatherService>,
    location: Arc<dyn LocationProvider>,
    fallback: Coordinates,
    ticket: u64,
    cancel: CancellationToken,
) {
    let tx = tx.clone();

    runtime.spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("Weather fetch {} cancelled", ticket);
            }
            result = fetch_weather(service.as_ref(), location.as_ref(), fallback) => {
                if tx.send(WeatherServiceMessage::FetchDone { ticket, result }).is_err() {
                    tracing::debug!("Weather result {} dropped: receiver closed", ticket);
                }
            }
        }
    });
}
