//! Device location lookup with a fixed fallback coordinate.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::types::{Coordinates, LocationError};

/// Best-effort source of the device's last known position.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// `Ok(None)` means the platform has no fix yet.
    async fn last_known(&self) -> Result<Option<Coordinates>, LocationError>;
}

/// Location set explicitly by the host (CLI flags, a picker, or tests).
#[derive(Debug, Default)]
pub struct ManualLocation {
    current: RwLock<Option<Coordinates>>,
}

impl ManualLocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(coordinates: Coordinates) -> Self {
        Self {
            current: RwLock::new(Some(coordinates)),
        }
    }

    pub fn set(&self, coordinates: Coordinates) {
        *self.current.write() = Some(coordinates);
    }

    pub fn clear(&self) {
        *self.current.write() = None;
    }

    pub fn get(&self) -> Option<Coordinates> {
        *self.current.read()
    }
}

#[async_trait]
impl LocationProvider for ManualLocation {
    async fn last_known(&self) -> Result<Option<Coordinates>, LocationError> {
        Ok(self.get())
    }
}

/// How long a provider may take before the fallback is used
pub const LOCATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Ask `provider` for a position, using `fallback` when it has none, fails,
/// or takes longer than [`LOCATION_TIMEOUT`].
/// Hosts without their own default pass [`crate::FALLBACK_COORDINATES`].
pub async fn resolve_coordinates(
    provider: &dyn LocationProvider,
    fallback: Coordinates,
) -> Coordinates {
    resolve_within(provider, fallback, LOCATION_TIMEOUT).await
}

async fn resolve_within(
    provider: &dyn LocationProvider,
    fallback: Coordinates,
    limit: Duration,
) -> Coordinates {
    let lookup = tokio::time::timeout(limit, provider.last_known())
        .await
        .unwrap_or(Err(LocationError::Timeout));

    match lookup {
        Ok(Some(coordinates)) => coordinates,
        Ok(None) => {
            tracing::debug!("No location fix, using fallback coordinates");
            fallback
        }
        Err(e) => {
            tracing::warn!("Location lookup failed, using fallback coordinates: {}", e);
            fallback
        }
    }
}
