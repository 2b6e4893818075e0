use crate::config::Config;
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

/// A resolved position from whatever geolocation backend is available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Validated constructor; `None` for out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) {
            Some(Self { latitude, longitude })
        } else {
            None
        }
    }

    /// Render as the `"lat,lon"` query string the provider accepts.
    pub fn as_query(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// Geolocation failures. All of these surface as advisory warnings; none is
/// fatal and none aborts an in-flight search.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("Location access was denied. Search for a city instead.")]
    Denied,

    #[error("Geolocation is not available on this device.")]
    Unsupported,

    #[error("Locating you took too long. Search for a city instead.")]
    TimedOut,

    #[error("Could not determine your location: {0}")]
    Unavailable(String),
}

/// Port for acquiring the user's position. The dashboard wraps calls in its
/// own fixed timeout, so implementations do not need one.
#[async_trait]
pub trait Locator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, LocateError>;
}

/// Locator backed by a fixed position from the config file. Setups without a
/// `[location]` section count as unsupported, the same as a browser without
/// a geolocation API.
#[derive(Debug)]
pub struct ConfiguredLocator {
    coordinates: Option<Coordinates>,
}

impl ConfiguredLocator {
    pub fn from_config(config: &Config) -> Self {
        let coordinates =
            config.location.and_then(|l| Coordinates::new(l.latitude, l.longitude));
        Self { coordinates }
    }
}

#[async_trait]
impl Locator for ConfiguredLocator {
    async fn locate(&self) -> Result<Coordinates, LocateError> {
        self.coordinates.ok_or(LocateError::Unsupported)
    }
}
