//! Core library for the weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The fetch/classification logic over the weather provider
//! - Pure presentation mapping (themes, icons, derived labels)
//! - The dashboard state controller (query, payload, toasts, geolocation)
//! - The last-searched-city persistence port
//!
//! It is used by `weather-cli` and `weather-proxy`, but can also be reused
//! by other binaries or services.

pub mod config;
pub mod dashboard;
pub mod locate;
pub mod model;
pub mod present;
pub mod provider;
pub mod store;

pub use config::{Config, DirectConfig, EndpointMode, LocationConfig, ProxyClientConfig};
pub use dashboard::{Dashboard, Severity, Toast};
pub use locate::{ConfiguredLocator, Coordinates, LocateError, Locator};
pub use model::{ApiError, ApiErrorEnvelope, WeatherPayload};
pub use provider::{
    Endpoint, FetchError, WeatherSource, WeatherstackClient, classify_body, client_from_config,
};
pub use store::{FileLastCityStore, LastCityStore, MemoryLastCityStore};
