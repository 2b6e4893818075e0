//! Relay endpoint for the weather dashboard.
//!
//! The free upstream tier only serves plaintext HTTP, which secure browser
//! origins refuse to call directly. This service moves that leg server-side:
//! it forwards a `query` parameter with a server-held credential and relays
//! the upstream JSON verbatim under a short-lived shared cache directive.

pub mod config;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ProxyConfig;
pub use routes::create_router;
pub use state::AppState;
