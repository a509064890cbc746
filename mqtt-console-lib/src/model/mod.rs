//! Broker resource models
//!
//! Typed forms of the JSON bodies returned by the broker REST API.

mod config;
mod credentials;
mod kafka;
mod retained;
mod session;
mod stats;

pub use config::*;
pub use credentials::*;
pub use kafka::*;
pub use retained::*;
pub use session::*;
pub use stats::*;
