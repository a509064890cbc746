//! Broker REST API operations
//!
//! Each submodule adds the calls for one resource to [`BrokerClient`](crate::BrokerClient).
//! Paged reads take a [`TimePageLink`](crate::page::TimePageLink) and return a
//! [`PageData`](crate::page::PageData).

mod config;
mod credentials;
mod kafka;
mod retained;
mod sessions;

pub use credentials::CREDENTIALS_PATH;
pub use kafka::KAFKA_CONSUMER_GROUPS_PATH;
pub use kafka::KAFKA_TOPICS_PATH;
pub use retained::RETAINED_MESSAGES_PATH;
pub use sessions::SESSIONS_PATH;
