//! MQTT broker console library
//!
//! A Rust async client for the broker's admin REST API, plus a generic paged
//! table controller and ready-made tables for sessions, client credentials,
//! Kafka topics and consumer groups, and retained messages.

pub mod api;
pub mod auth;
pub mod error;
pub mod fetcher;
pub mod format;
pub mod i18n;
pub mod model;
pub mod notify;
pub mod page;
pub mod table;
pub mod tables;

mod client;

pub use client::*;
