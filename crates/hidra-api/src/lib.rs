// hidra-api: Async Rust client for the Hidra gateway HTTP API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod config;
mod dashboard;
mod modules;
mod server;
mod wifi;

pub use client::GatewayClient;
pub use error::Error;
pub use transport::TransportConfig;
