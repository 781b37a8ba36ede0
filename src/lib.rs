//! # partscout
//!
//! Multi-source appliance part search service with an offline-first
//! client cache.
//!
//! The service side exposes one aggregated search endpoint and an image
//! relay over the [`partscout_search`] engine. The client side is the
//! [`offline`] module: a caching worker that classifies every outbound
//! request and keeps the static shell, previous search responses, and
//! images available when the network is degraded.

pub mod config;
pub mod error;
pub mod logging;
pub mod offline;
pub mod relay;
pub mod server;

pub use config::{AppConfig, OfflineConfig, ServerConfig};
pub use error::{AppError, Result};
pub use server::PartServer;
