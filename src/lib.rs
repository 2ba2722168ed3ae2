pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::CommandResolver;
pub use config::BridgeSettings;
pub use crate::core::bridge::{Bridge, BridgeRequest};
pub use crate::core::placer::RepositoryPlacer;
pub use utils::error::{BridgeError, Result};
