//! Shared infrastructure for the OTN chassis tools
//!
//! - `logging`: tracing subscriber setup for command-line tools
//! - `config`: layered configuration loading

pub mod config;
pub mod logging;

pub use config::{load_config, OtnConfig, RedisSettings, SYSTEM_CONFIG_PATH};
