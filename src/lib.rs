// Module declarations
pub mod cli;
pub mod cli_context;
pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod fetch;
pub mod formatting;
pub mod index;
pub mod logging;
pub mod models;
pub mod mutations;
pub mod presentation;
pub mod views;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use cli_context::{CliContext, CliContextBuilder};
pub use client::{HttpClient, MemoryClient, ResourceClient};
pub use config::{get_api_key, load_config, save_config, Config};
pub use error::{OrgError, OrgResult};
pub use fetch::{FetchPlan, Slot};
pub use index::OrgIndex;
pub use models::*;
pub use presentation::{ByTeamType, TeamPrecedence};
