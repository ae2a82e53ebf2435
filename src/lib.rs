pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::WorkflowArgs;

pub use adapters::github::{GithubClient, GithubIssues};
pub use config::toml_config::BootcampConfig;
pub use config::Credentials;
pub use core::{settle::SettlePolicy, setup::SetupWorkflow, teardown::TeardownWorkflow};
pub use utils::error::{BootcampError, Result};
