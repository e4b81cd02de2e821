//! Ferry Core - shared configuration for the ferry Gitea migration tools
//!
//! This crate provides the configuration and secrets handling shared by the
//! export and import commands.

pub mod config;
pub mod error;
pub mod secrets;

pub use config::{Config, GiteaConfig};
pub use error::{Error, Result};
pub use secrets::Secrets;
