//! Configuration for gh-release-train
//!
//! This crate provides:
//! - Config file discovery (CWD dotfile, then the platform config dir)
//! - `ReleaseConfig` with TOML overlays and environment overrides
//! - Repository inference from the git `origin` remote

pub mod config_file;
pub mod release_config;
pub mod remote;

pub use release_config::{ConfigError, ReleaseConfig, DEFAULT_BODY, DEFAULT_TITLE};
pub use remote::RemoteRepository;
