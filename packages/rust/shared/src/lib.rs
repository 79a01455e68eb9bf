//! Shared types, error model, and configuration for customsplit.
//!
//! This crate is the foundation depended on by the converter registry.
//! It provides:
//! - [`SplitConversionError`]: the unified error type
//! - Domain types ([`FileSplit`], [`SplitExtension`], [`CustomSplitInfo`], [`TransportSplit`])
//! - Configuration ([`AppConfig`], [`RegistryConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, RegistryConfig, UnclaimedInfoPolicy, config_dir, config_file_path, init_config,
    load_config, load_config_from, parse_config,
};
pub use error::{Result, SplitConversionError};
pub use types::{CustomSplitInfo, FileSplit, SplitExtension, TransportSplit};
