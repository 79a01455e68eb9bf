//! Custom split conversion for format-aware file splits.
//!
//! This crate provides:
//! - [`CustomSplitConverter`]: the per-format capability trait
//! - [`ConverterRegistry`]: ordered, first-match dispatch for extraction and reconstruction
//! - [`ConverterCatalog`]: builds a registry from [`RegistryConfig`](customsplit_shared::RegistryConfig)
//! - [`transport`]: encode/decode of splits with their custom payload

pub mod catalog;
pub mod converter;
pub mod registry;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use catalog::ConverterCatalog;
pub use converter::CustomSplitConverter;
pub use registry::{ConverterRegistry, RegistryBuilder};

pub use customsplit_shared::{
    CustomSplitInfo, FileSplit, Result, SplitConversionError, SplitExtension, TransportSplit,
    UnclaimedInfoPolicy,
};
