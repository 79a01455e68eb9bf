//! Ordered converter registry and the extraction/reconstruction dispatcher.

use std::fmt;

use customsplit_shared::{
    CustomSplitInfo, FileSplit, Result, SplitConversionError, UnclaimedInfoPolicy,
};
use tracing::{debug, instrument, trace, warn};

use crate::converter::CustomSplitConverter;

/// Holds registered converters in priority order.
///
/// Frozen once built: the order never changes, so the registry can be shared
/// freely across threads.
pub struct ConverterRegistry {
    converters: Vec<Box<dyn CustomSplitConverter>>,
    unclaimed_info: UnclaimedInfoPolicy,
}

impl ConverterRegistry {
    /// Create a registry from converters in priority order, dropping unclaimed payloads.
    pub fn new(converters: Vec<Box<dyn CustomSplitConverter>>) -> Self {
        Self {
            converters,
            unclaimed_info: UnclaimedInfoPolicy::Drop,
        }
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Extract the first claiming converter's payload. Empty if none claims `split`.
    #[instrument(level = "trace", skip_all, fields(path = %split.path()))]
    pub fn extract_any_custom_split_info(&self, split: &FileSplit) -> CustomSplitInfo {
        for converter in &self.converters {
            if let Some(info) = converter.extract_custom_split_info(split) {
                debug!(converter = converter.name(), keys = info.len(), "custom split info extracted");
                return info;
            }
        }

        trace!("no converter recognized split");
        CustomSplitInfo::empty()
    }

    /// Rebuild a format-aware split from `split` and `info`.
    ///
    /// The first converter returning a split wins. A converter error aborts
    /// the walk and is wrapped as [`SplitConversionError::UnsupportedFormat`].
    /// If nobody claims `info`, `split` is returned as-is under
    /// [`UnclaimedInfoPolicy::Drop`]; under [`UnclaimedInfoPolicy::Reject`] a
    /// non-empty payload is an error.
    #[instrument(level = "trace", skip_all, fields(path = %split.path(), keys = info.len()))]
    pub fn recreate_split_with_custom_info(
        &self,
        split: FileSplit,
        info: &CustomSplitInfo,
    ) -> Result<FileSplit> {
        for converter in &self.converters {
            let recreated = converter
                .recreate_split_with_custom_info(&split, info)
                .map_err(|e| {
                    warn!(converter = converter.name(), error = %e, "split converter failed");
                    SplitConversionError::unsupported_format(converter.name(), e)
                })?;

            if let Some(recreated) = recreated {
                debug!(converter = converter.name(), "split recreated");
                return Ok(recreated);
            }
        }

        if info.is_empty() {
            return Ok(split);
        }

        let keys: Vec<String> = info.keys().map(str::to_string).collect();
        match self.unclaimed_info {
            UnclaimedInfoPolicy::Drop => {
                warn!(path = split.path(), ?keys, "no converter claimed custom split info, dropping it");
                Ok(split)
            }
            UnclaimedInfoPolicy::Reject => Err(SplitConversionError::UnclaimedSplitInfo {
                path: split.path().to_string(),
                keys,
            }),
        }
    }

    /// Number of registered converters.
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Converter names in dispatch order.
    pub fn converter_names(&self) -> Vec<&str> {
        self.converters.iter().map(|c| c.name()).collect()
    }

    pub fn unclaimed_info_policy(&self) -> UnclaimedInfoPolicy {
        self.unclaimed_info
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("converters", &self.converter_names())
            .field("unclaimed_info", &self.unclaimed_info)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Assembles a [`ConverterRegistry`]; registration order is dispatch order.
#[derive(Default)]
pub struct RegistryBuilder {
    converters: Vec<Box<dyn CustomSplitConverter>>,
    unclaimed_info: UnclaimedInfoPolicy,
}

impl RegistryBuilder {
    /// Append a converter after all previously registered ones.
    pub fn register(self, converter: impl CustomSplitConverter + 'static) -> Self {
        self.register_boxed(Box::new(converter))
    }

    pub fn register_boxed(mut self, converter: Box<dyn CustomSplitConverter>) -> Self {
        self.converters.push(converter);
        self
    }

    pub fn unclaimed_info(mut self, policy: UnclaimedInfoPolicy) -> Self {
        self.unclaimed_info = policy;
        self
    }

    pub fn build(self) -> ConverterRegistry {
        ConverterRegistry {
            converters: self.converters,
            unclaimed_info: self.unclaimed_info,
        }
    }
}
