//! The converter capability trait implemented once per table format.

use std::io;
use std::sync::Arc;

use customsplit_shared::{CustomSplitInfo, FileSplit};

/// Format-specific extraction and reconstruction of custom split state.
///
/// Converters are consulted in registry order; see
/// [`ConverterRegistry`](crate::ConverterRegistry).
pub trait CustomSplitConverter: Send + Sync {
    /// Stable identity used in errors and tracing.
    fn name(&self) -> &str;

    /// Return this format's payload if `split` belongs to it, `None` otherwise.
    ///
    /// Must not fail: an unrecognized split is a normal outcome.
    fn extract_custom_split_info(&self, split: &FileSplit) -> Option<CustomSplitInfo>;

    /// Rebuild a format-aware split from a generic `split` and `info`.
    ///
    /// Returns `Ok(None)` when `info` is not this format's payload, and an
    /// error when it is but the split cannot be rebuilt.
    fn recreate_split_with_custom_info(
        &self,
        split: &FileSplit,
        info: &CustomSplitInfo,
    ) -> io::Result<Option<FileSplit>>;
}

impl<C: CustomSplitConverter + ?Sized> CustomSplitConverter for Box<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn extract_custom_split_info(&self, split: &FileSplit) -> Option<CustomSplitInfo> {
        (**self).extract_custom_split_info(split)
    }

    fn recreate_split_with_custom_info(
        &self,
        split: &FileSplit,
        info: &CustomSplitInfo,
    ) -> io::Result<Option<FileSplit>> {
        (**self).recreate_split_with_custom_info(split, info)
    }
}

impl<C: CustomSplitConverter + ?Sized> CustomSplitConverter for Arc<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn extract_custom_split_info(&self, split: &FileSplit) -> Option<CustomSplitInfo> {
        (**self).extract_custom_split_info(split)
    }

    fn recreate_split_with_custom_info(
        &self,
        split: &FileSplit,
        info: &CustomSplitInfo,
    ) -> io::Result<Option<FileSplit>> {
        (**self).recreate_split_with_custom_info(split, info)
    }
}
