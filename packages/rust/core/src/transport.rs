//! Carrying custom split state across the wire.
//!
//! The planning side extracts a payload and ships a generic [`TransportSplit`];
//! the reading side rebuilds the format-aware split from it.

use customsplit_shared::{FileSplit, Result, TransportSplit};
use tracing::instrument;

use crate::registry::ConverterRegistry;

impl ConverterRegistry {
    /// Extract `split`'s payload and pack it with the generic byte range.
    pub fn encode(&self, split: &FileSplit) -> TransportSplit {
        TransportSplit::from_parts(split, self.extract_any_custom_split_info(split))
    }

    /// Rebuild the split described by `transport`.
    pub fn decode(&self, transport: &TransportSplit) -> Result<FileSplit> {
        self.recreate_split_with_custom_info(transport.file_split(), &transport.custom_split_info)
    }

    /// [`encode`](Self::encode) to a JSON string.
    #[instrument(level = "trace", skip_all, fields(path = %split.path()))]
    pub fn encode_json(&self, split: &FileSplit) -> Result<String> {
        Ok(serde_json::to_string(&self.encode(split))?)
    }

    /// [`decode`](Self::decode) from a JSON string.
    #[instrument(level = "trace", skip_all)]
    pub fn decode_json(&self, json: &str) -> Result<FileSplit> {
        let transport: TransportSplit = serde_json::from_str(json)?;
        self.decode(&transport)
    }
}
