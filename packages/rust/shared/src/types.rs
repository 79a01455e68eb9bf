//! Core domain types: file splits, their format extensions, and the
//! key-value payload that carries format state across the wire.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SplitExtension
// ---------------------------------------------------------------------------

/// Format-specific state attached to a [`FileSplit`].
///
/// Implemented automatically for every `Debug + PartialEq + Send + Sync`
/// type, so converters attach plain structs and recognize them again with
/// [`FileSplit::extension`].
pub trait SplitExtension: Any + fmt::Debug + Send + Sync {
    /// Upcast for typed downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Equal only when `other` has the same concrete type and compares equal.
    fn dyn_eq(&self, other: &dyn SplitExtension) -> bool;
}

impl<T> SplitExtension for T
where
    T: Any + fmt::Debug + PartialEq + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn SplitExtension) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}

// ---------------------------------------------------------------------------
// FileSplit
// ---------------------------------------------------------------------------

/// A contiguous byte range of a file, used to schedule one unit of read work.
///
/// A split without an extension is *generic*; format-aware splits carry their
/// extra state in the extension slot.
#[derive(Debug, Clone)]
pub struct FileSplit {
    path: String,
    start: u64,
    length: u64,
    hosts: Vec<String>,
    extension: Option<Arc<dyn SplitExtension>>,
}

impl FileSplit {
    /// Create a generic split over `length` bytes of `path` starting at `start`.
    pub fn new(path: impl Into<String>, start: u64, length: u64) -> Self {
        Self {
            path: path.into(),
            start,
            length,
            hosts: Vec::new(),
            extension: None,
        }
    }

    /// Replace the locality hints.
    pub fn with_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hosts = hosts.into_iter().map(Into::into).collect();
        self
    }

    /// Attach format-specific state, replacing any previous extension.
    pub fn with_extension(mut self, extension: impl SplitExtension) -> Self {
        self.extension = Some(Arc::new(extension));
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// Typed view of the extension, if it is a `T`.
    pub fn extension<T: SplitExtension>(&self) -> Option<&T> {
        self.extension
            .as_deref()
            .and_then(|ext| ext.as_any().downcast_ref::<T>())
    }

    /// Whether any format-specific state is attached.
    pub fn has_extension(&self) -> bool {
        self.extension.is_some()
    }

    /// The same byte range and hosts with the extension stripped.
    pub fn to_generic(&self) -> Self {
        Self {
            path: self.path.clone(),
            start: self.start,
            length: self.length,
            hosts: self.hosts.clone(),
            extension: None,
        }
    }
}

impl PartialEq for FileSplit {
    fn eq(&self, other: &Self) -> bool {
        let extensions_eq = match (self.extension.as_deref(), other.extension.as_deref()) {
            (None, None) => true,
            (Some(a), Some(b)) => a.dyn_eq(b),
            _ => false,
        };

        extensions_eq
            && self.path == other.path
            && self.start == other.start
            && self.length == other.length
            && self.hosts == other.hosts
    }
}

// ---------------------------------------------------------------------------
// CustomSplitInfo
// ---------------------------------------------------------------------------

/// Format-private key-value payload extracted from a split.
///
/// Empty means "no extra metadata".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomSplitInfo(BTreeMap<String, String>);

impl CustomSplitInfo {
    /// The canonical "no extra metadata" payload.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert a value, returning the previous one for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl From<BTreeMap<String, String>> for CustomSplitInfo {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl From<HashMap<String, String>> for CustomSplitInfo {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map.into_iter().collect())
    }
}

impl<K, V> FromIterator<(K, V)> for CustomSplitInfo
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// ---------------------------------------------------------------------------
// TransportSplit
// ---------------------------------------------------------------------------

/// Serializable split record: a generic byte range plus its custom payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportSplit {
    pub path: String,
    pub start: u64,
    pub length: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<String>,
    #[serde(default, skip_serializing_if = "CustomSplitInfo::is_empty")]
    pub custom_split_info: CustomSplitInfo,
}

impl TransportSplit {
    /// Pack the byte range of `split` together with `custom_split_info`.
    /// Any extension on `split` is not carried.
    pub fn from_parts(split: &FileSplit, custom_split_info: CustomSplitInfo) -> Self {
        Self {
            path: split.path.clone(),
            start: split.start,
            length: split.length,
            hosts: split.hosts.clone(),
            custom_split_info,
        }
    }

    /// The generic split described by this record.
    pub fn file_split(&self) -> FileSplit {
        FileSplit::new(self.path.clone(), self.start, self.length).with_hosts(self.hosts.clone())
    }
}
