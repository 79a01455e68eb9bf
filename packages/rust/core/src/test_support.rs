//! Converter test doubles shared by the unit tests in this crate.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

use customsplit_shared::{CustomSplitInfo, FileSplit};

use crate::CustomSplitConverter;

// ---------------------------------------------------------------------------
// ConverterX: a small delta-log format
// ---------------------------------------------------------------------------

pub(crate) const BASE_FILE_KEY: &str = "baseFile";
pub(crate) const DELTA_LOGS_KEY: &str = "deltaLogs";

/// Extension state carried by ConverterX splits.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct XSplitState {
    pub base_file: String,
    pub delta_logs: Vec<u32>,
}

/// Recognizes splits carrying [`XSplitState`] and payloads with a `baseFile` key.
pub(crate) struct ConverterX;

impl CustomSplitConverter for ConverterX {
    fn name(&self) -> &str {
        "converter-x"
    }

    fn extract_custom_split_info(&self, split: &FileSplit) -> Option<CustomSplitInfo> {
        let state = split.extension::<XSplitState>()?;
        let delta_logs = state
            .delta_logs
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",");

        Some(
            [
                (BASE_FILE_KEY, state.base_file.clone()),
                (DELTA_LOGS_KEY, delta_logs),
            ]
            .into_iter()
            .collect(),
        )
    }

    fn recreate_split_with_custom_info(
        &self,
        split: &FileSplit,
        info: &CustomSplitInfo,
    ) -> io::Result<Option<FileSplit>> {
        let Some(base_file) = info.get(BASE_FILE_KEY) else {
            return Ok(None);
        };

        let delta_logs = info
            .get(DELTA_LOGS_KEY)
            .unwrap_or_default()
            .split(',')
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<u32>().map_err(|e| {
                    io::Error::new(io::ErrorKind::InvalidData, format!("bad delta log {s:?}: {e}"))
                })
            })
            .collect::<io::Result<Vec<_>>>()?;

        Ok(Some(split.to_generic().with_extension(XSplitState {
            base_file: base_file.to_string(),
            delta_logs,
        })))
    }
}

/// The scenario's `xSplit`: `plain_split()` plus ConverterX state.
pub(crate) fn x_split() -> FileSplit {
    plain_split().with_extension(XSplitState {
        base_file: "/a/b.parquet".into(),
        delta_logs: vec![1, 2, 3],
    })
}

/// A generic split no converter recognizes.
pub(crate) fn plain_split() -> FileSplit {
    FileSplit::new("/a/b.parquet", 0, 4096).with_hosts(["node-1"])
}

pub(crate) fn x_info() -> CustomSplitInfo {
    [(BASE_FILE_KEY, "/a/b.parquet"), (DELTA_LOGS_KEY, "1,2,3")]
        .into_iter()
        .collect()
}

// ---------------------------------------------------------------------------
// ProbeConverter: counts calls
// ---------------------------------------------------------------------------

/// Extension marking which probe rebuilt a split.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ProbeMark(pub String);

/// Claims everything (or nothing) and counts how often it is asked.
pub(crate) struct ProbeConverter {
    name: String,
    claims: bool,
    extract_calls: AtomicUsize,
    recreate_calls: AtomicUsize,
}

impl ProbeConverter {
    pub(crate) fn claiming(name: &str) -> Self {
        Self::new(name, true)
    }

    pub(crate) fn declining(name: &str) -> Self {
        Self::new(name, false)
    }

    fn new(name: &str, claims: bool) -> Self {
        Self {
            name: name.to_string(),
            claims,
            extract_calls: AtomicUsize::new(0),
            recreate_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn extract_calls(&self) -> usize {
        self.extract_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn recreate_calls(&self) -> usize {
        self.recreate_calls.load(Ordering::SeqCst)
    }
}

impl CustomSplitConverter for ProbeConverter {
    fn name(&self) -> &str {
        &self.name
    }

    fn extract_custom_split_info(&self, _split: &FileSplit) -> Option<CustomSplitInfo> {
        self.extract_calls.fetch_add(1, Ordering::SeqCst);
        self.claims
            .then(|| [("probe", self.name.as_str())].into_iter().collect())
    }

    fn recreate_split_with_custom_info(
        &self,
        split: &FileSplit,
        _info: &CustomSplitInfo,
    ) -> io::Result<Option<FileSplit>> {
        self.recreate_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .claims
            .then(|| split.to_generic().with_extension(ProbeMark(self.name.clone()))))
    }
}

// ---------------------------------------------------------------------------
// FailingConverter: reconstruction always errors
// ---------------------------------------------------------------------------

/// Never recognizes a split; every reconstruction attempt fails.
pub(crate) struct FailingConverter {
    pub kind: io::ErrorKind,
    pub message: &'static str,
}

impl CustomSplitConverter for FailingConverter {
    fn name(&self) -> &str {
        "failing"
    }

    fn extract_custom_split_info(&self, _split: &FileSplit) -> Option<CustomSplitInfo> {
        None
    }

    fn recreate_split_with_custom_info(
        &self,
        _split: &FileSplit,
        _info: &CustomSplitInfo,
    ) -> io::Result<Option<FileSplit>> {
        Err(io::Error::new(self.kind, self.message))
    }
}
