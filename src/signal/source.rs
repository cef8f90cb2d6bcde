use chrono::NaiveDateTime;

use super::{Signal, SourceError};

/// Optional inclusive bounds of a range selection.
///
/// `None` means "no bound" on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SelectionBounds {
    /// First timestamp to include
    pub start_time: Option<NaiveDateTime>,
    /// Last timestamp to include
    pub end_time: Option<NaiveDateTime>,
    /// First distance to include
    pub start_distance: Option<f64>,
    /// Last distance to include
    pub end_distance: Option<f64>,
}

/// Provider of range-bounded sample blocks.
///
/// The on-disk storage engine lives behind this trait; the pipeline only ever
/// asks for a bounded block of one addressed array.
pub trait SignalSource {
    /// Every addressable array identifier, in source order
    fn codes(&self) -> Vec<String>;

    /// Read the block of `source_id` inside `bounds`.
    ///
    /// Fails with [`SourceError::EmptySelection`] when no sample matches.
    fn select(&self, source_id: &str, bounds: &SelectionBounds) -> Result<Signal, SourceError>;
}

/// In-memory data array
#[derive(Debug, Clone, PartialEq)]
pub struct DataArray {
    signal: Signal,
}

impl DataArray {
    /// Wrap a signal as a selectable array
    pub fn new(signal: Signal) -> Self {
        Self { signal }
    }

    /// The full, unselected signal
    pub fn signal(&self) -> &Signal {
        &self.signal
    }

    /// Cut the block inside `bounds`
    pub fn select(&self, source_id: &str, bounds: &SelectionBounds) -> Result<Signal, SourceError> {
        let times = self
            .signal
            .time()
            .index_range(bounds.start_time, bounds.end_time);
        let distances = self
            .signal
            .distance()
            .index_range(bounds.start_distance, bounds.end_distance);
        if times.is_empty() || distances.is_empty() {
            return Err(SourceError::EmptySelection {
                source_id: source_id.to_string(),
            });
        }
        Ok(self.signal.slice(times, distances))
    }
}

/// Hierarchical collection of data arrays
#[derive(Debug, Clone, PartialEq)]
pub enum DataNode {
    /// A single leaf array
    Array(DataArray),
    /// Named children, addressed by key (insertion order is kept)
    Mapping(Vec<(String, DataNode)>),
    /// Unnamed children sharing the parent's address
    Sequence(Vec<DataNode>),
}

impl DataNode {
    /// Leaf node from a signal
    pub fn array(signal: Signal) -> Self {
        DataNode::Array(DataArray::new(signal))
    }

    /// Mapping node from `(key, child)` pairs
    pub fn mapping<K: Into<String>>(entries: impl IntoIterator<Item = (K, DataNode)>) -> Self {
        DataNode::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Resolve a dotted path to exactly one leaf array.
    ///
    /// The empty path addresses the node itself. Paths ending on a mapping are
    /// rejected, and so are paths that reach several leaves through a sequence.
    pub fn resolve(&self, path: &str) -> Result<&DataArray, SourceError> {
        let keys: Vec<&str> = if path.is_empty() {
            Vec::new()
        } else {
            path.split('.').collect()
        };

        let mut leaves = Vec::new();
        self.collect_leaves(path, &keys, &mut leaves)?;

        match leaves.len() {
            0 => Err(SourceError::UnknownSource(path.to_string())),
            1 => Ok(leaves[0]),
            n => Err(SourceError::AmbiguousPath {
                path: path.to_string(),
                leaves: n,
            }),
        }
    }

    fn collect_leaves<'a>(
        &'a self,
        path: &str,
        keys: &[&str],
        out: &mut Vec<&'a DataArray>,
    ) -> Result<(), SourceError> {
        match self {
            DataNode::Array(array) => {
                if keys.is_empty() {
                    out.push(array);
                }
            }
            DataNode::Mapping(entries) => {
                let Some((key, rest)) = keys.split_first() else {
                    return Err(SourceError::NotALeaf(path.to_string()));
                };
                if let Some((_, child)) = entries.iter().find(|(name, _)| name == key) {
                    child.collect_leaves(path, rest, out)?;
                }
            }
            DataNode::Sequence(items) => {
                for item in items {
                    item.collect_leaves(path, keys, out)?;
                }
            }
        }
        Ok(())
    }

    fn collect_codes(&self, name: Option<&str>, out: &mut Vec<String>) {
        match self {
            DataNode::Array(_) => out.push(name.unwrap_or_default().to_string()),
            DataNode::Sequence(items) => {
                for item in items {
                    item.collect_codes(name, out);
                }
            }
            DataNode::Mapping(entries) => {
                for (key, child) in entries {
                    let code = match name {
                        Some(parent) if !parent.is_empty() => format!("{}.{}", parent, key),
                        _ => key.clone(),
                    };
                    child.collect_codes(Some(&code), out);
                }
            }
        }
    }
}

impl SignalSource for DataNode {
    fn codes(&self) -> Vec<String> {
        let mut codes = Vec::new();
        self.collect_codes(None, &mut codes);

        let mut unique = Vec::with_capacity(codes.len());
        for code in codes {
            if !unique.contains(&code) {
                unique.push(code);
            }
        }
        unique
    }

    fn select(&self, source_id: &str, bounds: &SelectionBounds) -> Result<Signal, SourceError> {
        self.resolve(source_id)?.select(source_id, bounds)
    }
}
