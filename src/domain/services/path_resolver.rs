//! Parent-chain path reconstruction
//!
//! Walks `parent_ref` links collected during a scan to rebuild a `/`-joined
//! path for a record. Corrupted metadata can make this chain cycle back on
//! itself, so traversal is bounded by both a visited set and a depth limit
//! rather than trusting it to terminate naturally.

use std::collections::{HashMap, HashSet};

/// Maximum number of parent hops to follow before giving up. Chosen to be
/// far deeper than any real directory tree while still bounding a
/// maliciously or accidentally cyclic parent chain.
pub const MAX_PATH_DEPTH: usize = 32;

/// A lookup table from record number to `(parent_ref, name)`, built during
/// a single pass over the MFT.
pub struct PathResolver {
    names: HashMap<u64, (u64, String)>,
}

impl PathResolver {
    pub fn new() -> Self {
        Self {
            names: HashMap::new(),
        }
    }

    /// Records a record's parent and name for later path reconstruction.
    pub fn insert(&mut self, record_num: u64, parent_ref: u64, name: String) {
        self.names.insert(record_num, (parent_ref, name));
    }

    /// Reconstructs the path for `record_num`, or `None` if it has no
    /// recorded name at all.
    pub fn resolve(&self, record_num: u64) -> Option<String> {
        resolve_path(record_num, &self.names, MAX_PATH_DEPTH)
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Reconstructs a `/`-joined path for `record_num` by chaining `parent_ref`
/// lookups through `names`, stopping at the first missing parent, at a
/// self-referential parent (the volume root, conventionally record 5), at a
/// revisited record (a cycle), or after `depth_limit` hops.
pub fn resolve_path(
    record_num: u64,
    names: &HashMap<u64, (u64, String)>,
    depth_limit: usize,
) -> Option<String> {
    let mut parts = Vec::new();
    let mut visited = HashSet::new();
    let mut current = record_num;

    for _ in 0..depth_limit {
        if !visited.insert(current) {
            break;
        }
        let Some((parent, name)) = names.get(&current) else {
            break;
        };
        parts.push(name.clone());
        if *parent == current {
            break;
        }
        current = *parent;
    }

    if parts.is_empty() {
        None
    } else {
        parts.reverse();
        Some(parts.join("/"))
    }
}
