// src/metadata/raw_info.rs
use crate::error::{TdmsError, Result};
use crate::metadata::ObjectRawInfo;
use std::collections::BTreeMap;

/// Raw data layouts tracked across one pass over a file.
///
/// `all` holds the latest definition of every object path seen so far and is
/// never cleared. `current` holds the layouts active in the segment being
/// decoded; it is cleared by a new object list and otherwise carried over.
#[derive(Debug, Default, Clone)]
pub struct RawInfoMaps {
    all: BTreeMap<String, ObjectRawInfo>,
    current: BTreeMap<String, ObjectRawInfo>,
}

impl RawInfoMaps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_new_object_list(&mut self) {
        self.current.clear();
    }

    /// Record a layout defined by the current segment
    pub fn define(&mut self, info: ObjectRawInfo) {
        self.all.insert(info.path.clone(), info.clone());
        self.current.insert(info.path.clone(), info);
    }

    /// Make the last definition of `path` active again
    pub fn inherit(&mut self, path: &str) -> Result<ObjectRawInfo> {
        let info = self
            .all
            .get(path)
            .cloned()
            .ok_or_else(|| TdmsError::MissingInheritedDescriptor(path.to_string()))?;
        self.current.insert(path.to_string(), info.clone());
        Ok(info)
    }

    /// Layouts active in the current segment, ordered by path
    pub fn current(&self) -> &BTreeMap<String, ObjectRawInfo> {
        &self.current
    }

    pub fn all(&self) -> &BTreeMap<String, ObjectRawInfo> {
        &self.all
    }
}
