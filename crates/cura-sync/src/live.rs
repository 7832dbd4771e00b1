//! Objects the host currently has loaded

use cura_directive::{ObjectReference, SettingValue, SettingsMap};
use cura_fs::NormalizedPath;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Settings keys that turn a mesh into a modifier volume. Such meshes are
/// never printed, so they carry no extruder assignment.
pub const NON_PRINTING_MESH_KEYS: [&str; 4] =
    ["infill_mesh", "cutting_mesh", "support_mesh", "anti_overhang_mesh"];

const EXTRUDER_KEY: &str = "extruder";

/// Host-defined identity of a group of co-located objects.
///
/// Objects loaded from one export block share a group, and a regenerated
/// block holds exactly one group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GroupId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for GroupId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for GroupId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One loaded object: the file it came from, its group, its identity and a
/// snapshot of its current settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveObjectEntry {
    pub file: NormalizedPath,
    pub group: GroupId,
    pub object: ObjectReference,
    pub settings: SettingsMap,
}

impl LiveObjectEntry {
    pub fn new(
        file: impl Into<NormalizedPath>,
        group: impl Into<GroupId>,
        object: ObjectReference,
        settings: SettingsMap,
    ) -> Self {
        Self {
            file: file.into(),
            group: group.into(),
            object,
            settings,
        }
    }

    /// True when the settings mark this object as a modifier volume.
    pub fn is_non_printing(&self) -> bool {
        NON_PRINTING_MESH_KEYS
            .iter()
            .any(|key| self.settings.contains_key(key))
    }

    /// Record the extruder this object prints with.
    ///
    /// Non-printing meshes are returned unchanged, as are objects whose
    /// settings already name an extruder.
    pub fn with_extruder(mut self, extruder: impl Into<SettingValue>) -> Self {
        if self.is_non_printing() {
            return self;
        }
        if self.settings.insert(EXTRUDER_KEY, extruder).is_err() {
            tracing::debug!(object = %self.object, "Keeping existing extruder setting");
        }
        self
    }
}

/// A traversal over the host's loaded objects.
///
/// Implemented by the host's scene graph; slices and vectors of entries
/// implement it directly.
pub trait LiveObjects {
    /// Call `visit` once per loaded object, in a stable order.
    fn visit(&self, visit: &mut dyn FnMut(LiveObjectEntry));
}

impl LiveObjects for [LiveObjectEntry] {
    fn visit(&self, visit: &mut dyn FnMut(LiveObjectEntry)) {
        self.iter().cloned().for_each(visit);
    }
}

impl LiveObjects for Vec<LiveObjectEntry> {
    fn visit(&self, visit: &mut dyn FnMut(LiveObjectEntry)) {
        self.as_slice().visit(visit);
    }
}
