//! Row types for the remote PostgREST store.
//!
//! Every column except `id` is optional with a serde default so narrow
//! `select=` projections (and rows with null columns) deserialize cleanly.
//! CPU/layout payloads (`addressingModes`, `coplib`, `blocks`, ...) are
//! opaque to this system and carried as raw JSON values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A console/computer platform (e.g., SNES).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub meta: Option<Value>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A versioned snapshot of a platform's CPU encoding rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformBranch {
    pub id: String,
    #[serde(default)]
    pub platform_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub notes: Option<Vec<Value>>,
    #[serde(default)]
    pub addressing_modes: Option<Value>,
    #[serde(default)]
    pub instruction_set: Option<Value>,
    #[serde(default)]
    pub vectors: Option<Value>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A game title, tied to a platform and optionally a developer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub meta: Option<Value>,
    #[serde(default)]
    pub platform_id: Option<String>,
    #[serde(default)]
    pub developer_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A concrete ROM dump: one game in one region.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRom {
    pub id: String,
    #[serde(default)]
    pub crc: Option<Value>,
    #[serde(default)]
    pub game_id: Option<String>,
    #[serde(default)]
    pub region_id: Option<String>,
}

/// A versioned technical description of a ROM: file layout, block layout,
/// fixups, and type definitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRomBranch {
    pub id: String,
    #[serde(default)]
    pub game_rom_id: Option<String>,
    #[serde(default)]
    pub platform_branch_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub coplib: Option<Value>,
    #[serde(default)]
    pub config: Option<Value>,
    /// File key -> `{location, size, type}` (values tolerated in any shape).
    #[serde(default)]
    pub files: Option<BTreeMap<String, Value>>,
    /// Block name -> `{parts: {partName: {location, size, order?}}}`.
    #[serde(default)]
    pub blocks: Option<BTreeMap<String, Value>>,
    #[serde(default)]
    pub fixups: Option<Value>,
    #[serde(default)]
    pub types: Option<Value>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// An unmodified reference ROM a project builds against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseRom {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub game_id: Option<String>,
    #[serde(default)]
    pub game_rom_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A versioned snapshot of a base ROM's extracted file set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseRomBranch {
    pub id: String,
    #[serde(default)]
    pub base_rom_id: Option<String>,
    #[serde(default)]
    pub game_rom_branch_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub notes: Option<Vec<Value>>,
    #[serde(default)]
    pub file_crcs: Option<Value>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl BaseRomBranch {
    /// Number of files tracked by this branch. Absent or non-array
    /// `fileCrcs` counts as zero.
    pub fn file_count(&self) -> usize {
        self.file_crcs
            .as_ref()
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }
}

/// A modding project targeting one base ROM.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub meta: Option<Value>,
    #[serde(default)]
    pub game_id: Option<String>,
    #[serde(default)]
    pub base_rom_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A versioned snapshot of a project's configuration and module set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBranch {
    pub id: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub base_rom_branch_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub notes: Option<Vec<Value>>,
    #[serde(default)]
    pub file_crcs: Option<Value>,
    /// Configuration option groups, opaque except for each module's name.
    #[serde(default)]
    pub modules: Option<Vec<Value>>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl ProjectBranch {
    /// Number of files tracked by this branch (see [`BaseRomBranch::file_count`]).
    pub fn file_count(&self) -> usize {
        self.file_crcs
            .as_ref()
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }
}

/// A game developer lookup row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Developer {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub meta: Option<Value>,
    #[serde(default)]
    pub platform_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A release-region lookup row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub meta: Option<Value>,
    #[serde(default)]
    pub platform_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_select_deserializes() {
        let row: BaseRom = serde_json::from_str(r#"{"id":"br-1"}"#).unwrap();
        assert_eq!(row.id, "br-1");
        assert!(row.name.is_none());
    }

    #[test]
    fn file_count_tolerates_missing_and_non_array() {
        let branch: BaseRomBranch = serde_json::from_str(r#"{"id":"b1"}"#).unwrap();
        assert_eq!(branch.file_count(), 0);

        let branch: BaseRomBranch =
            serde_json::from_str(r#"{"id":"b2","fileCrcs":{"not":"an array"}}"#).unwrap();
        assert_eq!(branch.file_count(), 0);

        let branch: BaseRomBranch =
            serde_json::from_str(r#"{"id":"b3","fileCrcs":[1,2,3]}"#).unwrap();
        assert_eq!(branch.file_count(), 3);
    }

    #[test]
    fn unknown_columns_are_ignored() {
        let row: Platform =
            serde_json::from_str(r#"{"id":"p1","name":"SNES","extraColumn":42}"#).unwrap();
        assert_eq!(row.name.as_deref(), Some("SNES"));
    }
}
