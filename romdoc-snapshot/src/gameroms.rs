//! Game-ROM branch snapshot driver.
//!
//! Active game-ROM branches are discovered through active base-ROM branches
//! (deduplicated, first-seen order). Each branch is enriched with its
//! platform/game/region naming context and its file and block layouts are
//! reshaped into address tables; the raw layout maps are kept alongside.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use romdoc_core::model::{BaseRomBranch, GameRomBranch};
use romdoc_core::slug::slugify;
use romdoc_core::{block_range, file_range, to_hex};
use romdoc_store::{StoreClient, StoreError, active_filter, eq_filter, select};

use crate::doc::{SourceInfo, write_document};
use crate::error::SnapshotError;
use crate::resolve;

/// Entity reference with a derived slug; id/name may be unknown when a hop
/// in the naming chain was missing.
#[derive(Debug, Serialize)]
pub struct SlugRef {
    pub id: Option<String>,
    pub name: Option<String>,
    pub slug: String,
}

impl SlugRef {
    fn new(id: Option<String>, name: Option<String>) -> Self {
        Self {
            slug: slugify(name.as_deref()),
            id,
            name,
        }
    }
}

/// One row of the derived files table, sorted by start offset.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRow {
    pub key: String,
    pub start_hex: Option<String>,
    pub end_hex: Option<String>,
    #[serde(rename = "type")]
    pub file_type: Option<String>,
}

/// Address range covered by one named block (min part start, max part end).
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRow {
    pub key: String,
    pub start_hex: Option<String>,
    pub end_hex: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRomBranchDetail {
    pub id: String,
    pub name: Option<String>,
    pub version: Option<String>,
    pub coplib: Option<Value>,
    pub config: Option<Value>,
    pub blocks: Option<BTreeMap<String, Value>>,
    pub blocks_list: Vec<BlockRow>,
    pub fixups: Option<Value>,
    pub types: Option<Value>,
    pub files: Vec<FileRow>,
    pub files_raw: Option<BTreeMap<String, Value>>,
}

/// One entry of the gameroms document.
#[derive(Debug, Serialize)]
pub struct GameRomEntry {
    pub platform: SlugRef,
    pub game: SlugRef,
    pub region: SlugRef,
    /// Routing path for the rendered page.
    pub path: String,
    pub branch: GameRomBranchDetail,
}

#[derive(Debug, Serialize)]
struct GameRomsDoc {
    source: SourceInfo,
    entries: Vec<GameRomEntry>,
}

const GAME_ROM_BRANCH_COLS: &str =
    "id,name,version,isActive,coplib,config,files,blocks,fixups,types,gameRomId,platformBranchId";

/// Generate `gameroms.json`. Returns the number of emitted entries.
pub async fn generate_gameroms(
    client: &StoreClient,
    out_dir: &Path,
) -> Result<usize, SnapshotError> {
    let ids = list_active_branch_ids(client).await?;
    log::info!("Enriching {} active game-ROM branches", ids.len());

    let mut entries = Vec::new();
    for id in &ids {
        match enrich_branch(client, id).await {
            Ok(Some(entry)) => entries.push(entry),
            Ok(None) => log::warn!("Game-ROM branch {id} no longer exists, skipping"),
            Err(e) => log::warn!("Failed to enrich game-ROM branch {id}: {e}"),
        }
    }

    let total = entries.len();
    let doc = GameRomsDoc {
        source: SourceInfo::table("GameRomBranch"),
        entries,
    };
    write_document(out_dir, "gameroms.json", &doc)?;
    Ok(total)
}

/// Game-ROM branch ids referenced by active base-ROM branches, deduplicated
/// in first-seen order.
async fn list_active_branch_ids(client: &StoreClient) -> Result<Vec<String>, StoreError> {
    let rows: Vec<BaseRomBranch> = client
        .rows(
            "BaseRomBranch",
            &[active_filter(), select("id,gameRomBranchId")],
        )
        .await?;

    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for row in rows {
        if let Some(id) = row.game_rom_branch_id {
            if seen.insert(id.clone()) {
                ids.push(id);
            }
        }
    }
    Ok(ids)
}

async fn enrich_branch(
    client: &StoreClient,
    branch_id: &str,
) -> Result<Option<GameRomEntry>, StoreError> {
    let Some(branch) = client
        .first::<GameRomBranch>(
            "GameRomBranch",
            &[eq_filter("id", branch_id), select(GAME_ROM_BRANCH_COLS)],
        )
        .await?
    else {
        return Ok(None);
    };

    let ctx = resolve::game_rom_context(client, &branch).await?;

    let platform = SlugRef::new(
        ctx.platform.as_ref().map(|p| p.id.clone()),
        ctx.platform.and_then(|p| p.name),
    );
    let game = SlugRef::new(
        ctx.game.as_ref().map(|g| g.id.clone()),
        ctx.game.and_then(|g| g.name),
    );
    let region = SlugRef::new(
        ctx.region.as_ref().map(|r| r.id.clone()),
        ctx.region.and_then(|r| r.name),
    );
    let path = format!("games/{}/{}/{}", platform.slug, game.slug, region.slug);

    let files = branch.files.as_ref().map(files_table).unwrap_or_default();
    let blocks_list = branch.blocks.as_ref().map(blocks_table).unwrap_or_default();

    Ok(Some(GameRomEntry {
        platform,
        game,
        region,
        path,
        branch: GameRomBranchDetail {
            id: branch.id,
            name: branch.name,
            version: branch.version,
            coplib: branch.coplib,
            config: branch.config,
            blocks: branch.blocks,
            blocks_list,
            fixups: branch.fixups,
            types: branch.types,
            files,
            files_raw: branch.files,
        },
    }))
}

// ── Layout reshaping ────────────────────────────────────────────────────────

/// Read a numeric field from a loosely-typed layout value. Numbers are taken
/// as-is; numeric strings are tolerated; everything else is `None`.
fn num_field(value: &Value, key: &str) -> Option<f64> {
    match value.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value.get(key)?.as_str().map(str::to_string)
}

/// Derive the files table: one row per file key with start/end hex addresses,
/// sorted ascending by start offset (unknown starts last).
fn files_table(files: &BTreeMap<String, Value>) -> Vec<FileRow> {
    let mut rows: Vec<(f64, FileRow)> = files
        .iter()
        .map(|(key, value)| {
            let (start, end) = file_range(num_field(value, "location"), num_field(value, "size"));
            let row = FileRow {
                key: key.clone(),
                start_hex: to_hex(start),
                end_hex: to_hex(end),
                file_type: str_field(value, "type"),
            };
            (start.unwrap_or(f64::INFINITY), row)
        })
        .collect();

    rows.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    rows.into_iter().map(|(_, row)| row).collect()
}

/// Derive the block ranges: per block, the minimum part start and maximum
/// part end across all named parts. Blocks with no finite offsets yield null
/// bounds.
fn blocks_table(blocks: &BTreeMap<String, Value>) -> Vec<BlockRow> {
    blocks
        .iter()
        .map(|(key, value)| {
            let parts = value
                .get("parts")
                .and_then(Value::as_object)
                .map(|parts| {
                    parts
                        .values()
                        .map(|part| (num_field(part, "location"), num_field(part, "size")))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();

            let (start, end) = block_range(parts);
            BlockRow {
                key: key.clone(),
                start_hex: to_hex(start),
                end_hex: to_hex(end),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> BTreeMap<String, Value> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn files_table_derives_hex_range() {
        let files = map(json!({
            "main": {"location": 100, "size": 16, "type": "Asm"},
        }));
        let rows = files_table(&files);
        assert_eq!(rows[0].start_hex.as_deref(), Some("0x64"));
        assert_eq!(rows[0].end_hex.as_deref(), Some("0x73"));
        assert_eq!(rows[0].file_type.as_deref(), Some("Asm"));
    }

    #[test]
    fn files_table_sorts_by_start_with_unknown_last() {
        let files = map(json!({
            "a": {"location": 512, "size": 4},
            "b": {"location": 16, "size": 4},
            "c": {"size": 4},
        }));
        let rows = files_table(&files);
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn files_table_degrades_bad_numbers_to_null() {
        let files = map(json!({
            "x": {"location": 100, "size": "oops"},
            "y": {"location": null, "size": 8},
            "z": "not an object",
        }));
        let rows = files_table(&files);

        let x = rows.iter().find(|r| r.key == "x").unwrap();
        assert_eq!(x.start_hex.as_deref(), Some("0x64"));
        assert_eq!(x.end_hex, None);

        let y = rows.iter().find(|r| r.key == "y").unwrap();
        assert_eq!(y.start_hex, None);
        assert_eq!(y.end_hex, None);

        let z = rows.iter().find(|r| r.key == "z").unwrap();
        assert_eq!(z.start_hex, None);
        assert_eq!(z.file_type, None);
    }

    #[test]
    fn files_table_accepts_numeric_strings() {
        let files = map(json!({
            "s": {"location": "64", "size": "4"},
        }));
        let rows = files_table(&files);
        assert_eq!(rows[0].start_hex.as_deref(), Some("0x40"));
        assert_eq!(rows[0].end_hex.as_deref(), Some("0x43"));
    }

    #[test]
    fn blocks_table_folds_part_ranges() {
        let blocks = map(json!({
            "scene": {"parts": {
                "a": {"location": 10, "size": 5},
                "b": {"location": 50, "size": 10},
            }},
        }));
        let rows = blocks_table(&blocks);
        assert_eq!(rows[0].start_hex.as_deref(), Some("0xA"));
        assert_eq!(rows[0].end_hex.as_deref(), Some("0x3B"));
    }

    #[test]
    fn blocks_table_without_finite_offsets_is_null() {
        let blocks = map(json!({
            "empty": {"parts": {}},
            "partless": {},
            "bad": {"parts": {"p": {"size": "?"}}},
        }));
        for row in blocks_table(&blocks) {
            assert_eq!(row.start_hex, None, "block {}", row.key);
            assert_eq!(row.end_hex, None, "block {}", row.key);
        }
    }
}
