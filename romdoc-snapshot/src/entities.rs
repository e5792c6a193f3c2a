//! Entity snapshot drivers: platforms, base ROMs, games, developers, regions.
//!
//! Each driver lists one root table, resolves the active branch per row,
//! reshapes into a slug-keyed map, and writes one document. A failed
//! resolution downgrades that one record to `activeBranch: null`; a failed
//! listing aborts the driver.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use romdoc_core::model::{
    BaseRom, BaseRomBranch, Developer, Game, GameRomBranch, Platform, PlatformBranch, Region,
};
use romdoc_core::slugify;
use romdoc_store::{StoreClient, StoreError, select};

use crate::doc::{SourceInfo, write_document};
use crate::error::SnapshotError;
use crate::resolve;

// ── Platforms ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformRecord {
    pub id: String,
    pub name: Option<String>,
    pub slug: String,
    pub meta: Option<Value>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub active_branch: Option<PlatformBranchRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformBranchRecord {
    pub id: String,
    pub name: Option<String>,
    pub version: Option<String>,
    pub notes: Vec<Value>,
    pub addressing_modes: Option<Value>,
    pub instruction_set: Option<Value>,
    pub vectors: Option<Value>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<PlatformBranch> for PlatformBranchRecord {
    fn from(b: PlatformBranch) -> Self {
        Self {
            id: b.id,
            name: b.name,
            version: b.version,
            notes: b.notes.unwrap_or_default(),
            addressing_modes: b.addressing_modes,
            instruction_set: b.instruction_set,
            vectors: b.vectors,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct PlatformsDoc {
    source: SourceInfo,
    platforms: BTreeMap<String, PlatformRecord>,
}

/// Generate `platforms.json`. Returns the number of listed platforms.
pub async fn generate_platforms(
    client: &StoreClient,
    out_dir: &Path,
) -> Result<usize, SnapshotError> {
    let rows: Vec<Platform> = client.rows("Platform", &[select("*")]).await?;
    let total = rows.len();

    let mut platforms = BTreeMap::new();
    for p in rows {
        let branch = warn_on_error(
            resolve::active_platform_branch(client, &p.id).await,
            "platform",
            &p.id,
            p.name.as_deref(),
        );
        let record = PlatformRecord {
            slug: slugify(p.name.as_deref()),
            id: p.id,
            name: p.name,
            meta: p.meta,
            created_at: p.created_at,
            updated_at: p.updated_at,
            active_branch: branch.map(PlatformBranchRecord::from),
        };
        // Slug collisions: last-listed row wins.
        platforms.insert(record.slug.clone(), record);
    }

    let doc = PlatformsDoc {
        source: SourceInfo::table("Platform"),
        platforms,
    };
    write_document(out_dir, "platforms.json", &doc)?;
    Ok(total)
}

// ── Base ROMs ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseRomRecord {
    pub id: String,
    pub name: Option<String>,
    pub slug: String,
    pub game_id: Option<String>,
    pub game_rom_id: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub active_branch: Option<BaseRomBranchRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseRomBranchRecord {
    pub id: String,
    pub name: Option<String>,
    pub version: Option<String>,
    pub file_count: usize,
    pub game_rom_branch_id: Option<String>,
}

impl From<BaseRomBranch> for BaseRomBranchRecord {
    fn from(b: BaseRomBranch) -> Self {
        Self {
            file_count: b.file_count(),
            id: b.id,
            name: b.name,
            version: b.version,
            game_rom_branch_id: b.game_rom_branch_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BaseRomsDoc {
    source: SourceInfo,
    base_roms: BTreeMap<String, BaseRomRecord>,
}

/// Generate `baseroms.json`. Returns the number of listed base ROMs.
pub async fn generate_base_roms(
    client: &StoreClient,
    out_dir: &Path,
) -> Result<usize, SnapshotError> {
    let rows: Vec<BaseRom> = client.rows("BaseRom", &[select("*")]).await?;
    let total = rows.len();

    let mut base_roms = BTreeMap::new();
    for b in rows {
        let branch = warn_on_error(
            resolve::active_base_rom_branch(client, &b.id).await,
            "base ROM",
            &b.id,
            b.name.as_deref(),
        );
        let record = BaseRomRecord {
            slug: slugify(b.name.as_deref()),
            id: b.id,
            name: b.name,
            game_id: b.game_id,
            game_rom_id: b.game_rom_id,
            created_at: b.created_at,
            updated_at: b.updated_at,
            active_branch: branch.map(BaseRomBranchRecord::from),
        };
        base_roms.insert(record.slug.clone(), record);
    }

    let doc = BaseRomsDoc {
        source: SourceInfo::table("BaseRom"),
        base_roms,
    };
    write_document(out_dir, "baseroms.json", &doc)?;
    Ok(total)
}

// ── Games ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub id: String,
    pub name: Option<String>,
    pub slug: String,
    pub meta: Option<Value>,
    pub platform_id: Option<String>,
    pub developer_id: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub active_branch: Option<GameRomBranchSummary>,
}

/// Shallow summary of a game's reachable active `GameRomBranch`.
#[derive(Debug, Serialize)]
pub struct GameRomBranchSummary {
    pub id: String,
    pub name: Option<String>,
    pub version: Option<String>,
}

impl From<GameRomBranch> for GameRomBranchSummary {
    fn from(b: GameRomBranch) -> Self {
        Self {
            id: b.id,
            name: b.name,
            version: b.version,
        }
    }
}

#[derive(Debug, Serialize)]
struct GamesDoc {
    source: SourceInfo,
    games: BTreeMap<String, GameRecord>,
}

/// Generate `games.json`. Returns the number of listed games.
pub async fn generate_games(client: &StoreClient, out_dir: &Path) -> Result<usize, SnapshotError> {
    let rows: Vec<Game> = client.rows("Game", &[select("*")]).await?;
    let total = rows.len();

    let mut games = BTreeMap::new();
    for g in rows {
        let branch = warn_on_error(
            resolve::game_active_branch(client, &g.id).await,
            "game",
            &g.id,
            g.name.as_deref(),
        );
        let record = GameRecord {
            slug: slugify(g.name.as_deref()),
            id: g.id,
            name: g.name,
            meta: g.meta,
            platform_id: g.platform_id,
            developer_id: g.developer_id,
            created_at: g.created_at,
            updated_at: g.updated_at,
            active_branch: branch.map(GameRomBranchSummary::from),
        };
        games.insert(record.slug.clone(), record);
    }

    let doc = GamesDoc {
        source: SourceInfo::table("Game"),
        games,
    };
    write_document(out_dir, "games.json", &doc)?;
    Ok(total)
}

// ── Developers and regions ──────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRecord {
    pub id: String,
    pub name: Option<String>,
    pub slug: String,
    pub meta: Option<Value>,
    pub platform_id: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Serialize)]
struct DevelopersDoc {
    source: SourceInfo,
    developers: BTreeMap<String, LookupRecord>,
}

#[derive(Debug, Serialize)]
struct RegionsDoc {
    source: SourceInfo,
    regions: BTreeMap<String, LookupRecord>,
}

/// Generate `developers.json`. Returns the number of listed developers.
pub async fn generate_developers(
    client: &StoreClient,
    out_dir: &Path,
) -> Result<usize, SnapshotError> {
    let rows: Vec<Developer> = client.rows("Developer", &[select("*")]).await?;
    let total = rows.len();

    let mut developers = BTreeMap::new();
    for d in rows {
        let record = LookupRecord {
            slug: slugify(d.name.as_deref()),
            id: d.id,
            name: d.name,
            meta: d.meta,
            platform_id: d.platform_id,
            created_at: d.created_at,
            updated_at: d.updated_at,
        };
        developers.insert(record.slug.clone(), record);
    }

    let doc = DevelopersDoc {
        source: SourceInfo::table("Developer"),
        developers,
    };
    write_document(out_dir, "developers.json", &doc)?;
    Ok(total)
}

/// Generate `regions.json`. Returns the number of listed regions.
pub async fn generate_regions(
    client: &StoreClient,
    out_dir: &Path,
) -> Result<usize, SnapshotError> {
    let rows: Vec<Region> = client.rows("Region", &[select("*")]).await?;
    let total = rows.len();

    let mut regions = BTreeMap::new();
    for r in rows {
        let record = LookupRecord {
            slug: slugify(r.name.as_deref()),
            id: r.id,
            name: r.name,
            meta: r.meta,
            platform_id: r.platform_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        };
        regions.insert(record.slug.clone(), record);
    }

    let doc = RegionsDoc {
        source: SourceInfo::table("Region"),
        regions,
    };
    write_document(out_dir, "regions.json", &doc)?;
    Ok(total)
}

/// Run all five entity drivers.
pub async fn generate_entities(client: &StoreClient, out_dir: &Path) -> Result<(), SnapshotError> {
    let n = generate_platforms(client, out_dir).await?;
    log::info!("Wrote platforms.json ({n} platforms)");
    let n = generate_base_roms(client, out_dir).await?;
    log::info!("Wrote baseroms.json ({n} base ROMs)");
    let n = generate_games(client, out_dir).await?;
    log::info!("Wrote games.json ({n} games)");
    let n = generate_developers(client, out_dir).await?;
    log::info!("Wrote developers.json ({n} developers)");
    let n = generate_regions(client, out_dir).await?;
    log::info!("Wrote regions.json ({n} regions)");
    Ok(())
}

/// Per-record failure isolation: log a warning and keep the record with no
/// resolved branch.
fn warn_on_error<T>(
    result: Result<Option<T>, StoreError>,
    kind: &str,
    id: &str,
    name: Option<&str>,
) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(e) => {
            log::warn!(
                "Failed to resolve active branch for {kind} {} ({id}): {e}",
                name.unwrap_or("?"),
            );
            None
        }
    }
}
