//! Active-branch resolution across the entity hierarchies.
//!
//! Each function walks a fixed chain of single-hop lookups against the row
//! store, filtering branch tables by parent id and `isActive = true` and
//! taking the first row. A missing link anywhere in a chain nulls out the
//! downstream context without failing the whole resolution; only transport
//! and store errors propagate, and callers isolate those to the one root
//! entity being resolved.

use romdoc_core::model::{
    BaseRom, BaseRomBranch, Game, GameRom, GameRomBranch, Platform, PlatformBranch, Project,
    ProjectBranch, Region,
};
use romdoc_store::{StoreClient, StoreError, active_filter, eq_filter, select};

const PLATFORM_BRANCH_COLS: &str =
    "id,name,version,isActive,notes,addressingModes,instructionSet,vectors,createdAt,updatedAt";
const BASE_ROM_BRANCH_COLS: &str =
    "id,name,version,isActive,notes,baseRomId,gameRomBranchId,fileCrcs,createdAt,updatedAt";
const GAME_ROM_BRANCH_COLS: &str =
    "id,name,version,isActive,gameRomId,platformBranchId,createdAt,updatedAt";
const PROJECT_BRANCH_COLS: &str =
    "id,name,version,isActive,notes,projectId,baseRomBranchId,fileCrcs,modules,createdAt,updatedAt";

/// The active `PlatformBranch` for a platform, if any.
pub async fn active_platform_branch(
    client: &StoreClient,
    platform_id: &str,
) -> Result<Option<PlatformBranch>, StoreError> {
    client
        .first(
            "PlatformBranch",
            &[
                eq_filter("platformId", platform_id),
                active_filter(),
                select(PLATFORM_BRANCH_COLS),
            ],
        )
        .await
}

/// The active `BaseRomBranch` for a base ROM, if any.
pub async fn active_base_rom_branch(
    client: &StoreClient,
    base_rom_id: &str,
) -> Result<Option<BaseRomBranch>, StoreError> {
    client
        .first(
            "BaseRomBranch",
            &[
                eq_filter("baseRomId", base_rom_id),
                active_filter(),
                select(BASE_ROM_BRANCH_COLS),
            ],
        )
        .await
}

/// Best-effort active `GameRomBranch` summary for a game.
///
/// A game has no direct branch table; the reachable branch goes through any
/// base ROM of the game, that base ROM's active branch, and its
/// `gameRomBranchId`. Any missing hop ends the walk with `None`.
pub async fn game_active_branch(
    client: &StoreClient,
    game_id: &str,
) -> Result<Option<GameRomBranch>, StoreError> {
    let Some(base_rom) = client
        .first::<BaseRom>("BaseRom", &[eq_filter("gameId", game_id), select("id")])
        .await?
    else {
        return Ok(None);
    };

    let Some(branch) = client
        .first::<BaseRomBranch>(
            "BaseRomBranch",
            &[
                eq_filter("baseRomId", &base_rom.id),
                active_filter(),
                select("id,gameRomBranchId"),
            ],
        )
        .await?
    else {
        return Ok(None);
    };

    let Some(grb_id) = branch.game_rom_branch_id else {
        return Ok(None);
    };

    client
        .first(
            "GameRomBranch",
            &[
                eq_filter("id", &grb_id),
                select("id,name,version,isActive,createdAt,updatedAt"),
            ],
        )
        .await
}

/// Fully resolved context for a project's active branch.
///
/// Fields further down the chain are `None` whenever an upstream link was
/// missing; the branch itself is always present.
#[derive(Debug)]
pub struct ResolvedProjectBranch {
    pub branch: ProjectBranch,
    pub base_rom_branch: Option<BaseRomBranch>,
    pub game_rom_branch: Option<GameRomBranch>,
    pub game: Option<Game>,
    pub region: Option<Region>,
    pub platform_branch: Option<PlatformBranch>,
    pub platform: Option<Platform>,
}

/// Resolve a project's active branch and its full dependent context:
/// ProjectBranch → BaseRomBranch → GameRomBranch → GameRom → Game/Region,
/// and GameRomBranch → PlatformBranch → Platform.
pub async fn project_active_branch(
    client: &StoreClient,
    project_id: &str,
) -> Result<Option<ResolvedProjectBranch>, StoreError> {
    let Some(branch) = client
        .first::<ProjectBranch>(
            "ProjectBranch",
            &[
                eq_filter("projectId", project_id),
                active_filter(),
                select(PROJECT_BRANCH_COLS),
            ],
        )
        .await?
    else {
        return Ok(None);
    };

    let base_rom_branch = match &branch.base_rom_branch_id {
        Some(id) => {
            client
                .first::<BaseRomBranch>(
                    "BaseRomBranch",
                    &[eq_filter("id", id), select(BASE_ROM_BRANCH_COLS)],
                )
                .await?
        }
        None => None,
    };

    let game_rom_branch = match base_rom_branch
        .as_ref()
        .and_then(|b| b.game_rom_branch_id.as_deref())
    {
        Some(id) => {
            client
                .first::<GameRomBranch>(
                    "GameRomBranch",
                    &[eq_filter("id", id), select(GAME_ROM_BRANCH_COLS)],
                )
                .await?
        }
        None => None,
    };

    let game_rom = match game_rom_branch
        .as_ref()
        .and_then(|b| b.game_rom_id.as_deref())
    {
        Some(id) => {
            client
                .first::<GameRom>("GameRom", &[eq_filter("id", id), select("id,crc,gameId,regionId")])
                .await?
        }
        None => None,
    };

    let game = match game_rom.as_ref().and_then(|r| r.game_id.as_deref()) {
        Some(id) => {
            client
                .first::<Game>("Game", &[eq_filter("id", id), select("id,name")])
                .await?
        }
        None => None,
    };

    let region = match game_rom.as_ref().and_then(|r| r.region_id.as_deref()) {
        Some(id) => {
            client
                .first::<Region>("Region", &[eq_filter("id", id), select("id,name")])
                .await?
        }
        None => None,
    };

    let platform_branch = match game_rom_branch
        .as_ref()
        .and_then(|b| b.platform_branch_id.as_deref())
    {
        Some(id) => {
            client
                .first::<PlatformBranch>(
                    "PlatformBranch",
                    &[eq_filter("id", id), select("id,name,version,isActive,notes,platformId")],
                )
                .await?
        }
        None => None,
    };

    let platform = match platform_branch
        .as_ref()
        .and_then(|b| b.platform_id.as_deref())
    {
        Some(id) => {
            client
                .first::<Platform>("Platform", &[eq_filter("id", id), select("id,name")])
                .await?
        }
        None => None,
    };

    Ok(Some(ResolvedProjectBranch {
        branch,
        base_rom_branch,
        game_rom_branch,
        game,
        region,
        platform_branch,
        platform,
    }))
}

/// Platform/game/region context for one `GameRomBranch`.
#[derive(Debug, Default)]
pub struct GameRomContext {
    pub game: Option<Game>,
    pub region: Option<Region>,
    pub platform: Option<Platform>,
}

/// Resolve the naming context around a game-ROM branch:
/// GameRom → Game/Region, PlatformBranch → Platform.
pub async fn game_rom_context(
    client: &StoreClient,
    branch: &GameRomBranch,
) -> Result<GameRomContext, StoreError> {
    let mut ctx = GameRomContext::default();

    let game_rom = match branch.game_rom_id.as_deref() {
        Some(id) => {
            client
                .first::<GameRom>("GameRom", &[eq_filter("id", id), select("id,crc,gameId,regionId")])
                .await?
        }
        None => None,
    };

    if let Some(id) = game_rom.as_ref().and_then(|r| r.game_id.as_deref()) {
        ctx.game = client
            .first("Game", &[eq_filter("id", id), select("id,name")])
            .await?;
    }
    if let Some(id) = game_rom.as_ref().and_then(|r| r.region_id.as_deref()) {
        ctx.region = client
            .first("Region", &[eq_filter("id", id), select("id,name")])
            .await?;
    }

    let platform_branch = match branch.platform_branch_id.as_deref() {
        Some(id) => {
            client
                .first::<PlatformBranch>(
                    "PlatformBranch",
                    &[eq_filter("id", id), select("id,name,platformId")],
                )
                .await?
        }
        None => None,
    };

    if let Some(id) = platform_branch
        .as_ref()
        .and_then(|b| b.platform_id.as_deref())
    {
        ctx.platform = client
            .first("Platform", &[eq_filter("id", id), select("id,name")])
            .await?;
    }

    Ok(ctx)
}
