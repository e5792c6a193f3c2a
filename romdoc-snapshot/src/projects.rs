//! Project snapshot driver.
//!
//! Projects are listed newest-first and each is enriched with its active
//! branch resolved across the full chain down to the platform. The output is
//! an array (not a slug map): distinct projects with colliding names must
//! both survive in the listing.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use romdoc_core::model::Project;
use romdoc_core::slug::slugify;
use romdoc_store::{StoreClient, select};

use crate::doc::{SourceInfo, write_document};
use crate::error::SnapshotError;
use crate::resolve::{self, ResolvedProjectBranch};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: String,
    pub name: Option<String>,
    pub slug: String,
    pub meta: Option<Value>,
    pub game_id: Option<String>,
    pub base_rom_id: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub active_branch: Option<ProjectBranchDetail>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBranchDetail {
    pub id: String,
    pub name: Option<String>,
    pub version: Option<String>,
    /// Module payloads passed through with a derived `slug` added to each.
    pub modules: Vec<Value>,
    pub file_count: usize,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub base_rom_branch: Option<BaseRomBranchSummary>,
    pub game_rom_branch: Option<GameRomBranchContext>,
    pub platform_branch: Option<PlatformBranchContext>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseRomBranchSummary {
    pub id: String,
    pub name: Option<String>,
    pub version: Option<String>,
    pub file_count: usize,
}

#[derive(Debug, Serialize)]
pub struct NamedRef {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GameRomBranchContext {
    pub id: String,
    pub name: Option<String>,
    pub version: Option<String>,
    pub game: Option<NamedRef>,
    pub region: Option<NamedRef>,
}

#[derive(Debug, Serialize)]
pub struct PlatformBranchContext {
    pub id: String,
    pub name: Option<String>,
    pub version: Option<String>,
    pub platform: Option<NamedRef>,
}

#[derive(Debug, Serialize)]
struct ProjectsDoc {
    source: SourceInfo,
    projects: Vec<ProjectRecord>,
}

/// Generate `projects.json`. Returns the number of listed projects.
pub async fn generate_projects(
    client: &StoreClient,
    out_dir: &Path,
) -> Result<usize, SnapshotError> {
    let source_url = client.table_url("Project");
    let rows: Vec<Project> = client
        .rows(
            "Project",
            &[select("*"), ("order", "updatedAt.desc".to_string())],
        )
        .await?;
    log::info!("Enriching {} projects with active branches", rows.len());

    let mut projects = Vec::with_capacity(rows.len());
    for p in rows {
        let resolved = match resolve::project_active_branch(client, &p.id).await {
            Ok(r) => r,
            Err(e) => {
                log::warn!(
                    "Failed to resolve active branch for project {} ({}): {e}",
                    p.name.as_deref().unwrap_or("?"),
                    p.id,
                );
                None
            }
        };

        projects.push(ProjectRecord {
            slug: slugify(p.name.as_deref()),
            id: p.id,
            name: p.name,
            meta: p.meta,
            game_id: p.game_id,
            base_rom_id: p.base_rom_id,
            created_at: p.created_at,
            updated_at: p.updated_at,
            active_branch: resolved.map(branch_detail),
        });
    }

    let total = projects.len();
    let doc = ProjectsDoc {
        source: SourceInfo::url(source_url),
        projects,
    };
    write_document(out_dir, "projects.json", &doc)?;
    Ok(total)
}

fn branch_detail(resolved: ResolvedProjectBranch) -> ProjectBranchDetail {
    let ResolvedProjectBranch {
        branch,
        base_rom_branch,
        game_rom_branch,
        game,
        region,
        platform_branch,
        platform,
    } = resolved;

    let file_count = branch.file_count();
    let modules = branch
        .modules
        .as_deref()
        .map(modules_with_slugs)
        .unwrap_or_default();

    ProjectBranchDetail {
        id: branch.id,
        name: branch.name,
        version: branch.version,
        modules,
        file_count,
        created_at: branch.created_at,
        updated_at: branch.updated_at,
        base_rom_branch: base_rom_branch.map(|b| BaseRomBranchSummary {
            file_count: b.file_count(),
            id: b.id,
            name: b.name,
            version: b.version,
        }),
        game_rom_branch: game_rom_branch.map(|b| GameRomBranchContext {
            id: b.id,
            name: b.name,
            version: b.version,
            game: game.map(|g| NamedRef {
                id: g.id,
                name: g.name,
            }),
            region: region.map(|r| NamedRef {
                id: r.id,
                name: r.name,
            }),
        }),
        platform_branch: platform_branch.map(|b| PlatformBranchContext {
            id: b.id,
            name: b.name,
            version: b.version,
            platform: platform.map(|p| NamedRef {
                id: p.id,
                name: p.name,
            }),
        }),
    }
}

/// Clone each module payload and add a `slug` derived from its `name`, so
/// the renderer can route module pages without recomputing slugs.
fn modules_with_slugs(modules: &[Value]) -> Vec<Value> {
    modules
        .iter()
        .map(|module| {
            let mut module = module.clone();
            if let Value::Object(obj) = &mut module {
                let slug = slugify(obj.get("name").and_then(Value::as_str));
                obj.insert("slug".to_string(), Value::String(slug));
            }
            module
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn modules_get_slugs() {
        let modules = vec![
            json!({"name": "Text Speed", "options": []}),
            json!({"name": null}),
            json!("opaque"),
        ];
        let out = modules_with_slugs(&modules);

        assert_eq!(out[0]["slug"], "text-speed");
        assert_eq!(out[0]["name"], "Text Speed");
        assert_eq!(out[1]["slug"], "");
        assert_eq!(out[2], json!("opaque"));
    }
}
