//! Schema documentation driver: fetch the schema text, parse it, and emit
//! `schema.json`.

use std::path::Path;

use serde::Serialize;

use romdoc_schema::{Model, parse_schema};
use romdoc_store::StoreClient;

use crate::doc::{SourceInfo, write_document};
use crate::error::SnapshotError;

#[derive(Debug, Serialize)]
struct SchemaDocOut {
    source: SourceInfo,
    models: Vec<Model>,
}

/// Generate `schema.json`. Returns the number of parsed models.
pub async fn generate_schema(client: &StoreClient, out_dir: &Path) -> Result<usize, SnapshotError> {
    let url = client.schema_url().to_string();
    log::info!("Downloading schema from {url}");

    let text = client.fetch_text(&url).await?;
    let parsed = parse_schema(&text);
    let total = parsed.models.len();

    let doc = SchemaDocOut {
        source: SourceInfo::url(url),
        models: parsed.models,
    };
    write_document(out_dir, "schema.json", &doc)?;
    Ok(total)
}
