pub mod doc;
pub mod entities;
pub mod error;
pub mod gameroms;
pub mod projects;
pub mod resolve;
pub mod schema_docs;

pub use doc::{SourceInfo, write_document};
pub use entities::{
    generate_base_roms, generate_developers, generate_entities, generate_games,
    generate_platforms, generate_regions,
};
pub use error::SnapshotError;
pub use gameroms::generate_gameroms;
pub use projects::generate_projects;
pub use schema_docs::generate_schema;
