pub mod model;
pub mod parser;

pub use model::{Field, FieldAttributes, FieldGroup, Model, Relation, SchemaDoc};
pub use parser::parse_schema;
