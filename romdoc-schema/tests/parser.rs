use romdoc_schema::parse_schema;

const SCHEMA: &str = r#"
// Platform hierarchy
model Platform {
  id        String           @id @default(dbgenerated("gen_random_uuid()"))
  name      String           @unique
  meta      Json?
  branches  PlatformBranch[]
  createdAt DateTime         @default(now())
  updatedAt DateTime         @updatedAt

  @@index([name])
}

model PlatformBranch {
  id         String   @id @default(uuid())
  platformId String
  name       String?
  version    Int      @default(1)
  isActive   Boolean  @default(false)
  platform   Platform @relation(fields: [platformId], references: [id])

  @@unique([platformId, version])
  @@index([platformId, isActive])
}

model Game {
  id         String  @id
  name       String
  platformId String
  platform   Platform @relation("GamePlatform", fields: [platformId], references: [id])
}
"#;

#[test]
fn parses_all_models() {
    let doc = parse_schema(SCHEMA);
    let names: Vec<&str> = doc.models.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Platform", "PlatformBranch", "Game"]);
}

#[test]
fn nested_default_is_not_truncated() {
    let doc = parse_schema(SCHEMA);
    let id = &doc.models[0].fields[0];
    assert_eq!(id.name, "id");
    assert!(id.attributes.is_id);
    assert_eq!(
        id.attributes.default_value.as_deref(),
        Some("dbgenerated(\"gen_random_uuid()\")")
    );
}

#[test]
fn marker_attributes() {
    let doc = parse_schema(SCHEMA);
    let platform = &doc.models[0];

    let name = platform.fields.iter().find(|f| f.name == "name").unwrap();
    assert!(name.attributes.is_unique);
    assert!(!name.attributes.is_id);

    let updated = platform.fields.iter().find(|f| f.name == "updatedAt").unwrap();
    assert!(updated.attributes.is_updated_at);
    assert_eq!(updated.attributes.default_value, None);
}

#[test]
fn optional_and_list_suffixes() {
    let doc = parse_schema(SCHEMA);
    let platform = &doc.models[0];

    let meta = platform.fields.iter().find(|f| f.name == "meta").unwrap();
    assert_eq!(meta.field_type, "Json");
    assert!(meta.is_optional);
    assert!(!meta.is_list);

    let branches = platform.fields.iter().find(|f| f.name == "branches").unwrap();
    assert_eq!(branches.field_type, "PlatformBranch");
    assert!(branches.is_list);
    assert!(!branches.is_optional);
}

#[test]
fn relation_type_flag_is_cross_block() {
    let doc = parse_schema(SCHEMA);

    // List field whose base type names a later-declared model.
    let branches = doc.models[0]
        .fields
        .iter()
        .find(|f| f.name == "branches")
        .unwrap();
    assert!(branches.is_relation_type);

    // Scalar field whose type names an earlier-declared model.
    let platform_field = doc.models[1]
        .fields
        .iter()
        .find(|f| f.name == "platform")
        .unwrap();
    assert!(platform_field.is_relation_type);

    // Scalar types never match a model name.
    let name = doc.models[0].fields.iter().find(|f| f.name == "name").unwrap();
    assert!(!name.is_relation_type);
}

#[test]
fn relation_arguments() {
    let doc = parse_schema(SCHEMA);
    let rel = doc.models[1]
        .fields
        .iter()
        .find(|f| f.name == "platform")
        .unwrap()
        .attributes
        .relation
        .clone()
        .unwrap();
    assert_eq!(rel.name, None);
    assert_eq!(rel.fields, vec!["platformId"]);
    assert_eq!(rel.references, vec!["id"]);
}

#[test]
fn named_relation() {
    let doc = parse_schema(SCHEMA);
    let rel = doc.models[2]
        .fields
        .iter()
        .find(|f| f.name == "platform")
        .unwrap()
        .attributes
        .relation
        .clone()
        .unwrap();
    assert_eq!(rel.name.as_deref(), Some("GamePlatform"));
    assert_eq!(rel.fields, vec!["platformId"]);
}

#[test]
fn block_level_uniques_and_indexes() {
    let doc = parse_schema(SCHEMA);
    let branch = &doc.models[1];

    assert_eq!(branch.uniques.len(), 1);
    assert_eq!(branch.uniques[0].fields, vec!["platformId", "version"]);

    assert_eq!(branch.indexes.len(), 1);
    assert_eq!(branch.indexes[0].fields, vec!["platformId", "isActive"]);

    assert_eq!(doc.models[0].indexes[0].fields, vec!["name"]);
}

#[test]
fn comments_and_blank_lines_skipped() {
    let doc = parse_schema(SCHEMA);
    assert!(doc.models[0].fields.iter().all(|f| f.name != "//"));
    assert_eq!(doc.models[0].fields.len(), 6);
}

#[test]
fn raw_attributes_preserved() {
    let doc = parse_schema(SCHEMA);
    let platform_id = doc.models[1]
        .fields
        .iter()
        .find(|f| f.name == "platformId")
        .unwrap();
    assert_eq!(platform_id.raw_attributes, None);

    let is_active = doc.models[1]
        .fields
        .iter()
        .find(|f| f.name == "isActive")
        .unwrap();
    assert_eq!(is_active.raw_attributes.as_deref(), Some("@default(false)"));
}

#[test]
fn deterministic_output() {
    let a = serde_json::to_string(&parse_schema(SCHEMA)).unwrap();
    let b = serde_json::to_string(&parse_schema(SCHEMA)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn unbracketed_block_attribute_is_single_field() {
    let doc = parse_schema("model M {\n  a String\n  @@unique(a)\n}");
    assert_eq!(doc.models[0].uniques[0].fields, vec!["a"]);
}

#[test]
fn keyword_inside_identifier_is_not_a_block() {
    let doc = parse_schema("model Remodel {\n  id String @id\n}");
    assert_eq!(doc.models.len(), 1);
    assert_eq!(doc.models[0].name, "Remodel");
}

#[test]
fn empty_input() {
    assert!(parse_schema("").models.is_empty());
}
