//! Parser for the schema description text format.
//!
//! The document is a sequence of named blocks:
//! ```text
//! model Platform {
//!   id        String   @id @default(dbgenerated("gen_random_uuid()"))
//!   name      String   @unique
//!   branches  PlatformBranch[]
//!   @@index([name])
//! }
//! ```
//!
//! Parsing is a small explicit scanner rather than layered regexes: block
//! bodies and attribute argument lists are captured by balanced-delimiter
//! matching, so nested parentheses inside `@default(...)`/`@relation(...)`
//! are extracted in full instead of truncating at the first `)`.

use crate::model::{Field, FieldAttributes, FieldGroup, Model, Relation, SchemaDoc};

/// Parse a schema document into its model declarations.
///
/// Purely syntactic: referenced fields are not validated, unknown attributes
/// are ignored, and the output is deterministic for identical input.
pub fn parse_schema(text: &str) -> SchemaDoc {
    let blocks = extract_model_blocks(text);
    let model_names: Vec<&str> = blocks.iter().map(|b| b.name.as_str()).collect();

    let models = blocks
        .iter()
        .map(|block| parse_model(block, &model_names))
        .collect();

    SchemaDoc { models }
}

// ── Block extraction ────────────────────────────────────────────────────────

struct ModelBlock<'a> {
    name: String,
    body: &'a str,
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Scan for top-level `model <Name> { ... }` blocks, capturing each body by
/// brace-depth tracking.
fn extract_model_blocks(text: &str) -> Vec<ModelBlock<'_>> {
    let mut blocks = Vec::new();
    let mut pos = 0;

    while let Some(rel) = text[pos..].find("model") {
        let kw_start = pos + rel;
        let kw_end = kw_start + "model".len();
        pos = kw_end;

        // Word boundaries on both sides of the keyword.
        if text[..kw_start].chars().next_back().is_some_and(is_ident_char) {
            continue;
        }
        if !text[kw_end..].starts_with(|c: char| c.is_whitespace()) {
            continue;
        }

        let after_kw = skip_whitespace(text, kw_end);
        let name_end = scan_ident(text, after_kw);
        if name_end == after_kw {
            continue;
        }
        let name = &text[after_kw..name_end];

        let brace = skip_whitespace(text, name_end);
        if !text[brace..].starts_with('{') {
            continue;
        }

        let Some((body_start, body_end)) = balanced_span(text, brace, '{', '}') else {
            // Unterminated block: ignore the rest of the document.
            break;
        };

        blocks.push(ModelBlock {
            name: name.to_string(),
            body: &text[body_start..body_end],
        });
        pos = body_end + 1;
    }

    blocks
}

fn skip_whitespace(text: &str, mut idx: usize) -> usize {
    while let Some(c) = text[idx..].chars().next() {
        if !c.is_whitespace() {
            break;
        }
        idx += c.len_utf8();
    }
    idx
}

fn scan_ident(text: &str, mut idx: usize) -> usize {
    while let Some(c) = text[idx..].chars().next() {
        if !is_ident_char(c) {
            break;
        }
        idx += c.len_utf8();
    }
    idx
}

/// Given the byte index of an opening delimiter, return the byte range of the
/// balanced inner content (exclusive of the delimiters), or `None` when the
/// close delimiter is never reached.
fn balanced_span(text: &str, open_idx: usize, open: char, close: char) -> Option<(usize, usize)> {
    debug_assert!(text[open_idx..].starts_with(open));
    let mut depth = 0u32;

    for (i, c) in text[open_idx..].char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some((open_idx + open.len_utf8(), open_idx + i));
            }
        }
    }
    None
}

// ── Model bodies ────────────────────────────────────────────────────────────

fn parse_model(block: &ModelBlock<'_>, model_names: &[&str]) -> Model {
    let mut fields = Vec::new();
    let mut uniques = Vec::new();
    let mut indexes = Vec::new();

    for line in block.body.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        if let Some(rest) = line.strip_prefix("@@") {
            parse_block_attribute(rest, &mut uniques, &mut indexes);
            continue;
        }
        if let Some(mut field) = parse_field_line(line) {
            field.is_relation_type = model_names.contains(&field.field_type.as_str());
            fields.push(field);
        }
    }

    Model {
        name: block.name.clone(),
        fields,
        uniques,
        indexes,
    }
}

/// Parse one `@@unique(...)` / `@@index(...)` line (leading `@@` stripped).
/// Other block attributes (`@@map`, `@@id`, ...) are ignored.
fn parse_block_attribute(rest: &str, uniques: &mut Vec<FieldGroup>, indexes: &mut Vec<FieldGroup>) {
    let name_end = scan_ident(rest, 0);
    let name = &rest[..name_end];
    if name != "unique" && name != "index" {
        return;
    }

    let paren = skip_whitespace(rest, name_end);
    if !rest[paren..].starts_with('(') {
        return;
    }
    let Some((args_start, args_end)) = balanced_span(rest, paren, '(', ')') else {
        return;
    };
    let args = &rest[args_start..args_end];

    let group = FieldGroup {
        fields: bracketed_fields(args),
    };
    match name {
        "unique" => uniques.push(group),
        "index" => indexes.push(group),
        _ => unreachable!(),
    }
}

/// Extract the field list from an attribute argument: the bracketed form
/// `[a, b]` when present, otherwise the raw argument as a single field name.
fn bracketed_fields(args: &str) -> Vec<String> {
    if let Some(open) = args.find('[') {
        if let Some((start, end)) = balanced_span(args, open, '[', ']') {
            return split_names(&args[start..end]);
        }
    }
    let raw = args.trim();
    if raw.is_empty() {
        Vec::new()
    } else {
        vec![raw.to_string()]
    }
}

fn split_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ── Field lines ─────────────────────────────────────────────────────────────

/// Parse a field declaration: `<name> <Type[?|[]]> [attributes...]`.
fn parse_field_line(line: &str) -> Option<Field> {
    let (name, raw_type, attrs) = split_field_line(line)?;
    if name.starts_with('@') || !name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        return None;
    }

    let is_optional = raw_type.ends_with('?');
    let is_list = raw_type.ends_with("[]");
    let base_type: String = raw_type
        .chars()
        .filter(|c| !matches!(c, '?' | '[' | ']'))
        .collect();

    Some(Field {
        name: name.to_string(),
        field_type: base_type,
        is_optional,
        is_list,
        is_relation_type: false,
        attributes: parse_attributes(attrs),
        raw_attributes: if attrs.is_empty() {
            None
        } else {
            Some(attrs.to_string())
        },
    })
}

/// Split a trimmed line into name token, type token, and the trailing
/// attribute text (possibly empty).
fn split_field_line(line: &str) -> Option<(&str, &str, &str)> {
    let name_end = line.find(char::is_whitespace)?;
    let (name, rest) = line.split_at(name_end);
    let rest = rest.trim_start();
    if rest.is_empty() {
        return None;
    }
    let type_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let (raw_type, attrs) = rest.split_at(type_end);
    Some((name, raw_type, attrs.trim()))
}

// ── Attributes ──────────────────────────────────────────────────────────────

/// Scan trailing attribute text for `@`-prefixed attributes. Argument lists
/// are captured by balanced-paren matching so values like
/// `@default(dbgenerated("gen_random_uuid()"))` come through whole.
fn parse_attributes(attrs: &str) -> FieldAttributes {
    let mut out = FieldAttributes::default();
    let mut idx = 0;

    while let Some(rel) = attrs[idx..].find('@') {
        let at = idx + rel;
        let name_end = scan_ident(attrs, at + 1);
        let name = &attrs[at + 1..name_end];
        idx = name_end;

        let args = if attrs[name_end..].starts_with('(') {
            match balanced_span(attrs, name_end, '(', ')') {
                Some((start, end)) => {
                    idx = end + 1;
                    Some(&attrs[start..end])
                }
                None => None,
            }
        } else {
            None
        };

        match name {
            "id" => out.is_id = true,
            "unique" => out.is_unique = true,
            "updatedAt" => out.is_updated_at = true,
            "default" => out.default_value = args.map(|a| a.trim().to_string()),
            "relation" => out.relation = Some(parse_relation_args(args.unwrap_or(""))),
            _ => {}
        }
    }

    out
}

/// Parse `@relation(...)` arguments: an optional leading quoted name (or a
/// `name:` key) plus `fields: [...]` and `references: [...]` lists.
fn parse_relation_args(inner: &str) -> Relation {
    let mut relation = Relation::default();

    for arg in split_top_level(inner) {
        let arg = arg.trim();
        if let Some(quoted) = parse_quoted(arg) {
            relation.name = Some(quoted);
            continue;
        }
        let Some(colon) = arg.find(':') else {
            continue;
        };
        let key = arg[..colon].trim();
        let value = arg[colon + 1..].trim();
        match key {
            "name" => relation.name = parse_quoted(value),
            "fields" => relation.fields = bracketed_fields(value),
            "references" => relation.references = bracketed_fields(value),
            _ => {}
        }
    }

    relation
}

/// Split an argument list on commas that are not nested inside brackets,
/// parens, or string literals.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut in_string = false;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '(' | '[' if !in_string => depth += 1,
            ')' | ']' if !in_string => depth -= 1,
            ',' if !in_string && depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < s.len() {
        parts.push(&s[start..]);
    }
    parts
}

fn parse_quoted(s: &str) -> Option<String> {
    let rest = s.strip_prefix('"')?;
    let end = rest.find('"')?;
    Some(rest[..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_span_handles_nesting() {
        let s = "@default(dbgenerated(\"gen_random_uuid()\"))";
        let open = s.find('(').unwrap();
        let (start, end) = balanced_span(s, open, '(', ')').unwrap();
        assert_eq!(&s[start..end], "dbgenerated(\"gen_random_uuid()\")");
    }

    #[test]
    fn balanced_span_unterminated_is_none() {
        assert_eq!(balanced_span("(abc", 0, '(', ')'), None);
    }

    #[test]
    fn split_top_level_respects_nesting() {
        let parts = split_top_level("fields: [a, b], references: [c], name: \"x,y\"");
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].trim(), "fields: [a, b]");
        assert_eq!(parts[2].trim(), "name: \"x,y\"");
    }

    #[test]
    fn field_line_suffixes() {
        let f = parse_field_line("branches PlatformBranch[]").unwrap();
        assert_eq!(f.field_type, "PlatformBranch");
        assert!(f.is_list);
        assert!(!f.is_optional);

        let f = parse_field_line("developerId String?").unwrap();
        assert_eq!(f.field_type, "String");
        assert!(f.is_optional);
        assert!(!f.is_list);
    }

    #[test]
    fn bare_name_is_not_a_field() {
        assert!(parse_field_line("}").is_none());
        assert!(parse_field_line("orphan").is_none());
    }
}
