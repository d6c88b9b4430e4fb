//! Schema-less record representation
//!
//! Collections hand records back as JSON objects with camelCase keys so
//! that projections and expansions can reshape them freely.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use super::errors::{DomainError, DomainResult};
use super::pagination::{Projection, SortDirection, SortSpec};

pub type Document = Map<String, Value>;

/// Serialize a record into a document.
pub fn to_document<T: Serialize>(record: &T) -> DomainResult<Document> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(DomainError::Storage(format!(
            "record serialized to {} instead of an object",
            json_type_name(&other)
        ))),
        Err(e) => Err(DomainError::Storage(format!("Serialization error: {}", e))),
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ── Field names ─────────────────────────────────────────────────

/// Document key for a user-supplied field name (`created_at` → `createdAt`).
/// `_id` is accepted as an alias of `id`.
pub fn document_key(field: &str) -> String {
    if field == "_id" {
        return "id".to_string();
    }
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Column name for a user-supplied field name (`createdAt` → `created_at`).
pub fn column_name(field: &str) -> String {
    let key = document_key(field);
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

// ── Projection ──────────────────────────────────────────────────

/// Reshape `doc` according to `projection`.
///
/// If any field is listed without `-`, only listed fields survive (plus
/// `id` unless `-id` is given). Otherwise the listed fields are removed.
pub fn apply_projection(doc: &mut Document, projection: &Projection) {
    let fields = projection.fields();
    if fields.is_empty() {
        return;
    }

    let inclusive = fields.iter().any(|f| f.include);
    if inclusive {
        let drop_id = fields.iter().any(|f| !f.include && document_key(&f.name) == "id");
        let keep: Vec<String> = fields
            .iter()
            .filter(|f| f.include)
            .map(|f| document_key(&f.name))
            .collect();
        doc.retain(|key, _| {
            keep.iter().any(|k| k == key) || (key == "id" && !drop_id)
        });
    } else {
        for f in &fields {
            doc.remove(&document_key(&f.name));
        }
    }
}

// ── Ordering ────────────────────────────────────────────────────

/// Compare two documents by a sort spec; missing fields sort first.
pub fn compare_documents(a: &Document, b: &Document, sort: &SortSpec) -> Ordering {
    for (field, direction) in sort.iter() {
        let key = document_key(field);
        let ord = compare_values(a.get(&key), b.get(&key));
        let ord = match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Sort in place by `sort`, then by `id` so equal keys keep a stable order.
pub fn sort_documents(docs: &mut [Document], sort: &SortSpec) {
    let tiebreak = SortSpec::by("id", SortDirection::Ascending);
    docs.sort_by(|a, b| {
        compare_documents(a, b, sort).then_with(|| compare_documents(a, b, &tiebreak))
    });
}

fn type_rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Number(_) => 1,
        Value::String(_) => 2,
        Value::Object(_) => 3,
        Value::Array(_) => 4,
        Value::Bool(_) => 5,
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.unwrap_or(&Value::Null);
    let b = b.unwrap_or(&Value::Null);
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => {
            // Timestamps serialize with a variable number of fractional
            // digits, so compare them as instants.
            match (
                x.parse::<DateTime<Utc>>(),
                y.parse::<DateTime<Utc>>(),
            ) {
                (Ok(tx), Ok(ty)) => tx.cmp(&ty),
                _ => x.cmp(y),
            }
        }
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x.len().cmp(&y.len()),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(v: Value) -> Document {
        match v {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn field_name_conversions() {
        assert_eq!(document_key("created_at"), "createdAt");
        assert_eq!(document_key("createdAt"), "createdAt");
        assert_eq!(document_key("_id"), "id");
        assert_eq!(column_name("createdAt"), "created_at");
        assert_eq!(column_name("room_number"), "room_number");
        assert_eq!(column_name("id"), "id");
    }

    #[test]
    fn inclusive_projection_keeps_listed_fields_and_id() {
        let mut d = doc(json!({"id": "1", "name": "A", "floor": 2, "notes": "x"}));
        apply_projection(&mut d, &Projection::new("name floor"));
        let mut keys: Vec<_> = d.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["floor", "id", "name"]);
    }

    #[test]
    fn inclusive_projection_can_drop_id() {
        let mut d = doc(json!({"id": "1", "name": "A"}));
        apply_projection(&mut d, &Projection::new("name -_id"));
        assert_eq!(d.keys().collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn exclusive_projection_removes_fields() {
        let mut d = doc(json!({"id": "1", "name": "A", "room_number": "x", "roomNumber": "101"}));
        apply_projection(&mut d, &Projection::new("-room_number"));
        assert!(!d.contains_key("roomNumber"));
        assert!(d.contains_key("name"));
    }

    #[test]
    fn compares_timestamps_as_instants() {
        let a = doc(json!({"createdAt": "2024-01-01T00:00:00Z"}));
        let b = doc(json!({"createdAt": "2024-01-01T00:00:00.500Z"}));
        let asc = SortSpec::by("createdAt", SortDirection::Ascending);
        assert_eq!(compare_documents(&a, &b, &asc), Ordering::Less);
        assert_eq!(compare_documents(&a, &b, &SortSpec::default()), Ordering::Greater);
    }

    #[test]
    fn missing_fields_sort_first_and_secondary_keys_break_ties() {
        let a = doc(json!({"floor": 1, "name": "b"}));
        let b = doc(json!({"floor": 1, "name": "a"}));
        let c = doc(json!({"name": "c"}));
        let sort = SortSpec::by("floor", SortDirection::Ascending)
            .then("name", SortDirection::Ascending);
        assert_eq!(compare_documents(&c, &a, &sort), Ordering::Less);
        assert_eq!(compare_documents(&a, &b, &sort), Ordering::Greater);
    }

    #[test]
    fn sort_documents_breaks_ties_by_id() {
        let mut docs = vec![
            doc(json!({"id": "b", "floor": 1})),
            doc(json!({"id": "c", "floor": 0})),
            doc(json!({"id": "a", "floor": 1})),
        ];
        sort_documents(&mut docs, &SortSpec::by("floor", SortDirection::Descending));
        let ids: Vec<_> = docs.iter().map(|d| d["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn to_document_rejects_non_objects() {
        assert!(to_document(&42).is_err());
        assert!(to_document(&json!({"a": 1})).is_ok());
    }
}
