use std::collections::HashMap;

use serde_json::{Map, Value};

use super::{Field, Response};
use crate::db::FormResponseRow;
use crate::error::Result;

/// Settings and response collected for one form element.
struct RawField {
    id: i64,
    attributes: Map<String, Value>,
    response: Value,
}

/// Groups joined setting/response rows into one `Field` per form element,
/// keeping the order in which elements first appear.
pub fn aggregate_fields(rows: &[FormResponseRow]) -> Result<Vec<Field>> {
    let mut fields: Vec<RawField> = Vec::new();
    let mut positions: HashMap<i64, usize> = HashMap::new();

    for row in rows {
        let position = *positions.entry(row.element_id).or_insert_with(|| {
            fields.push(RawField {
                id: row.element_id,
                attributes: Map::new(),
                response: Value::Null,
            });
            fields.len() - 1
        });
        let field = &mut fields[position];

        let attribute = decode(row.setting_type.as_deref(), row.setting_value.as_deref())?;
        field.attributes.insert(row.setting_name.clone(), attribute);
        // Every row repeats the response; the last one wins.
        field.response = decode(row.response_type.as_deref(), row.response_value.as_deref())?;
    }

    Ok(fields.into_iter().map(Field::from).collect())
}

fn decode(type_tag: Option<&str>, value: Option<&str>) -> Result<Value> {
    match (type_tag, value) {
        (Some("object"), Some(raw)) => Ok(serde_json::from_str(raw)?),
        (Some("object"), None) => Ok(Value::Null),
        (_, raw) => Ok(Value::String(raw.unwrap_or_default().to_string())),
    }
}

fn text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn option_label(value: &Value) -> String {
    match value {
        Value::Object(option) if option.contains_key("content") => text(option.get("content")),
        other => text(Some(other)),
    }
}

fn option_labels(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::Array(options) => Some(options.iter().map(option_label).collect()),
        Value::Object(options) => {
            let mut entries: Vec<(&String, &Value)> = options.iter().collect();
            entries.sort_by(|(a, _), (b, _)| option_key_order(a).cmp(&option_key_order(b)));
            Some(entries.into_iter().map(|(_, option)| option_label(option)).collect())
        }
        other => Some(vec![option_label(other)]),
    }
}

/// Numeric keys come first in numeric order (`"2"` before `"10"`), then the rest.
fn option_key_order(key: &str) -> (u8, u64, &str) {
    match key.parse::<u64>() {
        Ok(n) => (0, n, ""),
        Err(_) => (1, 0, key),
    }
}

impl From<RawField> for Field {
    fn from(raw: RawField) -> Self {
        Field {
            id: raw.id,
            question: text(raw.attributes.get("question")),
            description: text(raw.attributes.get("description")),
            possible_responses: raw.attributes.get("possibleResponses").and_then(option_labels),
            response: Response::from_value(raw.response),
        }
    }
}
