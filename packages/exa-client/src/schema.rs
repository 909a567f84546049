//! Output schemas for Exa's structured `/answer` mode.
//!
//! Exa only honours a schema when every object is closed and every
//! property is required. The schema is derived with `schemars` from the
//! type the caller will normalize the answer into, with nested types
//! inlined so no `definitions` block is emitted.
//!
//! ```rust,ignore
//! #[derive(Deserialize, JsonSchema)]
//! #[serde(rename_all = "camelCase")]
//! struct Verdict {
//!     summary: String,
//!     sources: Vec<String>,
//! }
//!
//! let request = AnswerRequest::new(query).output_schema(Verdict::output_schema());
//! ```

use schemars::gen::SchemaSettings;
use schemars::JsonSchema;
use serde_json::{Map, Value};

/// Keys Exa rejects or ignores at any level of the schema.
const STRIPPED_KEYS: &[&str] = &["$schema", "title", "definitions"];

/// Types that can describe Exa's answer payload.
///
/// Implemented for every `JsonSchema` type.
pub trait OutputSchema: JsonSchema {
    fn output_schema() -> Value {
        let generator = SchemaSettings::draft07()
            .with(|settings| settings.inline_subschemas = true)
            .into_generator();
        let root = generator.into_root_schema_for::<Self>();

        let mut value = serde_json::to_value(root).unwrap_or_default();
        make_strict(&mut value);
        value
    }
}

impl<T: JsonSchema> OutputSchema for T {}

fn make_strict(value: &mut Value) {
    match value {
        Value::Object(node) => {
            for key in STRIPPED_KEYS {
                node.remove(*key);
            }
            if node.get("type").and_then(Value::as_str) == Some("object") {
                close_object(node);
            }
            node.values_mut().for_each(make_strict);
        }
        Value::Array(items) => items.iter_mut().for_each(make_strict),
        _ => {}
    }
}

/// `additionalProperties: false` and every declared property required.
fn close_object(node: &mut Map<String, Value>) {
    let required: Vec<Value> = node
        .get("properties")
        .and_then(Value::as_object)
        .map(|properties| properties.keys().cloned().map(Value::String).collect())
        .unwrap_or_default();

    node.insert("additionalProperties".into(), Value::Bool(false));
    node.insert("required".into(), Value::Array(required));
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;

    #[allow(dead_code)]
    #[derive(JsonSchema)]
    #[serde(rename_all = "camelCase")]
    struct Bylaw {
        bylaw_number: String,
        section: Option<String>,
    }

    #[allow(dead_code)]
    #[derive(JsonSchema)]
    #[serde(rename_all = "camelCase")]
    struct PermitAnswer {
        concise_answer: String,
        cited_bylaws: Vec<Bylaw>,
    }

    fn required(schema: &Value) -> Vec<&str> {
        let mut keys: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        keys.sort_unstable();
        keys
    }

    #[test]
    fn test_root_is_closed_and_bare() {
        let schema = PermitAnswer::output_schema();

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["additionalProperties"], false);
        for key in STRIPPED_KEYS {
            assert!(schema.get(*key).is_none(), "{} not stripped", key);
        }
        assert_eq!(required(&schema), ["citedBylaws", "conciseAnswer"]);
    }

    #[test]
    fn test_nested_struct_inlined_and_closed() {
        let schema = PermitAnswer::output_schema();
        let bylaw = &schema["properties"]["citedBylaws"]["items"];

        assert!(!serde_json::to_string(&schema).unwrap().contains("$ref"));
        assert_eq!(bylaw["type"], "object");
        assert_eq!(bylaw["additionalProperties"], false);
        // Optional fields are still listed; Exa requires every key.
        assert_eq!(required(bylaw), ["bylawNumber", "section"]);
    }
}
