//! Structured extraction schema and reply parsing
//!
//! The model is asked for JSON, but its reply is free text. Parsing is a
//! two-step contract: try to read the reply as JSON (after unwrapping a
//! markdown code fence), otherwise hand back the raw text as
//! [`StructuredExtraction::RawTextFallback`].

use serde::Serialize;
use serde_json::{Map, Value};

/// Field-name to description mapping supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionSchema(Map<String, Value>);

impl ExtractionSchema {
    /// Parse a schema from its JSON text; it must be a non-empty object.
    pub fn parse(raw: &str) -> Result<Self, String> {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(fields)) if !fields.is_empty() => Ok(Self(fields)),
            Ok(Value::Object(_)) => Err("Schema must declare at least one field".to_string()),
            Ok(_) => Err("Schema must be a JSON object of field descriptions".to_string()),
            Err(e) => Err(format!("Schema is not valid JSON: {}", e)),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StructuredExtraction {
    Parsed(Value),
    RawTextFallback { raw_response: String },
}

impl StructuredExtraction {
    pub fn from_reply(text: &str) -> Self {
        match serde_json::from_str::<Value>(unfence(text)) {
            Ok(value) => StructuredExtraction::Parsed(value),
            Err(_) => StructuredExtraction::RawTextFallback {
                raw_response: text.to_string(),
            },
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            StructuredExtraction::Parsed(_) => "parsed",
            StructuredExtraction::RawTextFallback { .. } => "raw_text_fallback",
        }
    }
}

/// Body of the first fenced block, or the trimmed text when there is none.
fn unfence(text: &str) -> &str {
    let fenced = text
        .split_once("```json")
        .or_else(|| text.split_once("```"))
        .map(|(_, rest)| rest.split("```").next().unwrap_or(rest));
    fenced.unwrap_or(text).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_plain_json() {
        let result = StructuredExtraction::from_reply(r#" {"name": "Ana", "age": 31} "#);
        assert_eq!(result, StructuredExtraction::Parsed(json!({"name": "Ana", "age": 31})));
        assert_eq!(result.mode(), "parsed");
    }

    #[test]
    fn test_parse_fenced_json() {
        let reply = "Here you go:\n```json\n{\"city\": \"Lima\"}\n```\nAnything else?";
        let result = StructuredExtraction::from_reply(reply);
        assert_eq!(serde_json::to_value(&result).unwrap(), json!({"city": "Lima"}));
    }

    #[test]
    fn test_parse_bare_fence() {
        let result = StructuredExtraction::from_reply("```\n[1, 2]\n```");
        assert_eq!(result, StructuredExtraction::Parsed(json!([1, 2])));
    }

    #[test]
    fn test_unparseable_reply_falls_back_to_raw_text() {
        let reply = "Sorry, I could not find those fields.";
        let result = StructuredExtraction::from_reply(reply);
        assert_eq!(result.mode(), "raw_text_fallback");
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"raw_response": reply})
        );
    }

    #[test]
    fn test_schema_must_be_object() {
        assert!(ExtractionSchema::parse(r#"{"name": "Person name"}"#).is_ok());
        assert!(ExtractionSchema::parse(r#"["name"]"#).is_err());
        assert!(ExtractionSchema::parse("{}").is_err());
        assert!(ExtractionSchema::parse("{name").is_err());
    }
}
