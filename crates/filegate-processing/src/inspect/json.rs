use serde_json::Value;

use super::{decode_utf8, Inspector};
use crate::metadata::{FileDescriptor, FileSummary, JsonDescriptor, JsonShape, ScalarKind};
use crate::upload::Upload;
use crate::validator::ValidationError;

/// Classify the top-level value. Mapping keys keep document order.
pub fn json_shape(value: &Value) -> JsonShape {
    match value {
        Value::Object(map) => JsonShape::Mapping {
            keys: map.keys().cloned().collect(),
            key_count: map.len(),
        },
        Value::Array(items) => JsonShape::Sequence {
            array_length: items.len(),
        },
        Value::String(_) => JsonShape::Scalar {
            scalar_type: ScalarKind::String,
        },
        Value::Number(_) => JsonShape::Scalar {
            scalar_type: ScalarKind::Number,
        },
        Value::Bool(_) => JsonShape::Scalar {
            scalar_type: ScalarKind::Boolean,
        },
        Value::Null => JsonShape::Scalar {
            scalar_type: ScalarKind::Null,
        },
    }
}

pub struct JsonInspector;

impl Inspector for JsonInspector {
    type Decoded = JsonShape;

    fn decode(&self, upload: &Upload) -> Result<JsonShape, ValidationError> {
        let text = decode_utf8(upload, "JSON")?;
        let value: Value =
            serde_json::from_str(text).map_err(|e| ValidationError::MalformedDocument {
                message: e.to_string(),
                line: e.line(),
                column: e.column(),
            })?;
        Ok(json_shape(&value))
    }

    fn summarize(&self, upload: &Upload, shape: JsonShape) -> FileDescriptor {
        FileDescriptor::Json(JsonDescriptor {
            summary: FileSummary::of(upload),
            shape,
            is_valid: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape_of(text: &str) -> Result<JsonShape, ValidationError> {
        let upload = Upload::new("data.json", None, text.as_bytes().to_vec());
        JsonInspector.decode(&upload)
    }

    #[test]
    fn test_mapping_keys_and_count() {
        assert_eq!(
            shape_of(r#"{"a":1,"b":2}"#).unwrap(),
            JsonShape::Mapping {
                keys: vec!["a".to_string(), "b".to_string()],
                key_count: 2,
            }
        );
    }

    #[test]
    fn test_mapping_keeps_document_order() {
        let JsonShape::Mapping { keys, .. } = shape_of(r#"{"zeta":1,"alpha":2,"mid":3}"#).unwrap()
        else {
            panic!("expected a mapping");
        };
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_sequence_length() {
        assert_eq!(
            shape_of("[1,2,3]").unwrap(),
            JsonShape::Sequence { array_length: 3 }
        );
    }

    #[test]
    fn test_scalars() {
        assert_eq!(
            shape_of("\"hi\"").unwrap(),
            JsonShape::Scalar {
                scalar_type: ScalarKind::String
            }
        );
        assert_eq!(
            shape_of("null").unwrap(),
            JsonShape::Scalar {
                scalar_type: ScalarKind::Null
            }
        );
    }

    #[test]
    fn test_malformed_reports_position() {
        let err = shape_of("{\n  \"a\": 1,\n  \"b\" 2\n}").unwrap_err();
        let ValidationError::MalformedDocument { line, column, .. } = err else {
            panic!("expected a malformed document error");
        };
        assert_eq!(line, 3);
        assert!(column > 0);
    }

    #[test]
    fn test_non_utf8_is_encoding_error() {
        let upload = Upload::new("data.json", None, vec![b'{', 0xc3, 0x28, b'}']);
        assert!(matches!(
            JsonInspector.inspect(&upload),
            Err(ValidationError::EncodingError(_))
        ));
    }
}
