use crate::llm::JsonSchemaFormat;
use serde_json::{Value, json};

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that extracts Chinese characters, English words on this trademark image, and describes the trademark in short words.";

pub const USER_PROMPT: &str = "<image>\nExtract Chinese characters, English words on this trademark image, and describe the trademark in short words.";

pub const WORDS_IN_MARK: &str = "wordsInMark";
pub const CHINESE_CHARACTER: &str = "chineseCharacter";
pub const DESCR_OF_DEVICE: &str = "descrOfDevice";

const SCHEMA_NAME: &str = "test";

pub fn trademark_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "wordsInMark": { "type": "string" },
            "chineseCharacter": { "type": "string" },
            "descrOfDevice": { "type": "string" }
        },
        "required": ["wordsInMark", "chineseCharacter", "descrOfDevice"]
    })
}

pub fn response_format() -> JsonSchemaFormat {
    JsonSchemaFormat {
        name: SCHEMA_NAME.to_string(),
        schema: trademark_schema(),
    }
}

/// Builds the `data:` URI the model reads the image from.
pub fn jpeg_data_uri(image_base64: &str) -> String {
    format!("data:image/jpeg;base64,{image_base64}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_requires_all_three_fields() {
        let schema = trademark_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();

        assert_eq!(required, vec![WORDS_IN_MARK, CHINESE_CHARACTER, DESCR_OF_DEVICE]);
        for field in required {
            assert_eq!(schema["properties"][field]["type"], "string");
        }
    }

    #[test]
    fn test_jpeg_data_uri_keeps_payload_verbatim() {
        assert_eq!(jpeg_data_uri("AbC+/=="), "data:image/jpeg;base64,AbC+/==");
    }
}
