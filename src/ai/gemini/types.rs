//! Gemini `generateContent` wire types.
//!
//! Only the request side is typed. The response envelope is untrusted and is
//! walked as a `serde_json::Value` by the extractor instead.

use serde::Serialize;

/// Request body sent to `generateContent`. Built once per call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Single-turn request carrying the given parts.
    pub fn single_turn(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content { parts }],
        }
    }

    /// The prompt text of the first text part, if any.
    pub fn prompt_text(&self) -> Option<&str> {
        self.contents
            .iter()
            .flat_map(|c| c.parts.iter())
            .find_map(|p| match p {
                Part::Text { text } => Some(text.as_str()),
                Part::InlineData { .. } => None,
            })
    }

    /// The inline image of the request, if any.
    pub fn inline_image(&self) -> Option<&InlineData> {
        self.contents
            .iter()
            .flat_map(|c| c.parts.iter())
            .find_map(|p| match p {
                Part::InlineData { inline_data } => Some(inline_data),
                Part::Text { .. } => None,
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// Untagged union of text and inline media content parts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

/// Base64 inline payload used for photo requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_serializes_to_content_part_schema() {
        let request = GenerateContentRequest::single_turn(vec![
            Part::Text {
                text: "prompt".to_string(),
            },
            Part::InlineData {
                inline_data: InlineData {
                    mime_type: "image/jpeg".to_string(),
                    data: "AAAA".to_string(),
                },
            },
        ]);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "contents": [{
                    "parts": [
                        { "text": "prompt" },
                        { "inlineData": { "mimeType": "image/jpeg", "data": "AAAA" } }
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_accessors() {
        let request = GenerateContentRequest::single_turn(vec![Part::Text {
            text: "only text".to_string(),
        }]);
        assert_eq!(request.prompt_text(), Some("only text"));
        assert!(request.inline_image().is_none());
    }
}
