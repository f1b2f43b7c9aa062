//! Request encoding: caller input plus a fixed prompt into a Gemini payload.
//!
//! Pure data transformation, no I/O.

use crate::ai::gemini::types::{GenerateContentRequest, InlineData, Part};
use crate::prompts;
use base64::Engine as _;

/// Payload sent to the remote model.
pub type ModelPayload = GenerateContentRequest;

/// Builds the photo request: food-name prompt followed by the inline image.
///
/// `bytes` are not inspected and `mime_type` is passed through verbatim.
pub fn encode_image_request(bytes: &[u8], mime_type: &str) -> ModelPayload {
    let data = base64::engine::general_purpose::STANDARD.encode(bytes);

    tracing::debug!(
        "Encoded {} image bytes as {} base64 chars ({})",
        bytes.len(),
        data.len(),
        mime_type
    );

    GenerateContentRequest::single_turn(vec![
        Part::Text {
            text: prompts::FOOD_NAMES.to_string(),
        },
        Part::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.to_string(),
                data,
            },
        },
    ])
}

/// Builds the nutrition request with `text` embedded in the prompt template.
pub fn encode_text_request(text: &str) -> ModelPayload {
    GenerateContentRequest::single_turn(vec![Part::Text {
        text: prompts::render(prompts::NUTRITION, &[("text", text)]),
    }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_image_request_carries_prompt_and_base64_image() {
        let payload = encode_image_request(&[0xFF, 0xD8, 0xFF, 0xE0], "image/jpeg");

        assert_eq!(payload.prompt_text(), Some(prompts::FOOD_NAMES));
        let image = payload.inline_image().unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.data, "/9j/4A==");
    }

    #[test]
    fn test_image_request_passes_mime_type_verbatim() {
        let payload = encode_image_request(b"not really an image", "Image/HEIC; q=1");
        assert_eq!(payload.inline_image().unwrap().mime_type, "Image/HEIC; q=1");
    }

    #[test]
    fn test_image_request_part_order() {
        let payload = encode_image_request(&[], "image/png");
        let json = serde_json::to_value(&payload).unwrap();
        let parts = json["contents"][0]["parts"].as_array().unwrap();

        assert_eq!(parts.len(), 2);
        assert!(parts[0].get("text").is_some());
        assert_eq!(parts[1]["inlineData"]["data"], "");
    }

    #[test]
    fn test_text_request_embeds_text() {
        let payload = encode_text_request("김치찌개 1인분, 쌀밥");
        let prompt = payload.prompt_text().unwrap();

        assert!(prompt.contains("\"김치찌개 1인분, 쌀밥\""));
        assert!(!prompt.contains("{{text}}"));
        assert!(payload.inline_image().is_none());
    }
}
