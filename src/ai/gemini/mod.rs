pub mod analyzer;
pub mod client;
pub mod types;

pub use analyzer::GeminiAnalyzer;
pub use client::GeminiHttpClient;

#[cfg(test)]
pub(crate) mod test_support {
    use wiremock::matchers::{method, path_regex};
    use wiremock::{Mock, MockBuilder, ResponseTemplate};

    pub const GENERATE_CONTENT_PATH_REGEX: &str = r"^/v1beta/models/[^/]+:generateContent$";

    pub fn post_path_regex(regex: &str) -> MockBuilder {
        Mock::given(method("POST")).and(path_regex(regex))
    }

    /// A 200 `generateContent` envelope whose first part carries `text`.
    pub fn text_response(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": text }],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        }))
    }
}
