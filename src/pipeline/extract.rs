//! Response extraction and validation.
//!
//! Turns a raw `generateContent` response into a typed result:
//!
//! 1. non-2xx status fails immediately with [`Error::Http`]
//! 2. the generated text is pulled from `candidates[0].content.parts[0].text`,
//!    falling back to `"[]"` wherever that path is missing
//! 3. markdown code fences are stripped
//! 4. the text is decoded as JSON
//! 5. the decoded value is validated against the expected [`ResponseSchema`]
//!
//! Extraction is a pure function of the response and can be repeated freely.

use crate::models::{FoodNameList, NutritionItem, NutritionList, RawResponse};
use crate::{Error, Result};
use serde_json::Value;

/// Text substituted when the envelope lacks the generated-text path.
pub const EMPTY_ARRAY_FALLBACK: &str = "[]";

const FENCE_OPEN_JSON: &str = "```json";
const FENCE: &str = "```";

/// Shape the decoded model output must conform to.
pub trait ResponseSchema {
    type Output;

    /// Short name used in logs.
    const NAME: &'static str;

    fn validate(value: Value) -> Result<Self::Output>;
}

/// Photo mode: a JSON array of food-name strings, all-or-nothing.
pub struct FoodNames;

/// Text mode: a JSON array of nutrition records, filter-and-keep.
pub struct Nutrition;

impl ResponseSchema for FoodNames {
    type Output = FoodNameList;

    const NAME: &'static str = "food names";

    fn validate(value: Value) -> Result<FoodNameList> {
        let Value::Array(items) = value else {
            return Err(Error::Validation("not a valid array".to_string()));
        };

        items
            .into_iter()
            .map(|item| match item {
                Value::String(name) if !name.trim().is_empty() => Ok(name),
                _ => Err(Error::Validation("not a valid array".to_string())),
            })
            .collect()
    }
}

impl ResponseSchema for Nutrition {
    type Output = NutritionList;

    const NAME: &'static str = "nutrition";

    fn validate(value: Value) -> Result<NutritionList> {
        let Value::Array(items) = value else {
            return Err(Error::Validation("not a valid array".to_string()));
        };

        let total = items.len();
        let kept: NutritionList = items.iter().filter_map(nutrition_item).collect();

        if kept.len() < total {
            tracing::warn!(
                "Dropped {} of {} nutrition entries that failed validation",
                total - kept.len(),
                total
            );
        }

        Ok(kept)
    }
}

/// Accepts one nutrition record, or `None` if it must be dropped.
fn nutrition_item(value: &Value) -> Option<NutritionItem> {
    let record = value.as_object()?;

    let name = record.get("name")?.as_str()?;
    if name.trim().is_empty() {
        return None;
    }

    let calories = record.get("calories")?.as_f64()?;
    if calories <= 0.0 {
        return None;
    }

    // Missing macros count as zero; present ones must be non-negative numbers.
    let macro_grams = |key: &str| match record.get(key) {
        None | Some(Value::Null) => Some(0.0),
        Some(v) => v.as_f64().filter(|g| *g >= 0.0),
    };

    Some(NutritionItem {
        name: name.to_string(),
        calories,
        carbs: macro_grams("carbs")?,
        protein: macro_grams("protein")?,
        fat: macro_grams("fat")?,
    })
}

/// Walks `candidates[0].content.parts[0].text`, substituting `"[]"` at any
/// missing key, empty array or non-string leaf.
pub fn envelope_text(envelope: &Value) -> &str {
    envelope
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(Value::as_str)
        .unwrap_or(EMPTY_ARRAY_FALLBACK)
}

/// Removes every "```json" and "```" marker, then trims whitespace.
pub fn strip_code_fences(text: &str) -> String {
    text.replace(FENCE_OPEN_JSON, "")
        .replace(FENCE, "")
        .trim()
        .to_string()
}

/// Runs the full extraction pipeline for schema `S`.
pub fn extract<S: ResponseSchema>(response: &RawResponse) -> Result<S::Output> {
    if !response.is_success() {
        tracing::error!(
            "Gemini API error (status {}): {}",
            response.status,
            response.body
        );
        return Err(Error::Http {
            status: response.status,
            body: response.body.clone(),
        });
    }

    let envelope: Value = serde_json::from_str(&response.body).map_err(|e| {
        tracing::error!(
            "Failed to decode Gemini envelope: {}\nBody: {}",
            e,
            response.body
        );
        Error::Internal(format!("response envelope is not valid JSON: {}", e))
    })?;

    let text = envelope_text(&envelope);
    tracing::debug!("Extracted {} chars of generated text", text.len());

    let cleaned = strip_code_fences(text);
    let decoded: Value = serde_json::from_str(&cleaned).map_err(|e| {
        tracing::error!("Generated text is not valid JSON: {}\nText: {}", e, cleaned);
        Error::Parse(format!("generated text is not valid JSON: {}", e))
    })?;

    let output = S::validate(decoded).inspect_err(|e| {
        tracing::warn!("{} validation failed: {}", S::NAME, e);
    })?;

    tracing::debug!("{} response passed validation", S::NAME);
    Ok(output)
}
