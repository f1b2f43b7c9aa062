//! AI service integration for food recognition and nutrition analysis
//!
//! Provides the [`AnalysisService`] seam used by the HTTP layer, its Gemini
//! implementation and a mock for tests.

pub mod gemini;
pub mod mime;
pub mod mock;

pub use gemini::GeminiAnalyzer;
pub use mock::MockAnalysisService;

use crate::models::{FoodNameList, NutritionList};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Fails when the service cannot call the model at all. Routes check
    /// this before reading the request body.
    fn ensure_configured(&self) -> Result<()> {
        Ok(())
    }

    /// Names the foods visible in a photo.
    async fn analyze_photo(&self, image_bytes: &[u8], mime_type: &str) -> Result<FoodNameList>;

    /// Estimates nutrition for a free-text list of foods.
    async fn analyze_text(&self, text: &str) -> Result<NutritionList>;
}
