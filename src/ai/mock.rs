use super::AnalysisService;
use crate::error::ErrorKind;
use crate::models::{FoodNameList, NutritionList};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// In-memory [`AnalysisService`] returning canned answers.
#[derive(Clone, Default)]
pub struct MockAnalysisService {
    food_name_responses: Arc<Mutex<Vec<FoodNameList>>>,
    nutrition_responses: Arc<Mutex<Vec<NutritionList>>>,
    failure: Arc<Mutex<Option<(ErrorKind, String)>>>,
    call_count: Arc<Mutex<usize>>,
    last_photo: Arc<Mutex<Option<(usize, String)>>>,
    last_text: Arc<Mutex<Option<String>>>,
}

impl MockAnalysisService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_food_names(self, names: FoodNameList) -> Self {
        self.food_name_responses.lock().unwrap().push(names);
        self
    }

    pub fn with_nutrition(self, items: NutritionList) -> Self {
        self.nutrition_responses.lock().unwrap().push(items);
        self
    }

    /// Every call fails with an error of `kind`. A `ConfigError` also fails
    /// [`AnalysisService::ensure_configured`].
    pub fn with_failure(self, kind: ErrorKind, message: &str) -> Self {
        *self.failure.lock().unwrap() = Some((kind, message.to_string()));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Size and MIME type of the most recent photo.
    pub fn last_photo(&self) -> Option<(usize, String)> {
        self.last_photo.lock().unwrap().clone()
    }

    pub fn last_text(&self) -> Option<String> {
        self.last_text.lock().unwrap().clone()
    }

    fn next_call(&self) -> Result<usize> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        match self.failure.lock().unwrap().as_ref() {
            Some((kind, message)) => Err(error_of_kind(*kind, message)),
            None => Ok(*count),
        }
    }
}

fn error_of_kind(kind: ErrorKind, message: &str) -> Error {
    let message = message.to_string();
    match kind {
        ErrorKind::ConfigError => Error::Config(message),
        ErrorKind::InputError => Error::Input(message),
        ErrorKind::HttpError => Error::Http {
            status: 502,
            body: message,
        },
        ErrorKind::ParseError => Error::Parse(message),
        ErrorKind::ValidationError => Error::Validation(message),
        ErrorKind::InternalError => Error::Internal(message),
    }
}

fn cycle<T: Clone + Default>(responses: &[T], count: usize) -> T {
    if responses.is_empty() {
        T::default()
    } else {
        responses[(count - 1) % responses.len()].clone()
    }
}

#[async_trait]
impl AnalysisService for MockAnalysisService {
    fn ensure_configured(&self) -> Result<()> {
        match self.failure.lock().unwrap().as_ref() {
            Some((ErrorKind::ConfigError, message)) => Err(Error::Config(message.clone())),
            _ => Ok(()),
        }
    }

    async fn analyze_photo(&self, image_bytes: &[u8], mime_type: &str) -> Result<FoodNameList> {
        *self.last_photo.lock().unwrap() = Some((image_bytes.len(), mime_type.to_string()));
        let count = self.next_call()?;

        Ok(cycle(self.food_name_responses.lock().unwrap().as_slice(), count))
    }

    async fn analyze_text(&self, text: &str) -> Result<NutritionList> {
        *self.last_text.lock().unwrap() = Some(text.to_string());
        let count = self.next_call()?;

        Ok(cycle(self.nutrition_responses.lock().unwrap().as_slice(), count))
    }
}
