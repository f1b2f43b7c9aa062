//! The per-request pipeline: encode the request, then extract and validate
//! the model's answer.

pub mod encoder;
pub mod extract;

pub use encoder::{encode_image_request, encode_text_request, ModelPayload};
pub use extract::{extract, FoodNames, Nutrition, ResponseSchema};
