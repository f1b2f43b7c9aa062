//! Food photo and nutrition analysis proxy backed by Gemini
//!
//! Forwards a food photo or a text list of foods to the Gemini
//! `generateContent` API, then extracts and validates the model's answer into
//! a food-name list or a list of nutrition records.

pub mod ai;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod server;

pub use error::{Error, ErrorKind, Result};
