//! API Layer
//!
//! Completion and extraction endpoints over `gloo-net`.

pub mod client;

pub use client::{get_api_base, set_api_base, HttpCompletion, HttpExtractor};
