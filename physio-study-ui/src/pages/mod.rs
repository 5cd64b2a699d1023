//! Pages
//!
//! Top-level page components for each route.

pub mod chat;
pub mod flashcards;

pub use chat::Chat;
pub use flashcards::Flashcards;
