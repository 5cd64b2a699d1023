//! Physio Study UI
//!
//! Muscle flashcards and the study chat, built with Leptos (WASM).
//!
//! # Features
//!
//! - Flashcard and self-graded quiz modes over the muscle catalog
//! - Chat with files from paste, drag-drop, file picker and camera
//! - Dictation through the browser's speech recognition
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. View state lives in the `physio-study` core types; this crate
//! wires them to signals, browser APIs and the HTTP endpoints.

use leptos::*;

mod api;
mod app;
mod browser;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
