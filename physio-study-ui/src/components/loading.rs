//! Loading Component
//!
//! Spinners shown while a submission or upload is in flight.

use leptos::*;

/// Inline loading spinner
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="inline-block loading-spinner w-4 h-4" />
    }
}

/// Spinner with a caption, for the response area
#[component]
pub fn Thinking(#[prop(into)] label: String) -> impl IntoView {
    view! {
        <div class="flex items-center space-x-3 py-6 text-gray-300">
            <div class="loading-spinner w-6 h-6" />
            <span>{label}</span>
        </div>
    }
}
