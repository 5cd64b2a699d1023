//! Response Panel Component
//!
//! Markdown answers, or the error text as-is.

use leptos::*;
use physio_study::chat::response::ERROR_HINT;
use physio_study::chat::{render, ChatInput, Rendered};

use crate::browser::MarkedRenderer;
use crate::components::loading::Thinking;

#[component]
pub fn ResponsePanel(chat: RwSignal<ChatInput>) -> impl IntoView {
    move || {
        if chat.with(|c| c.is_loading()) {
            return view! { <Thinking label="Thinking..." /> }.into_view();
        }
        let Some(response) = chat.with(|c| c.response().cloned()) else {
            return view! {}.into_view();
        };

        match render(&response, &MarkedRenderer) {
            Rendered::Markup(html) => view! {
                <section class="bg-gray-800 rounded-xl p-6 border border-gray-700">
                    <h3 class="font-semibold mb-3">"🤖 Answer"</h3>
                    <div class="prose prose-invert max-w-none" inner_html=html />
                </section>
            }
            .into_view(),
            Rendered::Preformatted(text) => view! {
                <section class="bg-red-900/40 rounded-xl p-6 border border-red-700">
                    <pre class="whitespace-pre-wrap text-red-200">{text}</pre>
                    <p class="mt-3 text-sm text-red-300">{ERROR_HINT}</p>
                </section>
            }
            .into_view(),
        }
    }
}
