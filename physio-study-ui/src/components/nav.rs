//! Navigation Component
//!
//! Header bar with the two study tools.

use leptos::*;
use leptos_router::*;

#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-2xl">"💪"</span>
                        <span class="text-xl font-bold text-white">"Physio Study"</span>
                        <span class="hidden md:inline text-sm text-gray-400">"Muscles, origins and insertions"</span>
                    </A>

                    <div class="flex items-center space-x-1">
                        <NavLink href="/" label="🃏 Flashcards" exact=true />
                        <NavLink href="/chat" label="💬 Study chat" exact=false />
                    </div>
                </div>
            </div>
        </nav>
    }
}

#[component]
fn NavLink(href: &'static str, label: &'static str, exact: bool) -> impl IntoView {
    view! {
        <A
            href=href
            exact=exact
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            {label}
        </A>
    }
}
