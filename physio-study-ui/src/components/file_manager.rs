//! File Manager Component
//!
//! Grid of uploaded files with per-file selection, removal and a
//! select-all toggle. Only selected files go into the submission.

use leptos::*;
use physio_study::chat::{ChatInput, UploadedFile};

#[component]
pub fn FileManager(chat: RwSignal<ChatInput>) -> impl IntoView {
    move || {
        let files: Vec<UploadedFile> = chat.with(|c| c.files().iter().cloned().collect());
        if files.is_empty() {
            return view! {}.into_view();
        }
        let summary = chat.with(|c| c.files().summary());
        let all_selected = chat.with(|c| c.files().all_selected());

        view! {
            <section class="bg-gray-800 rounded-xl p-4 border border-gray-700">
                <div class="flex items-center justify-between mb-3">
                    <div>
                        <h3 class="font-semibold">{format!("📁 Files ({})", summary.total)}</h3>
                        <p class="text-sm text-gray-400">{summary.to_string()}</p>
                    </div>
                    <button
                        on:click=move |_| chat.update(|c| c.files_mut().toggle_all())
                        class="px-3 py-1 text-sm bg-gray-700 hover:bg-gray-600 rounded-lg transition-colors"
                    >
                        {if all_selected { "Deselect all" } else { "Select all" }}
                    </button>
                </div>

                <div class="grid grid-cols-2 md:grid-cols-4 gap-3">
                    {files
                        .into_iter()
                        .map(|file| view! { <FileTile chat=chat file=file /> })
                        .collect_view()}
                </div>
            </section>
        }
        .into_view()
    }
}

#[component]
fn FileTile(chat: RwSignal<ChatInput>, file: UploadedFile) -> impl IntoView {
    let toggle_id = file.id.clone();
    let remove_id = file.id.clone();
    let frame = if file.selected {
        "border-primary-500 bg-gray-700"
    } else {
        "border-gray-600 bg-gray-800 opacity-60"
    };

    let body = if file.is_image() {
        view! {
            <img src=file.preview.clone() alt=file.name.clone() class="w-full h-24 object-cover rounded" />
        }
        .into_view()
    } else {
        view! {
            <div class="h-24 overflow-hidden text-xs text-gray-300">
                <div class="text-2xl mb-1">{file.kind.icon()}</div>
                <p class="line-clamp-3">{file.preview.clone()}</p>
            </div>
        }
        .into_view()
    };

    view! {
        <div
            class=format!("relative rounded-lg border-2 p-2 cursor-pointer transition {}", frame)
            on:click=move |_| chat.update(|c| {
                c.files_mut().toggle(&toggle_id);
            })
        >
            <input type="checkbox" prop:checked=file.selected class="absolute top-2 left-2 pointer-events-none" />
            <button
                on:click=move |ev| {
                    ev.stop_propagation();
                    chat.update(|c| {
                        c.files_mut().remove(&remove_id);
                    });
                }
                class="absolute top-1 right-1 w-6 h-6 rounded-full bg-red-600 hover:bg-red-700 text-xs"
                title="Remove"
            >
                "✕"
            </button>
            {body}
            <p class="mt-2 text-sm truncate" title=file.name.clone()>{file.name.clone()}</p>
            <p class="text-xs text-gray-400">{file.display_size()}</p>
        </div>
    }
}
