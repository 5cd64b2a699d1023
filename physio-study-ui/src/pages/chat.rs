//! Chat Page
//!
//! Question box fed by typing, speech, paste, drag-and-drop, the file
//! picker and the camera. Selected files are folded into one request.

use gloo_timers::callback::Timeout;
use leptos::*;
use physio_study::chat::classify::accept_attribute;
use physio_study::chat::ingest::data_url;
use physio_study::chat::{
    ingest, CapturedImage, ChatInput, ClipboardPayload, Completion, PasteOutcome,
};
use wasm_bindgen::JsCast;

use crate::api::{self, HttpCompletion, HttpExtractor};
use crate::browser::{
    read_file, read_file_list, set_speech_language, speech_language, BrowserSpeech,
};
use crate::components::{FileManager, InlineLoading, ResponsePanel};
use crate::state::global::GlobalState;

/// Chat page component
#[component]
pub fn Chat() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let chat = create_rw_signal(ChatInput::new());

    // Hints expire on their own; a newer hint is left alone
    let hint = create_memo(move |_| chat.with(|c| c.hint()));
    create_effect(move |_| {
        if let Some(hint) = hint.get() {
            let delay = hint.duration().as_millis() as u32;
            Timeout::new(delay, move || {
                let _ = chat.try_update(|c| c.expire_hint(hint));
            })
            .forget();
        }
    });

    let submit = move || {
        let Some(request) = chat.try_update(|c| c.begin_submit()).flatten() else {
            return;
        };
        spawn_local(async move {
            let result = HttpCompletion::from_storage().complete(&request).await;
            let _ = chat.try_update(|c| c.finish_submit(result));
        });
    };

    view! {
        <div class="space-y-6 max-w-4xl mx-auto">
            // Header
            <div>
                <h1 class="text-3xl font-bold">"Study chat"</h1>
                <p class="text-gray-400 mt-1">
                    "Ask about anatomy and attach notes, pictures or data"
                </p>
            </div>

            <section
                on:dragover=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    if !chat.with(|c| c.is_drag_over()) {
                        chat.update(|c| c.set_drag_over(true));
                    }
                }
                on:dragleave=move |_| chat.update(|c| c.set_drag_over(false))
                on:drop=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    chat.update(|c| c.set_drag_over(false));
                    handle_drop(chat, state, ev);
                }
                class=move || format!(
                    "bg-gray-800 rounded-xl p-6 border-2 border-dashed transition-colors {}",
                    if chat.with(|c| c.is_drag_over()) {
                        "border-primary-500 bg-gray-700"
                    } else {
                        "border-gray-700"
                    }
                )
            >
                <textarea
                    rows=5
                    placeholder="Type a question, paste a picture or drop files here..."
                    prop:value=move || chat.with(|c| c.message().to_string())
                    on:input=move |ev| chat.update(|c| c.set_message(event_target_value(&ev)))
                    on:paste=move |ev: web_sys::ClipboardEvent| handle_paste(chat, state, ev)
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Enter" && !ev.shift_key() {
                            ev.prevent_default();
                            submit();
                        }
                    }
                    class="w-full bg-gray-700 rounded-lg px-4 py-3 border border-gray-600
                           focus:border-primary-500 focus:outline-none resize-y"
                />

                {move || chat.with(|c| c.hint()).map(|hint| view! {
                    <p class="mt-2 text-sm text-primary-300">{hint.message()}</p>
                })}

                <ImagePreview chat=chat />

                <div class="mt-4 flex flex-wrap items-center gap-2">
                    <FilePicker chat=chat />
                    <CameraButton chat=chat />
                    <SpeechButton chat=chat />

                    <button
                        on:click=move |_| submit()
                        disabled=move || !chat.with(|c| c.can_submit())
                        class="ml-auto px-6 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                               disabled:cursor-not-allowed rounded-lg font-medium transition-colors
                               flex items-center space-x-2"
                    >
                        {move || chat.with(|c| c.is_loading()).then(|| view! { <InlineLoading /> })}
                        <span>"Send"</span>
                    </button>
                </div>
            </section>

            <FileManager chat=chat />
            <ResponsePanel chat=chat />
            <ServiceSettings />
        </div>
    }
}

fn handle_paste(chat: RwSignal<ChatInput>, state: GlobalState, ev: web_sys::ClipboardEvent) {
    let Some(data) = ev.clipboard_data() else {
        return;
    };

    if let Some(file) = first_image(&data) {
        // Must be suppressed before the event returns; the bytes arrive later
        ev.prevent_default();
        spawn_local(async move {
            let image = match read_file(&file).await {
                Ok(image) => image,
                Err(e) => return state.show_error(&e),
            };
            let payload = ClipboardPayload {
                image: Some(image),
                text: None,
            };
            if let Some(Err(e)) = chat.try_update(|c| c.paste(payload)) {
                state.show_error(&e.to_string());
            }
        });
        return;
    }

    let text = data.get_data("text/plain").ok().filter(|t| !t.is_empty());
    let payload = ClipboardPayload { image: None, text };
    match chat.try_update(|c| c.paste(payload)) {
        Some(Ok(PasteOutcome::Consumed)) => ev.prevent_default(),
        Some(Err(e)) => state.show_error(&e.to_string()),
        _ => {}
    }
}

/// First `image/*` file item of the clipboard
fn first_image(data: &web_sys::DataTransfer) -> Option<web_sys::File> {
    let items = data.items();
    (0..items.length())
        .filter_map(|i| items.get(i))
        .filter(|item| item.kind() == "file" && item.type_().starts_with("image/"))
        .find_map(|item| item.get_as_file().ok().flatten())
}

fn handle_drop(chat: RwSignal<ChatInput>, state: GlobalState, ev: web_sys::DragEvent) {
    let Some(data) = ev.data_transfer() else {
        return;
    };

    let files = data.files().map(|list| read_file_list(&list)).unwrap_or_default();
    if !files.is_empty() {
        upload_files(chat, state, files);
        return;
    }

    if let Ok(text) = data.get_data("text/plain") {
        if !text.trim().is_empty() {
            chat.update(|c| c.drop_text(&text));
        }
    }
}

/// Files are read and extracted concurrently and added as each finishes
fn upload_files(chat: RwSignal<ChatInput>, state: GlobalState, files: Vec<web_sys::File>) {
    for file in files {
        spawn_local(async move {
            let incoming = match read_file(&file).await {
                Ok(incoming) => incoming,
                Err(e) => return state.show_error(&e),
            };
            let name = incoming.name.clone();
            match ingest(incoming, &HttpExtractor::from_storage()).await {
                Ok(uploaded) => {
                    let _ = chat.try_update(|c| c.add_file(uploaded));
                }
                Err(e) => state.show_error(&format!("{}: {}", name, e)),
            }
        });
    }
}

fn input_files(ev: &web_sys::Event) -> (Option<web_sys::HtmlInputElement>, Vec<web_sys::File>) {
    let input = ev
        .target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());
    let files = input
        .as_ref()
        .and_then(|i| i.files())
        .map(|list| read_file_list(&list))
        .unwrap_or_default();
    (input, files)
}

#[component]
fn FilePicker(chat: RwSignal<ChatInput>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <label class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg cursor-pointer transition-colors">
            "📎 Files"
            <input
                type="file"
                multiple=true
                accept=accept_attribute()
                class="hidden"
                on:change=move |ev| {
                    let (input, files) = input_files(&ev);
                    upload_files(chat, state, files);
                    // Picking the same file again must fire another change
                    if let Some(input) = input {
                        input.set_value("");
                    }
                }
            />
        </label>
    }
}

/// Still photo from the device camera through the capture input
#[component]
fn CameraButton(chat: RwSignal<ChatInput>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <label class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg cursor-pointer transition-colors">
            "📷 Camera"
            <input
                type="file"
                accept="image/*"
                capture="environment"
                class="hidden"
                on:change=move |ev| {
                    let (input, files) = input_files(&ev);
                    if let Some(input) = input {
                        input.set_value("");
                    }
                    let Some(file) = files.into_iter().next() else {
                        return;
                    };
                    spawn_local(async move {
                        match read_file(&file).await {
                            Ok(photo) => {
                                let mime = photo.mime.as_deref().unwrap_or("image/jpeg");
                                let image = CapturedImage {
                                    data_url: data_url(mime, &photo.bytes),
                                    size_bytes: photo.size(),
                                };
                                let _ = chat.try_update(|c| c.add_capture(image));
                            }
                            Err(e) => state.show_error(&e),
                        }
                    });
                }
            />
        </label>
    }
}

#[component]
fn SpeechButton(chat: RwSignal<ChatInput>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let speech = store_value(BrowserSpeech::new(
        move |transcript| {
            let _ = chat.try_update(|c| c.append_transcript(&transcript));
        },
        move || {
            let _ = chat.try_update(|c| c.listening_ended());
        },
    ));

    let toggle = move |_| {
        let language = speech_language();
        let mut result = Ok(false);
        speech.update_value(|recognizer| {
            chat.update(|c| result = c.toggle_listening(recognizer, &language));
        });
        if let Err(e) = result {
            state.show_error(&e.to_string());
        }
    };

    let listening = move || chat.with(|c| c.is_listening());

    view! {
        <button
            on:click=toggle
            class=move || if listening() {
                "px-4 py-2 bg-red-600 hover:bg-red-700 rounded-lg animate-pulse transition-colors"
            } else {
                "px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg transition-colors"
            }
            title="Speak your question"
        >
            {move || if listening() { "⏹ Stop" } else { "🎤 Speak" }}
        </button>
    }
}

/// Image URL pasted as text. Shown only; it is not part of the request.
#[component]
fn ImagePreview(chat: RwSignal<ChatInput>) -> impl IntoView {
    move || {
        chat.with(|c| c.image_preview().map(str::to_string)).map(|url| view! {
            <div class="mt-4 relative inline-block">
                <img src=url alt="Pasted image" class="max-h-48 rounded-lg border border-gray-600" />
                <button
                    on:click=move |_| chat.update(|c| c.remove_image_preview())
                    class="absolute top-1 right-1 w-6 h-6 rounded-full bg-red-600 hover:bg-red-700 text-xs"
                    title="Remove"
                >
                    "✕"
                </button>
            </div>
        })
    }
}

/// Service base URL and speech recognition language, kept in local storage
#[component]
fn ServiceSettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (api_url, set_api_url) = create_signal(api::get_api_base());
    let (language, set_language) = create_signal(speech_language());

    view! {
        <details class="bg-gray-800 rounded-xl p-4 text-sm">
            <summary class="cursor-pointer text-gray-400">"⚙️ Service"</summary>
            <label class="block mt-3 mb-2 text-gray-400">"Service URL"</label>
            <div class="flex space-x-2">
                <input
                    type="text"
                    prop:value=move || api_url.get()
                    on:input=move |ev| set_api_url.set(event_target_value(&ev))
                    class="flex-1 bg-gray-700 rounded-lg px-3 py-2 border border-gray-600
                           focus:border-primary-500 focus:outline-none"
                />
                <button
                    on:click=move |_| {
                        api::set_api_base(&api_url.get());
                        set_api_url.set(api::get_api_base());
                        state.show_success("Service URL saved");
                    }
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    "Save"
                </button>
            </div>

            <label class="block mt-4 mb-2 text-gray-400">"Speech language (e.g. nl-NL, en-GB)"</label>
            <div class="flex space-x-2">
                <input
                    type="text"
                    prop:value=move || language.get()
                    on:input=move |ev| set_language.set(event_target_value(&ev))
                    class="flex-1 bg-gray-700 rounded-lg px-3 py-2 border border-gray-600
                           focus:border-primary-500 focus:outline-none"
                />
                <button
                    on:click=move |_| {
                        set_speech_language(&language.get());
                        set_language.set(speech_language());
                        state.show_success("Speech language saved");
                    }
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    "Save"
                </button>
            </div>
        </details>
    }
}
