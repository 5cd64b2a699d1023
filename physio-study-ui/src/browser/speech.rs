//! Speech recognition
//!
//! `SpeechRecognition` (or the `webkit` prefixed one) reached through
//! `js_sys::Reflect`, since web-sys only exposes it behind unstable APIs.

use js_sys::{Array, Function, Reflect};
use physio_study::chat::{ChatError, ChatResult, SpeechInput};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

/// Default recognition language
pub const DEFAULT_SPEECH_LANGUAGE: &str = "nl-NL";

const SPEECH_LANGUAGE_KEY: &str = "physio_speech_language";

/// Recognition language from local storage or the default
pub fn speech_language() -> String {
    web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(SPEECH_LANGUAGE_KEY).ok().flatten())
        .and_then(|lang| normalize_language(&lang))
        .unwrap_or_else(|| DEFAULT_SPEECH_LANGUAGE.to_string())
}

/// Persist the recognition language. A blank tag restores the default.
pub fn set_speech_language(language: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = match normalize_language(language) {
                Some(language) => storage.set_item(SPEECH_LANGUAGE_KEY, &language),
                None => storage.remove_item(SPEECH_LANGUAGE_KEY),
            };
        }
    }
}

fn normalize_language(language: &str) -> Option<String> {
    let language = language.trim();
    (!language.is_empty()).then(|| language.to_string())
}

type Handler = Closure<dyn FnMut(JsValue)>;

/// One-utterance recognizer delivering final transcripts to a callback
pub struct BrowserSpeech {
    recognition: Option<(String, JsValue)>,
    on_transcript: Rc<dyn Fn(String)>,
    on_end: Rc<dyn Fn()>,
    // Kept alive as long as the recognizer references them
    handlers: Vec<Handler>,
}

impl BrowserSpeech {
    pub fn new(on_transcript: impl Fn(String) + 'static, on_end: impl Fn() + 'static) -> Self {
        Self {
            recognition: None,
            on_transcript: Rc::new(on_transcript),
            on_end: Rc::new(on_end),
            handlers: Vec::new(),
        }
    }

    fn constructor() -> Option<Function> {
        let window = web_sys::window()?;
        ["SpeechRecognition", "webkitSpeechRecognition"]
            .iter()
            .filter_map(|name| Reflect::get(&window, &JsValue::from_str(name)).ok())
            .find_map(|ctor| ctor.dyn_into::<Function>().ok())
    }

    fn build(&mut self, language: &str) -> Result<JsValue, JsValue> {
        let ctor = Self::constructor().ok_or(JsValue::NULL)?;
        let recognition = Reflect::construct(&ctor, &Array::new())?;
        Reflect::set(&recognition, &"continuous".into(), &JsValue::FALSE)?;
        Reflect::set(&recognition, &"interimResults".into(), &JsValue::FALSE)?;
        Reflect::set(&recognition, &"lang".into(), &JsValue::from_str(language))?;

        let on_transcript = self.on_transcript.clone();
        let on_result: Handler = Closure::wrap(Box::new(move |event: JsValue| {
            if let Some(transcript) = first_transcript(&event) {
                on_transcript(transcript);
            }
        }) as Box<dyn FnMut(JsValue)>);

        let on_end = self.on_end.clone();
        let on_finished: Handler = Closure::wrap(Box::new(move |_: JsValue| {
            on_end();
        }) as Box<dyn FnMut(JsValue)>);

        let on_end = self.on_end.clone();
        let on_error: Handler = Closure::wrap(Box::new(move |event: JsValue| {
            web_sys::console::error_1(&format!("Speech recognition error: {:?}", event).into());
            on_end();
        }) as Box<dyn FnMut(JsValue)>);

        Reflect::set(&recognition, &"onresult".into(), on_result.as_ref())?;
        Reflect::set(&recognition, &"onend".into(), on_finished.as_ref())?;
        Reflect::set(&recognition, &"onerror".into(), on_error.as_ref())?;
        self.handlers = vec![on_result, on_finished, on_error];

        Ok(recognition)
    }
}

/// `event.results[0][0].transcript`
fn first_transcript(event: &JsValue) -> Option<String> {
    let results = Reflect::get(event, &"results".into()).ok()?;
    let result = Reflect::get_u32(&results, 0).ok()?;
    let alternative = Reflect::get_u32(&result, 0).ok()?;
    Reflect::get(&alternative, &"transcript".into()).ok()?.as_string()
}

fn call(target: &JsValue, method: &str) -> Result<(), JsValue> {
    let function: Function = Reflect::get(target, &JsValue::from_str(method))?.dyn_into()?;
    function.call0(target)?;
    Ok(())
}

impl SpeechInput for BrowserSpeech {
    fn is_available(&self) -> bool {
        Self::constructor().is_some()
    }

    fn start(&mut self, language: &str) -> ChatResult<()> {
        let reusable = matches!(&self.recognition, Some((lang, _)) if lang == language);
        if !reusable {
            let recognition = self
                .build(language)
                .map_err(|_| ChatError::Unavailable("Speech recognition"))?;
            self.recognition = Some((language.to_string(), recognition));
        }

        let Some((_, recognition)) = &self.recognition else {
            return Err(ChatError::Unavailable("Speech recognition"));
        };
        call(recognition, "start").map_err(|e| {
            web_sys::console::error_1(&e);
            ChatError::Unavailable("Speech recognition")
        })
    }

    fn stop(&mut self) {
        if let Some((_, recognition)) = &self.recognition {
            let _ = call(recognition, "stop");
        }
    }
}
