//! Markdown rendering through `window.marked`

use js_sys::{Function, Reflect};
use physio_study::chat::MarkdownRenderer;
use wasm_bindgen::{JsCast, JsValue};

/// Uses the page's `marked` library when loaded, escaped `<pre>` otherwise
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkedRenderer;

impl MarkedRenderer {
    fn parse_with_marked(markdown: &str) -> Option<String> {
        let window = web_sys::window()?;
        let marked = Reflect::get(&window, &JsValue::from_str("marked")).ok()?;
        if marked.is_undefined() || marked.is_null() {
            return None;
        }
        let parse: Function = Reflect::get(&marked, &JsValue::from_str("parse"))
            .ok()?
            .dyn_into()
            .ok()?;
        parse
            .call1(&marked, &JsValue::from_str(markdown))
            .ok()?
            .as_string()
    }
}

impl MarkdownRenderer for MarkedRenderer {
    fn render(&self, markdown: &str) -> String {
        Self::parse_with_marked(markdown).unwrap_or_else(|| {
            format!(
                "<pre class=\"whitespace-pre-wrap\">{}</pre>",
                escape_html(markdown)
            )
        })
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
