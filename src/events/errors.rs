use crate::dom;
use crate::overlay;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

fn report(message: &str) {
    log::error!("[errors] {}", message);
    if let Some(document) = dom::window_document() {
        overlay::show_error(&document, &format!("Illustration error: {}", message));
    }
}

fn reason_text(reason: &JsValue) -> Option<String> {
    let text = match reason.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => reason.as_string()?,
    };
    (!text.is_empty()).then_some(text)
}

/// Uncaught page errors are surfaced in the debug overlay; scene state is
/// left alone.
pub fn wire_global_errors() {
    let Some(window) = web::window() else {
        return;
    };

    let on_error = Closure::wrap(Box::new(move |ev: web::Event| {
        // Resource load failures arrive as plain events without a message.
        let Some(ev) = ev.dyn_ref::<web::ErrorEvent>() else {
            return;
        };
        let message = ev.message();
        if !message.is_empty() {
            report(&message);
        }
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref());
    on_error.forget();

    let on_rejection = Closure::wrap(Box::new(move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::PromiseRejectionEvent>() else {
            return;
        };
        if let Some(message) = reason_text(&ev.reason()) {
            report(&message);
        }
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("unhandledrejection", on_rejection.as_ref().unchecked_ref());
    on_rejection.forget();
}
