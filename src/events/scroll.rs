use crate::frame::{Clock, SharedEnvironment};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Scrolling pauses every scene until the page has been still for a moment.
pub fn wire_scroll(env: SharedEnvironment, clock: Clock) {
    let closure = Closure::wrap(Box::new(move || {
        env.borrow_mut().note_scroll(clock.now_ms());
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
