use crate::dom;
use crate::frame::{Mount, SharedScheduler};
use illustrations_core::{SceneId, VISIBILITY_THRESHOLD};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

fn scene_for(mounts: &[Mount], target: &web::Element) -> Option<SceneId> {
    mounts.iter().find(|m| &m.container == target).map(|m| m.id)
}

fn resize_scene(scheduler: &SharedScheduler, id: SceneId, container: &web::Element, width: f64, height: f64) {
    let layout = dom::layout_for(container, width, height);
    if let Err(e) = scheduler.borrow_mut().resize(id, layout) {
        log::warn!("[observers] resize of {} failed: {}", id, e);
    }
}

/// Per-container resize and visibility tracking. Browsers without
/// `ResizeObserver` fall back to the window `resize` event; without
/// `IntersectionObserver` every scene stays active.
pub fn wire_observers(mounts: Rc<Vec<Mount>>, scheduler: SharedScheduler) {
    if !wire_resize_observer(&mounts, &scheduler) {
        log::info!("[observers] ResizeObserver unavailable; using window resize");
        wire_window_resize(mounts.clone(), scheduler.clone());
    }
    if !wire_intersection_observer(&mounts, &scheduler) {
        log::info!("[observers] IntersectionObserver unavailable; scenes stay active");
    }
}

fn wire_resize_observer(mounts: &Rc<Vec<Mount>>, scheduler: &SharedScheduler) -> bool {
    let cb_mounts = mounts.clone();
    let cb_scheduler = scheduler.clone();
    let closure = Closure::wrap(Box::new(move |entries: js_sys::Array, _observer: JsValue| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<web::ResizeObserverEntry>() else {
                continue;
            };
            let target = entry.target();
            if let Some(id) = scene_for(&cb_mounts, &target) {
                let rect = entry.content_rect();
                resize_scene(&cb_scheduler, id, &target, rect.width(), rect.height());
            }
        }
    }) as Box<dyn FnMut(js_sys::Array, JsValue)>);

    let Ok(observer) = web::ResizeObserver::new(closure.as_ref().unchecked_ref()) else {
        return false;
    };
    for m in mounts.iter() {
        observer.observe(&m.container);
    }
    closure.forget();
    true
}

fn wire_window_resize(mounts: Rc<Vec<Mount>>, scheduler: SharedScheduler) {
    let closure = Closure::wrap(Box::new(move || {
        for m in mounts.iter() {
            let (w, h) = (m.container.client_width(), m.container.client_height());
            resize_scene(&scheduler, m.id, &m.container, w as f64, h as f64);
        }
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_intersection_observer(mounts: &Rc<Vec<Mount>>, scheduler: &SharedScheduler) -> bool {
    let cb_mounts = mounts.clone();
    let cb_scheduler = scheduler.clone();
    let closure = Closure::wrap(Box::new(move |entries: js_sys::Array, _observer: JsValue| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                continue;
            };
            if let Some(id) = scene_for(&cb_mounts, &entry.target()) {
                cb_scheduler.borrow_mut().set_visible(id, entry.is_intersecting());
            }
        }
    }) as Box<dyn FnMut(js_sys::Array, JsValue)>);

    let init = web::IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(VISIBILITY_THRESHOLD));
    let Ok(observer) =
        web::IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init)
    else {
        return false;
    };
    for m in mounts.iter() {
        observer.observe(&m.container);
    }
    closure.forget();
    true
}
