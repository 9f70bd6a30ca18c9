use crate::dom;
use crate::frame::SharedScheduler;
use glam::Vec2;
use illustrations_core::SceneId;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Track the pointer over one container; leaving it releases the scene's
/// pointer back to its idle motion.
pub fn wire_pointer(container: &web::Element, id: SceneId, scheduler: SharedScheduler) {
    wire_pointermove(container, id, scheduler.clone());
    wire_pointerleave(container, id, scheduler);
}

fn wire_pointermove(container: &web::Element, id: SceneId, scheduler: SharedScheduler) {
    let target = container.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let client = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
        let rect = dom::client_rect(&target);
        scheduler.borrow_mut().pointer_move(id, client, rect);
    }) as Box<dyn FnMut(_)>);
    _ = container.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerleave(container: &web::Element, id: SceneId, scheduler: SharedScheduler) {
    let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        scheduler.borrow_mut().pointer_leave(id);
    }) as Box<dyn FnMut(_)>);
    _ = container.add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
    closure.forget();
}
