#![cfg(target_arch = "wasm32")]
use illustrations_core::{lifecycle, Environment, SceneDecl, SceneScheduler};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;

use constants::{CONTAINER_SELECTOR, REDUCED_MOTION_QUERY, SCENE_ATTRIBUTE};
use frame::{Clock, FrameContext, Mount, SharedScheduler};
use render::{CanvasSurface, Palette};

/// Register every illustration container in document order. Containers that
/// cannot host a scene are skipped without affecting the others.
fn mount_scenes(document: &web::Document, scheduler: &SharedScheduler, palette: &Rc<Palette>) -> anyhow::Result<Vec<Mount>> {
    let containers = document
        .query_selector_all(CONTAINER_SELECTOR)
        .map_err(|e| anyhow::anyhow!("query {}: {:?}", CONTAINER_SELECTOR, e))?;
    let mut mounts = Vec::new();
    for i in 0..containers.length() {
        let Some(container) = containers
            .get(i)
            .and_then(|node| node.dyn_into::<web::Element>().ok())
        else {
            continue;
        };
        let Some(name) = container.get_attribute(SCENE_ATTRIBUTE) else {
            log::warn!("[lifecycle] container without {}; skipping", SCENE_ATTRIBUTE);
            continue;
        };
        let surface = container
            .query_selector("canvas")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
            .and_then(|canvas| CanvasSurface::new(canvas, palette.clone()));
        let decl = SceneDecl {
            name: &name,
            config: dom::scene_config(&container),
            layout: dom::current_layout(&container),
        };
        let registered = lifecycle::register(&mut scheduler.borrow_mut(), &decl, surface);
        if let Some(id) = registered {
            events::wire_pointer(&container, id, scheduler.clone());
            mounts.push(Mount { id, container });
        }
    }
    Ok(mounts)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("illustrations starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    events::wire_global_errors();

    let palette = Rc::new(Palette::from_document(&document));
    let scheduler: SharedScheduler = Rc::new(RefCell::new(SceneScheduler::new()));
    let mounts = Rc::new(mount_scenes(&document, &scheduler, &palette)?);
    log::info!("[lifecycle] {} illustration(s) mounted", mounts.len());
    if mounts.is_empty() {
        return Ok(());
    }

    let reduce_motion = window.match_media(REDUCED_MOTION_QUERY).ok().flatten();
    let mut environment = Environment::new();
    if let Some(query) = &reduce_motion {
        environment.set_reduced_motion(query.matches());
    }
    let env = Rc::new(RefCell::new(environment));
    let clock = Clock::start();

    events::wire_observers(mounts.clone(), scheduler.clone());
    events::wire_scroll(env.clone(), clock);

    let frame_ctx = Rc::new(RefCell::new(FrameContext {
        scheduler,
        env,
        mounts,
        document,
        reduce_motion,
        clock,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
