use crate::overlay::{self, OverlayTarget};
use crate::render::CanvasSurface;
use illustrations_core::{Environment, SceneId, SceneScheduler, SlotStatus, TickReport};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type SharedScheduler = Rc<RefCell<SceneScheduler<CanvasSurface>>>;
pub type SharedEnvironment = Rc<RefCell<Environment>>;

/// Monotonic page clock shared by the frame loop and event handlers.
#[derive(Clone, Copy, Debug)]
pub struct Clock(Instant);

impl Clock {
    pub fn start() -> Self {
        Self(Instant::now())
    }

    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.0.elapsed().as_secs_f64() * 1000.0
    }
}

/// A registered container and the scene it hosts.
pub struct Mount {
    pub id: SceneId,
    pub container: web::Element,
}

pub struct FrameContext {
    pub scheduler: SharedScheduler,
    pub env: SharedEnvironment,
    pub mounts: Rc<Vec<Mount>>,
    pub document: web::Document,
    pub reduce_motion: Option<web::MediaQueryList>,
    pub clock: Clock,
}

impl FrameContext {
    pub fn frame(&mut self) {
        if let Some(query) = &self.reduce_motion {
            self.env.borrow_mut().set_reduced_motion(query.matches());
        }
        self.retire_detached();

        let now = self.clock.now_ms();
        let report = {
            let mut env = self.env.borrow_mut();
            self.scheduler.borrow_mut().tick(now, &mut env)
        };
        self.apply(&report);
    }

    fn mount(&self, id: SceneId) -> Option<&Mount> {
        self.mounts.iter().find(|m| m.id == id)
    }

    /// Containers removed from the document stop animating for good.
    fn retire_detached(&self) {
        for m in self.mounts.iter() {
            if m.container.is_connected() {
                continue;
            }
            let live = matches!(
                self.scheduler.borrow().slot(m.id).map(|s| s.status()),
                Some(SlotStatus::Running) | Some(SlotStatus::Faulted)
            );
            if live {
                self.scheduler.borrow_mut().retire(m.id);
            }
        }
    }

    fn apply(&self, report: &TickReport) {
        for (id, cmd) in &report.overlay {
            if let Some(m) = self.mount(*id) {
                OverlayTarget {
                    document: &self.document,
                    container: &m.container,
                }
                .apply(cmd);
            }
        }
        for fault in &report.faults {
            overlay::show_error(&self.document, &fault.to_string());
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        log::error!("[frame] no window to schedule the next frame");
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
