//! The single frame loop driving every registered scene.
//!
//! One [`Scheduler::tick`] per display refresh: advance scene clocks, render
//! what needs rendering, and isolate scenes whose render fails so the rest of
//! the page keeps animating.

use crate::config::SceneConfig;
use crate::constants::{MAX_DEVICE_PIXEL_RATIO, MAX_FRAME_DELTA_MS};
use crate::environment::Environment;
use crate::error::{RenderError, SurfaceError};
use crate::overlay::{OverlayCommand, OverlaySink};
use crate::pointer::{ClientRect, PointerState};
use crate::scenes::{Frame, Layout, Render, RenderInput};
use crate::surface::Surface;
use crate::tasks::{TaskOwner, TaskQueue};
use fnv::FnvHashMap;
use glam::Vec2;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(pub u32);

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotStatus {
    Running,
    /// Render failed; skipped for the rest of the session.
    Faulted,
    /// Container left the document.
    Retired,
}

/// Logical size and capped device pixel ratio of a scene.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneSize {
    pub width: f32,
    pub height: f32,
    pub dpr: f32,
}

impl SceneSize {
    /// Floor the logical size and cap the pixel ratio.
    pub fn normalized(width: f32, height: f32, dpr: f32) -> Self {
        let floor = |v: f32| if v.is_finite() { v.max(0.0).floor() } else { 0.0 };
        let dpr = if dpr.is_finite() && dpr > 0.0 {
            dpr.min(MAX_DEVICE_PIXEL_RATIO)
        } else {
            1.0
        };
        Self {
            width: floor(width),
            height: floor(height),
            dpr,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Device-pixel backing store dimensions, never below 1×1.
    pub fn backing(&self) -> (u32, u32) {
        let w = (self.width * self.dpr).floor().max(1.0) as u32;
        let h = (self.height * self.dpr).floor().max(1.0) as u32;
        (w, h)
    }
}

pub struct SceneSlot<S, D> {
    id: SceneId,
    name: String,
    scene: S,
    surface: D,
    size: SceneSize,
    clock: f64,
    pointer: PointerState,
    active: bool,
    needs_render: bool,
    paused_frame_rendered: bool,
    status: SlotStatus,
    frame_interval: Option<f64>,
    last_render_clock: Option<f64>,
    renders: u64,
}

impl<S, D> SceneSlot<S, D> {
    pub fn id(&self) -> SceneId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn size(&self) -> SceneSize {
        self.size
    }

    /// Scene-local clock in ms.
    pub fn elapsed(&self) -> f64 {
        self.clock
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    pub fn status(&self) -> SlotStatus {
        self.status
    }

    /// Number of successful render calls.
    pub fn renders(&self) -> u64 {
        self.renders
    }
}

/// A render failure isolated at the tick boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneFault {
    pub scene: SceneId,
    pub name: String,
    pub error: RenderError,
}

impl fmt::Display for SceneFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Illustration error in {}: {}", self.name, self.error)
    }
}

/// What happened during one tick, for the host to act on.
#[derive(Debug, Default)]
pub struct TickReport {
    pub dt_ms: f64,
    pub paused: bool,
    pub rendered: Vec<SceneId>,
    pub overlay: Vec<(SceneId, OverlayCommand)>,
    pub faults: Vec<SceneFault>,
}

pub struct Scheduler<S, D> {
    slots: Vec<SceneSlot<S, D>>,
    index: FnvHashMap<SceneId, usize>,
    tasks: TaskQueue<OverlayCommand>,
    last_now: Option<f64>,
    next_id: u32,
}

impl<S, D> Default for Scheduler<S, D> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            index: FnvHashMap::default(),
            tasks: TaskQueue::new(),
            last_now: None,
            next_id: 0,
        }
    }
}

impl<S: Render, D: Surface> Scheduler<S, D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scene; ticks visit scenes in insertion order. The scene starts
    /// visible with a zero size until its first [`Scheduler::resize`].
    pub fn insert(&mut self, name: impl Into<String>, scene: S, surface: D, config: &SceneConfig) -> SceneId {
        let id = SceneId(self.next_id);
        self.next_id += 1;
        self.index.insert(id, self.slots.len());
        self.slots.push(SceneSlot {
            id,
            name: name.into(),
            scene,
            surface,
            size: SceneSize::default(),
            clock: 0.0,
            pointer: PointerState::default(),
            active: true,
            needs_render: true,
            paused_frame_rendered: false,
            status: SlotStatus::Running,
            frame_interval: config.frame_interval_ms(),
            last_render_clock: None,
            renders: 0,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, id: SceneId) -> Option<&SceneSlot<S, D>> {
        self.index.get(&id).and_then(|&i| self.slots.get(i))
    }

    fn slot_mut(&mut self, id: SceneId) -> Option<&mut SceneSlot<S, D>> {
        match self.index.get(&id) {
            Some(&i) => self.slots.get_mut(i),
            None => None,
        }
    }

    pub fn slots(&self) -> impl Iterator<Item = &SceneSlot<S, D>> {
        self.slots.iter()
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Container size changed: rebuild the backing store, let the scene
    /// recompute cached geometry and force one frame even while paused.
    pub fn resize(&mut self, id: SceneId, layout: Layout) -> Result<(), SurfaceError> {
        let Some(slot) = self.slot_mut(id) else {
            return Ok(());
        };
        let size = SceneSize::normalized(layout.width, layout.height, layout.dpr);
        let (bw, bh) = size.backing();
        slot.surface.configure(bw, bh, size.dpr)?;
        slot.size = size;
        slot.scene.on_resize(&Layout {
            width: size.width,
            height: size.height,
            dpr: size.dpr,
            card_anchor: layout.card_anchor,
        });
        slot.needs_render = true;
        log::debug!(
            "[scheduler] {} {} resized to {}x{} @{}x",
            slot.name,
            id,
            size.width,
            size.height,
            size.dpr
        );
        Ok(())
    }

    /// Viewport intersection changed. Has no effect on faulted scenes.
    pub fn set_visible(&mut self, id: SceneId, visible: bool) {
        if let Some(slot) = self.slot_mut(id) {
            slot.active = visible;
        }
    }

    pub fn pointer_move(&mut self, id: SceneId, client: Vec2, rect: ClientRect) {
        if let Some(slot) = self.slot_mut(id) {
            slot.pointer.move_to_client(client, rect);
        }
    }

    pub fn pointer_leave(&mut self, id: SceneId) {
        if let Some(slot) = self.slot_mut(id) {
            slot.pointer.leave();
        }
    }

    pub fn request_render(&mut self, id: SceneId) {
        if let Some(slot) = self.slot_mut(id) {
            slot.needs_render = true;
        }
    }

    pub fn request_render_all(&mut self) {
        for slot in &mut self.slots {
            slot.needs_render = true;
        }
    }

    /// Permanently stop a scene whose container left the document.
    pub fn retire(&mut self, id: SceneId) {
        let cancelled = self.tasks.cancel_scene(id);
        if let Some(slot) = self.slot_mut(id) {
            if slot.status != SlotStatus::Retired {
                log::info!("[scheduler] retiring {} {} ({} pending tasks dropped)", slot.name, id, cancelled);
                slot.status = SlotStatus::Retired;
            }
        }
    }

    pub fn tick(&mut self, now_ms: f64, env: &mut Environment) -> TickReport {
        let dt = match self.last_now {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_DELTA_MS),
            None => 0.0,
        };
        let sampled = self.last_now.is_some();
        self.last_now = Some(now_ms);

        env.advance(now_ms);
        if env.take_rerender_request() {
            self.request_render_all();
        }
        if sampled && !env.motion_suppressed() {
            env.governor.sample(dt);
        }
        let paused = env.paused();
        let low_power = env.low_power();
        let reduced_motion = env.reduced_motion();

        let mut report = TickReport {
            dt_ms: dt,
            paused,
            ..TickReport::default()
        };
        for (owner, cmd) in self.tasks.drain_due(now_ms) {
            report.overlay.push((owner.scene, cmd));
        }

        for slot in &mut self.slots {
            if slot.status != SlotStatus::Running {
                continue;
            }
            slot.pointer.smooth();
            if !slot.active {
                continue;
            }
            if !paused {
                slot.clock += dt;
                slot.paused_frame_rendered = false;
            }
            if slot.size.is_empty() {
                continue;
            }
            if paused && slot.paused_frame_rendered && !slot.needs_render {
                continue;
            }
            if !paused && !slot.needs_render {
                if let (Some(interval), Some(last)) = (slot.frame_interval, slot.last_render_clock) {
                    if slot.clock - last < interval {
                        continue;
                    }
                }
            }

            let mut sink = OverlaySink::new();
            let mut frame = Frame {
                input: RenderInput {
                    width: slot.size.width,
                    height: slot.size.height,
                    elapsed: slot.clock,
                    pointer: slot.pointer.sample(),
                    paused,
                    low_power,
                    reduced_motion,
                },
                surface: &mut slot.surface,
                overlay: &mut sink,
            };
            if let Err(error) = slot.scene.render(&mut frame) {
                log::error!("[scheduler] {} {} failed to render: {}", slot.name, slot.id, error);
                slot.status = SlotStatus::Faulted;
                // Cards already spawned still need their removal.
                for (_, cmd) in self.tasks.take_scene(slot.id) {
                    if matches!(cmd, OverlayCommand::RemoveCard { .. }) {
                        report.overlay.push((slot.id, cmd));
                    }
                }
                report.faults.push(SceneFault {
                    scene: slot.id,
                    name: slot.name.clone(),
                    error,
                });
                continue;
            }

            if paused {
                slot.paused_frame_rendered = true;
            }
            slot.needs_render = false;
            slot.last_render_clock = Some(slot.clock);
            slot.renders += 1;
            report.rendered.push(slot.id);

            for lane in sink.superseded {
                self.tasks.cancel_owner(TaskOwner { scene: slot.id, lane });
            }
            for cmd in sink.immediate {
                report.overlay.push((slot.id, cmd));
            }
            for (lane, delay, cmd) in sink.delayed {
                self.tasks
                    .schedule(TaskOwner { scene: slot.id, lane }, now_ms + delay, cmd);
            }
        }
        report
    }
}
