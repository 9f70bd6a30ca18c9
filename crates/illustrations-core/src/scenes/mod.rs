//! Scene contract and the closed set of illustration scenes.

use crate::config::SceneConfig;
use crate::error::{RenderError, SetupError, SurfaceError};
use crate::overlay::OverlaySink;
use crate::pointer::PointerSample;
use crate::surface::{Backdrop, Surface};
use glam::Vec2;
use std::str::FromStr;

pub mod branch;
pub mod fill;
pub mod flow;
pub mod pulses;
pub mod rings;
pub mod routing;
pub mod savings;
pub mod speed;
pub mod strain;
pub mod wave;

pub use branch::BranchScene;
pub use fill::FillScene;
pub use flow::FlowScene;
pub use pulses::{Pulse, PulseSet, PulseScene};
pub use rings::{RingGeometry, RingSet, RingsScene};
pub use routing::{greedy_route, Lattice, RoutingScene};
pub use savings::SavingsScene;
pub use speed::{SpeedPhase, SpeedScene};
pub use strain::StrainScene;
pub use wave::WaveScene;

/// Per-frame input of the render contract.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderInput {
    pub width: f32,
    pub height: f32,
    /// Scene-local clock in ms; frozen while paused.
    pub elapsed: f64,
    pub pointer: PointerSample,
    pub paused: bool,
    pub low_power: bool,
    pub reduced_motion: bool,
}

impl RenderInput {
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Scale fractions of the surface size to surface units.
    #[inline]
    pub fn at(&self, fx: f32, fy: f32) -> Vec2 {
        Vec2::new(self.width * fx, self.height * fy)
    }

    #[inline]
    pub fn min_dim(&self) -> f32 {
        self.width.min(self.height)
    }

    #[inline]
    pub fn diagonal(&self) -> f32 {
        self.width.hypot(self.height)
    }

    /// Spawn fewer transient effects when set.
    #[inline]
    pub fn economize(&self) -> bool {
        self.low_power || self.reduced_motion
    }
}

/// Position of an HTML overlay card relative to the scene container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CardAnchor {
    pub left_x: f32,
    pub right_x: f32,
    pub center_x: f32,
    pub center_y: f32,
}

/// Logical size after a resize, plus host-measured overlay geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub dpr: f32,
    pub card_anchor: Option<CardAnchor>,
}

impl Layout {
    pub fn new(width: f32, height: f32, dpr: f32) -> Self {
        Self {
            width,
            height,
            dpr,
            card_anchor: None,
        }
    }

    pub fn with_card_anchor(mut self, anchor: CardAnchor) -> Self {
        self.card_anchor = Some(anchor);
        self
    }
}

/// Everything a scene may touch during one render call.
pub struct Frame<'a> {
    pub input: RenderInput,
    pub surface: &'a mut dyn Surface,
    pub overlay: &'a mut OverlaySink,
}

impl<'a> Frame<'a> {
    /// Clear and paint the shared backdrop.
    pub fn begin(&mut self, backdrop: Backdrop) -> Result<(), SurfaceError> {
        let (w, h) = (self.input.width, self.input.height);
        self.surface.clear(w, h);
        self.surface.backdrop(w, h, &backdrop)
    }
}

pub trait Render {
    fn render(&mut self, frame: &mut Frame<'_>) -> Result<(), RenderError>;

    /// Called after the backing store changed size.
    fn on_resize(&mut self, _layout: &Layout) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneKind {
    Nfo,
    Ground,
    Charter,
    Specialty,
    Speed,
    Precision,
    Visibility,
    Control,
    Savings,
    Promise,
}

type Factory = fn(&SceneConfig) -> Result<SceneVariant, SetupError>;

/// Declared scene name → constructor.
const FACTORIES: [(SceneKind, &str, Factory); 10] = [
    (SceneKind::Nfo, "nfo", |c| Ok(SceneVariant::Nfo(FlowScene::new(c)?))),
    (SceneKind::Ground, "ground", |c| Ok(SceneVariant::Ground(RoutingScene::new(c)))),
    (SceneKind::Charter, "charter", |c| Ok(SceneVariant::Charter(RingsScene::new(c)))),
    (SceneKind::Specialty, "specialty", |c| Ok(SceneVariant::Specialty(FillScene::new(c)))),
    (SceneKind::Speed, "speed", |c| Ok(SceneVariant::Speed(SpeedScene::new(c)?))),
    (SceneKind::Precision, "precision", |c| Ok(SceneVariant::Precision(WaveScene::new(c)))),
    (SceneKind::Visibility, "visibility", |c| Ok(SceneVariant::Visibility(PulseScene::new(c)))),
    (SceneKind::Control, "control", |c| Ok(SceneVariant::Control(BranchScene::new(c)))),
    (SceneKind::Savings, "savings", |c| Ok(SceneVariant::Savings(SavingsScene::new(c)))),
    (SceneKind::Promise, "promise", |c| Ok(SceneVariant::Promise(StrainScene::new(c)?))),
];

impl SceneKind {
    pub fn all() -> impl Iterator<Item = SceneKind> {
        FACTORIES.iter().map(|(k, _, _)| *k)
    }

    pub fn name(self) -> &'static str {
        FACTORIES
            .iter()
            .find(|(k, _, _)| *k == self)
            .map(|(_, n, _)| *n)
            .unwrap_or("unknown")
    }

    pub fn from_name(name: &str) -> Option<Self> {
        FACTORIES
            .iter()
            .find(|(_, n, _)| *n == name.trim())
            .map(|(k, _, _)| *k)
    }

    pub fn build(self, config: &SceneConfig) -> Result<SceneVariant, SetupError> {
        let factory = FACTORIES
            .iter()
            .find(|(k, _, _)| *k == self)
            .map(|(_, _, f)| *f)
            .ok_or_else(|| SetupError::UnknownScene(format!("{:?}", self)))?;
        factory(config)
    }
}

impl FromStr for SceneKind {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| SetupError::UnknownScene(s.to_string()))
    }
}

pub enum SceneVariant {
    Nfo(FlowScene),
    Ground(RoutingScene),
    Charter(RingsScene),
    Specialty(FillScene),
    Speed(SpeedScene),
    Precision(WaveScene),
    Visibility(PulseScene),
    Control(BranchScene),
    Savings(SavingsScene),
    Promise(StrainScene),
}

macro_rules! each_variant {
    ($self:expr, $scene:ident => $body:expr) => {
        match $self {
            SceneVariant::Nfo($scene) => $body,
            SceneVariant::Ground($scene) => $body,
            SceneVariant::Charter($scene) => $body,
            SceneVariant::Specialty($scene) => $body,
            SceneVariant::Speed($scene) => $body,
            SceneVariant::Precision($scene) => $body,
            SceneVariant::Visibility($scene) => $body,
            SceneVariant::Control($scene) => $body,
            SceneVariant::Savings($scene) => $body,
            SceneVariant::Promise($scene) => $body,
        }
    };
}

impl SceneVariant {
    pub fn kind(&self) -> SceneKind {
        match self {
            SceneVariant::Nfo(_) => SceneKind::Nfo,
            SceneVariant::Ground(_) => SceneKind::Ground,
            SceneVariant::Charter(_) => SceneKind::Charter,
            SceneVariant::Specialty(_) => SceneKind::Specialty,
            SceneVariant::Speed(_) => SceneKind::Speed,
            SceneVariant::Precision(_) => SceneKind::Precision,
            SceneVariant::Visibility(_) => SceneKind::Visibility,
            SceneVariant::Control(_) => SceneKind::Control,
            SceneVariant::Savings(_) => SceneKind::Savings,
            SceneVariant::Promise(_) => SceneKind::Promise,
        }
    }
}

impl Render for SceneVariant {
    fn render(&mut self, frame: &mut Frame<'_>) -> Result<(), RenderError> {
        each_variant!(self, scene => scene.render(frame))
    }

    fn on_resize(&mut self, layout: &Layout) {
        each_variant!(self, scene => scene.on_resize(layout))
    }
}
