use crate::tasks::TaskLane;
use glam::Vec2;

/// Text shown on an HTML overlay card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardContent {
    pub title: &'static str,
    pub body: &'static str,
    /// Empty meta hides the meta line.
    pub meta: &'static str,
}

impl CardContent {
    pub const fn new(title: &'static str, body: &'static str, meta: &'static str) -> Self {
        Self { title, body, meta }
    }
}

/// DOM-side effects a scene asks the host to perform on its overlay.
#[derive(Clone, Debug, PartialEq)]
pub enum OverlayCommand {
    /// Replace the fixed card's text.
    ShowCard(CardContent),
    /// Start the flip-out animation of the fixed card.
    BeginFlip,
    /// Let the card settle after a flip.
    EndFlip,
    /// Append a transient card to the scene's card stack.
    SpawnCard {
        id: u32,
        content: CardContent,
        position: Vec2,
        drift: Vec2,
        delay_ms: f64,
    },
    RemoveCard { id: u32 },
}

/// Overlay commands produced by one render call.
#[derive(Debug, Default)]
pub struct OverlaySink {
    pub(crate) immediate: Vec<OverlayCommand>,
    pub(crate) delayed: Vec<(TaskLane, f64, OverlayCommand)>,
    pub(crate) superseded: Vec<TaskLane>,
}

impl OverlaySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&mut self, cmd: OverlayCommand) {
        self.immediate.push(cmd);
    }

    /// Run `cmd` after `delay_ms` of wall-clock time, on `lane`.
    pub fn after(&mut self, lane: TaskLane, delay_ms: f64, cmd: OverlayCommand) {
        self.delayed.push((lane, delay_ms.max(0.0), cmd));
    }

    /// Drop everything still pending on `lane` before this frame's commands
    /// are scheduled.
    pub fn supersede(&mut self, lane: TaskLane) {
        if !self.superseded.contains(&lane) {
            self.superseded.push(lane);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.immediate.is_empty() && self.delayed.is_empty() && self.superseded.is_empty()
    }

    pub fn immediate(&self) -> &[OverlayCommand] {
        &self.immediate
    }

    pub fn delayed(&self) -> impl Iterator<Item = (TaskLane, f64, &OverlayCommand)> {
        self.delayed.iter().map(|(lane, d, c)| (*lane, *d, c))
    }
}
