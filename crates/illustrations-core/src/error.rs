use thiserror::Error;

/// Drawing failures raised by a [`crate::Surface`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("non-finite coordinate in {0}")]
    NonFinite(&'static str),
    #[error("negative radius {radius} in {op}")]
    NegativeRadius { op: &'static str, radius: f32 },
    #[error("drawing backend rejected {op}: {message}")]
    Backend { op: &'static str, message: String },
}

/// A scene's render call failed; the scheduler retires the scene.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("invalid scene state: {0}")]
    State(String),
}

impl RenderError {
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TimelineError {
    #[error("timeline has no phases")]
    Empty,
    #[error("phase {index} has invalid duration {duration}")]
    InvalidDuration { index: usize, duration: f64 },
    #[error("timeline total duration is zero")]
    ZeroLength,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{key}: `{value}` is not a number")]
    NotANumber { key: String, value: String },
    #[error("{key}: {value} is out of range")]
    OutOfRange { key: String, value: f64 },
}

/// Why an illustration container did not get a running scene.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SetupError {
    #[error("no scene named `{0}`")]
    UnknownScene(String),
    #[error("no drawing context for scene `{0}`")]
    MissingSurface(String),
    #[error(transparent)]
    Timeline(#[from] TimelineError),
}
