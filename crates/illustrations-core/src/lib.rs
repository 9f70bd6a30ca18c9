//! Scene runtime for the site illustrations.
//!
//! Platform-agnostic pieces only: the browser front end supplies a
//! [`Surface`] per canvas, feeds pointer/resize/visibility events into the
//! [`Scheduler`] and calls [`Scheduler::tick`] once per animation frame.

pub mod config;
pub mod constants;
pub mod easing;
pub mod environment;
pub mod error;
pub mod governor;
pub mod lifecycle;
pub mod overlay;
pub mod pointer;
pub mod random;
pub mod scenes;
pub mod scheduler;
pub mod surface;
pub mod tasks;
pub mod timeline;

pub use config::*;
pub use constants::*;
pub use environment::*;
pub use error::*;
pub use governor::*;
pub use lifecycle::*;
pub use overlay::*;
pub use pointer::*;
pub use random::*;
pub use scenes::{Frame, Layout, Render, RenderInput, SceneKind, SceneVariant};
pub use scheduler::*;
pub use surface::*;
pub use tasks::*;
pub use timeline::*;
