//! Registration of illustration containers with the scheduler.

use crate::config::SceneConfig;
use crate::error::SetupError;
use crate::scenes::{Layout, SceneKind, SceneVariant};
use crate::scheduler::{SceneId, Scheduler};
use crate::surface::Surface;

pub type SceneScheduler<D> = Scheduler<SceneVariant, D>;

/// What the host knows about a container at registration time.
#[derive(Clone, Debug)]
pub struct SceneDecl<'a> {
    pub name: &'a str,
    pub config: SceneConfig,
    /// Current layout box of the container.
    pub layout: Layout,
}

/// Resolve the declared scene, build it and perform initial sizing.
pub fn try_register<D: Surface>(
    scheduler: &mut SceneScheduler<D>,
    decl: &SceneDecl<'_>,
    surface: Option<D>,
) -> Result<SceneId, SetupError> {
    let kind: SceneKind = decl.name.parse()?;
    let surface = surface.ok_or_else(|| SetupError::MissingSurface(decl.name.to_string()))?;
    let scene = kind.build(&decl.config)?;
    let id = scheduler.insert(kind.name(), scene, surface, &decl.config);
    if let Err(e) = scheduler.resize(id, decl.layout) {
        // Retried on the next resize notification.
        log::warn!("[lifecycle] initial sizing of {} {} failed: {}", kind.name(), id, e);
    }
    log::info!(
        "[lifecycle] registered {} as {} ({}x{})",
        kind.name(),
        id,
        decl.layout.width,
        decl.layout.height
    );
    Ok(id)
}

/// Like [`try_register`], but a container that cannot host a scene is
/// skipped with a log line; the rest of the page is unaffected.
pub fn register<D: Surface>(
    scheduler: &mut SceneScheduler<D>,
    decl: &SceneDecl<'_>,
    surface: Option<D>,
) -> Option<SceneId> {
    match try_register(scheduler, decl, surface) {
        Ok(id) => Some(id),
        Err(e) => {
            log::warn!("[lifecycle] skipping illustration: {}", e);
            None
        }
    }
}
