//! Engine lifecycle.
//!
//! The engine is a process-wide resource with two states, uninitialized and initialized. Nothing
//! here is tied to a host event loop: the embedding application calls [`Lifecycle::init`] at
//! startup and [`Lifecycle::terminate`] at shutdown, or holds an [`EngineGuard`] for the span in
//! between.

use std::sync::{
    Arc, OnceLock,
    atomic::{AtomicBool, Ordering},
};

use crate::engine::AnimationEngine;
use crate::engine::svg::SvgEngine;
use crate::foundation::error::{TvgError, TvgResult};

static GLOBAL: OnceLock<Lifecycle> = OnceLock::new();

/// Install the process-wide lifecycle. Fails if one is already installed.
pub fn install(engine: Arc<dyn AnimationEngine>) -> TvgResult<&'static Lifecycle> {
    let mut installed = false;
    let sys = GLOBAL.get_or_init(|| {
        installed = true;
        Lifecycle::new(engine)
    });
    if !installed {
        return Err(TvgError::validation("engine lifecycle already installed"));
    }
    Ok(sys)
}

/// The process-wide lifecycle, defaulting to an [`SvgEngine`] with default options.
pub fn global() -> &'static Lifecycle {
    GLOBAL.get_or_init(|| Lifecycle::new(Arc::new(SvgEngine::default())))
}

/// Init/terminate state for one engine.
///
/// Calls are expected from a single control thread; concurrent `init`/`terminate` is not
/// coordinated.
pub struct Lifecycle {
    engine: Arc<dyn AnimationEngine>,
    initialized: AtomicBool,
}

impl Lifecycle {
    pub fn new(engine: Arc<dyn AnimationEngine>) -> Self {
        Self {
            engine,
            initialized: AtomicBool::new(false),
        }
    }

    pub fn engine(&self) -> &Arc<dyn AnimationEngine> {
        &self.engine
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Start the engine. No-op when already initialized.
    pub fn init(&self) -> TvgResult<()> {
        if self.is_initialized() {
            return Ok(());
        }
        self.engine.init()?;
        self.initialized.store(true, Ordering::Release);
        tracing::debug!("engine initialized");
        Ok(())
    }

    /// Shut the engine down and return to the uninitialized state.
    pub fn terminate(&self) {
        self.engine.term();
        self.initialized.store(false, Ordering::Release);
        tracing::debug!("engine terminated");
    }

    /// Whether the engine can be used.
    ///
    /// `Ok(false)` while uninitialized or still loading; a negative engine status is
    /// [`TvgError::EngineLoad`].
    pub fn is_ready(&self) -> TvgResult<bool> {
        if !self.is_initialized() {
            return Ok(false);
        }
        let status = self.engine.ready_status();
        if status < 0 {
            tracing::error!(status, "engine failed to load");
            return Err(TvgError::EngineLoad { status });
        }
        Ok(status > 0)
    }

    /// Initialize and return a guard that terminates the engine when dropped.
    pub fn scoped(&self) -> TvgResult<EngineGuard<'_>> {
        self.init()?;
        Ok(EngineGuard { sys: self })
    }
}

/// Keeps the engine initialized for its lifetime.
#[must_use = "the engine terminates as soon as the guard is dropped"]
pub struct EngineGuard<'a> {
    sys: &'a Lifecycle,
}

impl EngineGuard<'_> {
    pub fn lifecycle(&self) -> &Lifecycle {
        self.sys
    }
}

impl Drop for EngineGuard<'_> {
    fn drop(&mut self) {
        self.sys.terminate();
    }
}
