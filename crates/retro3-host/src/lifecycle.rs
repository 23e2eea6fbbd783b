//! Engine lifecycle adapter.
//!
//! Owns at most one engine handle per mount cycle:
//!
//! ```text
//! Unloaded --mount--> Loading --poll--> Ready ------unmount--> Disposed
//!                        |                 InitFailed -unmount-> Disposed
//!                        |--poll--> LoadFailed ------unmount--> Disposed
//!                        '--unmount--> Disposed (result discarded)
//! ```

use std::fmt;

use anyhow::Result;

use crate::module::{Engine, EngineModule, ModuleConfig, ModuleFactory, PendingModule};

/// Observable adapter state.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EngineState {
    /// Not mounted yet.
    Unloaded,
    /// Module load in flight.
    Loading,
    /// Handle constructed and initialized.
    Ready,
    /// Handle constructed but `initialize` returned `false`.
    ///
    /// The handle is never handed out; it is still disposed on unmount.
    InitFailed,
    /// Module load or handle construction failed. No handle exists.
    LoadFailed,
    /// Torn down. Terminal.
    Disposed,
}

impl EngineState {
    #[inline]
    pub fn is_failed(self) -> bool {
        matches!(self, EngineState::InitFailed | EngineState::LoadFailed)
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EngineState::Unloaded => "unloaded",
            EngineState::Loading => "loading",
            EngineState::Ready => "ready",
            EngineState::InitFailed => "init-failed",
            EngineState::LoadFailed => "load-failed",
            EngineState::Disposed => "disposed",
        };
        f.write_str(s)
    }
}

enum Phase {
    Unloaded,
    Loading(PendingModule),
    Ready(Box<dyn Engine>),
    InitFailed(Box<dyn Engine>),
    LoadFailed,
    Disposed,
}

/// Manages exactly one external engine handle per mount cycle.
///
/// Single-threaded: `mount`, `poll` and `unmount` are called from the UI loop.
/// Dropping the adapter runs `unmount`.
pub struct EngineAdapter {
    factory: Box<dyn ModuleFactory>,
    config: ModuleConfig,
    phase: Phase,
    /// Cleared at the start of `unmount`, checked right before a handle is constructed.
    active: bool,
    failure: Option<String>,
}

impl EngineAdapter {
    pub fn new(factory: impl ModuleFactory + 'static, config: ModuleConfig) -> Self {
        Self {
            factory: Box::new(factory),
            config,
            phase: Phase::Unloaded,
            active: false,
            failure: None,
        }
    }

    pub fn state(&self) -> EngineState {
        match self.phase {
            Phase::Unloaded => EngineState::Unloaded,
            Phase::Loading(_) => EngineState::Loading,
            Phase::Ready(_) => EngineState::Ready,
            Phase::InitFailed(_) => EngineState::InitFailed,
            Phase::LoadFailed => EngineState::LoadFailed,
            Phase::Disposed => EngineState::Disposed,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Message of the last reported failure.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// The engine handle, only while `Ready`.
    pub fn engine_mut(&mut self) -> Option<&mut (dyn Engine + 'static)> {
        match &mut self.phase {
            Phase::Ready(engine) => Some(engine.as_mut()),
            _ => None,
        }
    }

    /// Starts loading the module. Only valid from `Unloaded`.
    pub fn mount(&mut self) {
        if !matches!(self.phase, Phase::Unloaded) {
            log::warn!("engine adapter mount ignored in state {}", self.state());
            return;
        }

        self.active = true;
        let pending = self.factory.load(self.config.clone());
        self.phase = Phase::Loading(pending);
        log::debug!("engine module load started");
    }

    /// Drives a pending load. Call once per frame.
    pub fn poll(&mut self) -> EngineState {
        let result = match &mut self.phase {
            Phase::Loading(pending) => pending.try_take(),
            _ => None,
        };

        if let Some(result) = result {
            self.complete_load(result);
        }

        self.state()
    }

    fn complete_load(&mut self, result: Result<Box<dyn EngineModule>>) {
        let module = match result {
            Ok(module) => module,
            Err(e) => {
                self.report_failure(format!("failed to load engine module: {e:#}"));
                self.phase = Phase::LoadFailed;
                return;
            }
        };

        if !self.active {
            log::debug!("engine module resolved after unmount; discarding");
            self.phase = Phase::Disposed;
            return;
        }

        let mut engine = match module.create_engine() {
            Ok(engine) => engine,
            Err(e) => {
                self.report_failure(format!("failed to construct engine: {e:#}"));
                self.phase = Phase::LoadFailed;
                return;
            }
        };

        if engine.initialize() {
            log::info!("RetroEngine initialized successfully");
            self.phase = Phase::Ready(engine);
        } else {
            self.report_failure("failed to initialize RetroEngine".to_string());
            self.phase = Phase::InitFailed(engine);
        }
    }

    fn report_failure(&mut self, message: String) {
        log::error!("{message}");
        self.failure = Some(message);
    }

    /// Tears down. Idempotent; the adapter ends in `Disposed`.
    ///
    /// A live handle gets `deinitialize` then `delete`, exactly once. A load
    /// still in flight is abandoned and its result dropped unused.
    pub fn unmount(&mut self) {
        self.active = false;

        match std::mem::replace(&mut self.phase, Phase::Disposed) {
            Phase::Ready(engine) | Phase::InitFailed(engine) => {
                dispose(engine);
                log::debug!("engine disposed");
            }
            Phase::Loading(pending) => {
                drop(pending);
                log::debug!("engine unmounted while loading; load result will be discarded");
            }
            Phase::Unloaded | Phase::LoadFailed | Phase::Disposed => {}
        }
    }
}

fn dispose(mut engine: Box<dyn Engine>) {
    engine.deinitialize();
    engine.delete();
}

impl Drop for EngineAdapter {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl fmt::Debug for EngineAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineAdapter")
            .field("state", &self.state())
            .field("active", &self.active)
            .field("failure", &self.failure)
            .finish()
    }
}
