//! Engine module contract.
//!
//! The engine itself is opaque. The host only sees:
//! - a module factory that resolves asynchronously to an `EngineModule`
//! - an `EngineModule` that constructs `Engine` handles
//! - an `Engine` handle with `initialize` / `deinitialize` / `delete`

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use anyhow::{anyhow, Context, Result};

use crate::assets::AssetLocator;

/// One instantiated engine.
///
/// `delete` consumes the handle and releases its native resources.
pub trait Engine {
    /// Returns `true` on success.
    fn initialize(&mut self) -> bool;

    fn deinitialize(&mut self);

    fn delete(self: Box<Self>);
}

/// A loaded module exposing a constructible engine type.
pub trait EngineModule: Send {
    fn create_engine(&self) -> Result<Box<dyn Engine>>;
}

/// Options handed to a [`ModuleFactory`].
#[derive(Debug, Clone, Default)]
pub struct ModuleConfig {
    locate_file: Option<AssetLocator>,
}

impl ModuleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the resolver used for every file the module asks for.
    pub fn locate_file(mut self, locator: AssetLocator) -> Self {
        self.locate_file = Some(locator);
        self
    }

    pub fn locator(&self) -> Option<&AssetLocator> {
        self.locate_file.as_ref()
    }

    /// Resolves `file` through the configured locator, or returns it unchanged.
    pub fn locate(&self, file: &str) -> std::path::PathBuf {
        match &self.locate_file {
            Some(locator) => locator.locate(file),
            None => std::path::PathBuf::from(file),
        }
    }
}

/// Asynchronous module factory.
///
/// `load` must return immediately; the module becomes available through the
/// returned [`PendingModule`]. There is no cancellation: a caller that loses
/// interest simply drops the pending value.
pub trait ModuleFactory {
    fn load(&self, config: ModuleConfig) -> PendingModule;
}

/// Outcome of a module load.
pub type LoadResult = Result<Box<dyn EngineModule>>;

/// An in-flight module load.
pub struct PendingModule {
    rx: Receiver<LoadResult>,
}

/// Completes a [`PendingModule`] created by [`PendingModule::channel`].
pub struct ModuleResolver {
    tx: Sender<LoadResult>,
}

impl ModuleResolver {
    /// Delivers the load result.
    ///
    /// Returns `false` if the pending side was already dropped; the result is
    /// dropped with it.
    pub fn resolve(self, result: LoadResult) -> bool {
        self.tx.send(result).is_ok()
    }
}

impl PendingModule {
    /// Creates a pending load completed by hand.
    pub fn channel() -> (ModuleResolver, PendingModule) {
        let (tx, rx) = mpsc::channel();
        (ModuleResolver { tx }, PendingModule { rx })
    }

    /// Runs `load` on a named background thread.
    pub fn spawn<F>(name: &str, load: F) -> Self
    where
        F: FnOnce() -> LoadResult + Send + 'static,
    {
        let (resolver, pending) = Self::channel();

        let spawned = thread::Builder::new()
            .name(format!("retro3-load-{name}"))
            .spawn(move || {
                if !resolver.resolve(load()) {
                    log::debug!("module load finished after the requester went away");
                }
            })
            .context("failed to spawn module loader thread");

        if let Err(e) = spawned {
            return Self::ready(Err(e));
        }

        pending
    }

    /// A load that has already resolved.
    pub fn ready(result: LoadResult) -> Self {
        let (resolver, pending) = Self::channel();
        resolver.resolve(result);
        pending
    }

    /// Non-blocking check.
    ///
    /// `None` while the load is still running. A resolver dropped without a
    /// result is reported as an error.
    pub fn try_take(&mut self) -> Option<LoadResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                Some(Err(anyhow!("module loader went away without a result")))
            }
        }
    }
}
