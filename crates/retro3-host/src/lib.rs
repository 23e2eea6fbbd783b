//! Host-side plumbing for an external RetroEngine module.
//!
//! This crate owns everything between the shell UI and the opaque engine:
//! - the engine module contract (`Engine`, `EngineModule`, `ModuleFactory`)
//! - asset location (logical file name -> retrieval path)
//! - the native shared-library factory
//! - the lifecycle adapter that guarantees one handle per mount cycle
//! - viewport sizing between a host container and a drawable canvas
//!
//! ```rust,ignore
//! use retro3_host::{AssetLocator, EngineAdapter, ModuleConfig, NativeModuleFactory};
//!
//! let config = ModuleConfig::new().locate_file(AssetLocator::with_base_dir("assets/engine"));
//! let mut adapter = EngineAdapter::new(NativeModuleFactory::default(), config);
//! adapter.mount();
//! // once per frame:
//! adapter.poll();
//! // on teardown:
//! adapter.unmount();
//! ```

pub mod assets;
pub mod lifecycle;
pub mod module;
pub mod native;
pub mod viewport;

pub use assets::AssetLocator;
pub use lifecycle::{EngineAdapter, EngineState};
pub use module::{Engine, EngineModule, LoadResult, ModuleConfig, ModuleFactory, ModuleResolver, PendingModule};
pub use native::{NativeModuleFactory, RETRO_ENGINE_ABI_VERSION};
pub use viewport::{Canvas, HostContainer, Subscription, ViewportSize, ViewportSizer};
