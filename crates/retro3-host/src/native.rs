//! Native (shared library) engine modules.
//!
//! ABI exported by the engine library:
//!
//! ```c
//! uint32_t retro_engine_abi_version(void);
//! void*    retro_engine_new(void);
//! bool     retro_engine_initialize(void* engine);
//! void     retro_engine_deinitialize(void* engine);
//! void     retro_engine_delete(void* engine);
//! ```

use std::ffi::c_void;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use libloading::{Library, Symbol};

use crate::module::{Engine, EngineModule, ModuleConfig, ModuleFactory, PendingModule};

/// ABI version this host speaks.
pub const RETRO_ENGINE_ABI_VERSION: u32 = 1;

/// Default logical library name (platform prefix/suffix added at load time).
pub const DEFAULT_LIBRARY_NAME: &str = "retro_engine";

type AbiVersionFn = unsafe extern "C" fn() -> u32;
type NewFn = unsafe extern "C" fn() -> *mut c_void;
type InitializeFn = unsafe extern "C" fn(*mut c_void) -> bool;
type DeinitializeFn = unsafe extern "C" fn(*mut c_void);
type DeleteFn = unsafe extern "C" fn(*mut c_void);

/// Loads engine modules from a shared library located through the asset resolver.
#[derive(Debug, Clone)]
pub struct NativeModuleFactory {
    library_name: String,
}

impl NativeModuleFactory {
    /// `library_name` is the logical name without platform prefix/suffix
    /// (`retro_engine` -> `libretro_engine.so` on Linux).
    pub fn new(library_name: impl Into<String>) -> Self {
        Self { library_name: library_name.into() }
    }

    /// Platform file name requested from the asset resolver.
    pub fn library_file(&self) -> String {
        library_file_name(&self.library_name)
    }
}

impl Default for NativeModuleFactory {
    fn default() -> Self {
        Self::new(DEFAULT_LIBRARY_NAME)
    }
}

impl ModuleFactory for NativeModuleFactory {
    fn load(&self, config: ModuleConfig) -> PendingModule {
        let file = self.library_file();
        let path = config.locate(&file);
        log::debug!("loading engine module `{file}` from {}", path.display());

        PendingModule::spawn(&self.library_name, move || {
            let module = NativeModule::open(&path)?;
            Ok(Box::new(module) as Box<dyn EngineModule>)
        })
    }
}

/// Returns the platform-specific file name for a logical library name.
pub fn library_file_name(name: &str) -> String {
    libloading::library_filename(name).to_string_lossy().into_owned()
}

#[derive(Copy, Clone)]
struct EngineApi {
    new: NewFn,
    initialize: InitializeFn,
    deinitialize: DeinitializeFn,
    delete: DeleteFn,
}

/// A loaded engine library.
struct NativeModule {
    path: PathBuf,
    api: EngineApi,
    lib: Arc<Library>,
}

impl NativeModule {
    fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("engine library not found: {}", path.display());
        }

        // SAFETY: loading a foreign library runs its initializers; the engine
        // artifact is trusted by the hosting shell.
        let lib = unsafe { Library::new(path) }
            .with_context(|| format!("failed to load engine library from {}", path.display()))?;

        // SAFETY: symbol types match the ABI documented at the top of this module.
        let api = unsafe {
            let version: Symbol<AbiVersionFn> = lookup(&lib, path, b"retro_engine_abi_version\0")?;
            let version = version();
            if version != RETRO_ENGINE_ABI_VERSION {
                bail!(
                    "engine library {} abi_version mismatch: library={version}, host={RETRO_ENGINE_ABI_VERSION}",
                    path.display()
                );
            }

            EngineApi {
                new: *lookup::<NewFn>(&lib, path, b"retro_engine_new\0")?,
                initialize: *lookup::<InitializeFn>(&lib, path, b"retro_engine_initialize\0")?,
                deinitialize: *lookup::<DeinitializeFn>(&lib, path, b"retro_engine_deinitialize\0")?,
                delete: *lookup::<DeleteFn>(&lib, path, b"retro_engine_delete\0")?,
            }
        };

        log::info!("engine library loaded from {}", path.display());

        Ok(Self { path: path.to_path_buf(), api, lib: Arc::new(lib) })
    }
}

unsafe fn lookup<'lib, T>(lib: &'lib Library, path: &Path, symbol: &[u8]) -> Result<Symbol<'lib, T>> {
    // SAFETY: forwarded to the caller, which names the expected symbol type.
    unsafe { lib.get::<T>(symbol) }.with_context(|| {
        format!(
            "missing symbol `{}` in {}",
            String::from_utf8_lossy(symbol.strip_suffix(b"\0").unwrap_or(symbol)),
            path.display()
        )
    })
}

impl EngineModule for NativeModule {
    fn create_engine(&self) -> Result<Box<dyn Engine>> {
        // SAFETY: `new` comes from a library kept alive by `self.lib`.
        let raw = unsafe { (self.api.new)() };
        let Some(raw) = NonNull::new(raw) else {
            bail!("retro_engine_new returned null ({})", self.path.display());
        };

        Ok(Box::new(NativeEngine {
            raw: Some(raw),
            api: self.api,
            _lib: Arc::clone(&self.lib),
        }))
    }
}

/// Handle to one engine instance living inside the shared library.
///
/// Holds its own reference to the library so function pointers stay valid
/// even if the module is dropped first.
struct NativeEngine {
    raw: Option<NonNull<c_void>>,
    api: EngineApi,
    _lib: Arc<Library>,
}

impl Engine for NativeEngine {
    fn initialize(&mut self) -> bool {
        match self.raw {
            // SAFETY: `raw` was returned by `retro_engine_new` and not yet deleted.
            Some(raw) => unsafe { (self.api.initialize)(raw.as_ptr()) },
            None => false,
        }
    }

    fn deinitialize(&mut self) {
        if let Some(raw) = self.raw {
            // SAFETY: see `initialize`.
            unsafe { (self.api.deinitialize)(raw.as_ptr()) }
        }
    }

    fn delete(mut self: Box<Self>) {
        if let Some(raw) = self.raw.take() {
            // SAFETY: `raw` is released exactly once; `take` clears it.
            unsafe { (self.api.delete)(raw.as_ptr()) }
        }
    }
}

impl Drop for NativeEngine {
    fn drop(&mut self) {
        if let Some(raw) = self.raw.take() {
            log::warn!("engine handle dropped without delete; releasing it now");
            // SAFETY: not yet released.
            unsafe { (self.api.delete)(raw.as_ptr()) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetLocator;
    use std::time::{Duration, Instant};

    #[test]
    fn library_file_uses_platform_naming() {
        let file = NativeModuleFactory::default().library_file();
        assert!(file.contains("retro_engine"));
        if cfg!(target_os = "linux") {
            assert_eq!(file, "libretro_engine.so");
        }
    }

    #[test]
    fn missing_library_resolves_to_error() {
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let seen_in = Arc::clone(&seen);
        let locator = AssetLocator::new(move |file| {
            seen_in.lock().unwrap().push(file.to_string());
            PathBuf::from("/nonexistent/retro3").join(file)
        });

        let factory = NativeModuleFactory::new("retro_engine");
        let mut pending = factory.load(ModuleConfig::new().locate_file(locator));

        let deadline = Instant::now() + Duration::from_secs(5);
        let result = loop {
            if let Some(r) = pending.try_take() {
                break r;
            }
            assert!(Instant::now() < deadline);
            std::thread::sleep(Duration::from_millis(1));
        };

        let err = result.err().unwrap();
        assert!(format!("{err:#}").contains("engine library not found"));
        assert_eq!(seen.lock().unwrap().as_slice(), &[factory.library_file()]);
    }
}
