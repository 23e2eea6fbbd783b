use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Maps a logical asset file name to the path it is retrieved from.
///
/// The engine module asks for files by name only (`libretro_engine.so`); the
/// hosting shell decides where they actually live.
///
/// ```rust,ignore
/// let locate = AssetLocator::with_base_dir("assets/engine");
/// assert_eq!(locate.locate("engine.bin"), PathBuf::from("assets/engine/engine.bin"));
/// ```
#[derive(Clone)]
pub struct AssetLocator {
    resolve: Arc<dyn Fn(&str) -> PathBuf + Send + Sync>,
    label: String,
}

impl AssetLocator {
    /// Wraps an arbitrary resolver function.
    pub fn new(f: impl Fn(&str) -> PathBuf + Send + Sync + 'static) -> Self {
        Self { resolve: Arc::new(f), label: "custom".to_string() }
    }

    /// Resolves every file relative to `dir`.
    pub fn with_base_dir(dir: impl Into<PathBuf>) -> Self {
        let dir: PathBuf = dir.into();
        let label = dir.display().to_string();
        Self {
            resolve: Arc::new(move |file: &str| dir.join(file)),
            label,
        }
    }

    /// Uses the logical name unchanged.
    pub fn identity() -> Self {
        Self {
            resolve: Arc::new(|file: &str| PathBuf::from(file)),
            label: "identity".to_string(),
        }
    }

    pub fn locate(&self, file: &str) -> PathBuf {
        (self.resolve)(file)
    }

    /// Returns `true` if `file` resolves to an existing path.
    pub fn exists(&self, file: &str) -> bool {
        self.locate(file).exists()
    }
}

impl Default for AssetLocator {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for AssetLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AssetLocator").field(&self.label).finish()
    }
}
