//! Shell configuration from `RETRO3_*` environment variables.

use std::path::PathBuf;

use retro3_host::native::{library_file_name, DEFAULT_LIBRARY_NAME};
use retro3_host::{AssetLocator, ModuleConfig, NativeModuleFactory};
use retro3_platform::logging::LoggingConfig;

/// Asset directory baked in at build time, if any.
const BUILD_ASSET_BASE: Option<&str> = option_env!("RETRO3_ASSET_BASE");
const FALLBACK_ASSET_DIR: &str = "assets/engine";

/// What the home route shows.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HomeMode {
    Engine,
    Animation,
    /// Engine when its library is present, animation otherwise.
    Auto,
}

impl HomeMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "engine" => Some(HomeMode::Engine),
            "animation" => Some(HomeMode::Animation),
            "auto" => Some(HomeMode::Auto),
            _ => None,
        }
    }
}

/// Concrete view for the home route after resolving [`HomeMode::Auto`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HomeView {
    Engine,
    Animation,
}

#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub title: String,
    /// Logical pixels.
    pub window_size: (f64, f64),
    pub asset_dir: PathBuf,
    /// Logical engine library name, without platform prefix/suffix.
    pub engine_library: String,
    pub home: HomeMode,
    pub initial_route: String,
    pub log_filter: Option<String>,
    issues: Vec<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            title: "retro3".to_string(),
            window_size: (1280.0, 720.0),
            asset_dir: PathBuf::from(BUILD_ASSET_BASE.unwrap_or(FALLBACK_ASSET_DIR)),
            engine_library: DEFAULT_LIBRARY_NAME.to_string(),
            home: HomeMode::Auto,
            initial_route: "/".to_string(),
            log_filter: None,
            issues: Vec::new(),
        }
    }
}

impl ShellConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Builds the config from a variable lookup. Blank values count as unset;
    /// invalid ones fall back to the default and are recorded in
    /// [`issues`](Self::issues).
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = get("RETRO3_ASSET_DIR") {
            config.asset_dir = PathBuf::from(dir);
        }

        if let Some(name) = get("RETRO3_ENGINE") {
            let name = name.trim();
            if name.contains(['/', '\\']) {
                config.issues.push(format!("RETRO3_ENGINE={name:?} must be a library name, not a path"));
            } else {
                config.engine_library = name.to_string();
            }
        }

        if let Some(mode) = get("RETRO3_HOME") {
            match HomeMode::parse(&mode) {
                Some(m) => config.home = m,
                None => config
                    .issues
                    .push(format!("RETRO3_HOME={mode:?} is not one of engine, animation, auto")),
            }
        }

        if let Some(route) = get("RETRO3_ROUTE") {
            config.initial_route = route.trim().to_string();
        }

        config.log_filter = get("RETRO3_LOG");

        if let Some(size) = get("RETRO3_WINDOW_SIZE") {
            match parse_window_size(&size) {
                Some(s) => config.window_size = s,
                None => config
                    .issues
                    .push(format!("RETRO3_WINDOW_SIZE={size:?} is not WIDTHxHEIGHT")),
            }
        }

        config
    }

    /// Problems found while reading the environment.
    pub fn issues(&self) -> &[String] {
        &self.issues
    }

    /// Logs every recorded issue; call once logging is up.
    pub fn report_issues(&self) {
        for issue in &self.issues {
            log::warn!("{issue}; using default");
        }
    }

    pub fn logging(&self) -> LoggingConfig {
        match &self.log_filter {
            Some(filter) => LoggingConfig::default().with_filter(filter.clone()),
            None => LoggingConfig::default(),
        }
    }

    pub fn locator(&self) -> AssetLocator {
        AssetLocator::with_base_dir(self.asset_dir.clone())
    }

    pub fn module_config(&self) -> ModuleConfig {
        ModuleConfig::new().locate_file(self.locator())
    }

    pub fn engine_factory(&self) -> NativeModuleFactory {
        NativeModuleFactory::new(self.engine_library.clone())
    }

    /// Resolves `Auto` by checking whether the engine library file exists.
    pub fn home_view(&self) -> HomeView {
        match self.home {
            HomeMode::Engine => HomeView::Engine,
            HomeMode::Animation => HomeView::Animation,
            HomeMode::Auto => {
                let file = library_file_name(&self.engine_library);
                if self.locator().exists(&file) {
                    HomeView::Engine
                } else {
                    log::info!(
                        "engine library {file} not found in {}; showing animation",
                        self.asset_dir.display()
                    );
                    HomeView::Animation
                }
            }
        }
    }
}

/// Parses `WIDTHxHEIGHT` with both sides positive.
pub fn parse_window_size(s: &str) -> Option<(f64, f64)> {
    let (w, h) = s.trim().split_once(['x', 'X'])?;
    let w: f64 = w.trim().parse().ok()?;
    let h: f64 = h.trim().parse().ok()?;
    (w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0).then_some((w, h))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from(pairs: &[(&str, &str)]) -> ShellConfig {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ShellConfig::from_vars(|name| vars.get(name).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let c = from(&[]);
        assert_eq!(c.engine_library, "retro_engine");
        assert_eq!(c.home, HomeMode::Auto);
        assert_eq!(c.initial_route, "/");
        assert_eq!(c.window_size, (1280.0, 720.0));
        assert_eq!(c.log_filter, None);
        assert!(c.issues().is_empty());
    }

    #[test]
    fn reads_every_variable() {
        let c = from(&[
            ("RETRO3_ASSET_DIR", "/opt/retro3"),
            ("RETRO3_ENGINE", "my_engine"),
            ("RETRO3_HOME", "Animation"),
            ("RETRO3_ROUTE", "/blank"),
            ("RETRO3_LOG", "retro3_host=debug"),
            ("RETRO3_WINDOW_SIZE", "800x600"),
        ]);
        assert_eq!(c.asset_dir, PathBuf::from("/opt/retro3"));
        assert_eq!(c.engine_library, "my_engine");
        assert_eq!(c.home, HomeMode::Animation);
        assert_eq!(c.initial_route, "/blank");
        assert_eq!(c.log_filter.as_deref(), Some("retro3_host=debug"));
        assert_eq!(c.window_size, (800.0, 600.0));
        assert!(c.issues().is_empty());
    }

    #[test]
    fn invalid_values_fall_back_and_are_recorded() {
        let c = from(&[
            ("RETRO3_HOME", "sometimes"),
            ("RETRO3_WINDOW_SIZE", "big"),
            ("RETRO3_ENGINE", "../evil"),
        ]);
        assert_eq!(c.home, HomeMode::Auto);
        assert_eq!(c.window_size, (1280.0, 720.0));
        assert_eq!(c.engine_library, "retro_engine");
        assert_eq!(c.issues().len(), 3);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let c = from(&[("RETRO3_LOG", "  "), ("RETRO3_HOME", "")]);
        assert_eq!(c.log_filter, None);
        assert!(c.issues().is_empty());
    }

    #[test]
    fn window_size_parsing() {
        assert_eq!(parse_window_size("1024x768"), Some((1024.0, 768.0)));
        assert_eq!(parse_window_size(" 640 X 480 "), Some((640.0, 480.0)));
        assert_eq!(parse_window_size("0x480"), None);
        assert_eq!(parse_window_size("640"), None);
        assert_eq!(parse_window_size("axb"), None);
    }

    #[test]
    fn locator_uses_asset_dir() {
        let c = from(&[("RETRO3_ASSET_DIR", "/srv/engine")]);
        assert_eq!(c.locator().locate("x.so"), PathBuf::from("/srv/engine/x.so"));
        assert_eq!(
            c.module_config().locate("x.so"),
            PathBuf::from("/srv/engine/x.so")
        );
    }

    #[test]
    fn auto_home_without_library_shows_animation() {
        let c = from(&[("RETRO3_ASSET_DIR", "/definitely/not/here")]);
        assert_eq!(c.home_view(), HomeView::Animation);

        let c = from(&[("RETRO3_ASSET_DIR", "/definitely/not/here"), ("RETRO3_HOME", "engine")]);
        assert_eq!(c.home_view(), HomeView::Engine);
    }

    #[test]
    fn auto_home_with_library_shows_engine() {
        let dir = std::env::temp_dir().join(format!("retro3-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(library_file_name("retro_engine")), b"").unwrap();

        let c = from(&[("RETRO3_ASSET_DIR", dir.to_str().unwrap())]);
        assert_eq!(c.home_view(), HomeView::Engine);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn log_filter_reaches_logging_config() {
        let c = from(&[("RETRO3_LOG", "debug")]);
        assert_eq!(c.logging().env_filter.as_deref(), Some("debug"));
    }
}
