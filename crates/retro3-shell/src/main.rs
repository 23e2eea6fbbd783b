mod config;
mod nav;
mod pages;
mod router;
mod shell;

use retro3_platform::logging::init_logging;
use retro3_platform::paint::Color;
use retro3_ui::Application;

use crate::config::ShellConfig;
use crate::shell::{Shell, BACKGROUND};

/// Room for the nav bar with its menu open above a usable page.
const MIN_WINDOW_SIZE: (f64, f64) = (480.0, 320.0);

fn main() {
    let config = ShellConfig::from_env();
    init_logging(config.logging());
    config.report_issues();

    log::info!(
        "retro3 starting: assets={}, engine={}, home={:?}, route={}",
        config.asset_dir.display(),
        config.engine_library,
        config.home,
        config.initial_route,
    );

    let (width, height) = config.window_size;
    let result = Application::new()
        .title(config.title.clone())
        .size(width, height)
        .min_size(MIN_WINDOW_SIZE.0, MIN_WINDOW_SIZE.1)
        .clear_color(Color::from_hex(BACKGROUND))
        .run_widget(|| Shell::new(&config).into());

    if let Err(e) = result {
        log::error!("retro3 failed to start: {e:#}");
        std::process::exit(1);
    }
}
