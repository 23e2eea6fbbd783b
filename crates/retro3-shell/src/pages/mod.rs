//! Routed pages.

use std::cell::Cell;
use std::rc::Rc;

use retro3_host::{ModuleConfig, NativeModuleFactory, ViewportSize};
use retro3_ui::prelude::*;

use crate::config::{HomeView, ShellConfig};
use crate::router::Route;

pub mod animation;
pub mod blank;
pub mod engine;

pub use animation::AnimationPage;
pub use blank::BlankPage;
pub use engine::EnginePage;

/// Everything needed to build a page for a route.
#[derive(Clone)]
pub struct PageEnv {
    pub home: HomeView,
    pub factory: NativeModuleFactory,
    pub module_config: ModuleConfig,
    pub background: Color,
    /// Last laid-out page box in physical pixels, written by the shell.
    pub last_box: Rc<Cell<Option<ViewportSize>>>,
}

impl PageEnv {
    pub fn from_config(config: &ShellConfig, background: Color) -> Self {
        Self {
            home: config.home_view(),
            factory: config.engine_factory(),
            module_config: config.module_config(),
            background,
            last_box: Rc::new(Cell::new(None)),
        }
    }

    pub fn build(&self, route: Route) -> Element {
        let seed = self.last_box.get();
        match (route, self.home) {
            (Route::Home, HomeView::Engine) => {
                EnginePage::new(self.factory.clone(), self.module_config.clone(), seed).into()
            }
            (Route::Home, HomeView::Animation) => AnimationPage::new(seed).into(),
            (Route::Blank, _) => BlankPage::new(self.background).into(),
        }
    }
}
