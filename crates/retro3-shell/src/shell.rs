//! Root widget: navigation bar above the routed page.

use std::cell::Cell;
use std::rc::Rc;

use retro3_host::ViewportSize;
use retro3_ui::prelude::*;

use crate::config::ShellConfig;
use crate::nav::NavBar;
use crate::pages::PageEnv;
use crate::router::{Route, Router};

pub const BACKGROUND: u32 = 0x101014;

pub struct Shell {
    nav: NavBar,
    router: Router,
    last_box: Rc<Cell<Option<ViewportSize>>>,
}

impl Shell {
    pub fn new(config: &ShellConfig) -> Self {
        let env = PageEnv::from_config(config, Color::from_hex(BACKGROUND));
        Self::with_env(env, &config.initial_route)
    }

    pub fn with_env(env: PageEnv, initial_path: &str) -> Self {
        let last_box = env.last_box.clone();
        let router = Router::with_path(initial_path, move |route| env.build(route));
        Self { nav: NavBar::new(router.current()), router, last_box }
    }

    pub fn route(&self) -> Route {
        self.router.current()
    }

    pub fn nav(&self) -> &NavBar {
        &self.nav
    }

    /// Last page box painted, in physical pixels.
    pub fn page_box(&self) -> Option<ViewportSize> {
        self.last_box.get()
    }

    /// Area left for the page below the bar (and the menu, when open).
    pub fn page_rect(&self, rect: Rect) -> Rect {
        let nav_h = self.nav.height().min(rect.size.y);
        Rect::new(rect.origin.x, rect.origin.y + nav_h, rect.size.x, rect.size.y - nav_h)
    }

    fn nav_rect(&self, rect: Rect) -> Rect {
        Rect::new(rect.origin.x, rect.origin.y, rect.size.x, self.nav.height().min(rect.size.y))
    }

    pub fn navigate(&mut self, route: Route) {
        self.router.navigate(route);
        self.nav.set_active(self.router.current());
    }
}

impl Widget for Shell {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        constraints.biggest_or(Vec2::zero())
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let page = self.page_rect(rect);
        self.last_box
            .set(Some(ViewportSize::from_logical(page.size.x, page.size.y, painter.scale)));

        self.router.paint(painter, page);
        self.nav.paint(painter, self.nav_rect(rect));
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx) -> EventResult {
        if let UiEvent::Tick { .. } = event {
            return self.router.on_event(event, self.page_rect(rect), ctx);
        }

        let nav_rect = self.nav_rect(rect);
        if self.nav.on_event(event, nav_rect, ctx).is_consumed() {
            if let Some(route) = self.nav.take_request() {
                self.navigate(route);
            }
            return EventResult::Consumed;
        }

        self.router.on_event(event, self.page_rect(rect), ctx)
    }

    fn unmount(&mut self) {
        self.router.unmount();
    }
}
