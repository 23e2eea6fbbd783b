//! Path routing between the shell's pages.

use std::fmt;

use retro3_ui::prelude::*;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Route {
    Home,
    Blank,
}

impl Route {
    pub const ALL: [Route; 2] = [Route::Home, Route::Blank];

    /// Exact path match; one trailing slash is tolerated.
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = match path.strip_suffix('/') {
            Some("") | None => path,
            Some(rest) => rest,
        };
        match trimmed {
            "/" => Some(Route::Home),
            "/blank" => Some(Route::Blank),
            _ => None,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Blank => "/blank",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Builds the page shown for a route.
pub type PageBuilder = Box<dyn FnMut(Route) -> Element>;

/// Owns the active page.
///
/// Exactly one page is mounted at a time; navigating unmounts the current
/// page before the next one is built.
pub struct Router {
    current: Route,
    page: Element,
    build: PageBuilder,
}

impl Router {
    pub fn new(initial: Route, mut build: impl FnMut(Route) -> Element + 'static) -> Self {
        log::info!("route {initial}");
        let page = build(initial);
        Self { current: initial, page, build: Box::new(build) }
    }

    /// Starts at `path`, falling back to [`Route::Home`] when it is unknown.
    pub fn with_path(path: &str, build: impl FnMut(Route) -> Element + 'static) -> Self {
        Self::new(resolve_path(path), build)
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// Switches to `route`. Returns `false` if it was already active.
    pub fn navigate(&mut self, route: Route) -> bool {
        if route == self.current {
            return false;
        }

        log::info!("route {} -> {route}", self.current);
        self.page.unmount();
        self.page = (self.build)(route);
        self.current = route;
        true
    }
}

fn resolve_path(path: &str) -> Route {
    Route::from_path(path).unwrap_or_else(|| {
        log::warn!("unknown route {path:?}; falling back to {}", Route::Home);
        Route::Home
    })
}

impl Widget for Router {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        constraints.biggest_or(Vec2::zero())
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        self.page.paint(painter, rect);
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx) -> EventResult {
        self.page.on_event(event, rect, ctx)
    }

    fn unmount(&mut self) {
        self.page.unmount();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    type Log = Rc<RefCell<Vec<String>>>;

    struct FakePage {
        route: Route,
        log: Log,
    }

    impl Widget for FakePage {
        fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
            constraints.max
        }

        fn paint(&self, _painter: &mut Painter, _rect: Rect) {}

        fn unmount(&mut self) {
            self.log.borrow_mut().push(format!("unmount {}", self.route));
        }
    }

    fn router(initial: Route) -> (Router, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let l = log.clone();
        let router = Router::new(initial, move |route| {
            l.borrow_mut().push(format!("mount {route}"));
            FakePage { route, log: l.clone() }.into()
        });
        (router, log)
    }

    #[test]
    fn path_matching() {
        assert_eq!(Route::from_path("/"), Some(Route::Home));
        assert_eq!(Route::from_path("/blank"), Some(Route::Blank));
        assert_eq!(Route::from_path("/blank/"), Some(Route::Blank));
        assert_eq!(Route::from_path("/blank//"), None);
        assert_eq!(Route::from_path("/blank?x=1"), None);
        assert_eq!(Route::from_path("blank"), None);
        assert_eq!(Route::from_path(""), None);
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }

    #[test]
    fn navigation_unmounts_old_page_before_mounting_new() {
        let (mut router, log) = router(Route::Home);
        assert!(router.navigate(Route::Blank));
        assert_eq!(router.current(), Route::Blank);
        assert_eq!(log.borrow().as_slice(), &["mount /", "unmount /", "mount /blank"]);
    }

    #[test]
    fn navigating_to_current_route_is_a_no_op() {
        let (mut router, log) = router(Route::Home);
        assert!(!router.navigate(Route::Home));
        assert_eq!(log.borrow().as_slice(), &["mount /"]);
    }

    #[test]
    fn unknown_path_falls_back_to_home() {
        let r = Router::with_path("/missing", |_| Container::new().into());
        assert_eq!(r.current(), Route::Home);
    }

    #[test]
    fn unmount_reaches_active_page() {
        let (mut router, log) = router(Route::Blank);
        Widget::unmount(&mut router);
        assert_eq!(log.borrow().last().map(String::as_str), Some("unmount /blank"));
    }
}
