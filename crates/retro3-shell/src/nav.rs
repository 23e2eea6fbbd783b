//! Top navigation bar with a collapsible route menu.

use std::cell::Cell;
use std::rc::Rc;

use retro3_platform::input::Key;
use retro3_ui::prelude::*;

use crate::router::Route;

pub const BAR_HEIGHT: f32 = 48.0;
pub const ITEM_HEIGHT: f32 = 40.0;
const TOGGLE_SIZE: f32 = 32.0;
const TOGGLE_INSET: f32 = 8.0;
const ACCENT_WIDTH: f32 = 3.0;

const BAR_BG: u32 = 0x18181e;
const MENU_BG: u32 = 0x202028;
const HOVER_BG: u32 = 0x2c2c36;
const PRESS_BG: u32 = 0x383844;
const DIVIDER: u32 = 0x30303a;
const FOREGROUND: u32 = 0xd8d8e0;
const ACCENT: u32 = 0x30d060;

fn hamburger() -> Column {
    Column::new()
        .spacing(5.0)
        .children((0..3).map(|_| Container::new().min_size(16.0, 2.0).background(Color::from_hex(FOREGROUND))))
}

/// Menu glyph: filled for the home view, outlined for the blank page.
fn route_icon(route: Route) -> Container {
    let icon = Container::new().min_size(14.0, 14.0);
    match route {
        Route::Home => icon.background(Color::from_hex(FOREGROUND)),
        Route::Blank => icon.border(2.0, Color::from_hex(FOREGROUND)),
    }
}

pub struct NavBar {
    toggle: Button,
    items: Vec<(Route, Button)>,
    open: Rc<Cell<bool>>,
    requested: Rc<Cell<Option<Route>>>,
    active: Route,
}

impl NavBar {
    pub fn new(active: Route) -> Self {
        let open = Rc::new(Cell::new(false));
        let requested = Rc::new(Cell::new(None));

        let toggle = {
            let open = open.clone();
            Button::new(hamburger())
                .padding_all(TOGGLE_INSET)
                .hover_background(Color::from_hex(HOVER_BG))
                .press_background(Color::from_hex(PRESS_BG))
                .on_click(move || open.set(!open.get()))
        };

        let items = Route::ALL
            .into_iter()
            .map(|route| {
                let (open, requested) = (open.clone(), requested.clone());
                let button = Button::new(
                    Row::new()
                        .cross_align(Align::Center)
                        .padding(Edges::symmetric(0.0, 16.0))
                        .child(route_icon(route)),
                )
                .hover_background(Color::from_hex(HOVER_BG))
                .press_background(Color::from_hex(PRESS_BG))
                .on_click(move || {
                    requested.set(Some(route));
                    open.set(false);
                });
                (route, button)
            })
            .collect();

        Self { toggle, items, open, requested, active }
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn set_open(&mut self, open: bool) {
        self.open.set(open);
    }

    pub fn active(&self) -> Route {
        self.active
    }

    pub fn set_active(&mut self, route: Route) {
        self.active = route;
    }

    /// Route chosen from the menu since the last call, if any.
    pub fn take_request(&self) -> Option<Route> {
        self.requested.take()
    }

    /// Bar height plus the menu when open.
    pub fn height(&self) -> f32 {
        if self.is_open() {
            BAR_HEIGHT + self.items.len() as f32 * ITEM_HEIGHT
        } else {
            BAR_HEIGHT
        }
    }

    fn toggle_rect(rect: Rect) -> Rect {
        Rect::new(rect.origin.x + TOGGLE_INSET, rect.origin.y + TOGGLE_INSET, TOGGLE_SIZE, TOGGLE_SIZE)
    }

    fn item_rect(rect: Rect, index: usize) -> Rect {
        Rect::new(
            rect.origin.x,
            rect.origin.y + BAR_HEIGHT + index as f32 * ITEM_HEIGHT,
            rect.size.x,
            ITEM_HEIGHT,
        )
    }
}

impl Widget for NavBar {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        let width = constraints.biggest_or(Vec2::zero()).x;
        constraints.constrain(Vec2::new(width, self.height()))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let bar = Rect::new(rect.origin.x, rect.origin.y, rect.size.x, BAR_HEIGHT);
        painter.fill_rect(bar, Color::from_hex(BAR_BG));
        self.toggle.paint(painter, Self::toggle_rect(rect));

        if self.is_open() {
            let menu_h = self.items.len() as f32 * ITEM_HEIGHT;
            painter.fill_rect(
                Rect::new(rect.origin.x, rect.origin.y + BAR_HEIGHT, rect.size.x, menu_h),
                Color::from_hex(MENU_BG),
            );
            for (i, (route, button)) in self.items.iter().enumerate() {
                let item = Self::item_rect(rect, i);
                button.paint(painter, item);
                if *route == self.active {
                    painter.fill_rect(
                        Rect::new(item.origin.x, item.origin.y, ACCENT_WIDTH, item.size.y),
                        Color::from_hex(ACCENT),
                    );
                }
            }
        }

        let bottom = rect.origin.y + self.height() - 1.0;
        painter.fill_rect(
            Rect::new(rect.origin.x, bottom, rect.size.x, 1.0),
            Color::from_hex(DIVIDER),
        );
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx) -> EventResult {
        match event {
            UiEvent::KeyPress { key: Key::Escape, .. } if self.is_open() => {
                self.set_open(false);
                EventResult::Consumed
            }
            UiEvent::Click { .. } => {
                // Items are routed before the toggle may close the menu.
                if self.is_open() {
                    for (i, (_, button)) in self.items.iter_mut().enumerate() {
                        if button.on_event(event, Self::item_rect(rect, i), ctx).is_consumed() {
                            return EventResult::Consumed;
                        }
                    }
                }
                if self.toggle.on_event(event, Self::toggle_rect(rect), ctx).is_consumed() {
                    return EventResult::Consumed;
                }
                // Clicks on the bar background stop here too.
                let own = Rect::new(rect.origin.x, rect.origin.y, rect.size.x, self.height());
                match event {
                    UiEvent::Click { pos } if own.contains(*pos) => EventResult::Consumed,
                    _ => EventResult::Ignored,
                }
            }
            _ => EventResult::Ignored,
        }
    }
}
