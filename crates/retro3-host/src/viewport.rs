//! Keeps a drawable canvas the same pixel size as its host container.
//!
//! - `HostContainer` is an observable box size written by layout.
//! - `Canvas` is the drawable surface whose pixel size is read every frame.
//! - `ViewportSizer` links the two: applies the current size on attach and
//!   re-applies it on every box-size change until detached.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Width/height pair in physical pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Rounds a logical size to physical pixels at `scale`.
    #[inline]
    pub fn from_logical(width: f32, height: f32, scale: f32) -> Self {
        let px = |v: f32| (v * scale).round().max(0.0) as u32;
        Self::new(px(width), px(height))
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for ViewportSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

// ── HostContainer ─────────────────────────────────────────────────────────

type Observer = Rc<dyn Fn(ViewportSize)>;

#[derive(Default)]
struct ContainerInner {
    size: Cell<Option<ViewportSize>>,
    next_id: Cell<u64>,
    observers: RefCell<Vec<(u64, Observer)>>,
}

/// The element a canvas lives in. Layout reports its rendered box size here.
///
/// Cloning yields another handle to the same container.
#[derive(Clone, Default)]
pub struct HostContainer {
    inner: Rc<ContainerInner>,
}

impl HostContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current rendered box size; `None` until first laid out.
    pub fn box_size(&self) -> Option<ViewportSize> {
        self.inner.size.get()
    }

    /// Records a new box size and notifies observers if it changed.
    ///
    /// Returns `true` when the size changed.
    pub fn set_box_size(&self, size: ViewportSize) -> bool {
        if self.inner.size.get() == Some(size) {
            return false;
        }
        self.inner.size.set(Some(size));

        // Snapshot so observers may subscribe/unsubscribe while being notified.
        let observers: Vec<Observer> = self
            .inner
            .observers
            .borrow()
            .iter()
            .map(|(_, f)| Rc::clone(f))
            .collect();

        for f in observers {
            f(size);
        }
        true
    }

    /// Registers `f` for box-size changes. Dropping the returned
    /// [`Subscription`] unregisters it.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn observe(&self, f: impl Fn(ViewportSize) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id.wrapping_add(1));
        self.inner.observers.borrow_mut().push((id, Rc::new(f)));

        Subscription {
            container: Rc::downgrade(&self.inner),
            id,
        }
    }

    pub fn observer_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }
}

impl fmt::Debug for HostContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostContainer")
            .field("box_size", &self.box_size())
            .field("observers", &self.observer_count())
            .finish()
    }
}

/// Live observer registration on a [`HostContainer`].
pub struct Subscription {
    container: Weak<ContainerInner>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.container.upgrade() {
            inner.observers.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

// ── Canvas ────────────────────────────────────────────────────────────────

/// Drawable surface with a pixel size.
///
/// Cloning yields another handle to the same surface.
#[derive(Clone, Default)]
pub struct Canvas {
    size: Rc<Cell<ViewportSize>>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.size.get().width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.size.get().height
    }

    #[inline]
    pub fn size(&self) -> ViewportSize {
        self.size.get()
    }

    pub fn resize(&self, size: ViewportSize) {
        self.size.set(size);
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Canvas").field(&self.size.get()).finish()
    }
}

// ── ViewportSizer ─────────────────────────────────────────────────────────

/// Keeps a [`Canvas`] sized to a [`HostContainer`].
#[derive(Default)]
pub struct ViewportSizer {
    subscription: Option<Subscription>,
}

impl ViewportSizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the container's current size to the canvas, then follows
    /// every later change until [`detach`](Self::detach).
    ///
    /// Either reference may be absent (not yet mounted); the call is then a
    /// no-op. Attaching again replaces the previous subscription.
    pub fn attach(&mut self, container: Option<&HostContainer>, canvas: Option<&Canvas>) {
        let (Some(container), Some(canvas)) = (container, canvas) else {
            return;
        };

        self.subscription = None;
        Self::update(Some(container), Some(canvas));

        let target = canvas.clone();
        self.subscription = Some(container.observe(move |size| target.resize(size)));
    }

    pub fn detach(&mut self) {
        self.subscription = None;
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// One-shot sync. No-op when either side is absent or the container has
    /// not been laid out yet.
    pub fn update(container: Option<&HostContainer>, canvas: Option<&Canvas>) {
        let (Some(container), Some(canvas)) = (container, canvas) else {
            return;
        };
        if let Some(size) = container.box_size() {
            canvas.resize(size);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sz(w: u32, h: u32) -> ViewportSize {
        ViewportSize::new(w, h)
    }

    #[test]
    fn attach_applies_current_size_immediately() {
        let container = HostContainer::new();
        container.set_box_size(sz(800, 600));
        let canvas = Canvas::new();

        let mut sizer = ViewportSizer::new();
        sizer.attach(Some(&container), Some(&canvas));

        assert_eq!(canvas.width(), 800);
        assert_eq!(canvas.height(), 600);
    }

    #[test]
    fn resize_notifications_follow_container() {
        let container = HostContainer::new();
        container.set_box_size(sz(800, 600));
        let canvas = Canvas::new();
        let mut sizer = ViewportSizer::new();
        sizer.attach(Some(&container), Some(&canvas));

        container.set_box_size(sz(1024, 400));
        assert_eq!(canvas.size(), sz(1024, 400));

        container.set_box_size(sz(10, 20));
        assert_eq!(canvas.size(), sz(10, 20));
    }

    #[test]
    fn attach_before_layout_picks_up_first_size() {
        let container = HostContainer::new();
        let canvas = Canvas::new();
        let mut sizer = ViewportSizer::new();
        sizer.attach(Some(&container), Some(&canvas));
        assert_eq!(canvas.size(), sz(0, 0));

        container.set_box_size(sz(320, 240));
        assert_eq!(canvas.size(), sz(320, 240));
    }

    #[test]
    fn detach_unsubscribes() {
        let container = HostContainer::new();
        container.set_box_size(sz(100, 100));
        let canvas = Canvas::new();
        let mut sizer = ViewportSizer::new();
        sizer.attach(Some(&container), Some(&canvas));
        assert_eq!(container.observer_count(), 1);

        sizer.detach();
        assert_eq!(container.observer_count(), 0);
        assert!(!sizer.is_attached());

        container.set_box_size(sz(200, 200));
        assert_eq!(canvas.size(), sz(100, 100));
    }

    #[test]
    fn drop_unsubscribes() {
        let container = HostContainer::new();
        let canvas = Canvas::new();
        {
            let mut sizer = ViewportSizer::new();
            sizer.attach(Some(&container), Some(&canvas));
            assert_eq!(container.observer_count(), 1);
        }
        assert_eq!(container.observer_count(), 0);
    }

    #[test]
    fn reattach_replaces_subscription() {
        let container = HostContainer::new();
        let canvas = Canvas::new();
        let mut sizer = ViewportSizer::new();
        sizer.attach(Some(&container), Some(&canvas));
        sizer.attach(Some(&container), Some(&canvas));
        assert_eq!(container.observer_count(), 1);
    }

    #[test]
    fn absent_references_are_a_no_op() {
        let container = HostContainer::new();
        container.set_box_size(sz(50, 60));
        let canvas = Canvas::new();
        let mut sizer = ViewportSizer::new();

        sizer.attach(None, Some(&canvas));
        sizer.attach(Some(&container), None);
        ViewportSizer::update(None, Some(&canvas));

        assert!(!sizer.is_attached());
        assert_eq!(canvas.size(), sz(0, 0));
        assert_eq!(container.observer_count(), 0);
    }

    #[test]
    fn unchanged_size_does_not_notify() {
        let container = HostContainer::new();
        assert!(container.set_box_size(sz(5, 5)));
        assert!(!container.set_box_size(sz(5, 5)));
    }

    #[test]
    fn subscription_outliving_container_is_harmless() {
        let container = HostContainer::new();
        let sub = container.observe(|_| {});
        drop(container);
        drop(sub);
    }

    #[test]
    fn from_logical_rounds_by_scale() {
        assert_eq!(ViewportSize::from_logical(400.0, 300.0, 2.0), sz(800, 600));
        assert_eq!(ViewportSize::from_logical(10.4, 10.6, 1.0), sz(10, 11));
        assert!(ViewportSize::from_logical(0.0, 10.0, 1.0).is_empty());
    }
}
