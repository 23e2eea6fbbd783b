use super::ctx::FrameCtx;

/// Returned from frame callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// The layer the runtime drives: one call per presented frame.
pub trait App {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// The event loop is about to stop. Release external resources here;
    /// the app may not be dropped before the process exits.
    fn on_exit(&mut self) {}
}
