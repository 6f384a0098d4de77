#![forbid(unsafe_code)]

//! The presenter seam between the stack and rendering.

use crate::pass::RenderPass;

/// Turns the authoritative stack into what should be drawn.
///
/// Implementations hold a handle to the controller and read the latest
/// snapshot when asked, so a pass is never built from stale state.
pub trait Presenter<C, P> {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Build the render pass for the current frame.
    fn render_pass(&self) -> RenderPass<C, P>;

    /// Whether no transition is pending.
    fn is_settled(&self) -> bool {
        true
    }
}
