use crate::types::{Point, Rect};

/// Identifies one paint pass. Every context built during the pass carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct RenderSessionId(u64);

impl RenderSessionId {
    pub(crate) fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// What the renderer remembers about a control between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidateParameters {
    pub structural_hash: u64,
    /// Structural hash of the parent's context, or 0 at the root.
    pub parent_hash: u64,
    pub session: RenderSessionId,
    pub painted_rect: Rect,
    pub screen_location: Point,
}

impl InvalidateParameters {
    /// Whether a context with these hashes would produce the same output.
    pub fn matches(&self, structural_hash: u64, parent_hash: u64) -> bool {
        self.structural_hash == structural_hash && self.parent_hash == parent_hash
    }
}

/// Counters for one call to [`super::Renderer::render_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Layout pass ran.
    pub laid_out: bool,
    /// Screen was hard-cleared.
    pub cleared: bool,
    /// Controls that received a new context.
    pub painted: usize,
    /// Contexts written into the frame patch.
    pub composed: usize,
    /// Runs emitted to the console.
    pub runs: usize,
}

impl FrameStats {
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}
