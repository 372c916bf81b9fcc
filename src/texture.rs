//! Texture targets the frame cache uploads into.

pub mod cpu;
#[cfg(feature = "gpu")]
pub mod gpu;

use crate::foundation::error::TvgResult;

/// A host-owned image resource mirroring the session's pixel buffer.
///
/// Releasing GPU-backed targets is only valid on the thread that owns the rendering context;
/// [`AnimationTexture`](crate::AnimationTexture) enforces that for [`TextureTarget::release`].
pub trait TextureTarget {
    /// Current dimensions, `(0, 0)` once released.
    fn size(&self) -> (u32, u32);

    /// Recreate storage at `width` x `height`. Prior contents are discarded.
    fn reinitialize(&mut self, width: u32, height: u32) -> TvgResult<()>;

    /// Replace the contents with tightly packed RGBA8 rows.
    fn upload(&mut self, rgba8: &[u8]) -> TvgResult<()>;

    /// Free the underlying resource. Further uploads fail.
    fn release(&mut self);
}
