//! The animation engine seam.
//!
//! An engine parses animation source text and rasterizes frames into caller-owned pixel buffers.
//! [`AnimationTexture`](crate::AnimationTexture) drives an engine through these two traits and
//! never looks at the source itself.

pub mod svg;

use crate::foundation::error::TvgResult;

/// Process-wide engine entry points.
///
/// `init`/`term` must be balanced; [`Lifecycle`](crate::Lifecycle) takes care of that.
pub trait AnimationEngine: Send + Sync {
    /// Start the engine. Called once before the first animation is created.
    fn init(&self) -> TvgResult<()>;

    /// Shut the engine down.
    fn term(&self);

    /// Readiness status: `< 0` failed to load, `0` still loading, `> 0` ready.
    fn ready_status(&self) -> i32;

    /// Parse `source` and return an owned animation handle.
    fn create_animation(&self, source: &str) -> TvgResult<Box<dyn Animation>>;
}

/// One loaded animation. Dropping the handle releases everything the engine holds for it.
pub trait Animation: Send {
    /// Intrinsic size in pixels.
    fn size(&self) -> (f32, f32);

    /// Duration in seconds. Zero for static content.
    fn duration(&self) -> f32;

    /// Total frame count. `<= 1` for static content.
    fn total_frames(&self) -> f32;

    /// Resize the internal canvas the animation is laid out on.
    fn resize(&mut self, width: u32, height: u32) -> TvgResult<()>;

    /// Register the dimensions of the pixel buffer subsequent draws write into.
    fn set_canvas_target(&mut self, width: u32, height: u32) -> TvgResult<()>;

    /// Seek to `frame`, already wrapped into `[0, total_frames)`.
    fn set_frame(&mut self, frame: f32) -> TvgResult<()>;

    /// Rasterize the current frame into `target` synchronously.
    ///
    /// `target` holds `width * height` RGBA8 pixels in `[r, g, b, a]` byte order, matching the
    /// last registered canvas target.
    fn draw_canvas(&mut self, target: &mut [u32]) -> TvgResult<()>;
}
