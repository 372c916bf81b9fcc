//! Animation-to-texture frame cache.
//!
//! An [`AnimationTexture`] owns one engine animation, one pixel buffer the engine draws into, and
//! one texture mirroring that buffer. Seeking and resizing only mark the cache dirty; the frame is
//! rasterized and uploaded the next time the texture is read.

use std::thread::{self, ThreadId};

use crate::config::SessionOpts;
use crate::engine::Animation;
use crate::foundation::core::{Canvas, FrameInfo, wrap_frame};
use crate::foundation::error::{TvgError, TvgResult};
use crate::sys::Lifecycle;
use crate::texture::TextureTarget;

pub struct AnimationTexture<T: TextureTarget> {
    // `None` once the native side has been released.
    animation: Option<Box<dyn Animation>>,
    // Sole render target. Replaced wholesale on resize, never reallocated in place.
    buffer: Box<[u32]>,
    texture: T,
    owner: ThreadId,

    canvas: Canvas,
    info: FrameInfo,
    frame: f32,
    dirty: bool,
    disposed: bool,
    opts: SessionOpts,
}

impl<T: TextureTarget> AnimationTexture<T> {
    /// Load `source` and size the buffer and texture to the animation's intrinsic size.
    ///
    /// The calling thread becomes the owner of `texture`.
    pub fn new(sys: &Lifecycle, source: &str, texture: T) -> TvgResult<Self> {
        Self::with_opts(sys, source, texture, SessionOpts::default())
    }

    #[tracing::instrument(skip_all, fields(source_len = source.len()))]
    pub fn with_opts(
        sys: &Lifecycle,
        source: &str,
        texture: T,
        opts: SessionOpts,
    ) -> TvgResult<Self> {
        if source.is_empty() {
            return Err(TvgError::creation("animation source is empty"));
        }
        sys.init()?;

        let animation = sys.engine().create_animation(source)?;
        let (w, h) = animation.size();
        let canvas = Canvas::from_intrinsic(w, h)
            .map_err(|e| TvgError::creation(format!("unusable intrinsic size: {e}")))?;
        let info = FrameInfo::new(animation.duration(), animation.total_frames());
        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            duration = info.duration_secs,
            total_frames = info.total_frames,
            "animation created"
        );

        let mut session = Self {
            animation: Some(animation),
            buffer: Box::default(),
            texture,
            owner: thread::current().id(),
            canvas,
            info,
            frame: 0.0,
            dirty: true,
            disposed: false,
            opts,
        };
        // On failure `session` drops here and releases the animation; nothing escapes.
        session.resize(canvas.width, canvas.height)?;
        Ok(session)
    }

    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    pub fn duration(&self) -> f32 {
        self.info.duration_secs
    }

    pub fn total_frames(&self) -> f32 {
        self.info.total_frames
    }

    pub fn fps(&self) -> f32 {
        self.info.fps
    }

    pub fn info(&self) -> FrameInfo {
        self.info
    }

    /// Current playback position. Wrapped into `[0, total_frames)` for animated content.
    pub fn frame(&self) -> f32 {
        self.frame
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// The pixel buffer as last drawn. Empty once disposed.
    pub fn pixels(&self) -> &[u32] {
        &self.buffer
    }

    /// The texture as last uploaded, without refreshing it.
    pub fn target(&self) -> &T {
        &self.texture
    }

    /// Resize the engine canvas, replace the pixel buffer and reinitialize the texture.
    ///
    /// Always reallocates. The playback position is kept. On failure the previous size stays in
    /// effect and the session is marked dirty.
    #[tracing::instrument(skip(self))]
    pub fn resize(&mut self, width: u32, height: u32) -> TvgResult<()> {
        let canvas = Canvas::new(width, height)?;
        let old = self.canvas;
        let animation = self.animation.as_mut().ok_or(TvgError::Disposed)?;

        animation.resize(canvas.width, canvas.height)?;
        let buffer = vec![0u32; canvas.pixel_count()].into_boxed_slice();

        if let Err(e) = self.texture.reinitialize(canvas.width, canvas.height) {
            let _ = animation.resize(old.width, old.height);
            self.dirty = true;
            return Err(e);
        }
        if let Err(e) = animation.set_canvas_target(canvas.width, canvas.height) {
            let _ = animation.resize(old.width, old.height);
            let _ = self.texture.reinitialize(old.width, old.height);
            self.dirty = true;
            return Err(e);
        }

        // The old buffer is dropped here and never drawn into again.
        self.buffer = buffer;
        self.canvas = canvas;
        self.dirty = true;
        Ok(())
    }

    /// Seek to `value`.
    ///
    /// Changes within the configured epsilon are ignored. Static content (`total_frames <= 1`)
    /// stores the raw value and never reaches the engine; animated content is wrapped into
    /// `[0, total_frames)` before seeking.
    pub fn set_frame(&mut self, value: f32) -> TvgResult<()> {
        if self.disposed {
            return Err(TvgError::Disposed);
        }
        if !value.is_finite() {
            return Err(TvgError::validation(format!("frame must be finite, got {value}")));
        }
        if (value - self.frame).abs() < self.opts.frame_epsilon {
            return Ok(());
        }
        if self.info.is_static() {
            self.frame = value;
            return Ok(());
        }

        let animation = self.animation.as_mut().ok_or(TvgError::Disposed)?;
        let wrapped = wrap_frame(value, self.info.total_frames);
        animation.set_frame(wrapped)?;
        tracing::trace!(value, wrapped, "frame seek");

        self.frame = wrapped;
        self.dirty = true;
        Ok(())
    }

    /// Seek to a time in seconds, using the animation's frame rate.
    pub fn seek_seconds(&mut self, secs: f32) -> TvgResult<()> {
        self.set_frame(secs * self.info.fps)
    }

    /// The texture reflecting the current frame, redrawing and uploading only when dirty.
    pub fn texture(&mut self) -> TvgResult<&T> {
        if self.disposed {
            return Err(TvgError::Disposed);
        }
        if !self.dirty {
            return Ok(&self.texture);
        }

        let animation = self.animation.as_mut().ok_or(TvgError::Disposed)?;
        animation.draw_canvas(&mut self.buffer)?;
        self.texture.upload(bytemuck::cast_slice(&self.buffer[..]))?;
        tracing::debug!(frame = self.frame, "texture refreshed");

        self.dirty = false;
        Ok(&self.texture)
    }

    /// Release the texture, the animation and the pixel buffer. Idempotent.
    ///
    /// The texture is only released on the owning thread; from any other thread it is left alone
    /// and freed when the session, and with it `T`, is dropped.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        if thread::current().id() == self.owner {
            self.texture.release();
        } else {
            tracing::warn!("dispose called off the owning thread; texture freed on drop");
        }
        self.release_native();
        self.disposed = true;
    }

    fn release_native(&mut self) {
        self.animation = None;
        self.buffer = Box::default();
    }
}

impl<T: TextureTarget> Drop for AnimationTexture<T> {
    fn drop(&mut self) {
        if self.disposed {
            return;
        }
        // Safety net only: native resources are released, the texture is not touched.
        if self.animation.is_some() {
            tracing::warn!("animation texture dropped without dispose");
        }
        self.release_native();
        self.disposed = true;
    }
}
