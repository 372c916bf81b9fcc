use std::sync::{Arc, RwLock};

use resvg::tiny_skia;

use crate::config::SvgEngineOpts;
use crate::engine::{Animation, AnimationEngine};
use crate::foundation::core::Canvas;
use crate::foundation::error::{TvgError, TvgResult};

/// Static SVG engine backed by `usvg` (parse) and `resvg` (raster).
///
/// Every document is a single-frame animation: duration `0`, one frame.
pub struct SvgEngine {
    opts: SvgEngineOpts,
    fontdb: RwLock<Option<Arc<usvg::fontdb::Database>>>,
}

impl SvgEngine {
    pub fn new(opts: SvgEngineOpts) -> Self {
        Self {
            opts,
            fontdb: RwLock::new(None),
        }
    }

    pub fn opts(&self) -> &SvgEngineOpts {
        &self.opts
    }

    fn loaded_fontdb(&self) -> TvgResult<Option<Arc<usvg::fontdb::Database>>> {
        let guard = self
            .fontdb
            .read()
            .map_err(|_| TvgError::creation("svg engine state poisoned"))?;
        Ok(guard.clone())
    }
}

impl Default for SvgEngine {
    fn default() -> Self {
        Self::new(SvgEngineOpts::default())
    }
}

impl AnimationEngine for SvgEngine {
    fn init(&self) -> TvgResult<()> {
        let mut db = usvg::fontdb::Database::new();
        if self.opts.load_system_fonts {
            db.load_system_fonts();
        }
        tracing::debug!(faces = db.len(), "svg engine started");

        let mut guard = self
            .fontdb
            .write()
            .map_err(|_| TvgError::validation("svg engine state poisoned"))?;
        *guard = Some(Arc::new(db));
        Ok(())
    }

    fn term(&self) {
        if let Ok(mut guard) = self.fontdb.write() {
            *guard = None;
        }
    }

    fn ready_status(&self) -> i32 {
        match self.fontdb.read() {
            Ok(guard) if guard.is_some() => 1,
            Ok(_) => 0,
            Err(_) => -1,
        }
    }

    fn create_animation(&self, source: &str) -> TvgResult<Box<dyn Animation>> {
        let fontdb = self
            .loaded_fontdb()?
            .ok_or_else(|| TvgError::creation("svg engine is not initialized"))?;

        let opts = usvg::Options {
            resources_dir: self.opts.resources_dir.clone(),
            dpi: self.opts.dpi,
            fontdb,
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_str(source, &opts)
            .map_err(|e| TvgError::creation(format!("parse svg: {e}")))?;

        let size = tree.size();
        if !(size.width() > 0.0 && size.height() > 0.0) {
            return Err(TvgError::creation("svg has invalid width/height"));
        }

        Ok(Box::new(SvgAnimation {
            tree,
            canvas: None,
            target: None,
            background: self.opts.background,
        }))
    }
}

struct SvgAnimation {
    tree: usvg::Tree,
    canvas: Option<Canvas>,
    target: Option<Canvas>,
    background: Option<[u8; 4]>,
}

impl Animation for SvgAnimation {
    fn size(&self) -> (f32, f32) {
        let size = self.tree.size();
        (size.width(), size.height())
    }

    fn duration(&self) -> f32 {
        0.0
    }

    fn total_frames(&self) -> f32 {
        1.0
    }

    fn resize(&mut self, width: u32, height: u32) -> TvgResult<()> {
        self.canvas = Some(Canvas::new(width, height)?);
        Ok(())
    }

    fn set_canvas_target(&mut self, width: u32, height: u32) -> TvgResult<()> {
        self.target = Some(Canvas::new(width, height)?);
        Ok(())
    }

    // Single frame; nothing to seek.
    fn set_frame(&mut self, _frame: f32) -> TvgResult<()> {
        Ok(())
    }

    fn draw_canvas(&mut self, target: &mut [u32]) -> TvgResult<()> {
        let dst = self
            .target
            .ok_or_else(|| TvgError::render("no canvas target registered"))?;
        if target.len() != dst.pixel_count() {
            return Err(TvgError::render(format!(
                "canvas target length mismatch: expected {}, got {}",
                dst.pixel_count(),
                target.len()
            )));
        }

        let mut pixmap = tiny_skia::Pixmap::new(dst.width, dst.height)
            .ok_or_else(|| TvgError::render("failed to allocate svg pixmap"))?;
        if let Some([r, g, b, a]) = self.background {
            pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
        }

        let canvas = self.canvas.unwrap_or(dst);
        let size = self.tree.size();
        let sx = canvas.width as f32 / size.width();
        let sy = canvas.height as f32 / size.height();
        resvg::render(
            &self.tree,
            tiny_skia::Transform::from_scale(sx, sy),
            &mut pixmap.as_mut(),
        );

        let out: &mut [u8] = bytemuck::cast_slice_mut(target);
        out.copy_from_slice(pixmap.data());
        demultiply_rgba8_in_place(out);
        Ok(())
    }
}

fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="4">
  <rect x="0" y="0" width="8" height="4" fill="#ff00ff"/>
</svg>"##;

    fn started() -> SvgEngine {
        let engine = SvgEngine::default();
        engine.init().unwrap();
        engine
    }

    #[test]
    fn demultiply_restores_straight_alpha() {
        let mut px = [64u8, 32, 0, 128, 10, 20, 30, 255, 5, 5, 5, 0];
        demultiply_rgba8_in_place(&mut px);
        assert_eq!(&px[0..4], &[128, 64, 0, 128]);
        assert_eq!(&px[4..8], &[10, 20, 30, 255]);
        assert_eq!(&px[8..12], &[5, 5, 5, 0]);
    }

    #[test]
    fn readiness_follows_init_and_term() {
        let engine = SvgEngine::default();
        assert_eq!(engine.ready_status(), 0);
        engine.init().unwrap();
        assert_eq!(engine.ready_status(), 1);
        engine.term();
        assert_eq!(engine.ready_status(), 0);
    }

    #[test]
    fn create_before_init_fails() {
        let engine = SvgEngine::default();
        assert!(matches!(
            engine.create_animation(RECT),
            Err(TvgError::Creation(_))
        ));
    }

    #[test]
    fn svg_is_single_frame_with_intrinsic_size() {
        let anim = started().create_animation(RECT).unwrap();
        assert_eq!(anim.size(), (8.0, 4.0));
        assert_eq!(anim.duration(), 0.0);
        assert_eq!(anim.total_frames(), 1.0);
    }

    #[test]
    fn draw_requires_matching_target() {
        let mut anim = started().create_animation(RECT).unwrap();
        let mut buf = vec![0u32; 32];
        assert!(matches!(
            anim.draw_canvas(&mut buf),
            Err(TvgError::Render(_))
        ));

        anim.set_canvas_target(8, 4).unwrap();
        let mut short = vec![0u32; 31];
        assert!(anim.draw_canvas(&mut short).is_err());

        anim.draw_canvas(&mut buf).unwrap();
        let bytes: &[u8] = bytemuck::cast_slice(&buf[..]);
        assert_eq!(&bytes[0..4], &[255, 0, 255, 255]);
    }
}
