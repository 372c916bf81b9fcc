use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{TvgError, TvgResult};
use crate::texture::TextureTarget;

/// CPU-side texture holding an RGBA8 image.
#[derive(Debug, Default)]
pub struct CpuTexture {
    image: Option<image::RgbaImage>,
    uploads: u64,
}

impl CpuTexture {
    pub fn new() -> Self {
        Self::default()
    }

    /// The image contents, `None` once released.
    pub fn image(&self) -> Option<&image::RgbaImage> {
        self.image.as_ref()
    }

    /// Number of uploads since creation.
    pub fn upload_count(&self) -> u64 {
        self.uploads
    }

    pub fn save_png(&self, path: &Path) -> TvgResult<()> {
        let img = self
            .image
            .as_ref()
            .ok_or_else(|| TvgError::texture("texture has been released"))?;
        img.save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

impl TextureTarget for CpuTexture {
    fn size(&self) -> (u32, u32) {
        self.image.as_ref().map_or((0, 0), |img| img.dimensions())
    }

    fn reinitialize(&mut self, width: u32, height: u32) -> TvgResult<()> {
        self.image = Some(image::RgbaImage::new(width, height));
        Ok(())
    }

    fn upload(&mut self, rgba8: &[u8]) -> TvgResult<()> {
        let img = self
            .image
            .as_mut()
            .ok_or_else(|| TvgError::texture("texture has been released"))?;
        let dst: &mut [u8] = img;
        if dst.len() != rgba8.len() {
            return Err(TvgError::texture(format!(
                "upload length mismatch: expected {} bytes, got {}",
                dst.len(),
                rgba8.len()
            )));
        }
        dst.copy_from_slice(rgba8);
        self.uploads += 1;
        Ok(())
    }

    fn release(&mut self) {
        self.image = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reinitialize_discards_contents() {
        let mut tex = CpuTexture::new();
        tex.reinitialize(1, 1).unwrap();
        tex.upload(&[1, 2, 3, 4]).unwrap();
        tex.reinitialize(2, 1).unwrap();
        assert_eq!(tex.size(), (2, 1));
        assert!(tex.image().unwrap().iter().all(|&b| b == 0));
    }

    #[test]
    fn upload_checks_length_and_release() {
        let mut tex = CpuTexture::new();
        tex.reinitialize(1, 1).unwrap();
        assert!(matches!(tex.upload(&[0; 8]), Err(TvgError::Texture(_))));
        tex.upload(&[9, 8, 7, 6]).unwrap();
        assert_eq!(tex.upload_count(), 1);
        assert_eq!(tex.image().unwrap().get_pixel(0, 0).0, [9, 8, 7, 6]);

        tex.release();
        assert_eq!(tex.size(), (0, 0));
        assert!(tex.upload(&[0; 4]).is_err());
    }
}
