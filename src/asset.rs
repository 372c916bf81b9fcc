//! Persisted SVG asset: raw source text plus images pre-rendered by an import step.

use crate::foundation::error::{TvgError, TvgResult};
use crate::session::AnimationTexture;
use crate::sys::Lifecycle;
use crate::texture::TextureTarget;

/// A pre-rendered static image, straight-alpha RGBA8, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StaticImage {
    width: u32,
    height: u32,
    rgba8: Vec<u8>,
}

impl StaticImage {
    pub fn new(width: u32, height: u32, rgba8: Vec<u8>) -> TvgResult<Self> {
        let img = Self {
            width,
            height,
            rgba8,
        };
        img.validate()?;
        Ok(img)
    }

    fn validate(&self) -> TvgResult<()> {
        let expected = self.width as usize * self.height as usize * 4;
        if self.rgba8.len() != expected {
            return Err(TvgError::validation(format!(
                "image byte length mismatch: expected {expected}, got {}",
                self.rgba8.len()
            )));
        }
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba8(&self) -> &[u8] {
        &self.rgba8
    }
}

/// Pixel rectangle inside the pre-rendered texture.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpriteRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Region of the asset's texture used as a sprite.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sprite {
    pub rect: SpriteRect,
    /// Normalized pivot, `[0.5, 0.5]` is the center.
    pub pivot: [f32; 2],
    pub pixels_per_unit: f32,
}

impl Sprite {
    /// A sprite covering the whole of `image`, pivoted at its center.
    pub fn full(image: &StaticImage, pixels_per_unit: f32) -> Self {
        Self {
            rect: SpriteRect {
                x: 0.0,
                y: 0.0,
                width: image.width() as f32,
                height: image.height() as f32,
            },
            pivot: [0.5, 0.5],
            pixels_per_unit,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SvgAsset {
    svg_data: String,
    texture: Option<StaticImage>,
    sprite: Option<Sprite>,
}

impl SvgAsset {
    pub fn new(
        data: impl Into<String>,
        texture: Option<StaticImage>,
        sprite: Option<Sprite>,
    ) -> Self {
        Self {
            svg_data: data.into(),
            texture,
            sprite,
        }
    }

    /// Raw SVG text.
    pub fn data(&self) -> &str {
        &self.svg_data
    }

    pub fn texture(&self) -> Option<&StaticImage> {
        self.texture.as_ref()
    }

    pub fn sprite(&self) -> Option<&Sprite> {
        self.sprite.as_ref()
    }

    /// Replace all three parts at once, as an import step does.
    pub fn set_data(
        &mut self,
        data: impl Into<String>,
        texture: Option<StaticImage>,
        sprite: Option<Sprite>,
    ) {
        self.svg_data = data.into();
        self.texture = texture;
        self.sprite = sprite;
    }

    /// Open an animation texture over the raw SVG text.
    pub fn open<T: TextureTarget>(
        &self,
        sys: &Lifecycle,
        texture: T,
    ) -> TvgResult<AnimationTexture<T>> {
        AnimationTexture::new(sys, &self.svg_data, texture)
    }

    pub fn to_json(&self) -> TvgResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(s: &str) -> TvgResult<Self> {
        let asset: Self = serde_json::from_str(s)?;
        // Deserialization bypasses `StaticImage::new`.
        if let Some(img) = &asset.texture {
            img.validate()?;
        }
        Ok(asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_image_validates_length() {
        assert!(StaticImage::new(2, 2, vec![0; 15]).is_err());
        let img = StaticImage::new(2, 1, vec![7; 8]).unwrap();
        assert_eq!((img.width(), img.height()), (2, 1));
    }

    #[test]
    fn accessors_follow_set_data() {
        let mut asset = SvgAsset::default();
        assert_eq!(asset.data(), "");
        assert!(asset.texture().is_none());

        let img = StaticImage::new(4, 2, vec![0; 32]).unwrap();
        let sprite = Sprite::full(&img, 100.0);
        asset.set_data("<svg/>", Some(img.clone()), Some(sprite));

        assert_eq!(asset.data(), "<svg/>");
        assert_eq!(asset.texture(), Some(&img));
        assert_eq!(asset.sprite().unwrap().rect.width, 4.0);
        assert_eq!(asset.sprite().unwrap().pivot, [0.5, 0.5]);
    }

    #[test]
    fn json_preserves_asset_and_rejects_bad_images() {
        let img = StaticImage::new(1, 1, vec![1, 2, 3, 4]).unwrap();
        let asset = SvgAsset::new("<svg/>", Some(img.clone()), Some(Sprite::full(&img, 1.0)));
        let back = SvgAsset::from_json(&asset.to_json().unwrap()).unwrap();
        assert_eq!(back, asset);

        let bad = r#"{"svg_data":"x","texture":{"width":2,"height":2,"rgba8":[0]},"sprite":null}"#;
        assert!(matches!(
            SvgAsset::from_json(bad),
            Err(TvgError::Validation(_))
        ));
        assert!(matches!(
            SvgAsset::from_json("[]"),
            Err(TvgError::Serde(_))
        ));
    }
}
