//! Vector animation to texture frame cache.
//!
//! - Start the engine through a [`Lifecycle`] (or the process-wide [`sys::global`])
//! - Open an [`AnimationTexture`] over animation source text and a [`TextureTarget`]
//! - Seek with [`AnimationTexture::set_frame`]; read with [`AnimationTexture::texture`], which
//!   redraws only when the frame or size changed since the last read
#![forbid(unsafe_code)]

pub mod asset;
pub mod config;
pub mod engine;
mod foundation;
pub mod session;
pub mod sys;
pub mod texture;

pub use asset::{Sprite, SpriteRect, StaticImage, SvgAsset};
pub use config::{Config, SessionOpts, SvgEngineOpts};
pub use engine::svg::SvgEngine;
pub use engine::{Animation, AnimationEngine};
pub use foundation::core::{
    Canvas, FRAME_EPSILON, FrameInfo, MAX_CANVAS_DIM, frames_per_second, wrap_frame,
};
pub use foundation::error::{TvgError, TvgResult};
pub use session::AnimationTexture;
pub use sys::{EngineGuard, Lifecycle};
pub use texture::TextureTarget;
pub use texture::cpu::CpuTexture;
#[cfg(feature = "gpu")]
pub use texture::gpu::WgpuTexture;
