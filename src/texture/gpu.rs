use crate::foundation::error::{TvgError, TvgResult};
use crate::texture::TextureTarget;

/// A `wgpu` texture uploaded with [`wgpu::Queue::write_texture`].
pub struct WgpuTexture {
    device: wgpu::Device,
    queue: wgpu::Queue,
    format: wgpu::TextureFormat,
    texture: Option<wgpu::Texture>,
    width: u32,
    height: u32,
}

impl WgpuTexture {
    /// Wrap an existing device/queue. Storage is created on the first `reinitialize`.
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self {
            device,
            queue,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            texture: None,
            width: 0,
            height: 0,
        }
    }

    /// Create a device without a surface, for offscreen use.
    pub fn headless() -> TvgResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .map_err(|e| match e {
            wgpu::RequestAdapterError::NotFound { .. } => {
                TvgError::texture("no gpu adapter available")
            }
            other => TvgError::texture(format!("wgpu request_adapter failed: {other:?}")),
        })?;

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("tvg_texture"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            experimental_features: wgpu::ExperimentalFeatures::default(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        }))
        .map_err(|e| TvgError::texture(format!("wgpu request_device failed: {e:?}")))?;

        Ok(Self::new(device, queue))
    }

    pub fn texture(&self) -> Option<&wgpu::Texture> {
        self.texture.as_ref()
    }

    pub fn create_view(&self) -> Option<wgpu::TextureView> {
        self.texture
            .as_ref()
            .map(|t| t.create_view(&wgpu::TextureViewDescriptor::default()))
    }
}

impl TextureTarget for WgpuTexture {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn reinitialize(&mut self, width: u32, height: u32) -> TvgResult<()> {
        if let Some(old) = self.texture.take() {
            old.destroy();
        }

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("tvg_animation_texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.texture = Some(texture);
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn upload(&mut self, rgba8: &[u8]) -> TvgResult<()> {
        let texture = self
            .texture
            .as_ref()
            .ok_or_else(|| TvgError::texture("texture has been released"))?;
        let expected = self.width as usize * self.height as usize * 4;
        if rgba8.len() != expected {
            return Err(TvgError::texture(format!(
                "upload length mismatch: expected {expected} bytes, got {}",
                rgba8.len()
            )));
        }

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba8,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.width),
                rows_per_image: Some(self.height),
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
        Ok(())
    }

    fn release(&mut self) {
        if let Some(texture) = self.texture.take() {
            texture.destroy();
        }
        self.width = 0;
        self.height = 0;
    }
}
