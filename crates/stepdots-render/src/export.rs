//! Offscreen rendering to PNG.

use peniko::Color;
use vello::util::RenderContext;
use vello::{AaConfig, RenderParams, RendererOptions, Scene};

use crate::renderer::{ExportOptions, RenderResult, RendererError};
use crate::vello_impl::VelloSurface;
use stepdots_core::palette::ColorResolver;
use stepdots_core::widget::StepDotsWidget;

/// Result of PNG rendering - contains the raw RGBA pixel data and dimensions.
#[derive(Debug)]
pub struct PngRenderResult {
    /// RGBA pixel data (4 bytes per pixel).
    pub rgba_data: Vec<u8>,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl PngRenderResult {
    /// Encode the pixels as PNG bytes.
    pub fn to_png(&self) -> RenderResult<Vec<u8>> {
        encode_png(&self.rgba_data, self.width, self.height)
    }
}

/// GPU device plus Vello renderer, without any window surface.
pub struct HeadlessRenderer {
    render_cx: RenderContext,
    dev_id: usize,
    renderer: vello::Renderer,
}

impl HeadlessRenderer {
    /// Pick an adapter and create a Vello renderer on it.
    pub async fn new() -> RenderResult<Self> {
        let mut render_cx = RenderContext::new();
        let dev_id = render_cx
            .device(None)
            .await
            .ok_or_else(|| RendererError::InitFailed("no compatible GPU adapter".to_string()))?;
        let renderer = vello::Renderer::new(
            &render_cx.devices[dev_id].device,
            RendererOptions::default(),
        )
            .map_err(|e| RendererError::InitFailed(format!("{:?}", e)))?;
        log::info!("Headless renderer ready on device {}", dev_id);
        Ok(Self { render_cx, dev_id, renderer })
    }

    /// Render a scene into RGBA pixels.
    pub fn render_scene(
        &mut self,
        scene: &Scene,
        width: u32,
        height: u32,
        base_color: Color,
    ) -> RenderResult<PngRenderResult> {
        let handle = &self.render_cx.devices[self.dev_id];
        render_scene_to_png(
            &handle.device,
            &handle.queue,
            &mut self.renderer,
            scene,
            width,
            height,
            base_color,
        )
    }

    /// Paint `widget` at its measured size and return PNG bytes.
    pub fn render_widget_png(
        &mut self,
        surface: &mut VelloSurface,
        widget: &mut StepDotsWidget,
        resolver: &dyn ColorResolver,
        options: ExportOptions,
    ) -> RenderResult<Vec<u8>> {
        let size = widget.measured_size();
        let (width, height) = options.target_size(size.width, size.height);
        surface.render_widget(widget, resolver, options.scale);
        let pixels = self.render_scene(surface.scene(), width, height, options.base_color)?;
        log::info!("Rendered step dots to {}x{} pixels", width, height);
        pixels.to_png()
    }
}

/// Render `scene` to an offscreen texture and read the pixels back.
pub fn render_scene_to_png(
    device: &vello::wgpu::Device,
    queue: &vello::wgpu::Queue,
    vello_renderer: &mut vello::Renderer,
    scene: &Scene,
    width: u32,
    height: u32,
    base_color: Color,
) -> RenderResult<PngRenderResult> {
    if width == 0 || height == 0 {
        return Err(RendererError::Surface(format!(
            "cannot render an empty {}x{} target",
            width, height
        )));
    }

    // Create offscreen texture for rendering
    let texture = device.create_texture(&vello::wgpu::TextureDescriptor {
        label: Some("step dots texture"),
        size: vello::wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: vello::wgpu::TextureDimension::D2,
        format: vello::wgpu::TextureFormat::Rgba8Unorm,
        usage: vello::wgpu::TextureUsages::STORAGE_BINDING
            | vello::wgpu::TextureUsages::COPY_SRC
            | vello::wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });

    let texture_view = texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

    let params = RenderParams {
        base_color,
        width,
        height,
        antialiasing_method: AaConfig::Area,
    };

    vello_renderer
        .render_to_texture(device, queue, scene, &texture_view, &params)
        .map_err(|e| RendererError::RenderFailed(format!("{:?}", e)))?;

    let bytes_per_row = padded_bytes_per_row(width);
    let buffer_size = (bytes_per_row * height) as u64;

    let readback_buffer = device.create_buffer(&vello::wgpu::BufferDescriptor {
        label: Some("step dots readback buffer"),
        size: buffer_size,
        usage: vello::wgpu::BufferUsages::COPY_DST | vello::wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
        label: Some("step dots copy encoder"),
    });

    encoder.copy_texture_to_buffer(
        vello::wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: vello::wgpu::Origin3d::ZERO,
            aspect: vello::wgpu::TextureAspect::All,
        },
        vello::wgpu::TexelCopyBufferInfo {
            buffer: &readback_buffer,
            layout: vello::wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(height),
            },
        },
        vello::wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );

    queue.submit(std::iter::once(encoder.finish()));

    let buffer_slice = readback_buffer.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    buffer_slice.map_async(vello::wgpu::MapMode::Read, move |result| {
        tx.send(result).ok();
    });

    // Blocking wait, native only
    let _ = device.poll(vello::wgpu::PollType::wait_indefinitely());

    match rx.recv() {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            return Err(RendererError::RenderFailed(format!("buffer mapping failed: {:?}", e)));
        }
        Err(_) => {
            return Err(RendererError::RenderFailed("buffer mapping never completed".to_string()));
        }
    }

    let data = buffer_slice.get_mapped_range();
    let rgba_data = strip_row_padding(&data, width, height, bytes_per_row);
    drop(data);
    readback_buffer.unmap();

    Ok(PngRenderResult {
        rgba_data,
        width,
        height,
    })
}

/// Row pitch satisfying the wgpu copy alignment.
fn padded_bytes_per_row(width: u32) -> u32 {
    (width * 4).next_multiple_of(256)
}

/// Drop the alignment padding at the end of each row.
fn strip_row_padding(data: &[u8], width: u32, height: u32, bytes_per_row: u32) -> Vec<u8> {
    let mut rgba_data = Vec::with_capacity((width * height * 4) as usize);
    for row in 0..height {
        let row_start = (row * bytes_per_row) as usize;
        let row_end = row_start + (width * 4) as usize;
        rgba_data.extend_from_slice(&data[row_start..row_end]);
    }
    rgba_data
}

/// Encode RGBA pixel data to PNG bytes.
pub fn encode_png(rgba_data: &[u8], width: u32, height: u32) -> RenderResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| RendererError::Encode(format!("header: {:?}", e)))?;
        writer
            .write_image_data(rgba_data)
            .map_err(|e| RendererError::Encode(format!("data: {:?}", e)))?;
    }
    Ok(png_data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_bytes_per_row() {
        assert_eq!(padded_bytes_per_row(64), 256);
        assert_eq!(padded_bytes_per_row(65), 512);
        assert_eq!(padded_bytes_per_row(1), 256);
    }

    #[test]
    fn test_strip_row_padding() {
        let width = 2;
        let height = 2;
        let pitch = padded_bytes_per_row(width);
        let mut data = vec![0u8; (pitch * height) as usize];
        data[0..8].copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let second = pitch as usize;
        data[second..second + 8].copy_from_slice(&[9, 10, 11, 12, 13, 14, 15, 16]);

        let pixels = strip_row_padding(&data, width, height, pitch);
        assert_eq!(pixels, (1..=16).collect::<Vec<u8>>());
    }

    #[test]
    fn test_encode_png() {
        let pixels = vec![255u8; 3 * 2 * 4];
        let png = encode_png(&pixels, 3, 2).unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }

    #[test]
    fn test_encode_png_wrong_length() {
        let pixels = vec![0u8; 5];
        assert!(matches!(encode_png(&pixels, 3, 2), Err(RendererError::Encode(_))));
    }
}
