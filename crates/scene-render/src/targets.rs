use super::helpers;
use crate::DEPTH_FORMAT;

/// Multisampled attachments for the scene pass.
///
/// - `color_*` is resolved into the swapchain image every frame.
/// - `depth_*` keeps solid geometry ordered; additive particles test
///   against it without writing.
pub(crate) struct RenderTargets {
    pub(crate) color_tex: wgpu::Texture,
    pub(crate) color_view: wgpu::TextureView,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
}

impl RenderTargets {
    pub(crate) fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let (color_tex, color_view) =
            helpers::create_render_texture(device, "msaa_color", width, height, format);
        let (depth_tex, depth_view) =
            helpers::create_render_texture(device, "msaa_depth", width, height, DEPTH_FORMAT);
        Self {
            color_tex,
            color_view,
            depth_tex,
            depth_view,
            format,
            width,
            height,
        }
    }

    /// Reallocate at a new size. Returns false (and allocates nothing) when
    /// the size is unchanged.
    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) -> bool {
        if width == self.width && height == self.height {
            return false;
        }
        self.destroy();
        *self = Self::new(device, self.format, width, height);
        true
    }

    pub(crate) fn destroy(&self) {
        self.color_tex.destroy();
        self.depth_tex.destroy();
    }
}
