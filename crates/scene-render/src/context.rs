use crate::helpers;
use scene_core::{SceneError, Viewport};

/// Device, queue and a configured presentation surface.
///
/// Acquiring these is the only async part of renderer setup, so it is split
/// out: front-ends await `GpuContext::new` and then hand the context to the
/// animator's surface factory, which builds a [`crate::GpuState`]
/// synchronously.
pub struct GpuContext<'w> {
    pub(crate) surface: wgpu::Surface<'w>,
    pub(crate) device: wgpu::Device,
    pub(crate) queue: wgpu::Queue,
    pub(crate) config: wgpu::SurfaceConfiguration,
}

impl<'w> GpuContext<'w> {
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'w>,
        viewport: Viewport,
    ) -> Result<Self, SceneError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                // decorative scenes; leave the discrete GPU alone
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| SceneError::SurfaceUnavailable("no WebGPU adapter".into()))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("scene_device"),
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::MemoryUsage,
                },
                None,
            )
            .await
            .map_err(|e| SceneError::SurfaceUnavailable(format!("request_device error: {e}")))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| SceneError::SurfaceUnavailable("surface reports no formats".into()))?;
        // The page shows through the clear color, so prefer a compositor that
        // honors alpha.
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let (width, height) = helpers::clamp_extent(
            viewport.width,
            viewport.height,
            device.limits().max_texture_dimension_2d,
        );
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "[gpu] surface {:?} {}x{} alpha={:?}",
            format,
            config.width,
            config.height,
            alpha_mode
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
        })
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Largest surface the device accepts for the requested size.
    pub(crate) fn fit_size(&self, width: u32, height: u32) -> (u32, u32) {
        helpers::clamp_extent(width, height, self.device.limits().max_texture_dimension_2d)
    }

    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width;
        self.config.height = height;
        self.reconfigure();
    }

    pub(crate) fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }
}
