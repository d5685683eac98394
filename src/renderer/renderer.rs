use crate::app::AppResult;
use crate::platform::SurfaceProvider;
use crate::renderer::batch::BatchRenderer;
use crate::renderer::camera::{CameraBinding, CanvasCamera};
use crate::renderer::scene::{Primitive, SceneGeometry};
use winit::dpi::PhysicalSize;

/// Owns the surface and the two scene batches; draws one frame per call.
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    camera: CanvasCamera,
    camera_binding: CameraBinding,
    lines: BatchRenderer,
    triangles: BatchRenderer,
}

impl Renderer {
    pub async fn new<T: SurfaceProvider>(target: &T, canvas_width: f32, canvas_height: f32) -> AppResult<Self> {
        // wasm에서는 WebGL 백엔드만 사용, 네이티브는 모든 백엔드 허용
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: if cfg!(target_arch = "wasm32") {
                wgpu::Backends::GL
            } else {
                wgpu::Backends::all()
            },
            ..Default::default()
        });

        let (surface, size) = target.create_surface(&instance)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .ok_or("Failed to find an appropriate adapter")?;

        // WebGL2 limits everywhere so native and web run the same device setup.
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Scattering Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits()),
                },
                None,
            )
            .await?;

        let config = surface_config(&surface.get_capabilities(&adapter), size)?;
        surface.configure(&device, &config);

        let camera = CanvasCamera::new(canvas_width, canvas_height);
        let camera_binding = CameraBinding::new(&device, &camera);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/scene.wgsl").into()),
        });
        let batch = |topology, label| {
            BatchRenderer::new(&device, config.format, camera_binding.layout(), &shader, topology, label)
        };
        let lines = batch(wgpu::PrimitiveTopology::LineList, "Line Batch");
        let triangles = batch(wgpu::PrimitiveTopology::TriangleList, "Triangle Batch");

        log::info!(
            "renderer created: {:?} via {:?}, {}x{} {:?}",
            adapter.get_info().name,
            adapter.get_info().backend,
            config.width,
            config.height,
            config.format
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            camera,
            camera_binding,
            lines,
            triangles,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn surface_config(&self) -> &wgpu::SurfaceConfiguration {
        &self.config
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, scene: &SceneGeometry) -> Result<(), wgpu::SurfaceError> {
        self.render_with_ui(scene, |_, _, _, _| {})
    }

    /// Draws the scene, then lets `paint_ui` record an overlay pass into the same encoder.
    pub fn render_with_ui<F>(&mut self, scene: &SceneGeometry, paint_ui: F) -> Result<(), wgpu::SurfaceError>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        self.lines.write_vertices(&self.device, &self.queue, &scene.lines);
        self.triangles.write_vertices(&self.device, &self.queue, &scene.triangles);
        self.camera_binding.update(&self.queue, &self.camera);

        let frame = self.surface.get_current_texture()?;
        let target = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Scene Encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            for (primitive, vertices) in scene.draw_order() {
                let batch = match primitive {
                    Primitive::Lines => &self.lines,
                    Primitive::Triangles => &self.triangles,
                };
                batch.draw(&mut pass, self.camera_binding.bind_group(), vertices);
            }
        }

        paint_ui(&self.device, &self.queue, &mut encoder, &target);

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn surface_config(caps: &wgpu::SurfaceCapabilities, size: PhysicalSize<u32>) -> AppResult<wgpu::SurfaceConfiguration> {
    let format = caps
        .formats
        .iter()
        .copied()
        .find(wgpu::TextureFormat::is_srgb)
        .or_else(|| caps.formats.first().copied())
        .ok_or("Surface reports no supported formats")?;

    Ok(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode: wgpu::PresentMode::Fifo,
        alpha_mode: caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    })
}
