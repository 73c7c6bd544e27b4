use bytemuck::{Pod, Zeroable};
use scene_core::{toon_ramp, SceneGraph, SceneState, POINTS_WGSL, TOON_WGSL};
use web_sys as web;
use wgpu::util::DeviceExt;

mod helpers;
mod mesh;
mod targets;

use mesh::{GpuMesh, MESH_VERTEX_LAYOUT};
use targets::DepthTarget;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub(crate) struct ToonCameraUniform {
    view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub(crate) struct MaterialUniform {
    color: [f32; 4],
    light: [f32; 4],
    light_color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub(crate) struct PointsCameraUniform {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub(crate) struct PointsMaterialUniform {
    color: [f32; 4],
}

const POINT_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

const GRADIENT_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    view_format: wgpu::TextureFormat,
    depth: DepthTarget,

    // Toon meshes
    toon_pipeline: wgpu::RenderPipeline,
    toon_bgl0: wgpu::BindGroupLayout,
    toon_bind_group: wgpu::BindGroup,
    camera_buffer: wgpu::Buffer,
    material_buffer: wgpu::Buffer,
    _gradient_tex: wgpu::Texture,
    gradient_view: wgpu::TextureView,
    gradient_sampler: wgpu::Sampler,
    meshes: Vec<GpuMesh>,

    // Particle field
    points_pipeline: wgpu::RenderPipeline,
    points_bind_group: wgpu::BindGroup,
    points_camera_buffer: wgpu::Buffer,
    points_material_buffer: wgpu::Buffer,
    points_buffer: wgpu::Buffer,
    points_count: u32,

    clear_color: wgpu::Color,
    width: u32,
    height: u32,
}

impl GpuState {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        scene: &SceneGraph,
        width: u32,
        height: u32,
    ) -> anyhow::Result<Self> {
        let (width, height) = (width.max(1), height.max(1));
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // Canvas surfaces are usually non-sRGB; render through an sRGB view instead.
        let view_format = format.add_srgb_suffix();
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
            .or_else(|| caps.alpha_modes.first().copied())
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: if view_format != format {
                vec![view_format]
            } else {
                vec![]
            },
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth = DepthTarget::new(&device, width, height);

        // ---------------- Toon pipeline ----------------
        let toon_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("toon_shader"),
            source: wgpu::ShaderSource::Wgsl(TOON_WGSL.into()),
        });
        let toon_bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("toon_bgl0"),
            entries: &[
                helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX),
                helpers::uniform_entry(1, wgpu::ShaderStages::FRAGMENT),
                wgpu::BindGroupLayoutEntry {
                    // gradient ramp
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let model_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("toon_model_bgl"),
            entries: &[helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX)],
        });
        let toon_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("toon_pl"),
            bind_group_layouts: &[&toon_bgl0, &model_bgl],
            push_constant_ranges: &[],
        });
        let toon_pipeline = helpers::make_scene_pipeline(
            &device,
            "toon_pipeline",
            &toon_pl,
            &toon_shader,
            &[MESH_VERTEX_LAYOUT],
            view_format,
        );
        let camera_buffer = helpers::uniform_buffer::<ToonCameraUniform>(&device, "toon_camera");
        let material_buffer = helpers::uniform_buffer::<MaterialUniform>(&device, "toon_material");

        let ramp = toon_ramp(scene.material.gradient_steps);
        let ramp_width = (ramp.len() / 4) as u32;
        let (gradient_tex, gradient_view) = helpers::create_texture_2d(
            &device,
            "gradient_ramp",
            ramp_width,
            1,
            GRADIENT_FORMAT,
            wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        );
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &gradient_tex,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &ramp,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(ramp_width * 4),
                rows_per_image: Some(1),
            },
            wgpu::Extent3d {
                width: ramp_width,
                height: 1,
                depth_or_array_layers: 1,
            },
        );
        let gradient_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("gradient_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let toon_bind_group = create_toon_bind_group(
            &device,
            &toon_bgl0,
            &camera_buffer,
            &material_buffer,
            &gradient_view,
            &gradient_sampler,
        );
        let meshes = scene
            .meshes
            .iter()
            .map(|m| GpuMesh::upload(&device, &model_bgl, m.kind.label(), &m.data))
            .collect();

        // ---------------- Points pipeline ----------------
        let points_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("points_shader"),
            source: wgpu::ShaderSource::Wgsl(POINTS_WGSL.into()),
        });
        let points_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("points_bgl"),
            entries: &[
                helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX),
                helpers::uniform_entry(1, wgpu::ShaderStages::FRAGMENT),
            ],
        });
        let points_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("points_pl"),
            bind_group_layouts: &[&points_bgl],
            push_constant_ranges: &[],
        });
        let points_pipeline = helpers::make_scene_pipeline(
            &device,
            "points_pipeline",
            &points_pl,
            &points_shader,
            &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 3]>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &POINT_ATTRIBUTES,
            }],
            view_format,
        );
        let points_camera_buffer =
            helpers::uniform_buffer::<PointsCameraUniform>(&device, "points_camera");
        let points_material_buffer =
            helpers::uniform_buffer::<PointsMaterialUniform>(&device, "points_material");
        let points_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("points_bg"),
            layout: &points_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: points_camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: points_material_buffer.as_entire_binding(),
                },
            ],
        });
        let positions: Vec<[f32; 3]> = scene
            .particles
            .positions
            .iter()
            .map(|p| p.to_array())
            .collect();
        let points_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("particles"),
            contents: bytemuck::cast_slice(&positions),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let state = Self {
            surface,
            device,
            queue,
            config,
            view_format,
            depth,
            toon_pipeline,
            toon_bgl0,
            toon_bind_group,
            camera_buffer,
            material_buffer,
            _gradient_tex: gradient_tex,
            gradient_view,
            gradient_sampler,
            meshes,
            points_pipeline,
            points_bind_group,
            points_camera_buffer,
            points_material_buffer,
            points_buffer,
            points_count: positions.len() as u32,
            // Transparent so the page background shows through.
            clear_color: wgpu::Color::TRANSPARENT,
            width,
            height,
        };
        state.write_materials(scene);
        log::info!(
            "[gpu] surface {}x{} format={:?} view={:?} alpha={:?}",
            width,
            height,
            state.config.format,
            view_format,
            state.config.alpha_mode
        );
        Ok(state)
    }

    /// Replace the procedural ramp with a decoded gradient image.
    pub fn set_gradient_bitmap(&mut self, bitmap: &web::ImageBitmap) {
        let size = wgpu::Extent3d {
            width: bitmap.width().max(1),
            height: bitmap.height().max(1),
            depth_or_array_layers: 1,
        };
        let (tex, view) = helpers::create_texture_2d(
            &self.device,
            "gradient_image",
            size.width,
            size.height,
            GRADIENT_FORMAT,
            wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST
                | wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        self.queue.copy_external_image_to_texture(
            &wgpu::CopyExternalImageSourceInfo {
                source: wgpu::ExternalImageSource::ImageBitmap(bitmap.clone()),
                origin: wgpu::Origin2d::ZERO,
                flip_y: false,
            },
            wgpu::CopyExternalImageDestInfo {
                texture: &tex,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
                color_space: wgpu::PredefinedColorSpace::Srgb,
                premultiplied_alpha: false,
            },
            size,
        );
        self._gradient_tex = tex;
        self.gradient_view = view;
        self.toon_bind_group = create_toon_bind_group(
            &self.device,
            &self.toon_bgl0,
            &self.camera_buffer,
            &self.material_buffer,
            &self.gradient_view,
            &self.gradient_sampler,
        );
        log::info!("[gpu] gradient image {}x{}", size.width, size.height);
    }

    /// Upload material and particle colours plus light parameters.
    pub fn write_materials(&self, scene: &SceneGraph) {
        let [r, g, b] = scene.material.color.to_linear();
        let dir = scene.light.direction();
        let [lr, lg, lb] = scene.light.color.to_linear();
        let m = MaterialUniform {
            color: [r, g, b, 1.0],
            light: [dir.x, dir.y, dir.z, scene.light.intensity],
            light_color: [lr, lg, lb, 1.0],
        };
        self.queue
            .write_buffer(&self.material_buffer, 0, bytemuck::bytes_of(&m));
        let [pr, pg, pb] = scene.particle_material.color.to_linear();
        let p = PointsMaterialUniform {
            color: [pr, pg, pb, 1.0],
        };
        self.queue
            .write_buffer(&self.points_material_buffer, 0, bytemuck::bytes_of(&p));
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth.recreate(&self.device, width, height);
        }
    }

    /// Reconfigure after the surface reports lost or outdated.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, state: &SceneState) -> Result<(), wgpu::SurfaceError> {
        let rig = state.rig();
        let cam = ToonCameraUniform {
            view_proj: rig.view_projection().to_cols_array_2d(),
        };
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&cam));
        let points = &state.scene.particle_material;
        let points_cam = PointsCameraUniform {
            view: rig.view_matrix().to_cols_array_2d(),
            proj: rig.projection_matrix().to_cols_array_2d(),
            params: [
                points.size,
                points.attenuation_scale(state.viewport.height),
                self.width as f32,
                self.height as f32,
            ],
        };
        self.queue
            .write_buffer(&self.points_camera_buffer, 0, bytemuck::bytes_of(&points_cam));
        for (gpu_mesh, mesh) in self.meshes.iter().zip(&state.scene.meshes) {
            gpu_mesh.write_transform(&self.queue, mesh);
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.view_format),
            ..Default::default()
        });
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.toon_pipeline);
            rpass.set_bind_group(0, &self.toon_bind_group, &[]);
            for mesh in &self.meshes {
                mesh.draw(&mut rpass);
            }
            if self.points_count > 0 {
                rpass.set_pipeline(&self.points_pipeline);
                rpass.set_bind_group(0, &self.points_bind_group, &[]);
                rpass.set_vertex_buffer(0, self.points_buffer.slice(..));
                rpass.draw(0..6, 0..self.points_count);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn create_toon_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    camera_buffer: &wgpu::Buffer,
    material_buffer: &wgpu::Buffer,
    gradient_view: &wgpu::TextureView,
    gradient_sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("toon_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: material_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::TextureView(gradient_view),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::Sampler(gradient_sampler),
            },
        ],
    })
}
