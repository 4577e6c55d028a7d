//! wgpu implementation of [`RenderBackend`].
//!
//! Owns textures, bind groups, and vertex/index buffers; the host owns
//! the render pass and drains [`WgpuBackend::draws`] into it each frame
//! with the pipeline it built from [`WgpuBackend::vertex_layout`] and
//! [`WgpuBackend::bind_group_layout`].

use std::collections::HashMap;
use std::sync::Arc;

use wgpu::util::DeviceExt;

use glint_proto::Rect;

use crate::backend::{MaterialId, MeshId, RenderBackend, TextureFilter, TextureId};
use crate::vertex::Vertex;

/// One draw queued for the host's render pass.
#[derive(Clone, Copy, Debug)]
pub struct DrawSubmission {
    /// Mesh to bind and draw.
    pub mesh: MeshId,
    /// Material whose bind group to set.
    pub material: MaterialId,
}

struct GpuTexture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    filter: TextureFilter,
}

struct GpuMaterial {
    texture: TextureId,
    bind_group: wgpu::BindGroup,
}

#[derive(Default)]
struct GpuMesh {
    vertices: Option<wgpu::Buffer>,
    indices: Option<wgpu::Buffer>,
    index_count: u32,
    bounds: Rect,
}

/// GPU-backed resource store for GUI painting.
pub struct WgpuBackend {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    bind_group_layout: wgpu::BindGroupLayout,
    bilinear_sampler: wgpu::Sampler,
    point_sampler: wgpu::Sampler,
    next_id: u64,
    textures: HashMap<u64, GpuTexture>,
    materials: HashMap<u64, GpuMaterial>,
    meshes: HashMap<u64, GpuMesh>,
    draws: Vec<DrawSubmission>,
}

impl WgpuBackend {
    /// Builds the backend on an existing device and queue.
    #[must_use]
    pub fn new(device: Arc<wgpu::Device>, queue: Arc<wgpu::Queue>) -> Self {
        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("gui texture bind group layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });
        let bilinear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("gui bilinear sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let point_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("gui point sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        Self {
            device,
            queue,
            bind_group_layout,
            bilinear_sampler,
            point_sampler,
            next_id: 0,
            textures: HashMap::new(),
            materials: HashMap::new(),
            meshes: HashMap::new(),
            draws: Vec::new(),
        }
    }

    /// Vertex buffer layout matching [`Vertex`], for the host's pipeline.
    #[must_use]
    pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
            0 => Float32x2,
            1 => Unorm8x4,
            2 => Float32x2,
        ];
        wgpu::VertexBufferLayout {
            array_stride: Vertex::SIZE as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBS,
        }
    }

    /// Layout the per-material bind groups are created against.
    #[must_use]
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    /// Draws queued since `begin_frame`, in submission order.
    #[must_use]
    pub fn draws(&self) -> &[DrawSubmission] {
        &self.draws
    }

    /// Binds a queued draw's buffers into the host's render pass.
    ///
    /// Returns `false` if the mesh has no uploaded data or either handle
    /// is stale.
    pub fn bind_draw<'pass>(
        &'pass self,
        pass: &mut wgpu::RenderPass<'pass>,
        draw: DrawSubmission,
    ) -> bool {
        let (Some(mesh), Some(material)) = (
            self.meshes.get(&draw.mesh.0),
            self.materials.get(&draw.material.0),
        ) else {
            return false;
        };
        let (Some(vertices), Some(indices)) = (&mesh.vertices, &mesh.indices) else {
            return false;
        };
        pass.set_bind_group(0, &material.bind_group, &[]);
        pass.set_vertex_buffer(0, vertices.slice(..));
        pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..mesh.index_count, 0, 0..1);
        true
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn sampler(&self, filter: TextureFilter) -> &wgpu::Sampler {
        match filter {
            TextureFilter::Bilinear => &self.bilinear_sampler,
            TextureFilter::Point => &self.point_sampler,
        }
    }

    fn make_bind_group(&self, texture: &GpuTexture) -> wgpu::BindGroup {
        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("gui material"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(self.sampler(texture.filter)),
                },
            ],
        })
    }
}

impl RenderBackend for WgpuBackend {
    fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        filter: TextureFilter,
        pixels: &[u8],
    ) -> TextureId {
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("gui texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let id = self.next_id();
        self.textures.insert(
            id,
            GpuTexture {
                texture,
                view,
                filter,
            },
        );
        TextureId(id)
    }

    fn write_texture(
        &mut self,
        texture: TextureId,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) {
        let Some(entry) = self.textures.get(&texture.0) else {
            return;
        };
        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &entry.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
    }

    fn destroy_texture(&mut self, texture: TextureId) {
        if let Some(entry) = self.textures.remove(&texture.0) {
            entry.texture.destroy();
        }
    }

    fn create_material(&mut self, texture: TextureId) -> MaterialId {
        let bind_group = match self.textures.get(&texture.0) {
            Some(entry) => self.make_bind_group(entry),
            None => {
                tracing::error!(texture = texture.0, "material for unknown texture");
                // Mint the handle anyway so id allocation stays uniform.
                // The entry is unbound until a rebind supplies a live
                // texture; until then bind_draw skips its draws.
                let id = self.next_id();
                return MaterialId(id);
            }
        };
        let id = self.next_id();
        self.materials.insert(
            id,
            GpuMaterial {
                texture,
                bind_group,
            },
        );
        MaterialId(id)
    }

    fn rebind_material(&mut self, material: MaterialId, texture: TextureId) {
        let Some(tex) = self.textures.get(&texture.0) else {
            tracing::error!(texture = texture.0, "rebind to unknown texture");
            return;
        };
        let bind_group = self.make_bind_group(tex);
        self.materials.insert(
            material.0,
            GpuMaterial {
                texture,
                bind_group,
            },
        );
    }

    fn destroy_material(&mut self, material: MaterialId) {
        self.materials.remove(&material.0);
    }

    fn create_mesh(&mut self) -> MeshId {
        let id = self.next_id();
        self.meshes.insert(id, GpuMesh::default());
        MeshId(id)
    }

    fn upload_mesh(&mut self, mesh: MeshId, vertices: &[Vertex], indices: &[u32], bounds: Rect) {
        let Some(entry) = self.meshes.get_mut(&mesh.0) else {
            return;
        };
        entry.vertices = Some(self.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("gui vertex buffer"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        ));
        entry.indices = Some(self.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("gui index buffer"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        ));
        entry.index_count = indices.len() as u32;
        entry.bounds = bounds;
    }

    fn destroy_mesh(&mut self, mesh: MeshId) {
        self.meshes.remove(&mesh.0);
    }

    fn submit_mesh(&mut self, mesh: MeshId, material: MaterialId) {
        self.draws.push(DrawSubmission { mesh, material });
    }

    fn begin_frame(&mut self) {
        self.draws.clear();
    }

    fn end_frame(&mut self) {}

    fn reclaim_unused(&mut self) {
        // Buffer and bind group memory is released when the handles drop;
        // nothing to do beyond what destroy_* already did.
    }
}
