//! The drawable the viewer shows: a model plus its instance buffer.

use wgpu::util::DeviceExt;

use crate::data_structures::{
    instance::Instance,
    model::{DrawModel, Model},
};

/// A model drawn once per entry of `instances`.
#[derive(Debug)]
pub struct Instanced {
    pub model: Model,
    pub instances: Vec<Instance>,
    pub instance_buffer: wgpu::Buffer,
}

impl Instanced {
    pub fn new(device: &wgpu::Device, model: Model, instances: Vec<Instance>) -> Self {
        let instance_data = instances.iter().map(Instance::to_raw).collect::<Vec<_>>();
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Instance Buffer"),
            contents: bytemuck::cast_slice(&instance_data),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            model,
            instances,
            instance_buffer,
        }
    }

    /// Record the draw calls. The caller sets the pipeline.
    pub fn draw<'pass>(
        &'pass self,
        render_pass: &mut wgpu::RenderPass<'pass>,
        camera_bind_group: &'pass wgpu::BindGroup,
    ) {
        if self.instances.is_empty() {
            log::warn!("Skipping a model with zero instances");
            return;
        }
        render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        render_pass.draw_model_instanced(
            &self.model,
            0..self.instances.len() as u32,
            camera_bind_group,
        );
    }
}
