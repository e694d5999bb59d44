use wgpu::util::DeviceExt;

use crate::data_structures::model;

/**
 * Upload the meshes of an OBJ file.
 *
 * Meshes without indices are skipped. A mesh whose material id is missing or
 * points past the loaded materials is drawn with `fallback_material`.
 */
pub fn load_meshes(
    models: &[tobj::Model],
    file_name: &str,
    material_count: usize,
    fallback_material: usize,
    device: &wgpu::Device,
) -> Vec<model::Mesh> {
    models
        .iter()
        .filter_map(|m| {
            if m.mesh.indices.is_empty() {
                log::warn!("Mesh {:?} in {} has no faces and is skipped.", m.name, file_name);
                return None;
            }

            let vertices = (0..m.mesh.positions.len() / 3)
                .map(|i| model::ModelVertex {
                    position: [
                        m.mesh.positions[i * 3],
                        m.mesh.positions[i * 3 + 1],
                        m.mesh.positions[i * 3 + 2],
                    ],
                    // OBJ puts v = 0 at the bottom of the image, wgpu at the top
                    tex_coords: [
                        m.mesh.texcoords.get(i * 2).map_or(0.0, |f| *f),
                        1.0 - m.mesh.texcoords.get(i * 2 + 1).map_or(0.0, |f| *f),
                    ],
                })
                .collect::<Vec<_>>();

            let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{:?} Vertex Buffer", m.name)),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

            let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{:?} Index Buffer", m.name)),
                // `single_index` makes one index address position and texcoord alike
                contents: bytemuck::cast_slice(&m.mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

            Some(model::Mesh {
                name: m.name.clone(),
                vertex_buffer,
                index_buffer,
                num_elements: m.mesh.indices.len() as u32,
                material: material_index(m.mesh.material_id, material_count, fallback_material),
            })
        })
        .collect()
}

/// Material slot a mesh is drawn with.
pub fn material_index(material_id: Option<usize>, material_count: usize, fallback: usize) -> usize {
    material_id
        .filter(|id| *id < material_count)
        .unwrap_or(fallback)
}
