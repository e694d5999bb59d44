use std::{
    io::{BufReader, Cursor},
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    data_structures::{model, texture},
    resources::{load_binary, load_string, resolve_relative},
};

pub fn diffuse_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
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
        label: Some("Model texture_bind_group_layout"),
    })
}

pub async fn load_texture(
    path: &Path,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<texture::Texture> {
    let data = load_binary(path).await?;
    let label = path.to_string_lossy();
    let extension = path.extension().and_then(|ext| ext.to_str());
    texture::Texture::from_bytes(device, queue, &data, &label, extension)
}

/// Parse the OBJ at `path` together with its MTL entries.
///
/// MTL files are looked up next to the OBJ. A missing MTL is not fatal: the
/// material list comes back empty and every mesh ends up on the fallback.
pub async fn load_obj(path: &Path) -> anyhow::Result<(Vec<tobj::Model>, Vec<tobj::Material>)> {
    let base_dir = obj_dir(path);
    let obj_text = load_string(path).await?;
    let obj_cursor = Cursor::new(obj_text);
    let mut obj_reader = BufReader::new(obj_cursor);

    let (models, obj_materials) = tobj::load_obj_buf_async(
        &mut obj_reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |p| {
            let mtl_path = resolve_relative(&base_dir, &p);
            async move {
                let mat_text = load_string(&mtl_path).await.map_err(|e| {
                    log::warn!("{e:#}");
                    tobj::LoadError::OpenFileFailed
                })?;
                tobj::load_mtl_buf(&mut BufReader::new(Cursor::new(mat_text)))
            }
        },
    )
    .await
    .with_context(|| format!("Could not parse {}", path.display()))?;

    let obj_materials = obj_materials.unwrap_or_else(|e| {
        log::warn!("Materials of {} could not be loaded: {}", path.display(), e);
        Vec::new()
    });
    Ok((models, obj_materials))
}

/// Build one material per MTL entry of the OBJ at `path`; textures are
/// resolved against the OBJ's directory.
pub async fn load_textures(
    path: &Path,
    queue: &wgpu::Queue,
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
) -> anyhow::Result<(Vec<model::Material>, Vec<tobj::Model>)> {
    let base_dir = obj_dir(path);
    let (models, obj_materials) = load_obj(path).await?;

    let mut materials = Vec::with_capacity(obj_materials.len());
    for m in obj_materials {
        let diffuse_texture = match &m.diffuse_texture {
            Some(diffuse_texture) => {
                load_texture(&resolve_relative(&base_dir, diffuse_texture), device, queue).await?
            }
            None => {
                log::warn!(
                    "Material {} of {} references no texture, using its diffuse colour.",
                    m.name,
                    path.display()
                );
                texture::Texture::create_solid(
                    colour_to_rgba8(m.diffuse.unwrap_or([1.0; 3])),
                    &m.name,
                    device,
                    queue,
                )
            }
        };
        materials.push(model::Material::new(device, &m.name, diffuse_texture, layout));
    }
    Ok((materials, models))
}

pub fn colour_to_rgba8(colour: [f32; 3]) -> [u8; 4] {
    let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    [to_u8(colour[0]), to_u8(colour[1]), to_u8(colour[2]), 255]
}

fn obj_dir(path: &Path) -> PathBuf {
    path.parent().unwrap_or_else(|| Path::new("")).to_path_buf()
}
