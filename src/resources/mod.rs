use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    data_structures::{model, texture::Texture},
    resources::texture::diffuse_layout,
};

/**
 * This module contains all logic for loading meshes and textures from files.
 */
pub mod mesh;
pub mod texture;

/// Load a Wavefront OBJ model with its MTL materials and textures.
///
/// The returned model always has at least one material: a plain white one is
/// appended and used by every mesh that names no usable material.
pub async fn load_model_obj(
    path: &Path,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<model::Model> {
    let bind_group_layout = diffuse_layout(device);
    let file_name = path.to_string_lossy();

    let (mut materials, models) =
        texture::load_textures(path, queue, device, &bind_group_layout).await?;
    let material_count = materials.len();
    let fallback = Texture::create_solid([255; 4], "fallback material", device, queue);
    materials.push(model::Material::new(
        device,
        "fallback",
        fallback,
        &bind_group_layout,
    ));

    let meshes = mesh::load_meshes(&models, &file_name, material_count, material_count, device);
    if meshes.is_empty() {
        log::warn!("{} contains no drawable meshes.", file_name);
    }
    log::info!(
        "Loaded {} with {} meshes and {} materials",
        file_name,
        meshes.len(),
        material_count
    );

    Ok(model::Model { meshes, materials })
}

/// Resolve a path found inside an asset file against the directory of that
/// file. Windows separators are accepted.
pub fn resolve_relative(base_dir: &Path, reference: &str) -> PathBuf {
    base_dir.join(reference.trim().replace('\\', "/"))
}

pub async fn load_string(path: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Could not read {}", path.display()))
}

pub async fn load_binary(path: &Path) -> anyhow::Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Could not read {}", path.display()))
}
