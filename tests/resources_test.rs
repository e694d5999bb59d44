mod common;

use std::path::{Path, PathBuf};

use cgmath::{Vector3, Vector4};
use flyview::{
    config::{MODEL_SCALE, MODEL_TRANSLATION, ViewerConfig},
    data_structures::instance::Instance,
    resources::{
        self,
        mesh::material_index,
        texture::{colour_to_rgba8, load_obj},
    },
};

use crate::common::test_utils::assert_close;

#[test]
fn references_resolve_against_the_obj_directory() {
    let base = Path::new("assets/crate");

    assert_eq!(
        resources::resolve_relative(base, "planks.png"),
        PathBuf::from("assets/crate/planks.png")
    );
    assert_eq!(
        resources::resolve_relative(base, " textures\\lid.png\r"),
        PathBuf::from("assets/crate/textures/lid.png")
    );
}

#[test]
fn default_model_lives_under_the_asset_dir() {
    let config = ViewerConfig::default();

    assert_eq!(
        config.model_file(),
        PathBuf::from("assets/crate/crate.obj")
    );
    assert!(config.model_file().is_file());
}

#[test]
fn diffuse_colour_becomes_an_opaque_pixel() {
    assert_eq!(colour_to_rgba8([1.0, 0.5, -1.0]), [255, 128, 0, 255]);
    assert_eq!(colour_to_rgba8([0.0, 0.0, 0.0]), [0, 0, 0, 255]);
}

#[test]
fn unusable_material_ids_fall_back() {
    assert_eq!(material_index(Some(1), 3, 3), 1);
    assert_eq!(material_index(Some(3), 3, 3), 3);
    assert_eq!(material_index(Some(7), 3, 3), 3);
    assert_eq!(material_index(None, 3, 3), 3);
    assert_eq!(material_index(Some(0), 0, 0), 0);
}

#[test]
fn model_placement_translates_after_scaling() {
    let instance = Instance::placed(Vector3::from(MODEL_TRANSLATION), MODEL_SCALE);

    let corner = instance.to_matrix() * Vector4::new(1.0, 1.0, 1.0, 1.0);

    assert_close(corner.x, 0.2);
    assert_close(corner.y, -1.55);
    assert_close(corner.z, 0.2);
    assert_close(corner.w, 1.0);
}

#[tokio::test]
async fn missing_files_report_their_path() {
    let path = Path::new("does/not/exist.mtl");

    let err = resources::load_string(path)
        .await
        .expect_err("reading a missing file should fail");

    assert!(format!("{err:#}").contains("does/not/exist.mtl"));
}

#[tokio::test]
async fn bundled_model_parses_with_its_materials() {
    let (models, materials) = load_obj(&ViewerConfig::default().model_file())
        .await
        .expect("the bundled model should parse");

    assert!(!models.is_empty());
    assert!(models.iter().all(|m| !m.mesh.indices.is_empty()));
    // six quads, two triangles each
    let triangles: usize = models.iter().map(|m| m.mesh.indices.len() / 3).sum();
    assert_eq!(triangles, 12);

    let names: Vec<_> = materials.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["timber", "steel"]);
    assert!(materials.iter().all(|m| m.diffuse.is_some() && m.diffuse_texture.is_none()));
    assert!(
        models
            .iter()
            .all(|m| material_index(m.mesh.material_id, materials.len(), materials.len())
                < materials.len())
    );
}

#[tokio::test]
async fn missing_mtl_leaves_no_materials() {
    let dir = std::env::temp_dir().join("flyview_missing_mtl");
    tokio::fs::create_dir_all(&dir).await.unwrap();
    let obj = dir.join("lonely.obj");
    tokio::fs::write(&obj, "mtllib nowhere.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n")
        .await
        .unwrap();

    let (models, materials) = load_obj(&obj).await.expect("a missing MTL is not fatal");

    assert_eq!(models.len(), 1);
    assert!(materials.is_empty());
    assert_eq!(material_index(models[0].mesh.material_id, 0, 0), 0);
}
