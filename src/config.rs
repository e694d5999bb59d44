//! Fixed viewer settings.
//!
//! Everything here is a compile-time constant. [`ViewerConfig`] only bundles
//! the constants so the flow and the tests can pass them around; its
//! [`Default`] is the configuration the binary runs with.

use std::path::PathBuf;

use cgmath::{Deg, Point3, Vector3};

pub const WINDOW_TITLE: &str = "flyview";
pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;

pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

pub const CAMERA_POSITION: [f32; 3] = [0.0, 1.0, 3.0];
pub const CAMERA_WORLD_UP: [f32; 3] = [0.0, 1.0, 0.0];
pub const CAMERA_YAW: f32 = -90.0;
pub const CAMERA_PITCH: f32 = 0.0;
pub const CAMERA_SPEED: f32 = 2.5;
pub const CAMERA_SENSITIVITY: f32 = 0.1;
pub const CAMERA_ZOOM: f32 = 45.0;

pub const ASSET_DIR: &str = "assets";
pub const MODEL_PATH: &str = "crate/crate.obj";
pub const MODEL_TRANSLATION: [f32; 3] = [0.0, -1.75, 0.0];
pub const MODEL_SCALE: f32 = 0.2;

pub const CLEAR_COLOUR: wgpu::Color = wgpu::Color {
    r: 0.2,
    g: 0.3,
    b: 0.3,
    a: 1.0,
};

/// Touchpads report scrolling in pixels, the camera expects wheel lines.
pub const SCROLL_PIXELS_PER_LINE: f32 = 20.0;

/// Initial camera state.
#[derive(Clone, Debug)]
pub struct CameraConfig {
    pub position: Point3<f32>,
    pub world_up: Vector3<f32>,
    pub yaw: Deg<f32>,
    pub pitch: Deg<f32>,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    pub zoom: Deg<f32>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: CAMERA_POSITION.into(),
            world_up: CAMERA_WORLD_UP.into(),
            yaw: Deg(CAMERA_YAW),
            pitch: Deg(CAMERA_PITCH),
            movement_speed: CAMERA_SPEED,
            mouse_sensitivity: CAMERA_SENSITIVITY,
            zoom: Deg(CAMERA_ZOOM),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub z_near: f32,
    pub z_far: f32,
    pub clear_colour: wgpu::Color,
    pub camera: CameraConfig,
    /// Root that relative model paths are resolved against.
    pub asset_dir: PathBuf,
    pub model_path: PathBuf,
    pub model_translation: Vector3<f32>,
    pub model_scale: f32,
}

impl ViewerConfig {
    /// Full path of the model file to load.
    pub fn model_file(&self) -> PathBuf {
        self.asset_dir.join(&self.model_path)
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: WINDOW_TITLE.to_string(),
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            z_near: Z_NEAR,
            z_far: Z_FAR,
            clear_colour: CLEAR_COLOUR,
            camera: CameraConfig::default(),
            asset_dir: PathBuf::from(ASSET_DIR),
            model_path: PathBuf::from(MODEL_PATH),
            model_translation: MODEL_TRANSLATION.into(),
            model_scale: MODEL_SCALE,
        }
    }
}
