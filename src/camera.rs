//! Fly camera, projection and the GPU-side camera uniform.
//!
//! [`Camera`] keeps an orthonormal `front`/`right`/`up` basis derived from its
//! yaw and pitch. All fields that take part in that basis are private so the
//! basis can never go stale: every mutation of the angles goes through
//! [`Camera::process_mouse_movement`] which re-derives it.
//!
//! Handedness: `right = front x world_up` with a right-handed cross product.
//! Looking down +X (yaw 0, pitch 0) with +Y up, `right` is +Z.

use std::time::Duration;

use cgmath::{Deg, InnerSpace, Matrix4, Point3, Rad, Vector3};
use wgpu::util::DeviceExt;

use crate::config::CameraConfig;

/// Pitch is kept strictly away from the poles where `front` would become
/// parallel to `world_up`.
pub const MAX_PITCH: f32 = 89.0;
pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 45.0;

/// wgpu clip space has z in [0, 1] while `cgmath::perspective` targets the
/// OpenGL range [-1, 1].
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl CameraMovement {
    pub const ALL: [CameraMovement; 6] = [
        CameraMovement::Forward,
        CameraMovement::Backward,
        CameraMovement::Left,
        CameraMovement::Right,
        CameraMovement::Up,
        CameraMovement::Down,
    ];
}

#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Point3<f32>,
    front: Vector3<f32>,
    up: Vector3<f32>,
    right: Vector3<f32>,
    world_up: Vector3<f32>,
    yaw: Deg<f32>,
    pitch: Deg<f32>,
    /// World units per second.
    pub movement_speed: f32,
    /// Degrees per pixel of mouse movement.
    pub mouse_sensitivity: f32,
    zoom: Deg<f32>,
}

impl Camera {
    /// Create a camera at `position` looking along the direction given by
    /// `yaw` and `pitch`. Out-of-range pitch and zoom are clamped.
    pub fn new<V: Into<Point3<f32>>>(position: V, yaw: Deg<f32>, pitch: Deg<f32>) -> Self {
        Self::from_config(&CameraConfig {
            position: position.into(),
            yaw,
            pitch,
            ..Default::default()
        })
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self {
            position: config.position,
            front: -Vector3::unit_z(),
            up: Vector3::unit_y(),
            right: Vector3::unit_x(),
            world_up: config.world_up.normalize(),
            yaw: config.yaw,
            pitch: clamp_pitch(config.pitch),
            movement_speed: config.movement_speed,
            mouse_sensitivity: config.mouse_sensitivity,
            zoom: clamp_zoom(config.zoom),
        };
        camera.update_camera_vectors();
        camera
    }

    pub fn front(&self) -> Vector3<f32> {
        self.front
    }

    pub fn right(&self) -> Vector3<f32> {
        self.right
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn world_up(&self) -> Vector3<f32> {
        self.world_up
    }

    pub fn yaw(&self) -> Deg<f32> {
        self.yaw
    }

    pub fn pitch(&self) -> Deg<f32> {
        self.pitch
    }

    /// Vertical field of view.
    pub fn zoom(&self) -> Deg<f32> {
        self.zoom
    }

    /// Translate along the camera basis. Orientation is left untouched.
    ///
    /// Taking a [`Duration`] rules out the negative frame times that would
    /// flip the direction of travel.
    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_time: Duration) {
        let velocity = self.movement_speed * delta_time.as_secs_f32();
        let offset = match direction {
            CameraMovement::Forward => self.front,
            CameraMovement::Backward => -self.front,
            CameraMovement::Left => -self.right,
            CameraMovement::Right => self.right,
            CameraMovement::Up => self.world_up,
            CameraMovement::Down => -self.world_up,
        };
        self.position += offset * velocity;
    }

    /// Turn the camera by a mouse offset in pixels. Positive `y_offset` looks
    /// up. Yaw is left unbounded.
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += Deg(x_offset * self.mouse_sensitivity);
        self.pitch = clamp_pitch(self.pitch + Deg(y_offset * self.mouse_sensitivity));
        self.update_camera_vectors();
    }

    /// Scrolling up narrows the field of view.
    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        self.zoom = clamp_zoom(self.zoom - Deg(y_offset));
    }

    pub fn get_view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    // front -> right -> up; `up` depends on the freshly computed `right`.
    fn update_camera_vectors(&mut self) {
        let (sin_yaw, cos_yaw) = Rad::from(self.yaw).0.sin_cos();
        let (sin_pitch, cos_pitch) = Rad::from(self.pitch).0.sin_cos();
        self.front = Vector3::new(cos_yaw * cos_pitch, sin_pitch, sin_yaw * cos_pitch).normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

fn clamp_pitch(pitch: Deg<f32>) -> Deg<f32> {
    Deg(pitch.0.clamp(-MAX_PITCH, MAX_PITCH))
}

fn clamp_zoom(zoom: Deg<f32>) -> Deg<f32> {
    Deg(zoom.0.clamp(MIN_ZOOM, MAX_ZOOM))
}

/// Perspective parameters that do not depend on the camera.
#[derive(Clone, Debug)]
pub struct Projection {
    aspect: f32,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: aspect_ratio(width, height),
            znear,
            zfar,
        }
    }

    /// Zero-sized surfaces (minimised windows) keep the previous aspect.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = aspect_ratio(width, height);
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// OpenGL-convention perspective matrix for the given vertical field of
    /// view. The renderer applies [`OPENGL_TO_WGPU_MATRIX`] on upload.
    pub fn calc_matrix(&self, fovy: Deg<f32>) -> Matrix4<f32> {
        cgmath::perspective(fovy, self.aspect, self.znear, self.zfar)
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

/// Camera data as laid out in `model.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_position: [f32; 4],
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_position: [0.0; 4],
            view: Matrix4::identity().into(),
            projection: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(
        &mut self,
        position: Point3<f32>,
        view: Matrix4<f32>,
        projection: Matrix4<f32>,
    ) {
        self.view_position = position.to_homogeneous().into();
        self.view = view.into();
        self.projection = (OPENGL_TO_WGPU_MATRIX * projection).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// GPU resources backing the camera uniform.
#[derive(Debug)]
pub struct CameraResources {
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl CameraResources {
    pub fn new(device: &wgpu::Device) -> Self {
        let uniform = CameraUniform::new();

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("camera_bind_group_layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        Self {
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    /// Upload the matrices of the current frame.
    pub fn write(
        &mut self,
        queue: &wgpu::Queue,
        position: Point3<f32>,
        view: Matrix4<f32>,
        projection: Matrix4<f32>,
    ) {
        self.uniform.update_view_proj(position, view, projection);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}
