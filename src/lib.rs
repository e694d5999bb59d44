//! flyview
//!
//! A minimal interactive model viewer: it opens a window, loads a textured
//! Wavefront OBJ model and lets the user fly a camera around it with the
//! keyboard and mouse.
//!
//! The camera math and the per-frame update are plain data and can be driven
//! without a window; everything GPU- or window-related sits behind them.
//!
//! High-level modules
//! - `camera`: fly camera, projection and the camera uniform
//! - `config`: fixed window, camera and model settings
//! - `context`: GPU and window context that owns device/queue/pipeline
//! - `data_structures`: meshes, materials, textures and instances
//! - `flow`: winit event loop driving one frame per redraw
//! - `frame`: frame clock and the per-frame viewer update
//! - `input`: input events, key bindings and polled key/mouse state
//! - `pipelines`: the model render pipeline
//! - `render`: the drawable model
//! - `resources`: OBJ/MTL/texture loading
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod frame;
pub mod input;
pub mod pipelines;
pub mod render;
pub mod resources;

// Key codes appear in `KeyBindings`, so downstream code needs them too.
pub use winit::keyboard::KeyCode;
