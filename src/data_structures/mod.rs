//! Engine data structures: models, textures and instances.
//!
//! - `model` contains mesh and material definitions and the draw helpers
//! - `texture` contains the GPU texture wrapper and creation utilities
//! - `instance` holds the model's world transform

pub mod instance;
pub mod model;
pub mod texture;
