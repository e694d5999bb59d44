//! Render pipeline definitions.
//!
//! - `basic` is the opaque textured model pipeline and the shared pipeline builder

pub mod basic;
