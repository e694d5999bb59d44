//! Per-frame update: timing, input dispatch and matrix derivation.
//!
//! [`Viewer`] is the whole mutable state of a viewing session. The window
//! flow owns exactly one and calls [`Viewer::advance`] once per redraw with
//! the input events queued since the previous frame. The returned [`Frame`]
//! is all the renderer needs.

use instant::{Duration, Instant};

use cgmath::{Matrix4, Point3};

use crate::{
    camera::{Camera, Projection},
    config::ViewerConfig,
    input::{InputEvent, InputState, KeyBindings},
};

/// Measures the time between consecutive frames.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    last_frame: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed time since the previous tick. The first tick yields zero, and a
    /// timestamp earlier than the previous one yields zero as well.
    pub fn tick(&mut self, now: Instant) -> Duration {
        let delta_time = self
            .last_frame
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_frame = Some(now);
        delta_time
    }
}

/// Output of one frame update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub delta_time: Duration,
    pub eye: Point3<f32>,
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
}

#[derive(Debug)]
pub struct Viewer {
    pub camera: Camera,
    pub projection: Projection,
    input: InputState,
    clock: FrameClock,
}

impl Viewer {
    pub fn new(config: &ViewerConfig) -> Self {
        Self::with_bindings(config, KeyBindings::default())
    }

    pub fn with_bindings(config: &ViewerConfig, bindings: KeyBindings) -> Self {
        Self {
            camera: Camera::from_config(&config.camera),
            projection: Projection::new(config.width, config.height, config.z_near, config.z_far),
            input: InputState::new(bindings),
            clock: FrameClock::new(),
        }
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
    }

    /// Run one iteration of the update half of the loop.
    pub fn advance<I>(&mut self, now: Instant, events: I) -> Frame
    where
        I: IntoIterator<Item = InputEvent>,
    {
        let delta_time = self.clock.tick(now);

        events.into_iter().for_each(|event| self.input.apply(event));

        for movement in self.input.active_movements() {
            self.camera.process_keyboard(movement, delta_time);
        }
        if let Some((x_offset, y_offset)) = self.input.take_mouse_offset() {
            self.camera.process_mouse_movement(x_offset, y_offset);
        }
        if let Some(lines) = self.input.take_scroll() {
            self.camera.process_mouse_scroll(lines);
        }

        Frame {
            delta_time,
            eye: self.camera.position,
            view: self.camera.get_view_matrix(),
            projection: self.projection.calc_matrix(self.camera.zoom()),
        }
    }

    /// Polled once per frame by the flow.
    pub fn should_close(&self) -> bool {
        self.input.close_requested()
    }
}
