//! Polled input state.
//!
//! The windowing layer translates `winit` window and device events into
//! [`InputEvent`]s and queues them; the frame loop feeds the queue into
//! [`InputState::apply`] once per frame and then reads the accumulated state.
//! Nothing here touches the camera directly.

use std::collections::HashSet;

use winit::{
    event::{DeviceEvent, ElementState, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::{camera::CameraMovement, config::SCROLL_PIXELS_PER_LINE};

/// Key state transitions, cursor samples and close requests, stripped of the
/// `winit` specifics the core does not care about.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Key { code: KeyCode, pressed: bool },
    /// Absolute cursor position in physical pixels.
    CursorMoved { x: f64, y: f64 },
    /// Raw pointer motion in device units, y growing downwards. Unlike the
    /// cursor position it keeps coming while the cursor is grabbed.
    MouseMotion { dx: f64, dy: f64 },
    /// Vertical scroll in wheel lines, positive away from the user.
    Scroll(f32),
    CloseRequested,
}

impl InputEvent {
    /// Returns `None` for window events that are not input.
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => match event.physical_key {
                PhysicalKey::Code(code) => Some(InputEvent::Key {
                    code,
                    pressed: event.state == ElementState::Pressed,
                }),
                PhysicalKey::Unidentified(_) => None,
            },
            WindowEvent::CursorMoved { position, .. } => Some(InputEvent::CursorMoved {
                x: position.x,
                y: position.y,
            }),
            WindowEvent::MouseWheel { delta, .. } => Some(InputEvent::Scroll(match delta {
                MouseScrollDelta::LineDelta(_, y) => *y,
                MouseScrollDelta::PixelDelta(position) => {
                    position.y as f32 / SCROLL_PIXELS_PER_LINE
                }
            })),
            WindowEvent::CloseRequested => Some(InputEvent::CloseRequested),
            _ => None,
        }
    }

    pub fn from_device_event(event: &DeviceEvent) -> Option<Self> {
        match event {
            DeviceEvent::MouseMotion { delta: (dx, dy) } => {
                Some(InputEvent::MouseMotion { dx: *dx, dy: *dy })
            }
            _ => None,
        }
    }
}

/// Which keys drive which camera movement, and which key closes the window.
#[derive(Clone, Debug)]
pub struct KeyBindings {
    pub movement: Vec<(KeyCode, CameraMovement)>,
    pub close: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            movement: vec![
                (KeyCode::KeyW, CameraMovement::Forward),
                (KeyCode::ArrowUp, CameraMovement::Forward),
                (KeyCode::KeyS, CameraMovement::Backward),
                (KeyCode::ArrowDown, CameraMovement::Backward),
                (KeyCode::KeyA, CameraMovement::Left),
                (KeyCode::ArrowLeft, CameraMovement::Left),
                (KeyCode::KeyD, CameraMovement::Right),
                (KeyCode::ArrowRight, CameraMovement::Right),
                (KeyCode::KeyE, CameraMovement::Up),
                (KeyCode::KeyQ, CameraMovement::Down),
            ],
            close: KeyCode::Escape,
        }
    }
}

/// Turns absolute cursor positions into offsets.
///
/// The first sample only seeds the tracker, so a cursor that starts far from
/// the origin does not make the camera snap.
#[derive(Clone, Debug, Default)]
pub struct CursorTracker {
    last: Option<(f64, f64)>,
}

impl CursorTracker {
    /// Offset from the previous sample, with y flipped so that moving the
    /// mouse up yields a positive value.
    pub fn offset(&mut self, x: f64, y: f64) -> (f32, f32) {
        let (last_x, last_y) = self.last.unwrap_or((x, y));
        self.last = Some((x, y));
        ((x - last_x) as f32, (last_y - y) as f32)
    }
}

#[derive(Clone, Debug, Default)]
pub struct InputState {
    bindings: KeyBindings,
    pressed_keys: HashSet<KeyCode>,
    cursor: CursorTracker,
    mouse_offset: Option<(f32, f32)>,
    scroll: Option<f32>,
    close_requested: bool,
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Default::default()
        }
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key { code, pressed } => {
                if pressed {
                    if code == self.bindings.close {
                        self.close_requested = true;
                    }
                    self.pressed_keys.insert(code);
                } else {
                    self.pressed_keys.remove(&code);
                }
            }
            InputEvent::CursorMoved { x, y } => {
                let (dx, dy) = self.cursor.offset(x, y);
                self.add_mouse_offset(dx, dy);
            }
            InputEvent::MouseMotion { dx, dy } => self.add_mouse_offset(dx as f32, -dy as f32),
            InputEvent::Scroll(lines) => {
                self.scroll = Some(self.scroll.unwrap_or(0.0) + lines);
            }
            InputEvent::CloseRequested => self.close_requested = true,
        }
    }

    fn add_mouse_offset(&mut self, dx: f32, dy: f32) {
        let (acc_x, acc_y) = self.mouse_offset.unwrap_or((0.0, 0.0));
        self.mouse_offset = Some((acc_x + dx, acc_y + dy));
    }

    pub fn is_pressed(&self, code: KeyCode) -> bool {
        self.pressed_keys.contains(&code)
    }

    /// Every movement with at least one bound key held, each reported once.
    pub fn active_movements(&self) -> Vec<CameraMovement> {
        CameraMovement::ALL
            .into_iter()
            .filter(|movement| {
                self.bindings
                    .movement
                    .iter()
                    .any(|(code, bound)| bound == movement && self.pressed_keys.contains(code))
            })
            .collect()
    }

    /// Mouse offset accumulated since the last call, `None` if the cursor did
    /// not move.
    pub fn take_mouse_offset(&mut self) -> Option<(f32, f32)> {
        self.mouse_offset.take()
    }

    pub fn take_scroll(&mut self) -> Option<f32> {
        self.scroll.take()
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }
}
