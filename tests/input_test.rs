mod common;

use instant::{Duration, Instant};

use flyview::{
    KeyCode,
    camera::CameraMovement,
    config::ViewerConfig,
    frame::Viewer,
    input::{CursorTracker, InputEvent, InputState, KeyBindings},
};

use crate::common::test_utils::{assert_close, press, release};

#[test]
fn first_cursor_sample_yields_no_offset() {
    let mut tracker = CursorTracker::default();

    assert_eq!(tracker.offset(400.0, 300.0), (0.0, 0.0));
    assert_eq!(tracker.offset(410.0, 280.0), (10.0, 20.0));
    assert_eq!(tracker.offset(405.0, 290.0), (-5.0, -10.0));
}

#[test]
fn keys_persist_until_released() {
    let mut input = InputState::default();

    input.apply(press(KeyCode::KeyW));
    assert!(input.is_pressed(KeyCode::KeyW));
    assert_eq!(input.active_movements(), vec![CameraMovement::Forward]);
    // still held on the next frame without new events
    assert_eq!(input.active_movements(), vec![CameraMovement::Forward]);

    input.apply(release(KeyCode::KeyW));
    assert!(!input.is_pressed(KeyCode::KeyW));
    assert!(input.active_movements().is_empty());
}

#[test]
fn two_keys_bound_to_one_direction_move_once() {
    let mut input = InputState::default();

    input.apply(press(KeyCode::KeyW));
    input.apply(press(KeyCode::ArrowUp));

    assert_eq!(input.active_movements(), vec![CameraMovement::Forward]);
}

#[test]
fn every_default_direction_is_bound() {
    let mut input = InputState::default();

    for code in [
        KeyCode::KeyW,
        KeyCode::KeyS,
        KeyCode::KeyA,
        KeyCode::KeyD,
        KeyCode::KeyE,
        KeyCode::KeyQ,
    ] {
        input.apply(press(code));
    }

    assert_eq!(input.active_movements(), CameraMovement::ALL.to_vec());
}

#[test]
fn unbound_keys_are_tracked_but_do_not_move() {
    let mut input = InputState::default();

    input.apply(press(KeyCode::KeyZ));

    assert!(input.is_pressed(KeyCode::KeyZ));
    assert!(input.active_movements().is_empty());
    assert!(!input.close_requested());
}

#[test]
fn custom_bindings_replace_the_defaults() {
    let mut input = InputState::new(KeyBindings {
        movement: vec![(KeyCode::KeyI, CameraMovement::Forward)],
        close: KeyCode::KeyX,
    });

    input.apply(press(KeyCode::KeyW));
    input.apply(press(KeyCode::Escape));
    assert!(input.active_movements().is_empty());
    assert!(!input.close_requested());

    input.apply(press(KeyCode::KeyI));
    input.apply(press(KeyCode::KeyX));
    assert_eq!(input.active_movements(), vec![CameraMovement::Forward]);
    assert!(input.close_requested());
}

#[test]
fn escape_and_window_close_request_shutdown() {
    let mut input = InputState::default();
    input.apply(press(KeyCode::Escape));
    assert!(input.close_requested());

    let mut input = InputState::default();
    input.apply(InputEvent::CloseRequested);
    assert!(input.close_requested());
}

#[test]
fn mouse_offsets_accumulate_until_taken() {
    let mut input = InputState::default();
    assert_eq!(input.take_mouse_offset(), None);

    input.apply(InputEvent::CursorMoved { x: 100.0, y: 100.0 });
    input.apply(InputEvent::CursorMoved { x: 104.0, y: 98.0 });
    input.apply(InputEvent::CursorMoved { x: 110.0, y: 95.0 });

    assert_eq!(input.take_mouse_offset(), Some((10.0, 5.0)));
    assert_eq!(input.take_mouse_offset(), None);

    input.apply(InputEvent::CursorMoved { x: 110.0, y: 105.0 });
    assert_eq!(input.take_mouse_offset(), Some((0.0, -10.0)));
}

#[test]
fn scroll_accumulates_until_taken() {
    let mut input = InputState::default();

    input.apply(InputEvent::Scroll(1.0));
    input.apply(InputEvent::Scroll(2.5));

    assert_eq!(input.take_scroll(), Some(3.5));
    assert_eq!(input.take_scroll(), None);
}

#[test]
fn raw_motion_adds_to_the_offset_with_y_flipped() {
    let mut input = InputState::default();

    input.apply(InputEvent::MouseMotion { dx: 3.0, dy: -4.0 });
    input.apply(InputEvent::MouseMotion { dx: 2.0, dy: 1.0 });

    // no seeding sample needed, and moving up (negative dy) looks up
    assert_eq!(input.take_mouse_offset(), Some((5.0, 3.0)));
    assert_eq!(input.take_mouse_offset(), None);
}

#[test]
fn raw_motion_turns_the_camera_all_the_way_around() {
    let mut viewer = Viewer::new(&ViewerConfig::default());
    let start_yaw = viewer.camera.yaw().0;
    let t0 = Instant::now();
    let mut last_yaw = start_yaw;

    // 2000 px to the right, far more than fits in an 800 px window
    for frame in 0..20 {
        let motion = (0..10).map(|_| InputEvent::MouseMotion { dx: 10.0, dy: 0.0 });
        viewer.advance(t0 + Duration::from_millis(16 * frame), motion);
        assert!(viewer.camera.yaw().0 > last_yaw);
        last_yaw = viewer.camera.yaw().0;
    }

    assert!(last_yaw - start_yaw > 80.0);
    assert!((last_yaw - (start_yaw + 200.0)).abs() < 1e-3);
    assert_close(viewer.camera.pitch().0, 0.0);
}
