mod common;

use cgmath::{Deg, Point3};
use instant::{Duration, Instant};

use flyview::{
    KeyCode,
    config::ViewerConfig,
    frame::{FrameClock, Viewer},
    input::InputEvent,
};

use crate::common::test_utils::{assert_close, assert_vec_close, press, release};

#[test]
fn first_tick_is_zero() {
    let mut clock = FrameClock::new();
    let start = Instant::now();

    assert_eq!(clock.tick(start), Duration::ZERO);
    assert_eq!(
        clock.tick(start + Duration::from_millis(16)),
        Duration::from_millis(16)
    );
}

#[test]
fn clock_never_goes_negative() {
    let mut clock = FrameClock::new();
    let start = Instant::now() + Duration::from_secs(1);

    clock.tick(start);

    assert_eq!(clock.tick(start - Duration::from_millis(500)), Duration::ZERO);
}

#[test]
fn first_frame_ignores_held_keys() {
    let mut viewer = Viewer::new(&ViewerConfig::default());
    let start = viewer.camera.position;

    let frame = viewer.advance(
        Instant::now(),
        [press(KeyCode::KeyW), press(KeyCode::KeyE)],
    );

    assert_eq!(frame.delta_time, Duration::ZERO);
    assert_eq!(viewer.camera.position, start);
    assert_eq!(frame.eye, start);
}

#[test]
fn held_key_moves_on_following_frames() {
    let mut viewer = Viewer::new(&ViewerConfig::default());
    let start = viewer.camera.position;
    let front = viewer.camera.front();
    let t0 = Instant::now();

    viewer.advance(t0, [press(KeyCode::KeyW)]);
    let frame = viewer.advance(t0 + Duration::from_millis(500), []);

    assert_eq!(frame.delta_time, Duration::from_millis(500));
    assert_vec_close(viewer.camera.position - start, front * 1.25);

    let moved = viewer.camera.position;
    viewer.advance(t0 + Duration::from_millis(600), [release(KeyCode::KeyW)]);
    assert_eq!(viewer.camera.position, moved);
}

#[test]
fn opposite_keys_cancel_out() {
    let mut viewer = Viewer::new(&ViewerConfig::default());
    let start = viewer.camera.position;
    let t0 = Instant::now();

    viewer.advance(t0, [press(KeyCode::KeyA), press(KeyCode::KeyD)]);
    viewer.advance(t0 + Duration::from_secs(1), []);

    assert_vec_close(viewer.camera.position - start, cgmath::Vector3::new(0.0, 0.0, 0.0));
}

#[test]
fn first_cursor_sample_does_not_snap() {
    let mut viewer = Viewer::new(&ViewerConfig::default());
    let (yaw, pitch) = (viewer.camera.yaw(), viewer.camera.pitch());
    let t0 = Instant::now();

    viewer.advance(t0, [InputEvent::CursorMoved { x: 640.0, y: 480.0 }]);
    assert_eq!(viewer.camera.yaw(), yaw);
    assert_eq!(viewer.camera.pitch(), pitch);

    // right and up by ten pixels each
    viewer.advance(
        t0 + Duration::from_millis(16),
        [InputEvent::CursorMoved { x: 650.0, y: 470.0 }],
    );
    assert_close(viewer.camera.yaw().0, yaw.0 + 1.0);
    assert_close(viewer.camera.pitch().0, pitch.0 + 1.0);
}

#[test]
fn frame_carries_camera_matrices() {
    let mut viewer = Viewer::new(&ViewerConfig::default());
    let t0 = Instant::now();

    let frame = viewer.advance(t0, [InputEvent::Scroll(5.0)]);

    assert_eq!(viewer.camera.zoom(), Deg(40.0));
    assert_eq!(frame.view, viewer.camera.get_view_matrix());
    assert_eq!(frame.projection, viewer.projection.calc_matrix(Deg(40.0)));
    assert_eq!(frame.eye, Point3::new(0.0, 1.0, 3.0));
}

#[test]
fn resize_updates_projection_aspect() {
    let mut viewer = Viewer::new(&ViewerConfig::default());

    viewer.resize(1920, 1080);

    assert_close(viewer.projection.aspect(), 1920.0 / 1080.0);
}

#[test]
fn close_request_is_seen_after_the_frame_that_drains_it() {
    let mut viewer = Viewer::new(&ViewerConfig::default());
    let t0 = Instant::now();

    viewer.advance(t0, []);
    assert!(!viewer.should_close());

    viewer.advance(t0 + Duration::from_millis(16), [press(KeyCode::Escape)]);
    assert!(viewer.should_close());
}
