#![allow(dead_code)]

use cgmath::{InnerSpace, Vector3};
use flyview::{KeyCode, camera::Camera, input::InputEvent};

pub(crate) const EPSILON: f32 = 1e-5;

pub(crate) fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() <= EPSILON,
        "expected {expected}, got {actual}"
    );
}

pub(crate) fn assert_vec_close(actual: Vector3<f32>, expected: Vector3<f32>) {
    assert!(
        (actual - expected).magnitude() <= EPSILON,
        "expected {expected:?}, got {actual:?}"
    );
}

/// `front`, `right` and `up` are unit length and pairwise orthogonal.
pub(crate) fn assert_orthonormal(camera: &Camera) {
    let (front, right, up) = (camera.front(), camera.right(), camera.up());
    for v in [front, right, up] {
        assert_close(v.magnitude(), 1.0);
    }
    assert_close(front.dot(right), 0.0);
    assert_close(front.dot(up), 0.0);
    assert_close(right.dot(up), 0.0);
}

pub(crate) fn press(code: KeyCode) -> InputEvent {
    InputEvent::Key {
        code,
        pressed: true,
    }
}

pub(crate) fn release(code: KeyCode) -> InputEvent {
    InputEvent::Key {
        code,
        pressed: false,
    }
}
