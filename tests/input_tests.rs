// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}

use input::*;
use scene_core::PointerState;

#[test]
fn window_corners_map_to_unit_square() {
    let area = PointerArea::window(1280.0, 720.0);
    assert_eq!(
        pointer_in_area(0.0, 0.0, area),
        PointerState { x: -1.0, y: 1.0 }
    );
    assert_eq!(
        pointer_in_area(1280.0, 720.0, area),
        PointerState { x: 1.0, y: -1.0 }
    );
    assert_eq!(pointer_in_area(640.0, 360.0, area), PointerState::default());
}

#[test]
fn container_pointer_is_relative_to_its_box() {
    // a 200x200 emblem placed at (100, 50) on the page
    let area = PointerArea {
        left: 100.0,
        top: 50.0,
        width: 200.0,
        height: 200.0,
    };
    assert_eq!(pointer_in_area(200.0, 150.0, area), PointerState::default());
    let p = pointer_in_area(250.0, 100.0, area);
    assert!((p.x - 0.5).abs() < 1e-6);
    assert!((p.y - 0.5).abs() < 1e-6);
}

#[test]
fn pointer_outside_container_clamps() {
    let area = PointerArea {
        left: 100.0,
        top: 50.0,
        width: 200.0,
        height: 200.0,
    };
    assert_eq!(
        pointer_in_area(0.0, 2000.0, area),
        PointerState { x: -1.0, y: -1.0 }
    );
}

#[test]
fn collapsed_container_reports_center() {
    let area = PointerArea {
        left: 10.0,
        top: 10.0,
        width: 0.0,
        height: 0.0,
    };
    assert_eq!(pointer_in_area(15.0, 15.0, area), PointerState::default());
}

#[test]
fn pixel_ratio_is_capped() {
    assert_eq!(effective_pixel_ratio(1.0), 1.0);
    assert_eq!(effective_pixel_ratio(1.5), 1.5);
    assert_eq!(effective_pixel_ratio(3.0), constants::MAX_DEVICE_PIXEL_RATIO);
    assert_eq!(effective_pixel_ratio(0.0), 1.0);
    assert_eq!(effective_pixel_ratio(f64::NAN), 1.0);
}

#[test]
fn backing_size_scales_css_box() {
    assert_eq!(backing_size(200.0, 200.0, 1.0), (200, 200));
    assert_eq!(backing_size(200.0, 200.0, 3.0), (400, 400));
    assert_eq!(backing_size(1280.0, 720.0, 1.25), (1600, 900));
    assert_eq!(backing_size(0.0, -5.0, 2.0), (1, 1));
    assert_eq!(backing_size(f64::INFINITY, 10.0, 1.0), (1, 10));
}
