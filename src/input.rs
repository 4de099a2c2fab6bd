use crate::constants::MAX_DEVICE_PIXEL_RATIO;
use scene_core::PointerState;

/// Bounding box of the element a scene reacts to, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerArea {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl PointerArea {
    /// The whole viewport; client coordinates are already window-relative.
    #[inline]
    pub fn window(inner_width: f32, inner_height: f32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: inner_width,
            height: inner_height,
        }
    }
}

// ---------------- Pointer helpers ----------------
/// Normalize a client-space position against `area`: [-1, 1] on both axes,
/// +y up, clamped at the edges.
#[inline]
pub fn pointer_in_area(client_x: f32, client_y: f32, area: PointerArea) -> PointerState {
    PointerState::from_pixels(
        client_x - area.left,
        client_y - area.top,
        area.width,
        area.height,
    )
}

#[inline]
pub fn effective_pixel_ratio(device_pixel_ratio: f64) -> f64 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(MAX_DEVICE_PIXEL_RATIO)
    } else {
        1.0
    }
}

/// Backing-store size for a CSS box: CSS size × capped pixel ratio, at least
/// one pixel per side.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> (u32, u32) {
    let dpr = effective_pixel_ratio(device_pixel_ratio);
    let px = |css: f64| {
        if css.is_finite() && css > 0.0 {
            ((css * dpr).round() as u32).max(1)
        } else {
            1
        }
    };
    (px(css_width), px(css_height))
}
