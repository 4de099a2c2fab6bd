use glam::Vec2;

/// Last known pointer position in normalized coordinates, [-1, 1] on both
/// axes with +y up. Written by the input callback, read once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    /// Clamp into [-1, 1]. Returns `None` for non-finite input.
    pub fn normalized(x: f32, y: f32) -> Option<Self> {
        if !(x.is_finite() && y.is_finite()) {
            return None;
        }
        Some(Self {
            x: x.clamp(-1.0, 1.0),
            y: y.clamp(-1.0, 1.0),
        })
    }

    /// Map a position inside a `width`×`height` box (origin top-left, +y
    /// down) to normalized coordinates. Degenerate boxes yield the center.
    pub fn from_pixels(px: f32, py: f32, width: f32, height: f32) -> Self {
        if !(width > 0.0 && height > 0.0) {
            return Self::default();
        }
        let x = (px / width - 0.5) * 2.0;
        let y = -(py / height - 0.5) * 2.0;
        Self::normalized(x, y).unwrap_or_default()
    }

    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_to_unit_square_with_y_up() {
        assert_eq!(
            PointerState::from_pixels(0.0, 0.0, 200.0, 100.0),
            PointerState { x: -1.0, y: 1.0 }
        );
        assert_eq!(
            PointerState::from_pixels(200.0, 100.0, 200.0, 100.0),
            PointerState { x: 1.0, y: -1.0 }
        );
        assert_eq!(
            PointerState::from_pixels(100.0, 50.0, 200.0, 100.0),
            PointerState::default()
        );
    }

    #[test]
    fn outside_positions_clamp() {
        let p = PointerState::from_pixels(-500.0, 900.0, 200.0, 100.0);
        assert_eq!(p, PointerState { x: -1.0, y: -1.0 });
        assert_eq!(PointerState::from_pixels(5.0, 5.0, 0.0, 100.0), PointerState::default());
    }

    #[test]
    fn non_finite_is_rejected() {
        assert!(PointerState::normalized(f32::NAN, 0.0).is_none());
        assert!(PointerState::normalized(0.0, f32::INFINITY).is_none());
        assert_eq!(
            PointerState::normalized(3.0, -0.25),
            Some(PointerState { x: 1.0, y: -0.25 })
        );
    }
}
