use serde::{Deserialize, Serialize};

/// A link target rectangle in device page units.
///
/// Coordinates come straight from the printing device, so `top` may be
/// numerically smaller or larger than `bottom` depending on the device's
/// axis direction; the registry stores them as given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRect {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl LinkRect {
    pub fn new(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }
}

/// Rendered page dimensions in device units.
///
/// A zero component means "not known yet"; the dimensions are only filled
/// in at render time or by a test-pass report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: i32,
    pub height: i32,
}

impl PageSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub const fn zero() -> Self {
        Self {
            width: 0,
            height: 0,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.width == 0 && self.height == 0
    }
}
