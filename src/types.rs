use crate::error::{EvolveError, Result};
use serde::{Deserialize, Serialize};

/// Circle center in canvas coordinates.
///
/// After mutation a coordinate may equal the canvas width/height (one past the
/// last pixel), so the fields are signed and unclamped to the pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Center {
    pub x: i32,
    pub y: i32,
}

/// One gene of an individual.
///
/// `color` is added to every covered pixel with modulo-256 arithmetic. Fresh
/// circles hold a color in `[0, 256)`; mutation widens that to `[-255, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Circle {
    pub color: i16,
    pub radius: i32,
    pub center: Center,
}

impl Circle {
    pub fn new(color: i16, radius: i32, x: i32, y: i32) -> Self {
        Self {
            color,
            radius,
            center: Center { x, y },
        }
    }
}

/// Single-channel 8-bit pixel buffer, stored row-major (`height` rows of `width` pixels).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Canvas of the given shape with every pixel set to `fill`.
    pub fn new(width: usize, height: usize, fill: u8) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    /// Wrap an existing row-major buffer. Fails on an empty or mis-sized buffer.
    pub fn from_raw(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(EvolveError::Configuration(format!(
                "Image must not be empty (got {}x{})",
                width, height
            )));
        }
        if pixels.len() != width * height {
            return Err(EvolveError::Configuration(format!(
                "Image buffer holds {} pixels, expected {}x{} = {}",
                pixels.len(),
                width,
                height,
                width * height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn same_shape(&self, other: &Canvas) -> bool {
        self.width == other.width && self.height == other.height
    }

    pub fn fill(&mut self, value: u8) {
        self.pixels.fill(value);
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.width;
        &mut self.pixels[start..start + self.width]
    }
}
