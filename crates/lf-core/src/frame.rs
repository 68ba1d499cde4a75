use crate::{Error, Image};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }
}

/// Planar RGB frame with samples in `[0, 1]`.
///
/// All three planes always share one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbFrame {
    planes: [Image<f32>; 3],
}

impl RgbFrame {
    pub fn from_planes(
        red: Image<f32>,
        green: Image<f32>,
        blue: Image<f32>,
    ) -> Result<Self, Error> {
        for plane in [&green, &blue] {
            if plane.dims() != red.dims() {
                return Err(Error::DimensionMismatch {
                    expected: red.dims(),
                    actual: plane.dims(),
                });
            }
        }

        Ok(Self {
            planes: [red, green, blue],
        })
    }

    pub fn new_fill(width: usize, height: usize, rgb: [f32; 3]) -> Self {
        Self {
            planes: rgb.map(|v| Image::new_fill(width, height, v)),
        }
    }

    /// Splits interleaved 8-bit RGB into normalized planes.
    pub fn from_interleaved_u8(width: usize, height: usize, rgb: &[u8]) -> Result<Self, Error> {
        let pixels = width.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: rgb.len(),
        })?;
        let expected = pixels.checked_mul(3).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: rgb.len(),
        })?;
        if rgb.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: rgb.len(),
            });
        }

        let mut planes = [
            Vec::with_capacity(pixels),
            Vec::with_capacity(pixels),
            Vec::with_capacity(pixels),
        ];
        for px in rgb.chunks_exact(3) {
            for (plane, &v) in planes.iter_mut().zip(px) {
                plane.push(v as f32 / 255.0);
            }
        }

        let [r, g, b] = planes;
        Self::from_planes(
            Image::from_vec(width, height, r)?,
            Image::from_vec(width, height, g)?,
            Image::from_vec(width, height, b)?,
        )
    }

    /// Interleaves the planes back to 8-bit RGB, clamping out-of-range
    /// samples and rounding to nearest.
    pub fn to_interleaved_u8(&self) -> Vec<u8> {
        let [r, g, b] = &self.planes;
        let mut out = Vec::with_capacity(r.data().len() * 3);
        for ((&rv, &gv), &bv) in r.data().iter().zip(g.data()).zip(b.data()) {
            out.extend([rv, gv, bv].map(unit_to_u8));
        }
        out
    }

    pub fn width(&self) -> usize {
        self.planes[0].width()
    }

    pub fn height(&self) -> usize {
        self.planes[0].height()
    }

    /// `(width, height)`.
    pub fn dims(&self) -> (usize, usize) {
        self.planes[0].dims()
    }

    pub fn plane(&self, channel: Channel) -> &Image<f32> {
        &self.planes[channel.index()]
    }

    pub fn planes(&self) -> &[Image<f32>; 3] {
        &self.planes
    }
}

#[inline]
fn unit_to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}
