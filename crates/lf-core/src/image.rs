use crate::Error;

/// Owned, tightly packed, row-major sample grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> Image<T> {
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, Error> {
        let expected = width.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn row(&self, y: usize) -> &[T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.width;
        &mut self.data[start..start + self.width]
    }

    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

impl<T: Clone> Image<T> {
    pub fn new_fill(width: usize, height: usize, value: T) -> Self {
        let len = width.checked_mul(height).expect("image size overflow");
        Self {
            width,
            height,
            data: vec![value; len],
        }
    }
}

/// Borrowed, tightly packed grid. Built from an owned image with
/// [`Image::as_view`].
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a, T> {
    width: usize,
    height: usize,
    data: &'a [T],
}

impl<'a, T> ImageView<'a, T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn row(&self, y: usize) -> &'a [T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.width;
        &self.data[start..start + self.width]
    }
}

impl<T: Copy> ImageView<'_, T> {
    /// Copies the view into an owned image.
    pub fn to_image(&self) -> Image<T> {
        Image {
            width: self.width,
            height: self.height,
            data: self.data.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Image;
    use crate::Error;

    #[test]
    fn from_vec_rejects_wrong_length() {
        let err = Image::from_vec(3, 2, vec![0.0f32; 5]).expect_err("length 5 != 6");
        assert_eq!(
            err,
            Error::SizeMismatch {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn view_rows_match_owned_rows() {
        let img = Image::from_vec(3, 2, (0..6).map(|v| v as f32).collect()).expect("valid");
        let view = img.as_view();
        assert_eq!(view.dims(), (3, 2));
        assert_eq!(view.row(1), img.row(1));
        assert_eq!(view.to_image(), img);
    }
}
