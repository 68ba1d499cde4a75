use core::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    SizeMismatch {
        expected: usize,
        actual: usize,
    },
    InvalidArgument(&'static str),
    /// Two grids that must share a shape do not. Shapes are `(width, height)`.
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// A weight vector does not have one entry per pyramid band.
    LevelCountMismatch {
        expected: usize,
        actual: usize,
    },
    WeightOutOfRange {
        level: usize,
        value: f32,
    },
}

impl Error {
    /// True for both shape disagreements: grid vs grid and weights vs bands.
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(
            self,
            Self::DimensionMismatch { .. } | Self::LevelCountMismatch { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::InvalidArgument(what) => write!(f, "invalid argument: {what}"),
            Self::DimensionMismatch { expected, actual } => write!(
                f,
                "dimension mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            Self::LevelCountMismatch { expected, actual } => write!(
                f,
                "dimension mismatch: expected {expected} level weights, got {actual}"
            ),
            Self::WeightOutOfRange { level, value } => {
                write!(f, "weight {value} at level {level} is outside [0, 1]")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn dimension_mismatch_groups_grid_and_weight_shapes() {
        let grid = Error::DimensionMismatch {
            expected: (4, 4),
            actual: (5, 4),
        };
        let weights = Error::LevelCountMismatch {
            expected: 3,
            actual: 2,
        };
        assert!(grid.is_dimension_mismatch());
        assert!(weights.is_dimension_mismatch());
        assert!(!Error::InvalidArgument("empty").is_dimension_mismatch());
    }

    #[test]
    fn display_names_offending_weight() {
        let err = Error::WeightOutOfRange {
            level: 2,
            value: 1.5,
        };
        assert_eq!(err.to_string(), "weight 1.5 at level 2 is outside [0, 1]");
    }
}
