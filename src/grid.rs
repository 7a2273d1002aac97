//! Pixel grid types shared by the codec and the container formats.

use crate::error::{Result, RleError};

/// One channel value. Pixmaps allow a maximum intensity up to 65535.
pub type Sample = u16;

/// An RGB triple, channel 0 first.
pub type Pixel = [Sample; 3];

/// Rows of pixels, top to bottom.
pub type Grid = Vec<Vec<Pixel>>;

pub const CHANNELS: usize = 3;

/// Check that `grid` has exactly `height` rows of exactly `width` pixels.
pub fn check_shape(width: usize, height: usize, grid: &[Vec<Pixel>]) -> Result<()> {
    if grid.len() != height {
        return Err(RleError::InvalidGridShape {
            expected_width: width,
            expected_height: height,
            row: None,
            found: grid.len(),
        });
    }
    if let Some((row, pixels)) = grid.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(RleError::InvalidGridShape {
            expected_width: width,
            expected_height: height,
            row: Some(row),
            found: pixels.len(),
        });
    }
    Ok(())
}

/// A decoded raster together with its declared maximum intensity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub width: usize,
    pub height: usize,
    pub max_value: Sample,
    pub rows: Grid,
}

impl Image {
    pub fn new(width: usize, height: usize, max_value: Sample, rows: Grid) -> Result<Self> {
        check_shape(width, height, &rows)?;
        Ok(Self { width, height, max_value, rows })
    }

    pub fn filled(width: usize, height: usize, max_value: Sample, pixel: Pixel) -> Self {
        Self {
            width,
            height,
            max_value,
            rows: vec![vec![pixel; width]; height],
        }
    }

    /// Number of channel values in the image (W·H·3).
    pub fn sample_count(&self) -> usize {
        self.width * self.height * CHANNELS
    }

    /// Fails on the first sample above `max_value`, scanning rows top to bottom.
    pub fn validate_samples(&self) -> Result<()> {
        for (row, pixels) in self.rows.iter().enumerate() {
            for (column, pixel) in pixels.iter().enumerate() {
                if let Some(&value) = pixel.iter().find(|&&v| v > self.max_value) {
                    return Err(RleError::SampleExceedsMax {
                        row,
                        column,
                        value,
                        max: self.max_value,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_shape_ok() {
        let grid = vec![vec![[0, 0, 0]; 4]; 2];
        assert!(check_shape(4, 2, &grid).is_ok());
        assert!(check_shape(0, 0, &[]).is_ok());
    }

    #[test]
    fn test_check_shape_row_count() {
        let grid = vec![vec![[0, 0, 0]; 4]; 3];
        match check_shape(4, 2, &grid) {
            Err(RleError::InvalidGridShape { row: None, found: 3, .. }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_check_shape_short_row() {
        let grid = vec![vec![[1, 2, 3]; 4], vec![[1, 2, 3]; 3]];
        match check_shape(4, 2, &grid) {
            Err(RleError::InvalidGridShape { row: Some(1), found: 3, .. }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_samples() {
        let mut image = Image::filled(3, 2, 15, [15, 0, 7]);
        assert!(image.validate_samples().is_ok());
        assert_eq!(image.sample_count(), 18);

        image.rows[1][2][1] = 16;
        match image.validate_samples() {
            Err(RleError::SampleExceedsMax { row: 1, column: 2, value: 16, max: 15 }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_image_new_rejects_bad_shape() {
        assert!(Image::new(2, 1, 255, vec![vec![[0, 0, 0]; 3]]).is_err());
    }
}
