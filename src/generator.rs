//! Synthetic pixmaps for trying out the codec.

use crate::config::Pattern;
use crate::grid::{Image, Pixel, Sample};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const STRIPE_WIDTH: usize = 8;

pub fn generate(width: usize, height: usize, max_value: Sample, pattern: Pattern, seed: u64) -> Image {
    let mut rng = StdRng::seed_from_u64(seed);

    let rows = match pattern {
        Pattern::Random => (0..height)
            .map(|_| (0..width).map(|_| random_pixel(&mut rng, max_value)).collect())
            .collect(),
        Pattern::Flat => {
            let pixel = random_pixel(&mut rng, max_value);
            vec![vec![pixel; width]; height]
        }
        Pattern::Stripes => {
            let bands: Vec<Pixel> = (0..width.div_ceil(STRIPE_WIDTH))
                .map(|_| random_pixel(&mut rng, max_value))
                .collect();
            let row: Vec<Pixel> = (0..width).map(|x| bands[x / STRIPE_WIDTH]).collect();
            vec![row; height]
        }
        Pattern::Gradient => {
            let row: Vec<Pixel> = (0..width)
                .map(|x| {
                    let level = if width > 1 {
                        (x as u64 * max_value as u64 / (width as u64 - 1)) as Sample
                    } else {
                        0
                    };
                    [level, level, level]
                })
                .collect();
            vec![row; height]
        }
    };

    Image { width, height, max_value, rows }
}

fn random_pixel(rng: &mut StdRng, max_value: Sample) -> Pixel {
    [
        rng.gen_range(0..=max_value),
        rng.gen_range(0..=max_value),
        rng.gen_range(0..=max_value),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_deterministic() {
        let a = generate(20, 10, 15, Pattern::Random, 7);
        let b = generate(20, 10, 15, Pattern::Random, 7);
        assert_eq!(a, b);
        assert!(a.validate_samples().is_ok());
        assert_eq!(a.rows.len(), 10);
        assert!(a.rows.iter().all(|row| row.len() == 20));
    }

    #[test]
    fn test_flat_pattern() {
        let image = generate(5, 3, 255, Pattern::Flat, 1);
        let first = image.rows[0][0];
        assert!(image.rows.iter().flatten().all(|&p| p == first));
    }

    #[test]
    fn test_stripes_pattern() {
        let image = generate(20, 2, 255, Pattern::Stripes, 3);
        let row = &image.rows[0];
        assert!(row[..STRIPE_WIDTH].iter().all(|&p| p == row[0]));
        assert_eq!(image.rows[0], image.rows[1]);
    }

    #[test]
    fn test_gradient_pattern() {
        let image = generate(3, 1, 100, Pattern::Gradient, 0);
        assert_eq!(image.rows[0], vec![[0, 0, 0], [50, 50, 50], [100, 100, 100]]);
        let single = generate(1, 1, 100, Pattern::Gradient, 0);
        assert_eq!(single.rows[0], vec![[0, 0, 0]]);
    }
}
