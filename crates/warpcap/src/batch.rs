//! Parallel batch generation.
//!
//! Each image gets its own `RandomSource` seeded with `base_seed + index`,
//! so output does not depend on how rayon schedules the work.

use rayon::prelude::*;
use warpcap_common::Result;

use crate::captcha::{Captcha, CaptchaGenerator};

/// Seed used for item `index` of a batch
pub fn item_seed(base_seed: u64, index: usize) -> u64 {
    base_seed.wrapping_add(index as u64)
}

/// Generate `count` images in parallel. Results are in index order.
pub fn generate_batch(
    generator: &CaptchaGenerator,
    base_seed: u64,
    count: usize,
) -> Result<Vec<Captcha>> {
    let batch = (0..count)
        .into_par_iter()
        .map(|i| generator.generate_seeded(item_seed(base_seed, i)))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(base_seed, count, "Generated CAPTCHA batch");
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::captcha::{GeneratorOptions, GlyphFont};
    use warpcap_common::{ChallengeLength, DisplayResolution};

    fn generator() -> CaptchaGenerator {
        let options = GeneratorOptions {
            resolution: DisplayResolution::Hqvga,
            length: ChallengeLength::new(4).unwrap(),
            ..Default::default()
        };
        CaptchaGenerator::new(options, GlyphFont::embedded().unwrap())
    }

    #[test]
    fn test_batch_matches_sequential() {
        let generator = generator();
        let batch = generate_batch(&generator, 100, 8).unwrap();
        assert_eq!(batch.len(), 8);

        for (i, captcha) in batch.iter().enumerate() {
            assert_eq!(captcha.seed, 100 + i as u64);
            let single = generator.generate_seeded(100 + i as u64).unwrap();
            assert_eq!(captcha.answer, single.answer);
            assert_eq!(captcha.image.as_raw(), single.image.as_raw());
        }
    }

    #[test]
    fn test_seed_wraps() {
        assert_eq!(item_seed(u64::MAX, 1), 0);
        assert_eq!(item_seed(5, 3), 8);
    }

    #[test]
    fn test_empty_batch() {
        assert!(generate_batch(&generator(), 0, 0).unwrap().is_empty());
    }
}
