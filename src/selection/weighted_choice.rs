//! Index sampling from a discrete weight distribution.

use rand::Rng;

/// Draw an index with probability `weights[i] / sum(weights)`.
///
/// Draws one uniform value in `[0, total)` and walks the list subtracting
/// each weight until the remainder falls below the current one. Zero-weight
/// entries are never chosen; `None` is returned when the list is empty or all
/// of its weights are zero.
pub fn weighted_choice<R: Rng + ?Sized>(weights: &[u32], rng: &mut R) -> Option<usize> {
    let total: u64 = weights.iter().map(|w| u64::from(*w)).sum();
    if total == 0 {
        return None;
    }

    let mut pick = rng.random_range(0..total);
    for (index, weight) in weights.iter().enumerate() {
        let w = u64::from(*weight);
        if pick < w {
            return Some(index);
        }
        pick -= w;
    }

    // Unreachable while `pick < total`.
    weights.iter().rposition(|w| *w > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn empty_or_zero_weights_choose_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(weighted_choice(&[], &mut rng), None);
        assert_eq!(weighted_choice(&[0, 0], &mut rng), None);
    }

    #[test]
    fn single_weight_is_always_chosen() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            assert_eq!(weighted_choice(&[0, 7, 0], &mut rng), Some(1));
        }
    }

    #[test]
    fn frequencies_follow_weights() {
        let weights = [1u32, 2, 3, 4];
        let trials = 100_000usize;
        let mut counts = [0usize; 4];
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        for _ in 0..trials {
            let index = weighted_choice(&weights, &mut rng).expect("weights are positive");
            assert!(index < weights.len());
            counts[index] += 1;
        }

        let total: u32 = weights.iter().sum();
        for (count, weight) in counts.iter().zip(weights) {
            let observed = *count as f64 / trials as f64;
            let expected = f64::from(weight) / f64::from(total);
            assert!(
                (observed - expected).abs() < 0.01,
                "observed {observed:.4}, expected {expected:.4}"
            );
        }
    }
}
