//! Seeded train/held-out partitioning

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::errors::{MediError, Result};

/// Row indices of the two partitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n` with `seed` and hold out `ceil(n * test_ratio)` rows
///
/// At least one row always stays in the training partition.
pub fn train_test_split(n: usize, test_ratio: f64, seed: u64) -> Result<Split> {
    if !(0.0..1.0).contains(&test_ratio) {
        return Err(MediError::ConfigurationError(format!(
            "test_ratio must be in [0.0, 1.0), got {}",
            test_ratio
        )));
    }
    if n == 0 {
        return Err(MediError::ConfigurationError(
            "cannot split an empty feature matrix".to_string(),
        ));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_len = ((n as f64) * test_ratio).ceil() as usize;
    let test_len = test_len.min(n - 1);

    let train = indices.split_off(test_len);
    Ok(Split {
        train,
        test: indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eighty_twenty() {
        let split = train_test_split(10, 0.2, 42).unwrap();
        assert_eq!(split.train.len(), 8);
        assert_eq!(split.test.len(), 2);
    }

    #[test]
    fn test_partitions_are_disjoint_and_complete() {
        let split = train_test_split(37, 0.2, 7).unwrap();
        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..37).collect::<Vec<_>>());
        assert_eq!(split.test.len(), 8);
    }

    #[test]
    fn test_reproducible() {
        let a = train_test_split(50, 0.2, 42).unwrap();
        let b = train_test_split(50, 0.2, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_row_stays_in_training() {
        let split = train_test_split(1, 0.2, 42).unwrap();
        assert_eq!(split.train, vec![0]);
        assert!(split.test.is_empty());
    }

    #[test]
    fn test_invalid_ratio() {
        assert!(train_test_split(10, 1.0, 42).is_err());
        assert!(train_test_split(10, -0.1, 42).is_err());
        assert!(train_test_split(0, 0.2, 42).is_err());
    }
}
