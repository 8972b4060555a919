//! Stratified, seeded train/test split

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{Error, Result};

/// Row indices of each side of a split, ascending
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Per-class test counts: proportional floor, remainder to the largest
/// fractional parts (lower class index wins ties).
fn allocate(class_counts: &[usize], n_test: usize, n: usize) -> Vec<usize> {
    let exact: Vec<f64> = class_counts.iter().map(|&c| n_test as f64 * c as f64 / n as f64).collect();
    let mut alloc: Vec<usize> = exact.iter().map(|e| e.floor() as usize).collect();
    let mut remaining = n_test - alloc.iter().sum::<usize>();

    let mut order: Vec<usize> = (0..class_counts.len()).collect();
    order.sort_by(|&a, &b| {
        let fa = exact[a] - exact[a].floor();
        let fb = exact[b] - exact[b].floor();
        fb.total_cmp(&fa).then(a.cmp(&b))
    });
    for class in order {
        if remaining == 0 {
            break;
        }
        if alloc[class] < class_counts[class] {
            alloc[class] += 1;
            remaining -= 1;
        }
    }
    alloc
}

/// Split rows so each class keeps its proportion on both sides.
///
/// `test_size` is the test fraction in (0, 1); the test side gets
/// `ceil(test_size * n)` rows. The same labels and seed always give the
/// same split.
pub fn stratified_split(labels: &[usize], test_size: f64, seed: u64) -> Result<TrainTestSplit> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(Error::InvalidInput(format!("test_size must be in (0, 1), got {test_size}")));
    }
    let n = labels.len();
    let n_classes = labels.iter().max().map_or(0, |&m| m + 1);
    let mut by_class: Vec<Vec<usize>> = vec![Vec::new(); n_classes];
    for (i, &label) in labels.iter().enumerate() {
        by_class[label].push(i);
    }
    by_class.retain(|members| !members.is_empty());

    if let Some(smallest) = by_class.iter().map(Vec::len).min() {
        if smallest < 2 {
            return Err(Error::DataIntegrity(
                "every label class needs at least 2 rows for a stratified split".to_string(),
            ));
        }
    }

    let n_test = (test_size * n as f64).ceil() as usize;
    let n_train = n.saturating_sub(n_test);
    if n_test < by_class.len() || n_train < by_class.len() {
        return Err(Error::DataIntegrity(format!(
            "{n} rows cannot be split into train/test sides that each hold all {} classes",
            by_class.len()
        )));
    }

    let counts: Vec<usize> = by_class.iter().map(Vec::len).collect();
    let alloc = allocate(&counts, n_test, n);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut split = TrainTestSplit { train: Vec::with_capacity(n_train), test: Vec::with_capacity(n_test) };
    for (mut members, k) in by_class.into_iter().zip(alloc) {
        members.shuffle(&mut rng);
        split.test.extend_from_slice(&members[..k]);
        split.train.extend_from_slice(&members[k..]);
    }
    split.train.sort_unstable();
    split.test.sort_unstable();
    Ok(split)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(neg: usize, pos: usize) -> Vec<usize> {
        (0..neg + pos).map(|i| usize::from(i >= neg)).collect()
    }

    #[test]
    fn test_split_sizes_and_strata() {
        let y = labels(80, 20);
        let split = stratified_split(&y, 0.2, 42).unwrap();

        assert_eq!(split.test.len(), 20);
        assert_eq!(split.train.len(), 80);
        assert_eq!(split.test.iter().filter(|&&i| y[i] == 1).count(), 4);
    }

    #[test]
    fn test_split_is_partition() {
        let y = labels(37, 13);
        let split = stratified_split(&y, 0.2, 7).unwrap();
        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_reproducible() {
        let y = labels(40, 12);
        assert_eq!(stratified_split(&y, 0.2, 42).unwrap(), stratified_split(&y, 0.2, 42).unwrap());
    }

    #[test]
    fn test_singleton_class_rejected() {
        let y = labels(10, 1);
        assert!(matches!(stratified_split(&y, 0.2, 42), Err(Error::DataIntegrity(_))));
    }

    #[test]
    fn test_bad_fraction_rejected() {
        assert!(stratified_split(&labels(5, 5), 1.0, 42).is_err());
        assert!(stratified_split(&labels(5, 5), 0.0, 42).is_err());
    }

    #[test]
    fn test_allocate_distributes_remainder() {
        // 3 test rows over classes of 5 and 5: 1.5 each, tie goes to class 0
        assert_eq!(allocate(&[5, 5], 3, 10), vec![2, 1]);
    }
}
