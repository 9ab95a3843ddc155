//! Split quality measures
//!
//! All measures are computed in bits, zero-probability terms contribute zero.

/// Gains below this value are treated as no gain at all
pub(crate) const MIN_GAIN: f64 = 1e-10;

/// Slack below the average gain of a node still accepted when selecting by gain ratio
pub(crate) const AVERAGE_GAIN_SLACK: f64 = 1e-3;

/// Gain penalty of choosing the best of `nthresholds` candidate thresholds over `n_samples`
/// examples, the cost of encoding the chosen threshold
pub(crate) fn threshold_penalty(nthresholds: usize, n_samples: f64) -> f64 {
    if nthresholds == 0 || n_samples <= 0.0 {
        return 0.0;
    }

    (nthresholds as f64).log2() / n_samples
}

/// Given the class frequencies calculates the entropy of the subset.
pub(crate) fn entropy(class_freq: &[f64]) -> f64 {
    let n_samples = class_freq.iter().sum::<f64>();
    if n_samples <= 0.0 {
        return 0.0;
    }

    class_freq
        .iter()
        .map(|x| x / n_samples)
        .map(|x| if x > 0.0 { -x * x.log2() } else { 0.0 })
        .sum()
}

/// Information gain of partitioning a subset into branches
///
/// `branches` holds the class frequencies of every branch; their sum has to be the class
/// frequency of the parent.
pub(crate) fn information_gain(parent: &[f64], branches: &[Vec<f64>]) -> f64 {
    let n_samples = parent.iter().sum::<f64>();
    if n_samples <= 0.0 {
        return 0.0;
    }

    let remainder = branches
        .iter()
        .map(|branch| branch.iter().sum::<f64>() / n_samples * entropy(branch))
        .sum::<f64>();

    entropy(parent) - remainder
}

/// Intrinsic information of a split, the entropy of the branch sizes
pub(crate) fn split_information(branch_sizes: &[f64]) -> f64 {
    entropy(branch_sizes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn entropy_example() {
        // Class 0 occurs 75% of the time
        // Class 1 occurs 25% of the time
        // Class 2 occurs 0% of the time
        // Entropy is -0.75*log2(0.75) - 0.25*log2(0.25) - 0*log2(0) = 0.81127812
        assert_abs_diff_eq!(entropy(&[6.0, 2.0, 0.0]), 0.81127, epsilon = 1e-5);

        // If split is perfect then entropy is zero
        assert_abs_diff_eq!(entropy(&[8.0, 0.0, 0.0]), 0.0, epsilon = 1e-15);

        // an empty subset has no entropy instead of NaN
        assert_abs_diff_eq!(entropy(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn threshold_penalty_grows_with_candidates() {
        // a single candidate costs nothing to encode
        assert_abs_diff_eq!(threshold_penalty(1, 5.0), 0.0);
        assert_abs_diff_eq!(threshold_penalty(0, 5.0), 0.0);
        // log2(3) / 5
        assert_abs_diff_eq!(threshold_penalty(3, 5.0), 0.31699, epsilon = 1e-5);
        assert!(threshold_penalty(11, 14.0) > threshold_penalty(9, 14.0));
    }

    #[test]
    fn weather_outlook_gain() {
        // 9 yes / 5 no split by outlook into sunny (2/3), overcast (4/0) and rainy (3/2)
        let parent = [9.0, 5.0];
        let branches = vec![vec![2.0, 3.0], vec![4.0, 0.0], vec![3.0, 2.0]];

        assert_abs_diff_eq!(entropy(&parent), 0.94029, epsilon = 1e-5);
        assert_abs_diff_eq!(information_gain(&parent, &branches), 0.24675, epsilon = 1e-5);
        assert_abs_diff_eq!(split_information(&[5.0, 4.0, 5.0]), 1.57741, epsilon = 1e-5);
    }

    #[test]
    fn perfect_binary_split() {
        let parent = [5.0, 5.0];
        let branches = vec![vec![5.0, 0.0], vec![0.0, 5.0]];

        assert_abs_diff_eq!(information_gain(&parent, &branches), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(split_information(&[5.0, 5.0]), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(split_information(&[10.0]), 0.0);
    }
}
