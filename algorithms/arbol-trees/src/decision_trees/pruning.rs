//! Pessimistic error estimates for post-pruning
//!
//! The number of errors a node would make on unseen data is estimated by the upper limit of a
//! confidence interval around the observed training error rate, following C4.5.

/// Expected number of additional errors of a node covering `n` examples with `e` errors
///
/// ### Parameters
///
/// * `n`: the number of covered examples
/// * `e`: the number of misclassified examples
/// * `confidence`: the confidence level of the upper bound, in `(0, 0.5]`
/// * `z`: the standard normal quantile of `1 - confidence`
pub(crate) fn added_errors(n: f64, e: f64, confidence: f64, z: f64) -> f64 {
    if n <= 0.0 {
        return 0.0;
    }

    // the normal approximation breaks down at the low end
    if e < 1.0 {
        let base = n * (1.0 - confidence.powf(1.0 / n));
        if e == 0.0 {
            return base;
        }
        return base + e * (added_errors(n, 1.0, confidence, z) - base);
    }

    // continuity correction at the high end
    if e + 0.5 >= n {
        return (n - e).max(0.0);
    }

    let f = (e + 0.5) / n;
    let r = (f + z * z / (2.0 * n) + z * (f / n - f * f / n + z * z / (4.0 * n * n)).sqrt())
        / (1.0 + z * z / n);

    r * n - e
}

/// Pessimistic number of errors of a leaf
pub(crate) fn leaf_errors(n: f64, e: f64, confidence: f64, z: f64) -> f64 {
    e + added_errors(n, e, confidence, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // standard normal quantile of 0.75
    const Z: f64 = 0.6744897501960817;

    #[test]
    fn no_errors_uses_exact_bound() {
        // N * (1 - CF^(1/N))
        assert_abs_diff_eq!(added_errors(2.0, 0.0, 0.25, Z), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(added_errors(4.0, 0.0, 0.25, Z), 1.17157, epsilon = 1e-5);
        assert_abs_diff_eq!(added_errors(0.0, 0.0, 0.25, Z), 0.0);
    }

    #[test]
    fn normal_approximation() {
        assert_abs_diff_eq!(leaf_errors(5.0, 2.0, 0.25, Z), 3.36222, epsilon = 1e-4);
        assert_abs_diff_eq!(leaf_errors(14.0, 5.0, 0.25, Z), 6.76118, epsilon = 1e-4);
    }

    #[test]
    fn estimate_never_below_observed() {
        for n in 1..30 {
            for e in 0..=n {
                let (n, e) = (n as f64, e as f64);
                let estimate = leaf_errors(n, e, 0.25, Z);
                assert!(estimate >= e);
                assert!(estimate <= n + 1e-9);
            }
        }
    }

    #[test]
    fn lower_confidence_is_more_pessimistic() {
        // z of 0.9 and 0.95
        let z_10 = 1.2815515655446004;
        let z_05 = 1.6448536269514722;

        let at_25 = leaf_errors(20.0, 4.0, 0.25, Z);
        let at_10 = leaf_errors(20.0, 4.0, 0.10, z_10);
        let at_05 = leaf_errors(20.0, 4.0, 0.05, z_05);

        assert!(at_25 < at_10);
        assert!(at_10 < at_05);
    }
}
