//! Phred-scale conversions between quality scores and error probabilities.
//!
//! A quality score `q` encodes the probability that a base call is wrong as
//! `e = 10^(-q/10)`. The consensus model works on these probabilities in
//! natural-log space so that products over deep alignments do not underflow.

use std::f64::consts::{LN_10, LN_2};

use ndarray::{Array2, ArrayView2};

/// Largest quality score representable in SAM/BAM quality strings.
pub const MAX_PHRED: u8 = 93;

/// Probability that a call with quality `q` is wrong: `10^(-q/10)`.
#[inline]
pub fn error_probability(quality: f64) -> f64 {
    10f64.powf(-quality / 10.0)
}

/// Element-wise error-rate transform of an L×N quality matrix.
pub fn error_rates(qualities: ArrayView2<'_, f64>) -> Array2<f64> {
    qualities.mapv(error_probability)
}

/// Natural log of [`error_probability`], computed without leaving log space.
#[inline]
pub fn ln_error_probability(quality: f64) -> f64 {
    -quality * LN_10 / 10.0
}

/// Natural log of the probability that a call with quality `q` is correct.
#[inline]
pub fn ln_correct_probability(quality: f64) -> f64 {
    ln_one_minus_exp(ln_error_probability(quality))
}

/// Computes `ln(1 - e^x)` for `x <= 0`.
///
/// Uses `ln(-expm1(x))` near zero, where `1 - e^x` cancels catastrophically,
/// and `ln_1p(-e^x)` elsewhere.
#[inline]
pub fn ln_one_minus_exp(x: f64) -> f64 {
    if x >= 0.0 {
        f64::NEG_INFINITY
    } else if x >= -LN_2 {
        (-x.exp_m1()).ln()
    } else {
        (-x.exp()).ln_1p()
    }
}

/// Stable `ln(sum(e^v))`. Returns negative infinity for an empty slice or
/// when every value is negative infinity.
pub fn log_sum_exp(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    let sum: f64 = values.iter().map(|&v| (v - max).exp()).sum();
    max + sum.ln()
}

/// Unrounded Phred score for a natural-log error probability.
#[inline]
pub fn ln_prob_to_raw_phred(ln_error: f64) -> f64 {
    -10.0 * ln_error / LN_10
}

/// Phred score for a natural-log error probability.
///
/// Rounds half to even and clamps to `[0, max]`. An error probability of
/// exactly zero (`ln_error == -inf`) saturates at `max`.
pub fn ln_prob_to_phred(ln_error: f64, max: u8) -> u8 {
    let raw = ln_prob_to_raw_phred(ln_error).round_ties_even();
    if raw.is_nan() {
        return 0;
    }
    raw.clamp(0.0, f64::from(max)) as u8
}
