//! Per-position likelihood accumulation and Bayesian normalization.
//!
//! For a candidate base `a` and an observation `b` with error probability `e`:
//!
//! ```text
//! P(b | a) = 1 - e            if b == a
//!          = e / (K - 1)      otherwise
//! ```
//!
//! Reads are conditionally independent given the true base, so the joint
//! likelihood of a candidate is the product of these terms across reads. The
//! product is kept as a sum of natural logs. Under a uniform prior the
//! posterior is the joint likelihood divided by its sum over candidates.

use ndarray::ArrayViewMut1;

use crate::phred::{ln_correct_probability, ln_error_probability, log_sum_exp};

/// Maximum-posterior candidate at one position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionEstimate {
    /// Alphabet index of the called base (first in order on ties).
    pub best: usize,
    /// Posterior probability of the called base.
    pub probability: f64,
    /// Natural log of the summed posterior of every other candidate,
    /// i.e. `ln(1 - probability)` without the cancellation.
    pub ln_error: f64,
}

/// Joint log-likelihood of each candidate base at a single position.
///
/// Feed it one observation per read with [`add`](Self::add), then normalize
/// with [`posterior`](Self::posterior). [`reset`](Self::reset) reuses the
/// buffer for the next position.
#[derive(Debug, Clone)]
pub struct PositionLikelihoods {
    ln_likelihoods: Vec<f64>,
    ln_mismatch_share: f64,
    depth: usize,
}

impl PositionLikelihoods {
    /// Accumulator for an alphabet of `alphabet_len` candidates (`K >= 2`).
    pub fn new(alphabet_len: usize) -> Self {
        Self {
            ln_likelihoods: vec![0.0; alphabet_len],
            ln_mismatch_share: ((alphabet_len.max(2) - 1) as f64).ln(),
            depth: 0,
        }
    }

    /// Clear all evidence.
    pub fn reset(&mut self) {
        self.ln_likelihoods.fill(0.0);
        self.depth = 0;
    }

    /// Add one read's call: alphabet index `observed` with Phred `quality`.
    pub fn add(&mut self, observed: usize, quality: f64) {
        let ln_match = ln_correct_probability(quality);
        let ln_mismatch = ln_error_probability(quality) - self.ln_mismatch_share;

        for (candidate, ln_likelihood) in self.ln_likelihoods.iter_mut().enumerate() {
            *ln_likelihood += if candidate == observed {
                ln_match
            } else {
                ln_mismatch
            };
        }
        self.depth += 1;
    }

    /// Number of observations added since the last reset.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Joint log-likelihood per candidate, in alphabet order.
    pub fn ln_likelihoods(&self) -> &[f64] {
        &self.ln_likelihoods
    }

    /// Write the normalized posterior into `out` and return the arg-max.
    ///
    /// With no evidence every candidate gets `1/K` and the first one wins.
    pub fn posterior(&self, mut out: ArrayViewMut1<'_, f64>) -> PositionEstimate {
        debug_assert_eq!(out.len(), self.ln_likelihoods.len());
        let ln_total = log_sum_exp(&self.ln_likelihoods);

        let mut best = 0;
        for (candidate, &ln_likelihood) in self.ln_likelihoods.iter().enumerate() {
            if ln_likelihood > self.ln_likelihoods[best] {
                best = candidate;
            }
        }

        for (slot, &ln_likelihood) in out.iter_mut().zip(&self.ln_likelihoods) {
            *slot = (ln_likelihood - ln_total).exp();
        }

        let residual: f64 = out
            .iter()
            .enumerate()
            .filter(|&(candidate, _)| candidate != best)
            .map(|(_, &p)| p)
            .sum();

        PositionEstimate {
            best,
            probability: out[best],
            ln_error: residual.ln(),
        }
    }
}
