//! Maximum-likelihood consensus calling over a quality-annotated alignment.
//!
//! Each alignment position is handled independently:
//!
//! 1. Every covering read contributes `P(observed | candidate)` for each
//!    candidate base (see [`PositionLikelihoods`]).
//! 2. The joint likelihoods are normalized into a posterior under a uniform
//!    prior.
//! 3. The candidate with the highest posterior is called; its residual error
//!    probability is reported on the Phred scale.
//!
//! Positions are streamed one at a time, so peak scratch memory is `O(K)` on
//! top of the `L × K` posterior matrix that is returned.

mod config;
mod likelihood;

pub use config::{CallerConfig, DEFAULT_GAP};
pub use likelihood::{PositionEstimate, PositionLikelihoods};

use ndarray::{Array2, ArrayView1, Axis};
use tracing::{debug, trace};

use crate::alignment::ReadAlignment;
use crate::alphabet::Alphabet;
use crate::phred::ln_prob_to_phred;
use crate::ConsensusError;

/// Consensus sequence, its qualities and the posterior behind every call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Consensus {
    /// Called base per position (the gap symbol where no read has a base).
    pub sequence: Vec<u8>,
    /// Phred-scaled confidence of each called base.
    pub qualities: Vec<u8>,
    /// `L × K` posterior probabilities, columns in alphabet order.
    pub posteriors: Array2<f64>,
    /// Number of reads contributing a base at each position.
    pub depths: Vec<usize>,
}

impl Consensus {
    /// Alignment length `L`.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Whether the consensus has no positions.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Consensus bases as a string.
    pub fn sequence_string(&self) -> String {
        String::from_utf8_lossy(&self.sequence).into_owned()
    }

    /// Posterior distribution at `position`, in alphabet order.
    pub fn posterior(&self, position: usize) -> Option<ArrayView1<'_, f64>> {
        (position < self.posteriors.nrows()).then(|| self.posteriors.row(position))
    }
}

/// Calls a consensus base and quality at every alignment position.
#[derive(Debug, Clone)]
pub struct ConsensusCaller {
    config: CallerConfig,
}

impl Default for ConsensusCaller {
    fn default() -> Self {
        Self::dna()
    }
}

impl ConsensusCaller {
    /// Create a caller after validating `config`.
    pub fn new(config: CallerConfig) -> Result<Self, ConsensusError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Caller over `{A, C, G, T}` with the default gap symbol and ceiling.
    pub fn dna() -> Self {
        Self {
            config: CallerConfig::default(),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &CallerConfig {
        &self.config
    }

    /// Candidate alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.config.alphabet
    }

    /// Call the consensus of `alignment`.
    ///
    /// The whole alignment is validated before any position is evaluated;
    /// an invalid input yields an error and no partial result.
    pub fn call(&self, alignment: &ReadAlignment) -> Result<Consensus, ConsensusError> {
        let CallerConfig {
            alphabet,
            gap,
            max_quality,
        } = &self.config;
        alignment.validate(alphabet, *gap)?;

        let len = alignment.len();
        debug!(
            positions = len,
            reads = alignment.num_reads(),
            alphabet = %alphabet,
            "calling consensus"
        );

        let bases = alignment.bases();
        let qualities = alignment.qualities();
        let mut posteriors = Array2::zeros((len, alphabet.len()));
        let mut sequence = Vec::with_capacity(len);
        let mut called_qualities = Vec::with_capacity(len);
        let mut depths = Vec::with_capacity(len);
        let mut likelihoods = PositionLikelihoods::new(alphabet.len());
        let mut saturated = 0usize;

        for (position, row) in posteriors.axis_iter_mut(Axis(0)).enumerate() {
            likelihoods.reset();
            for (&symbol, &quality) in bases.row(position).iter().zip(qualities.row(position)) {
                if let Some(observed) = alphabet.index_of(symbol) {
                    likelihoods.add(observed, quality);
                }
            }

            let estimate = likelihoods.posterior(row);
            depths.push(likelihoods.depth());

            match gap {
                Some(gap) if likelihoods.depth() == 0 => {
                    sequence.push(*gap);
                    called_qualities.push(0);
                }
                _ => {
                    let quality = ln_prob_to_phred(estimate.ln_error, *max_quality);
                    if quality == *max_quality {
                        saturated += 1;
                        trace!(position, quality, "consensus quality saturated");
                    }
                    sequence.push(alphabet.symbols()[estimate.best]);
                    called_qualities.push(quality);
                }
            }
        }

        debug!(positions = len, saturated, "consensus called");

        Ok(Consensus {
            sequence,
            qualities: called_qualities,
            posteriors,
            depths,
        })
    }

    /// Call the consensus of an `L × N` base matrix and its quality matrix.
    pub fn call_matrices(
        &self,
        bases: Array2<u8>,
        qualities: Array2<f64>,
    ) -> Result<Consensus, ConsensusError> {
        let alignment = ReadAlignment::new(bases, qualities)?;
        self.call(&alignment)
    }

    /// The `L × K` posterior matrix of `alignment`.
    pub fn posteriors(&self, alignment: &ReadAlignment) -> Result<Array2<f64>, ConsensusError> {
        Ok(self.call(alignment)?.posteriors)
    }
}
