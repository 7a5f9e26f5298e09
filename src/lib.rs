//! # Quality-aware consensus calling
//!
//! Collapses a multiple alignment of sequencing reads into one
//! maximum-likelihood consensus sequence, with a Phred-scaled confidence for
//! every called base.
//!
//! ## Model
//!
//! 1. **Error rates**: a quality `q` becomes an error probability `10^(-q/10)`
//! 2. **Per-read likelihood**: a read supports the base it reports with
//!    `1 - e` and every other base with `e / (K - 1)`
//! 3. **Joint likelihood**: reads are conditionally independent, so their
//!    likelihoods multiply
//! 4. **Posterior**: uniform prior, normalized over the `K` candidates
//! 5. **Call**: arg-max posterior, ties resolved by alphabet order
//! 6. **Quality**: `round(-10 log10(1 - p))`, saturating at a configured
//!    ceiling when `1 - p` is zero
//!
//! ## Usage Example
//!
//! ```
//! use qconsensus::{ConsensusCaller, ReadAlignment};
//!
//! let alignment = ReadAlignment::from_reads([
//!     (b"AACATGAG", [20.0, 20.0, 20.0, 15.0, 13.0, 20.0, 22.0, 19.0]),
//!     (b"CCCTTAAG", [10.0, 20.0, 20.0, 15.0, 13.0, 20.0, 22.0, 19.0]),
//! ])?;
//!
//! let consensus = ConsensusCaller::dna().call(&alignment)?;
//! assert_eq!(consensus.sequence_string(), "AACATAAG");
//! assert_eq!(consensus.qualities, vec![11, 3, 45, 3, 30, 3, 49, 43]);
//! # Ok::<(), qconsensus::ConsensusError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod alignment; // L×N base and quality matrices
pub mod alphabet; // Candidate base symbols
pub mod consensus; // Likelihood model and caller
pub mod phred; // Quality/probability conversions

// Re-exports for convenience
pub use alignment::{AlignmentError, ReadAlignment};
pub use alphabet::{Alphabet, AlphabetError};
pub use consensus::{CallerConfig, Consensus, ConsensusCaller};

use thiserror::Error;

/// Errors that can occur while calling a consensus.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConsensusError {
    /// Malformed alphabet (duplicate symbol or fewer than two symbols).
    #[error("invalid alphabet: {0}")]
    Alphabet(#[from] AlphabetError),

    /// Malformed alignment or quality matrix.
    #[error("invalid alignment: {0}")]
    Alignment(#[from] AlignmentError),

    /// The configured gap symbol is also a candidate base.
    #[error("gap symbol '{}' is also an alphabet symbol", char::from(*.0))]
    GapInAlphabet(u8),

    /// Any other inconsistent caller setting.
    #[error("invalid caller configuration: {0}")]
    InvalidConfiguration(String),
}

/// Call the consensus of `alignment` over `alphabet` with default settings.
///
/// Shorthand for building a [`ConsensusCaller`] from
/// [`CallerConfig::for_alphabet`].
pub fn call_consensus(
    alignment: &ReadAlignment,
    alphabet: &Alphabet,
) -> Result<Consensus, ConsensusError> {
    ConsensusCaller::new(CallerConfig::for_alphabet(alphabet.clone()))?.call(alignment)
}
