//! Read alignments paired with their per-base quality scores.
//!
//! An alignment is stored position-major: row `l` holds the `N` base calls
//! observed at alignment position `l`, one per read.

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use thiserror::Error;

use crate::alphabet::Alphabet;

/// Errors describing a malformed alignment or quality matrix.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AlignmentError {
    /// Base and quality matrices have different dimensions.
    #[error("alignment shape {bases:?} does not match quality shape {qualities:?}")]
    ShapeMismatch {
        /// `(L, N)` of the base matrix.
        bases: (usize, usize),
        /// `(L, N)` of the quality matrix.
        qualities: (usize, usize),
    },

    /// A read row is not as long as the first read.
    #[error("read {read} has length {len}, expected {expected}")]
    RaggedRead {
        /// Read index.
        read: usize,
        /// Length of the offending read.
        len: usize,
        /// Length of the first read.
        expected: usize,
    },

    /// A base call is not part of the alphabet.
    #[error("symbol '{}' at position {position}, read {read} is not in alphabet {alphabet}", char::from(*.symbol))]
    SymbolNotInAlphabet {
        /// Offending symbol.
        symbol: u8,
        /// Alignment position.
        position: usize,
        /// Read index.
        read: usize,
        /// Alphabet the symbol was checked against.
        alphabet: String,
    },

    /// A quality score is zero, negative or NaN.
    #[error("quality {quality} at position {position}, read {read} must be greater than zero")]
    NonPositiveQuality {
        /// Offending score.
        quality: f64,
        /// Alignment position.
        position: usize,
        /// Read index.
        read: usize,
    },

    /// A quality score is infinite.
    #[error("quality at position {position}, read {read} is not finite")]
    NonFiniteQuality {
        /// Alignment position.
        position: usize,
        /// Read index.
        read: usize,
    },
}

/// L×N matrix of base calls and the matching L×N quality matrix.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReadAlignment {
    bases: Array2<u8>,
    qualities: Array2<f64>,
}

impl ReadAlignment {
    /// Pair a base matrix with its quality matrix; both are `L × N`.
    pub fn new(bases: Array2<u8>, qualities: Array2<f64>) -> Result<Self, AlignmentError> {
        if bases.dim() != qualities.dim() {
            return Err(AlignmentError::ShapeMismatch {
                bases: bases.dim(),
                qualities: qualities.dim(),
            });
        }
        Ok(Self { bases, qualities })
    }

    /// Build an alignment from per-read rows of bases and qualities.
    ///
    /// Every read must have the same length, and each read's quality row
    /// must be as long as its bases.
    pub fn from_reads<S, Q, I>(reads: I) -> Result<Self, AlignmentError>
    where
        S: AsRef<[u8]>,
        Q: AsRef<[f64]>,
        I: IntoIterator<Item = (S, Q)>,
    {
        let mut bases: Vec<u8> = Vec::new();
        let mut qualities: Vec<f64> = Vec::new();
        let mut expected = None;
        let mut num_reads = 0;

        for (read, (seq, quals)) in reads.into_iter().enumerate() {
            let (seq, quals) = (seq.as_ref(), quals.as_ref());
            if seq.len() != quals.len() {
                return Err(AlignmentError::ShapeMismatch {
                    bases: (seq.len(), 1),
                    qualities: (quals.len(), 1),
                });
            }
            let expected = *expected.get_or_insert(seq.len());
            if seq.len() != expected {
                return Err(AlignmentError::RaggedRead {
                    read,
                    len: seq.len(),
                    expected,
                });
            }
            bases.extend_from_slice(seq);
            qualities.extend_from_slice(quals);
            num_reads += 1;
        }

        let len = expected.unwrap_or(0);
        // Rows were collected read-major (N × L); transpose into L × N.
        let bases = Array2::from_shape_vec((num_reads, len), bases)
            .map_err(|_| AlignmentError::ShapeMismatch {
                bases: (len, num_reads),
                qualities: (len, num_reads),
            })?
            .reversed_axes()
            .as_standard_layout()
            .into_owned();
        let qualities = Array2::from_shape_vec((num_reads, len), qualities)
            .map_err(|_| AlignmentError::ShapeMismatch {
                bases: (len, num_reads),
                qualities: (len, num_reads),
            })?
            .reversed_axes()
            .as_standard_layout()
            .into_owned();

        Ok(Self { bases, qualities })
    }

    /// Alignment length `L`.
    pub fn len(&self) -> usize {
        self.bases.nrows()
    }

    /// Whether the alignment has no positions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of reads `N`.
    pub fn num_reads(&self) -> usize {
        self.bases.ncols()
    }

    /// The `L × N` base matrix.
    pub fn bases(&self) -> ArrayView2<'_, u8> {
        self.bases.view()
    }

    /// The `L × N` quality matrix.
    pub fn qualities(&self) -> ArrayView2<'_, f64> {
        self.qualities.view()
    }

    /// Bases and qualities observed at one alignment position.
    pub fn column(&self, position: usize) -> Option<(ArrayView1<'_, u8>, ArrayView1<'_, f64>)> {
        if position >= self.len() {
            return None;
        }
        Some((
            self.bases.index_axis(Axis(0), position),
            self.qualities.index_axis(Axis(0), position),
        ))
    }

    /// Check every base call against `alphabet` and every quality for
    /// positivity. Cells holding the `gap` symbol are skipped.
    pub fn validate(&self, alphabet: &Alphabet, gap: Option<u8>) -> Result<(), AlignmentError> {
        for ((position, read), &symbol) in self.bases.indexed_iter() {
            if Some(symbol) == gap {
                continue;
            }
            if !alphabet.contains(symbol) {
                return Err(AlignmentError::SymbolNotInAlphabet {
                    symbol,
                    position,
                    read,
                    alphabet: alphabet.to_string(),
                });
            }
        }

        for ((position, read), &quality) in self.qualities.indexed_iter() {
            if Some(self.bases[[position, read]]) == gap {
                continue;
            }
            // Written as a negation so NaN is rejected too.
            if !(quality > 0.0) {
                return Err(AlignmentError::NonPositiveQuality {
                    quality,
                    position,
                    read,
                });
            }
            if quality.is_infinite() {
                return Err(AlignmentError::NonFiniteQuality { position, read });
            }
        }

        Ok(())
    }
}
