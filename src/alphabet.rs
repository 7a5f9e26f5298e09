//! Ordered alphabet of base symbols a read may report.

use std::fmt;

use thiserror::Error;

/// Canonical DNA alphabet used when none is supplied.
pub const DNA_SYMBOLS: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Errors raised while constructing an [`Alphabet`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlphabetError {
    /// The same symbol appears more than once.
    #[error("alphabet contains duplicate symbol '{}' at index {index}", char::from(*.symbol))]
    DuplicateSymbol {
        /// Repeated symbol.
        symbol: u8,
        /// Index of the second occurrence.
        index: usize,
    },

    /// Fewer than two symbols, leaving no room for a wrong call.
    #[error("alphabet must contain at least 2 symbols, got {0}")]
    TooSmall(usize),
}

/// Ordered set of `K >= 2` unique single-byte symbols.
///
/// The ordering matters: when two candidates have exactly the same posterior
/// probability the one appearing first here is called.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<u8>,
    lookup: [Option<u8>; 256],
}

impl Alphabet {
    /// Build an alphabet, rejecting duplicates and alphabets with `K < 2`.
    pub fn new(symbols: impl AsRef<[u8]>) -> Result<Self, AlphabetError> {
        let symbols = symbols.as_ref();
        let mut lookup = [None; 256];

        for (index, &symbol) in symbols.iter().enumerate() {
            let slot = &mut lookup[symbol as usize];
            if slot.is_some() {
                return Err(AlphabetError::DuplicateSymbol { symbol, index });
            }
            // Unique bytes cap K at 256, so the index always fits.
            *slot = Some(index as u8);
        }

        if symbols.len() < 2 {
            return Err(AlphabetError::TooSmall(symbols.len()));
        }

        Ok(Self {
            symbols: symbols.to_vec(),
            lookup,
        })
    }

    /// The `{A, C, G, T}` alphabet.
    pub fn dna() -> Self {
        let mut lookup = [None; 256];
        for (index, &symbol) in DNA_SYMBOLS.iter().enumerate() {
            lookup[symbol as usize] = Some(index as u8);
        }
        Self {
            symbols: DNA_SYMBOLS.to_vec(),
            lookup,
        }
    }

    /// Number of symbols `K`.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always `false`; a valid alphabet holds at least two symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in alphabet order.
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Symbol at `index`, if any.
    pub fn symbol(&self, index: usize) -> Option<u8> {
        self.symbols.get(index).copied()
    }

    /// Position of `symbol` in the alphabet.
    #[inline]
    pub fn index_of(&self, symbol: u8) -> Option<usize> {
        self.lookup[symbol as usize].map(usize::from)
    }

    /// Whether `symbol` belongs to the alphabet.
    #[inline]
    pub fn contains(&self, symbol: u8) -> bool {
        self.lookup[symbol as usize].is_some()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::dna()
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Alphabet")
            .field(&String::from_utf8_lossy(&self.symbols))
            .finish()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.symbols))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Alphabet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&String::from_utf8_lossy(&self.symbols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dna_alphabet_orders_bases() {
        let alphabet = Alphabet::dna();
        assert_eq!(alphabet.len(), 4);
        assert_eq!(alphabet.index_of(b'A'), Some(0));
        assert_eq!(alphabet.index_of(b'T'), Some(3));
        assert_eq!(alphabet.index_of(b'N'), None);
        assert_eq!(alphabet.symbol(2), Some(b'G'));
        assert_eq!(alphabet.to_string(), "ACGT");
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let alphabet = Alphabet::dna();
        assert!(!alphabet.contains(b'a'));
    }

    #[test]
    fn duplicate_symbol_is_rejected() {
        let err = Alphabet::new(b"ACGA").unwrap_err();
        assert_eq!(
            err,
            AlphabetError::DuplicateSymbol {
                symbol: b'A',
                index: 3
            }
        );
    }

    #[test]
    fn single_symbol_is_rejected() {
        assert_eq!(Alphabet::new(b"A").unwrap_err(), AlphabetError::TooSmall(1));
        assert_eq!(Alphabet::new(b"").unwrap_err(), AlphabetError::TooSmall(0));
    }

    #[test]
    fn custom_alphabet_keeps_order() {
        let alphabet = Alphabet::new(b"TGCAN").unwrap();
        assert_eq!(alphabet.symbols(), b"TGCAN");
        assert_eq!(alphabet.index_of(b'N'), Some(4));
    }
}
