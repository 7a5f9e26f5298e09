use crate::alphabet::Alphabet;
use crate::phred::MAX_PHRED;
use crate::ConsensusError;

/// Symbol marking a position a read does not cover.
pub const DEFAULT_GAP: u8 = b'-';

/// Configuration parameters for consensus calling.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CallerConfig {
    /// Candidate bases, in tie-breaking order.
    pub alphabet: Alphabet,

    /// Gap symbol. Gap cells carry no evidence and their quality is ignored.
    /// `None` treats every non-alphabet symbol as an error.
    pub gap: Option<u8>,

    /// Ceiling for reported quality scores. Positions whose residual error
    /// probability rounds to zero report exactly this value.
    pub max_quality: u8,
}

impl Default for CallerConfig {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::dna(),
            gap: Some(DEFAULT_GAP),
            max_quality: MAX_PHRED,
        }
    }
}

impl CallerConfig {
    /// Default configuration over a custom alphabet.
    pub fn for_alphabet(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            ..Self::default()
        }
    }

    /// Replace the alphabet.
    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Set or disable the gap symbol.
    pub fn with_gap(mut self, gap: Option<u8>) -> Self {
        self.gap = gap;
        self
    }

    /// Set the quality ceiling.
    pub fn with_max_quality(mut self, max_quality: u8) -> Self {
        self.max_quality = max_quality;
        self
    }

    /// Check the configuration is internally consistent.
    pub fn validate(&self) -> Result<(), ConsensusError> {
        if self.max_quality == 0 {
            return Err(ConsensusError::InvalidConfiguration(
                "max quality must be > 0".to_string(),
            ));
        }
        if let Some(gap) = self.gap {
            if self.alphabet.contains(gap) {
                return Err(ConsensusError::GapInAlphabet(gap));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = CallerConfig::default();
        assert_eq!(config.alphabet, Alphabet::dna());
        assert_eq!(config.gap, Some(b'-'));
        assert_eq!(config.max_quality, 93);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn gap_must_not_be_a_candidate() {
        let config = CallerConfig::default().with_gap(Some(b'A'));
        assert!(matches!(
            config.validate(),
            Err(ConsensusError::GapInAlphabet(b'A'))
        ));
    }

    #[test]
    fn zero_ceiling_is_rejected() {
        let config = CallerConfig::default().with_max_quality(0);
        assert!(matches!(
            config.validate(),
            Err(ConsensusError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn custom_alphabet_keeps_other_defaults() {
        let alphabet = Alphabet::new(b"ACGU").unwrap();
        let config = CallerConfig::for_alphabet(alphabet.clone()).with_gap(None);
        assert_eq!(config.alphabet, alphabet);
        assert_eq!(config.gap, None);
        assert_eq!(config.max_quality, MAX_PHRED);
    }
}
