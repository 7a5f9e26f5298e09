#![allow(dead_code)]

use qconsensus::ReadAlignment;

/// Qualities of the first read in the two-read example.
pub const FIRST_READ_QUALITIES: [f64; 8] = [20.0, 20.0, 20.0, 15.0, 13.0, 20.0, 22.0, 19.0];
/// Qualities of the second read in the two-read example.
pub const SECOND_READ_QUALITIES: [f64; 8] = [10.0, 20.0, 20.0, 15.0, 13.0, 20.0, 22.0, 19.0];

/// Two reads of length eight that disagree at four positions.
pub fn two_read_alignment() -> ReadAlignment {
    ReadAlignment::from_reads([
        (b"AACATGAG", FIRST_READ_QUALITIES),
        (b"CCCTTAAG", SECOND_READ_QUALITIES),
    ])
    .expect("example reads are rectangular")
}

/// Build an alignment from `(sequence, qualities)` rows.
pub fn alignment_from(reads: &[(&str, &[f64])]) -> ReadAlignment {
    ReadAlignment::from_reads(
        reads
            .iter()
            .map(|(sequence, qualities)| (sequence.as_bytes(), *qualities)),
    )
    .expect("reads are rectangular")
}
