mod common;

use approx::assert_relative_eq;
use common::{two_read_alignment, FIRST_READ_QUALITIES, SECOND_READ_QUALITIES};
use qconsensus::ConsensusCaller;

#[test]
fn two_read_example_matches_reference_values() {
    let consensus = ConsensusCaller::dna()
        .call(&two_read_alignment())
        .expect("valid alignment");

    assert_eq!(consensus.sequence_string(), "AACATAAG");
    assert_eq!(consensus.qualities, vec![11, 3, 45, 3, 30, 3, 49, 43]);
}

#[test]
fn higher_quality_read_wins_disagreements() {
    let consensus = ConsensusCaller::dna().call(&two_read_alignment()).unwrap();

    // Position 0: A at Q20 beats C at Q10.
    assert_eq!(consensus.sequence[0], b'A');
    let posterior = consensus.posterior(0).unwrap();
    assert!(posterior[0] > posterior[1]);
    assert_relative_eq!(posterior[0], 0.033 / 0.036_222_222_222_222_22, max_relative = 1e-9);
}

#[test]
fn equal_quality_disagreements_resolve_by_alphabet_order() {
    let consensus = ConsensusCaller::dna().call(&two_read_alignment()).unwrap();

    // A vs C, A vs T and G vs A, each pair at equal quality.
    for position in [1, 3, 5] {
        assert_eq!(consensus.sequence[position], b'A');
        let posterior = consensus.posterior(position).unwrap();
        let max = posterior.iter().cloned().fold(0.0, f64::max);
        assert_eq!(max, posterior[0]);
    }
}

#[test]
fn agreement_raises_quality_above_each_read() {
    let consensus = ConsensusCaller::dna().call(&two_read_alignment()).unwrap();

    for position in [2, 4, 6, 7] {
        let best_input = FIRST_READ_QUALITIES[position].max(SECOND_READ_QUALITIES[position]);
        assert!(
            f64::from(consensus.qualities[position]) > best_input,
            "position {} reported Q{}",
            position,
            consensus.qualities[position]
        );
    }
}

#[test]
fn every_position_is_confident() {
    let consensus = ConsensusCaller::dna().call(&two_read_alignment()).unwrap();
    assert_eq!(consensus.len(), 8);
    assert!(consensus.qualities.iter().all(|&q| q > 0));
    assert!(consensus.depths.iter().all(|&d| d == 2));
}
