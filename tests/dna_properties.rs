//! Property-based tests for DNA utilities
//!
//! Reverse complement over the strict A/C/G/T/N alphabet.

use varnomen::core::dna::{complement_base, is_dna, revcomp};
use varnomen::NomenclatureError;
use proptest::prelude::*;

/// Generate a random DNA sequence over the supported alphabet
fn dna_sequence_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!['A', 'T', 'G', 'C', 'N']), 0..100)
        .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    /// Applying reverse complement twice returns the original sequence.
    #[test]
    fn prop_revcomp_involution(seq in dna_sequence_strategy()) {
        let result = revcomp(&revcomp(&seq).unwrap()).unwrap();
        prop_assert_eq!(result, seq, "revcomp should be an involution");
    }

    /// Reverse complement preserves length
    #[test]
    fn prop_revcomp_preserves_length(seq in dna_sequence_strategy()) {
        let result = revcomp(&seq).unwrap();
        prop_assert_eq!(result.len(), seq.len());
    }

    /// revcomp of valid DNA is still valid DNA
    #[test]
    fn prop_revcomp_preserves_validity(seq in dna_sequence_strategy()) {
        prop_assert!(is_dna(&revcomp(&seq).unwrap()));
    }

    /// Complement of complement is identity for single bases
    #[test]
    fn prop_complement_involution(base in prop::sample::select(vec![b'A', b'T', b'G', b'C', b'N'])) {
        let once = complement_base(base).unwrap();
        prop_assert_eq!(complement_base(once), Some(base));
    }

    /// Any sequence containing a foreign character is rejected
    #[test]
    fn prop_revcomp_rejects_foreign_base(
        prefix in dna_sequence_strategy(),
        bad in prop::sample::select(vec!['a', 'c', 'R', 'Y', 'X', '-', ' ']),
        suffix in dna_sequence_strategy(),
    ) {
        let seq = format!("{}{}{}", prefix, bad, suffix);
        let err = revcomp(&seq).unwrap_err();
        prop_assert_eq!(err, NomenclatureError::InvalidBase { base: bad, position: prefix.len() });
    }
}

#[cfg(test)]
mod edge_cases {
    use super::*;

    #[test]
    fn test_revcomp_known_sequences() {
        assert_eq!(revcomp("ACGT").unwrap(), "ACGT");
        assert_eq!(revcomp("AATTGGCC").unwrap(), "GGCCAATT");
        assert_eq!(revcomp("ATG").unwrap(), "CAT");
        assert_eq!(revcomp("GAATTC").unwrap(), "GAATTC");
    }
}
