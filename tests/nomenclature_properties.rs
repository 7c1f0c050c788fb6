//! Property-based tests for nomenclature formatting
//!
//! Covers every formatting rule, the identity fallback and coordinate
//! lookup failures.

use proptest::prelude::*;
use varnomen::core::amino::three_letter;
use varnomen::core::dna::revcomp;
use varnomen::{
    reformat_mutation, reformat_mutation_for_gene, GeneContext, GeneCoordinateMap, LookupError,
    NomenclatureError, Strand,
};

/// Amino-acid letters the substitution grammar can capture
fn residue_strategy() -> impl Strategy<Value = char> {
    prop::sample::select(vec![
        'A', 'R', 'N', 'D', 'C', 'Q', 'E', 'G', 'H', 'I', 'L', 'K', 'M', 'F', 'P', 'S', 'T', 'W',
        'Y', 'V', '*',
    ])
}

fn bases_strategy(min: usize, max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!['A', 'C', 'G', 'T']), min..max)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Strings that contain neither '>' nor '_', so no grammar can match
fn unmatched_descriptor_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9*.:-]{0,30}"
}

fn tag_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "large_deletion",
        "missense_variant",
        "start_lost",
        "stop_gained",
        "frameshift_variant",
        "non_coding_transcript_exon_variant",
        "synonymous_variant",
        "upstream_gene_variant",
    ])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_large_deletion(start in 0u64..10_000_000, end in 0u64..10_000_000) {
        let map = GeneCoordinateMap::new();
        let ctx = GeneContext::new("Chromosome", &map);
        let expected = format!("Chromosome:g.{}_{}del", start, end);
        for descriptor in [format!("{}_{}", start, end), format!("Chromosome_{}_{}", start, end)] {
            let out = reformat_mutation(&descriptor, "large_deletion", &ctx).unwrap();
            prop_assert_eq!(&out, &expected);
        }
    }

    #[test]
    fn prop_substitution(pos in 1u32..5000, ref_aa in residue_strategy(), alt_aa in residue_strategy()) {
        let map = GeneCoordinateMap::new();
        let ctx = GeneContext::new("rpoB", &map);
        let descriptor = format!("{}{}>{}{}", pos, ref_aa, pos, alt_aa);
        let expected = format!(
            "p.{}{}{}",
            three_letter(ref_aa).unwrap(),
            pos,
            three_letter(alt_aa).unwrap()
        );
        for tag in ["missense_variant", "start_lost", "stop_gained"] {
            prop_assert_eq!(reformat_mutation(&descriptor, tag, &ctx).unwrap(), expected.clone());
        }
    }

    #[test]
    fn prop_non_coding_forward(pos in 0u32..100_000, ref_bases in bases_strategy(1, 6), alt_bases in bases_strategy(1, 6)) {
        let map = GeneCoordinateMap::new();
        let descriptor = format!("{}{}>{}", pos, ref_bases, alt_bases);
        let expected = format!("r.{}{}>{}", pos, ref_bases.to_lowercase(), alt_bases.to_lowercase());
        // Strand plays no part for positions inside the gene.
        for gene in ["rrs", "Rv3919c"] {
            let out = reformat_mutation_for_gene(&descriptor, "non_coding", gene, &map).unwrap();
            prop_assert_eq!(&out, &expected);
        }
    }

    #[test]
    fn prop_non_coding_upstream(pos in 1u32..1000, ref_bases in bases_strategy(1, 6), alt_bases in bases_strategy(1, 6)) {
        let map = GeneCoordinateMap::new();
        let descriptor = format!("-{}{}>{}", pos, ref_bases, alt_bases);

        let plus = reformat_mutation_for_gene(&descriptor, "non_coding", "inhA", &map).unwrap();
        prop_assert_eq!(plus, format!("c.-{}{}>{}", pos, ref_bases, alt_bases));

        let minus = reformat_mutation_for_gene(&descriptor, "non_coding", "Rv1482c", &map).unwrap();
        prop_assert_eq!(
            minus,
            format!("c.-{}{}>{}", pos, revcomp(&ref_bases).unwrap(), revcomp(&alt_bases).unwrap())
        );
    }

    #[test]
    fn prop_synonymous_is_verbatim(pos in -500i32..5000, ref_base in bases_strategy(1, 2), alt_base in bases_strategy(1, 2)) {
        let map = GeneCoordinateMap::new();
        let ctx = GeneContext::new("gyrA", &map);
        let descriptor = format!("{}{}>{}", pos, ref_base, alt_base);
        let out = reformat_mutation(&descriptor, "synonymous_variant", &ctx).unwrap();
        prop_assert_eq!(out, format!("c.{}", descriptor));
    }

    /// Descriptors no grammar accepts come back unchanged, and formatting
    /// the result again is a no-op.
    #[test]
    fn prop_identity_fallback(descriptor in unmatched_descriptor_strategy(), tag in tag_strategy()) {
        let map = GeneCoordinateMap::new();
        let ctx = GeneContext::new("rpoB", &map);
        let once = reformat_mutation(&descriptor, tag, &ctx).unwrap();
        prop_assert_eq!(&once, &descriptor);
        let twice = reformat_mutation(&once, tag, &ctx).unwrap();
        prop_assert_eq!(twice, once);
    }

    /// Frameshift rules never invent a coordinate for an unmapped position.
    #[test]
    fn prop_lookup_miss_is_an_error(chr_pos in 1i64..10_000_000, deleted in bases_strategy(1, 10), minus in any::<bool>()) {
        let map = GeneCoordinateMap::new();
        let gene = if minus { "Rv2043c" } else { "pncA" };
        let descriptor = format!("{}A{}>A", chr_pos, deleted);
        let err = reformat_mutation_for_gene(&descriptor, "frameshift_variant", gene, &map).unwrap_err();
        let is_miss = matches!(err, NomenclatureError::Lookup(LookupError::PositionNotFound { .. }));
        prop_assert!(is_miss, "unexpected error: {:?}", err);
    }

    /// A position no map can hold is still a lookup miss, never a pass-through.
    #[test]
    fn prop_wide_chromosome_position_is_a_lookup_miss(extra in "[0-9]{1,8}", insertion in any::<bool>(), minus in any::<bool>()) {
        let map = GeneCoordinateMap::new();
        let gene = if minus { "Rv2043c" } else { "pncA" };
        let chr_pos = format!("99999999999999999999{}", extra);
        let descriptor = if insertion { format!("{}A>AT", chr_pos) } else { format!("{}AT>A", chr_pos) };
        let err = reformat_mutation_for_gene(&descriptor, "frameshift_variant", gene, &map).unwrap_err();
        prop_assert_eq!(
            err,
            NomenclatureError::Lookup(LookupError::PositionOutOfRange {
                gene: gene.to_string(),
                position: chr_pos,
            })
        );
    }
}

#[test]
fn test_wide_positions_keep_their_digits() {
    let map = GeneCoordinateMap::new();
    assert_eq!(
        reformat_mutation_for_gene("99999999999999999999A>G", "non_coding", "rrs", &map).unwrap(),
        "r.99999999999999999999a>g"
    );
    assert_eq!(
        reformat_mutation_for_gene("00450S>00450L", "missense", "rpoB", &map).unwrap(),
        "p.Ser450Leu"
    );
}

#[test]
fn test_gene_position_overflow_fails_the_record() {
    let map: GeneCoordinateMap = [(100, i64::MAX)].into_iter().collect();
    assert_eq!(
        reformat_mutation_for_gene("100CA>C", "frameshift", "rpoB", &map),
        Err(NomenclatureError::CoordinateOverflow { gene: "rpoB".to_string(), position: i64::MAX })
    );
}

#[test]
fn test_documented_examples() {
    let map = GeneCoordinateMap::new();
    let ctx = GeneContext::new("rpoB", &map);
    assert_eq!(reformat_mutation("450S>450L", "missense", &ctx).unwrap(), "p.Ser450Leu");
    assert_eq!(reformat_mutation("1A>1*", "stop_gained", &ctx).unwrap(), "p.Ala1*");
    assert_eq!(
        reformat_mutation("Chromosome_3073680_3074470", "large_deletion", &ctx).unwrap(),
        "Chromosome:g.3073680_3074470del"
    );

    let deletion_map: GeneCoordinateMap = [(761100, 500)].into_iter().collect();
    assert_eq!(
        reformat_mutation_for_gene("761100CAATTCATGG>C", "frameshift", "rpoB", &deletion_map).unwrap(),
        "c.501_509del"
    );

    let insertion_map: GeneCoordinateMap = [(1918692, 200)].into_iter().collect();
    assert_eq!(
        reformat_mutation_for_gene("1918692G>GTT", "frameshift", "embB", &insertion_map).unwrap(),
        "c.200_201insTT"
    );

    assert_eq!(
        reformat_mutation_for_gene("-10A>G", "non_coding", "inhA", &map).unwrap(),
        "c.-10A>G"
    );
    assert_eq!(
        reformat_mutation_for_gene("-10A>G", "non_coding", "Rv1482c", &map).unwrap(),
        "c.-10T>C"
    );
}

/// Synonymous descriptors are not reparsed: whatever surrounds the matched
/// change is carried into the output as-is.
#[test]
fn test_synonymous_quirk_keeps_surrounding_text() {
    let map = GeneCoordinateMap::new();
    let ctx = GeneContext::new("gyrA", &map);
    assert_eq!(
        reformat_mutation("x-12C>T (silent)", "synonymous", &ctx).unwrap(),
        "c.x-12C>T (silent)"
    );
    assert_eq!(reformat_mutation("-C>T", "synonymous", &ctx).unwrap(), "c.-C>T");
}

#[test]
fn test_unknown_residue_is_surfaced() {
    let map = GeneCoordinateMap::new();
    let ctx = GeneContext::new("rpoB", &map);
    assert_eq!(
        reformat_mutation("450X>450L", "missense", &ctx),
        Err(NomenclatureError::UnknownResidue('X'))
    );
}

#[test]
fn test_explicit_strand_overrides_suffix() {
    let map = GeneCoordinateMap::new();
    let ctx = GeneContext::with_strand("inhA", Strand::Minus, &map);
    assert_eq!(reformat_mutation("-10A>G", "non_coding", &ctx).unwrap(), "c.-10T>C");
}
