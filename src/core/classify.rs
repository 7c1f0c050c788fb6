//! Variant classification and rule dispatch
//!
//! The variant-class tag selects formatting rules by substring match, in a
//! fixed order. Tags are free text from the upstream annotator
//! (`frameshift_variant&stop_gained`), so several rules may apply to one
//! tag. Each applicable rule is tried in turn; the first one that accepts
//! the descriptor wins. When none does, the raw descriptor is reported
//! unchanged.

use crate::core::error::NomenclatureError;
use crate::core::format;
use crate::core::gene::GeneContext;
use crate::core::mapper::CoordinateLookup;
use log::debug;

/// Formatting rule, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantRule {
    /// `large_deletion` ⇒ `Chromosome:g.S_Edel`
    LargeDeletion,
    /// `missense` / `start_lost` / `stop_gained` ⇒ `p.RefNAlt`
    Substitution,
    /// `frame` with a longer reference ⇒ `c.S_Edel`
    FrameshiftDeletion,
    /// `frame` with a longer alternate ⇒ `c.S_EinsBASES`
    FrameshiftInsertion,
    /// `non_coding` at a gene position ⇒ `r.Nref>alt`
    NonCodingForward,
    /// `non_coding` upstream of the gene ⇒ `c.-NREF>ALT`
    NonCodingUpstream,
    /// `synonymous` ⇒ `c.<descriptor>`
    Synonymous,
}

const SUBSTITUTION_TAGS: [&str; 3] = ["missense", "start_lost", "stop_gained"];

impl VariantRule {
    /// All rules in the order they are tried
    pub const ORDER: [VariantRule; 7] = [
        VariantRule::LargeDeletion,
        VariantRule::Substitution,
        VariantRule::FrameshiftDeletion,
        VariantRule::FrameshiftInsertion,
        VariantRule::NonCodingForward,
        VariantRule::NonCodingUpstream,
        VariantRule::Synonymous,
    ];

    /// Whether a variant-class tag selects this rule
    ///
    /// # Examples
    /// ```
    /// use varnomen::core::VariantRule;
    /// assert!(VariantRule::Substitution.matches_tag("missense_variant"));
    /// assert!(VariantRule::FrameshiftInsertion.matches_tag("frameshift_variant"));
    /// assert!(!VariantRule::Synonymous.matches_tag("missense_variant"));
    /// ```
    pub fn matches_tag(&self, tag: &str) -> bool {
        match self {
            VariantRule::LargeDeletion => tag.contains("large_deletion"),
            VariantRule::Substitution => SUBSTITUTION_TAGS.iter().any(|t| tag.contains(t)),
            VariantRule::FrameshiftDeletion | VariantRule::FrameshiftInsertion => {
                tag.contains("frame")
            }
            VariantRule::NonCodingForward | VariantRule::NonCodingUpstream => {
                tag.contains("non_coding")
            }
            VariantRule::Synonymous => tag.contains("synonymous"),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            VariantRule::LargeDeletion => "large_deletion",
            VariantRule::Substitution => "substitution",
            VariantRule::FrameshiftDeletion => "frameshift_deletion",
            VariantRule::FrameshiftInsertion => "frameshift_insertion",
            VariantRule::NonCodingForward => "non_coding_forward",
            VariantRule::NonCodingUpstream => "non_coding_upstream",
            VariantRule::Synonymous => "synonymous",
        }
    }

    /// Run the rule against a descriptor
    pub fn apply<M: CoordinateLookup + ?Sized>(
        &self,
        descriptor: &str,
        ctx: &GeneContext<'_, M>,
    ) -> format::RuleResult {
        match self {
            VariantRule::LargeDeletion => format::large_deletion(descriptor),
            VariantRule::Substitution => format::substitution(descriptor),
            VariantRule::FrameshiftDeletion => format::frameshift_deletion(descriptor, ctx),
            VariantRule::FrameshiftInsertion => format::frameshift_insertion(descriptor, ctx),
            VariantRule::NonCodingForward => format::non_coding_forward(descriptor),
            VariantRule::NonCodingUpstream => format::non_coding_upstream(descriptor, ctx),
            VariantRule::Synonymous => format::synonymous(descriptor),
        }
    }
}

impl std::fmt::Display for VariantRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Rules selected by a tag, in evaluation order
pub fn applicable_rules(tag: &str) -> impl Iterator<Item = VariantRule> + '_ {
    VariantRule::ORDER
        .into_iter()
        .filter(move |rule| rule.matches_tag(tag))
}

/// Result of classifying a descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// A rule accepted the descriptor
    Formatted {
        nomenclature: String,
        rule: VariantRule,
    },
    /// No rule accepted the descriptor
    Unchanged,
}

impl Classification {
    /// Nomenclature to report, falling back to the raw descriptor
    pub fn into_nomenclature(self, descriptor: &str) -> String {
        match self {
            Classification::Formatted { nomenclature, .. } => nomenclature,
            Classification::Unchanged => descriptor.to_string(),
        }
    }

    pub fn rule(&self) -> Option<VariantRule> {
        match self {
            Classification::Formatted { rule, .. } => Some(*rule),
            Classification::Unchanged => None,
        }
    }
}

/// Try each applicable rule in order and report which one accepted
pub fn classify_and_format<M: CoordinateLookup + ?Sized>(
    descriptor: &str,
    tag: &str,
    ctx: &GeneContext<'_, M>,
) -> Result<Classification, NomenclatureError> {
    for rule in applicable_rules(tag) {
        if let Some(nomenclature) = rule.apply(descriptor, ctx)? {
            return Ok(Classification::Formatted { nomenclature, rule });
        }
    }
    debug!(
        "No rule accepted '{}' (tag '{}', gene {}); keeping it unchanged",
        descriptor,
        tag,
        ctx.gene_id()
    );
    Ok(Classification::Unchanged)
}

/// Translate one descriptor into nomenclature
///
/// Descriptors that no rule accepts come back unchanged. Errors are
/// reserved for coordinate misses and letters outside the supported
/// alphabets.
///
/// # Examples
/// ```
/// use varnomen::core::{reformat_mutation, GeneContext, GeneCoordinateMap};
///
/// let map: GeneCoordinateMap = [(1918692, 200)].into_iter().collect();
/// let ctx = GeneContext::new("embB", &map);
/// assert_eq!(reformat_mutation("1918692G>GTT", "frameshift", &ctx).unwrap(), "c.200_201insTT");
/// assert_eq!(reformat_mutation("450S>450L", "missense", &ctx).unwrap(), "p.Ser450Leu");
/// assert_eq!(reformat_mutation("weird", "missense", &ctx).unwrap(), "weird");
/// ```
pub fn reformat_mutation<M: CoordinateLookup + ?Sized>(
    descriptor: &str,
    tag: &str,
    ctx: &GeneContext<'_, M>,
) -> Result<String, NomenclatureError> {
    Ok(classify_and_format(descriptor, tag, ctx)?.into_nomenclature(descriptor))
}

/// [`reformat_mutation`] for a bare gene identifier, strand taken from its suffix
pub fn reformat_mutation_for_gene<M: CoordinateLookup + ?Sized>(
    descriptor: &str,
    tag: &str,
    gene_id: &str,
    map: &M,
) -> Result<String, NomenclatureError> {
    reformat_mutation(descriptor, tag, &GeneContext::new(gene_id, map))
}
