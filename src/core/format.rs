//! Nomenclature string construction
//!
//! One function per formatting rule. Every rule first matches the raw
//! descriptor against its grammar:
//! - `Ok(None)` means the descriptor has a different shape and the rule
//!   declines, so the caller moves on to the next rule
//! - `Ok(Some(_))` is the finished nomenclature
//! - `Err(_)` is a hard failure (coordinate miss, unknown residue or base)
//!
//! Coordinates on the minus strand run opposite to the chromosome, so the
//! coding rules swap which end of the allele they anchor on and
//! reverse-complement inserted bases.

use crate::core::amino::three_letter;
use crate::core::dna::revcomp;
use crate::core::error::{LookupError, NomenclatureError};
use crate::core::gene::{GeneContext, Strand};
use crate::core::mapper::{resolve, CoordinateLookup};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Outcome of a single rule
pub type RuleResult = Result<Option<String>, NomenclatureError>;

// Chromosome_3073680_3074470
static LARGE_DELETION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)_([0-9]+)").expect("valid large deletion regex"));

// 450S>450L
static SUBSTITUTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]+)([A-Z*])>([0-9]+)([A-Z*])").expect("valid substitution regex")
});

// 761100CAATTCATGG>C
static FRAMESHIFT_DELETION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]+)([A-Z][A-Z]+)>([A-Z])").expect("valid frameshift deletion regex")
});

// 1918692G>GTT
static FRAMESHIFT_INSERTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]+)([A-Z])>([A-Z][A-Z]+)").expect("valid frameshift insertion regex")
});

// Both non-coding grammars must match at the start of the descriptor.
static NON_CODING_FORWARD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+)([A-Z]+)>([A-Z]+)").expect("valid non-coding regex")
});

static NON_CODING_UPSTREAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-[0-9]+)([A-Z]+)>([A-Z]+)").expect("valid upstream non-coding regex")
});

static SYNONYMOUS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([-0-9]+)([A-Z])>([A-Z])").expect("valid synonymous regex"));

#[inline]
fn group<'t>(caps: &Captures<'t>, i: usize) -> &'t str {
    caps.get(i).map_or("", |m| m.as_str())
}

/// Digit run printed as an integer: leading zeros dropped, no width limit
fn trim_zeros(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() && !digits.is_empty() {
        "0"
    } else {
        trimmed
    }
}

/// Optionally negative digit run printed as an integer (`-015` ⇒ `-15`)
fn signed_int_text(text: &str) -> String {
    match text.strip_prefix('-') {
        Some(digits) => match trim_zeros(digits) {
            "0" => "0".to_string(),
            magnitude => format!("-{}", magnitude),
        },
        None => trim_zeros(text).to_string(),
    }
}

/// Chromosome position capture
///
/// A digit run beyond the i64 range cannot be a key of any coordinate map,
/// so it is reported as a lookup miss.
fn chrom_position(caps: &Captures<'_>, gene: &str) -> Result<i64, LookupError> {
    let digits = group(caps, 1);
    digits.parse().map_err(|_| LookupError::PositionOutOfRange {
        gene: gene.to_string(),
        position: trim_zeros(digits).to_string(),
    })
}

/// Gene position moved by `by`, failing instead of wrapping
fn shift(gene: &str, gene_pos: i64, by: i64) -> Result<i64, NomenclatureError> {
    gene_pos
        .checked_add(by)
        .ok_or_else(|| NomenclatureError::CoordinateOverflow {
            gene: gene.to_string(),
            position: gene_pos,
        })
}

/// First (and only) character of a single-letter capture
#[inline]
fn char_group(caps: &Captures<'_>, i: usize) -> char {
    group(caps, i).chars().next().unwrap_or_default()
}

/// `<start>_<end>` anywhere in the descriptor ⇒ `Chromosome:g.<start>_<end>del`
///
/// Strand-agnostic; both numbers are echoed exactly as written.
pub fn large_deletion(descriptor: &str) -> RuleResult {
    Ok(LARGE_DELETION.captures(descriptor).map(|caps| {
        format!("Chromosome:g.{}_{}del", group(&caps, 1), group(&caps, 2))
    }))
}

/// `<pos><ref>><pos><alt>` ⇒ `p.<Ref><pos><Alt>`
///
/// The codon number comes from the first position; the second is ignored.
pub fn substitution(descriptor: &str) -> RuleResult {
    let Some(caps) = SUBSTITUTION.captures(descriptor) else {
        return Ok(None);
    };
    let codon = trim_zeros(group(&caps, 1));
    let ref_aa = three_letter(char_group(&caps, 2))?;
    let alt_aa = three_letter(char_group(&caps, 4))?;
    Ok(Some(format!("p.{}{}{}", ref_aa, codon, alt_aa)))
}

/// `<chrPos><ref(>=2)>><alt(1)>` ⇒ `c.<start>_<end>del`
pub fn frameshift_deletion<M: CoordinateLookup + ?Sized>(
    descriptor: &str,
    ctx: &GeneContext<'_, M>,
) -> RuleResult {
    let Some(caps) = FRAMESHIFT_DELETION.captures(descriptor) else {
        return Ok(None);
    };
    let gene = ctx.gene_id();
    let chr_pos = chrom_position(&caps, gene)?;
    let del_len = (group(&caps, 2).len() - group(&caps, 3).len()) as i64;

    let (start, end) = match ctx.strand() {
        Strand::Plus => {
            let start = shift(gene, resolve(ctx.map(), gene, chr_pos)?, 1)?;
            (start, shift(gene, start, del_len - 1)?)
        }
        Strand::Minus => {
            // The anchor on the gene strand sits just past the deleted bases.
            let far = chr_pos.checked_add(del_len).ok_or_else(|| {
                LookupError::PositionOutOfRange {
                    gene: gene.to_string(),
                    position: (i128::from(chr_pos) + i128::from(del_len)).to_string(),
                }
            })?;
            let start = resolve(ctx.map(), gene, far)?;
            (start, shift(gene, resolve(ctx.map(), gene, chr_pos)?, -1)?)
        }
    };
    Ok(Some(format!("c.{}_{}del", start, end)))
}

/// `<chrPos><ref(1)>><alt(>=2)>` ⇒ `c.<start>_<end>ins<bases>`
///
/// The first alternate base is the anchor shared with the reference and
/// is not part of the insertion.
pub fn frameshift_insertion<M: CoordinateLookup + ?Sized>(
    descriptor: &str,
    ctx: &GeneContext<'_, M>,
) -> RuleResult {
    let Some(caps) = FRAMESHIFT_INSERTION.captures(descriptor) else {
        return Ok(None);
    };
    let gene = ctx.gene_id();
    let chr_pos = chrom_position(&caps, gene)?;
    let inserted = &group(&caps, 3)[1..];
    let gene_pos = resolve(ctx.map(), gene, chr_pos)?;

    let formatted = match ctx.strand() {
        Strand::Plus => format!("c.{}_{}ins{}", gene_pos, shift(gene, gene_pos, 1)?, inserted),
        Strand::Minus => format!(
            "c.{}_{}ins{}",
            shift(gene, gene_pos, -1)?,
            gene_pos,
            revcomp(inserted)?
        ),
    };
    Ok(Some(formatted))
}

/// `<genePos><ref>><alt>` at the start of the descriptor ⇒ `r.<pos><ref>><alt>` in lower case
pub fn non_coding_forward(descriptor: &str) -> RuleResult {
    let Some(caps) = NON_CODING_FORWARD.captures(descriptor) else {
        return Ok(None);
    };
    Ok(Some(format!(
        "r.{}{}>{}",
        trim_zeros(group(&caps, 1)),
        group(&caps, 2).to_lowercase(),
        group(&caps, 3).to_lowercase()
    )))
}

/// `-<genePos><ref>><alt>` at the start of the descriptor ⇒ `c.-<pos><ref>><alt>`
///
/// Alleles are reported on the gene's strand, so both are
/// reverse-complemented for minus-strand genes. The position is already
/// gene-relative and passes through unchanged.
pub fn non_coding_upstream<M: CoordinateLookup + ?Sized>(
    descriptor: &str,
    ctx: &GeneContext<'_, M>,
) -> RuleResult {
    let Some(caps) = NON_CODING_UPSTREAM.captures(descriptor) else {
        return Ok(None);
    };
    let gene_pos = signed_int_text(group(&caps, 1));
    let (ref_bases, alt_bases) = (group(&caps, 2), group(&caps, 3));

    let formatted = match ctx.strand() {
        Strand::Plus => format!("c.{}{}>{}", gene_pos, ref_bases, alt_bases),
        Strand::Minus => format!(
            "c.{}{}>{}",
            gene_pos,
            revcomp(ref_bases)?,
            revcomp(alt_bases)?
        ),
    };
    Ok(Some(formatted))
}

/// `<pos><ref>><alt>` ⇒ `c.<descriptor>`
///
/// The grammar only gates the rule; the descriptor itself is embedded
/// verbatim, trailing text and all.
pub fn synonymous(descriptor: &str) -> RuleResult {
    Ok(SYNONYMOUS
        .is_match(descriptor)
        .then(|| format!("c.{}", descriptor)))
}
