//! DNA sequence utilities
//!
//! Reverse complement over the strict upper-case alphabet `A C G T N`.
//! Anything else in an allele is treated as corrupted upstream data.

use crate::core::error::NomenclatureError;

/// Complement a single DNA base
///
/// Returns `None` for anything outside `A C G T N`, including lower case.
#[inline]
pub fn complement_base(base: u8) -> Option<u8> {
    match base {
        b'A' => Some(b'T'),
        b'T' => Some(b'A'),
        b'G' => Some(b'C'),
        b'C' => Some(b'G'),
        b'N' => Some(b'N'),
        _ => None,
    }
}

/// Compute the reverse complement of a DNA sequence
///
/// # Arguments
/// * `seq` - DNA sequence over `A C G T N`
///
/// # Returns
/// Reverse complement as a new String, or `InvalidBase` naming the first
/// offending character (offset counted in the input).
///
/// # Examples
/// ```
/// use varnomen::core::dna::revcomp;
///
/// assert_eq!(revcomp("AATTGGCC").unwrap(), "GGCCAATT");
/// assert_eq!(revcomp("ACGT").unwrap(), "ACGT");
/// assert_eq!(revcomp("").unwrap(), "");
/// assert!(revcomp("ACGX").is_err());
/// ```
pub fn revcomp(seq: &str) -> Result<String, NomenclatureError> {
    let mut out = String::with_capacity(seq.len());
    for (position, ch) in seq.char_indices().rev() {
        let base = u8::try_from(ch)
            .ok()
            .and_then(complement_base)
            .ok_or(NomenclatureError::InvalidBase { base: ch, position })?;
        out.push(base as char);
    }
    Ok(out)
}

/// Check if a string is a valid sequence for [`revcomp`]
///
/// # Examples
/// ```
/// use varnomen::core::dna::is_dna;
///
/// assert!(is_dna("ATGCN"));
/// assert!(!is_dna("atgc"));
/// assert!(is_dna(""));
/// ```
pub fn is_dna(seq: &str) -> bool {
    seq.bytes().all(|b| complement_base(b).is_some())
}
