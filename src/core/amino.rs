//! Amino-acid code table
//!
//! Single-letter to three-letter residue codes. Stop (`*`) and gap (`-`)
//! map onto themselves.

use crate::core::error::NomenclatureError;

/// Every single-letter code the table knows about
pub const RESIDUES: [char; 22] = [
    'A', 'R', 'N', 'D', 'C', 'Q', 'E', 'G', 'H', 'I', 'L', 'K', 'M', 'F', 'P', 'S', 'T', 'W',
    'Y', 'V', '*', '-',
];

/// Three-letter code for a single-letter residue
///
/// # Examples
/// ```
/// use varnomen::core::amino::three_letter;
///
/// assert_eq!(three_letter('S').unwrap(), "Ser");
/// assert_eq!(three_letter('*').unwrap(), "*");
/// assert!(three_letter('X').is_err());
/// ```
pub fn three_letter(code: char) -> Result<&'static str, NomenclatureError> {
    let long = match code {
        'A' => "Ala",
        'R' => "Arg",
        'N' => "Asn",
        'D' => "Asp",
        'C' => "Cys",
        'Q' => "Gln",
        'E' => "Glu",
        'G' => "Gly",
        'H' => "His",
        'I' => "Ile",
        'L' => "Leu",
        'K' => "Lys",
        'M' => "Met",
        'F' => "Phe",
        'P' => "Pro",
        'S' => "Ser",
        'T' => "Thr",
        'W' => "Trp",
        'Y' => "Tyr",
        'V' => "Val",
        '*' => "*",
        '-' => "-",
        other => return Err(NomenclatureError::UnknownResidue(other)),
    };
    Ok(long)
}

/// Check whether a letter is in the table
#[inline]
pub fn is_known_residue(code: char) -> bool {
    three_letter(code).is_ok()
}
