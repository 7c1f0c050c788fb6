//! Varnomen - HGVS-style nomenclature for annotated variants
//!
//! Turns the shorthand change descriptors emitted by a variant
//! caller/annotator (`450S>450L`, `761100CAATTCATGG>C`, `-10A>G`) into
//! `p.`, `c.`, `r.` and `g.` nomenclature strings for reports.
//!
//! # Features
//!
//! - Ordered, tag-driven rule selection with identity fallback
//! - Strand-aware chromosome → gene coordinate translation
//! - Batch conversion of variant tables with rayon
//! - Compressed coordinate tables (gzip, bzip2)
//!
//! # Example
//!
//! ```
//! use varnomen::{reformat_mutation, GeneContext, GeneCoordinateMap};
//!
//! let map: GeneCoordinateMap = [(761100, 500)].into_iter().collect();
//! let ctx = GeneContext::new("rpoB", &map);
//!
//! let hgvs = reformat_mutation("761100CAATTCATGG>C", "frameshift_variant", &ctx).unwrap();
//! assert_eq!(hgvs, "c.501_509del");
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use core::{
    applicable_rules, classify_and_format, reformat_mutation, reformat_mutation_for_gene,
    resolve, Classification, CoordinateLookup, GeneContext, GeneCoordinateMap, LookupError,
    NomenclatureError, Strand, VariantRule, VarnomenError,
};
pub use formats::{convert_variants, CoordinateTable, ConversionStats, ConvertOptions, VariantRecord};
