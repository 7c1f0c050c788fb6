//! Core nomenclature translation
//!
//! This module contains the rule classifier, the per-rule string
//! construction, strand handling and the coordinate lookup capability.

pub mod amino;
mod classify;
pub mod dna;
mod error;
pub mod format;
mod gene;
mod mapper;

pub use classify::{
    applicable_rules, classify_and_format, reformat_mutation, reformat_mutation_for_gene,
    Classification, VariantRule,
};
pub use error::{
    CoordinateTableError, CoordinateTableResult, LookupError, NomenclatureError,
    NomenclatureResult, Result, VariantTableError, VariantTableResult, VarnomenError,
};
pub use gene::{GeneContext, Strand};
pub use mapper::{resolve, CoordinateLookup, GeneCoordinateMap};
