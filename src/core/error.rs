//! Error types for Varnomen
//!
//! Defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Varnomen operations
#[derive(Debug, Error)]
pub enum VarnomenError {
    /// Nomenclature formatting errors
    #[error("Nomenclature error: {0}")]
    Nomenclature(#[from] NomenclatureError),

    /// Coordinate table parsing errors
    #[error("Coordinate table error: {0}")]
    CoordinateTable(#[from] CoordinateTableError),

    /// Variant table conversion errors
    #[error("Variant table error: {0}")]
    VariantTable(#[from] VariantTableError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Hard failures of a single translation
///
/// A descriptor that simply does not fit its grammar is not an error; the
/// formatter hands the raw descriptor back instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NomenclatureError {
    /// Chromosome position missing from the gene's coordinate map
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Amino-acid letter outside the supported alphabet
    #[error("Unknown amino-acid residue '{0}'")]
    UnknownResidue(char),

    /// Nucleotide outside A/C/G/T/N
    #[error("Invalid base '{base}' at offset {position}")]
    InvalidBase { base: char, position: usize },

    /// Gene position arithmetic left the i64 range
    #[error("Coordinate overflow next to gene position {position} of {gene}")]
    CoordinateOverflow { gene: String, position: i64 },
}

/// Errors that can occur during coordinate lookup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Position absent from the coordinate map
    #[error("Chromosome position {position} not found in coordinate map of {gene}")]
    PositionNotFound { gene: String, position: i64 },

    /// Position too large for any coordinate map, kept as written
    #[error("Chromosome position {position} not found in coordinate map of {gene}")]
    PositionOutOfRange { gene: String, position: String },

    /// Gene absent from the coordinate table
    #[error("Gene not found in coordinate table: {0}")]
    GeneNotFound(String),
}

/// Errors that can occur while loading a coordinate table
#[derive(Debug, Error)]
pub enum CoordinateTableError {
    /// Malformed data line
    #[error("Invalid coordinate line at line {line}: {message}")]
    InvalidLine { line: usize, message: String },

    /// File not found
    #[error("Coordinate table not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error during parsing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during variant table conversion
#[derive(Debug, Error)]
pub enum VariantTableError {
    /// Header row missing or lacking a required column
    #[error("Invalid variant table header: {0}")]
    InvalidHeader(String),

    /// Output write error
    #[error("Failed to write output: {0}")]
    WriteError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Varnomen operations
pub type Result<T> = std::result::Result<T, VarnomenError>;

/// Result type alias for nomenclature formatting
pub type NomenclatureResult<T> = std::result::Result<T, NomenclatureError>;

/// Result type alias for coordinate table loading
pub type CoordinateTableResult<T> = std::result::Result<T, CoordinateTableError>;

/// Result type alias for variant table conversion
pub type VariantTableResult<T> = std::result::Result<T, VariantTableError>;
