//! File format adapters
//!
//! Adapters for the gene coordinate table and tab-separated variant tables.

pub mod coords;
pub mod variants;

pub use coords::{
    detect_compression, open_text, parse_coordinate_bytes, parse_coordinate_file,
    parse_coordinate_reader, CompressionFormat, CoordinateTable,
};
pub use variants::{
    convert_variants, reformat_record, reformat_records, ConversionStats, ConvertOptions,
    VariantColumnIndices, VariantRecord,
};
