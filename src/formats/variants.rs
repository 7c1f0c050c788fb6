//! Variant table adapter
//!
//! Rewrites the `change` column of a tab-separated variant table into
//! HGVS-style nomenclature. The header row names the columns; `gene`,
//! `change` and `type` are required, everything else is passed through.
//!
//! A row that cannot be formatted (coordinate miss, unknown residue or
//! base) keeps its raw change in the output and is also copied to the
//! unformatted file with the reason appended. One bad row never stops the
//! batch.

use crate::core::{
    classify_and_format, Classification, GeneContext, GeneCoordinateMap, LookupError,
    NomenclatureError, NomenclatureResult, VariantTableError, VariantTableResult,
};
use crate::formats::coords::{open_text, CoordinateTable};
use log::{info, warn};
use rayon::prelude::*;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

/// Chunk size for parallel processing
const CHUNK_SIZE: usize = 10000;

/// One annotated variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRecord {
    pub gene: String,
    pub change: String,
    pub vartype: String,
}

impl VariantRecord {
    pub fn new(gene: impl Into<String>, change: impl Into<String>, vartype: impl Into<String>) -> Self {
        Self {
            gene: gene.into(),
            change: change.into(),
            vartype: vartype.into(),
        }
    }
}

/// Conversion statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub total: usize,
    pub formatted: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl ConversionStats {
    fn record(&mut self, outcome: &NomenclatureResult<Classification>) {
        self.total += 1;
        match outcome {
            Ok(Classification::Formatted { .. }) => self.formatted += 1,
            Ok(Classification::Unchanged) => self.unchanged += 1,
            Err(_) => self.failed += 1,
        }
    }

    fn merge(&mut self, other: &ConversionStats) {
        self.total += other.total;
        self.formatted += other.formatted;
        self.unchanged += other.unchanged;
        self.failed += other.failed;
    }
}

/// Batch conversion settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Worker threads (1 = sequential)
    pub threads: usize,
    /// Rows per parallel work unit
    pub chunk_size: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            threads: 1,
            chunk_size: CHUNK_SIZE,
        }
    }
}

/// Positions of the required columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantColumnIndices {
    pub gene: usize,
    pub change: usize,
    pub vartype: usize,
}

impl VariantColumnIndices {
    /// Parse column indices from header line
    pub fn from_header(header: &str) -> VariantTableResult<Self> {
        let columns: Vec<&str> = header.split('\t').map(str::trim).collect();

        let find_col = |name: &str| -> VariantTableResult<usize> {
            columns
                .iter()
                .position(|c| c.eq_ignore_ascii_case(name))
                .ok_or_else(|| VariantTableError::InvalidHeader(format!("missing column '{}'", name)))
        };

        Ok(Self {
            gene: find_col("gene")?,
            change: find_col("change")?,
            vartype: find_col("type")?,
        })
    }

    fn max_index(&self) -> usize {
        self.gene.max(self.change).max(self.vartype)
    }
}

/// Format one record against the coordinate table
///
/// Genes missing from the table are formatted with an empty map, so only
/// the coordinate-dependent rules fail for them.
pub fn reformat_record(
    record: &VariantRecord,
    table: &CoordinateTable,
) -> NomenclatureResult<Classification> {
    match table.context(&record.gene) {
        Some(ctx) => classify_and_format(&record.change, &record.vartype, &ctx),
        None => {
            let empty = GeneCoordinateMap::new();
            let ctx = GeneContext::new(&record.gene, &empty);
            classify_and_format(&record.change, &record.vartype, &ctx).map_err(|e| match e {
                NomenclatureError::Lookup(
                    LookupError::PositionNotFound { gene, .. }
                    | LookupError::PositionOutOfRange { gene, .. },
                ) => NomenclatureError::Lookup(LookupError::GeneNotFound(gene)),
                other => other,
            })
        }
    }
}

/// Format many records, in input order
///
/// Each record gets its own result; failures are not fatal to the rest.
pub fn reformat_records(
    records: &[VariantRecord],
    table: &CoordinateTable,
    threads: usize,
) -> Vec<NomenclatureResult<String>> {
    let format_one = |record: &VariantRecord| {
        reformat_record(record, table).map(|c| c.into_nomenclature(&record.change))
    };

    if threads <= 1 {
        return records.iter().map(format_one).collect();
    }

    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool.install(|| records.par_iter().map(format_one).collect()),
        Err(e) => {
            warn!("Failed to create thread pool ({}); formatting sequentially", e);
            records.iter().map(format_one).collect()
        }
    }
}

/// A data row after formatting
enum RowResult {
    /// Output line
    Done(String),
    /// Output line plus unformatted line
    Failed(String, String),
}

fn convert_row(
    line: &str,
    indices: &VariantColumnIndices,
    table: &CoordinateTable,
    stats: &mut ConversionStats,
) -> RowResult {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() <= indices.max_index() {
        stats.total += 1;
        stats.failed += 1;
        warn!("Skipping short row ({} fields): {}", fields.len(), line);
        return RowResult::Failed(
            line.to_string(),
            format!("{}\tmissing columns", line),
        );
    }

    let record = VariantRecord::new(
        fields[indices.gene],
        fields[indices.change],
        fields[indices.vartype],
    );
    let outcome = reformat_record(&record, table);
    stats.record(&outcome);

    match outcome {
        Ok(classification) => {
            let nomenclature = classification.into_nomenclature(&record.change);
            let formatted: Vec<&str> = fields
                .iter()
                .enumerate()
                .map(|(i, field)| if i == indices.change { nomenclature.as_str() } else { *field })
                .collect();
            RowResult::Done(formatted.join("\t"))
        }
        Err(e) => {
            warn!("{} {}: {}", record.gene, record.change, e);
            RowResult::Failed(line.to_string(), format!("{}\t{}", line, e))
        }
    }
}

/// Convert a variant table
///
/// # Arguments
/// * `input` - Input TSV path (plain, gzip or bzip2)
/// * `output` - Output TSV path
/// * `unformatted` - Output path for rows that could not be formatted
/// * `table` - Gene coordinate maps
/// * `options` - Threading settings
///
/// # Returns
/// Conversion statistics
pub fn convert_variants<P: AsRef<Path>>(
    input: P,
    output: P,
    unformatted: P,
    table: &CoordinateTable,
    options: ConvertOptions,
) -> VariantTableResult<ConversionStats> {
    let reader = open_text(input.as_ref())?;
    let mut lines = reader.lines();

    let mut output_file =
        BufWriter::with_capacity(128 * 1024, std::fs::File::create(output.as_ref())?);
    let mut unformatted_file =
        BufWriter::with_capacity(64 * 1024, std::fs::File::create(unformatted.as_ref())?);

    // Comment lines ahead of the header are passed through.
    let indices = loop {
        let line = lines
            .next()
            .ok_or_else(|| VariantTableError::InvalidHeader("empty input".to_string()))??;
        let line = line.trim_end();
        if line.starts_with('#') {
            writeln!(output_file, "{}", line)?;
            continue;
        }
        let indices = VariantColumnIndices::from_header(line)?;
        writeln!(output_file, "{}", line)?;
        writeln!(unformatted_file, "{}\treason", line)?;
        break indices;
    };

    let stats = if options.threads > 1 {
        convert_parallel(lines, &indices, table, options, &mut output_file, &mut unformatted_file)?
    } else {
        convert_sequential(lines, &indices, table, &mut output_file, &mut unformatted_file)?
    };

    output_file
        .flush()
        .map_err(|e| VariantTableError::WriteError(e.to_string()))?;
    unformatted_file
        .flush()
        .map_err(|e| VariantTableError::WriteError(e.to_string()))?;

    info!(
        "Converted {} variants: {} formatted, {} unchanged, {} failed",
        stats.total, stats.formatted, stats.unchanged, stats.failed
    );
    Ok(stats)
}

fn write_row<W: Write, U: Write>(row: RowResult, output: &mut W, unformatted: &mut U) -> std::io::Result<()> {
    match row {
        RowResult::Done(line) => writeln!(output, "{}", line),
        RowResult::Failed(line, reason) => {
            writeln!(output, "{}", line)?;
            writeln!(unformatted, "{}", reason)
        }
    }
}

fn convert_sequential<I, W, U>(
    lines: I,
    indices: &VariantColumnIndices,
    table: &CoordinateTable,
    output: &mut W,
    unformatted: &mut U,
) -> VariantTableResult<ConversionStats>
where
    I: Iterator<Item = std::io::Result<String>>,
    W: Write,
    U: Write,
{
    let mut stats = ConversionStats::default();
    for line in lines {
        let line = line?;
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') {
            writeln!(output, "{}", line)?;
            continue;
        }
        let row = convert_row(line, indices, table, &mut stats);
        write_row(row, output, unformatted)?;
    }
    Ok(stats)
}

/// Reads all rows into memory, formats chunks in parallel, then writes in
/// input order.
fn convert_parallel<I, W, U>(
    lines: I,
    indices: &VariantColumnIndices,
    table: &CoordinateTable,
    options: ConvertOptions,
    output: &mut W,
    unformatted: &mut U,
) -> VariantTableResult<ConversionStats>
where
    I: Iterator<Item = std::io::Result<String>>,
    W: Write,
    U: Write,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.threads)
        .build()
        .map_err(|e| {
            VariantTableError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to create thread pool: {}", e),
            ))
        })?;

    let data_lines = lines
        .map(|line| line.map(|l| l.trim_end_matches(['\r', '\n']).to_string()))
        .filter(|line| !matches!(line, Ok(l) if l.is_empty()))
        .collect::<std::io::Result<Vec<String>>>()?;

    let chunk_size = options.chunk_size.max(1);
    let results: Vec<(Vec<RowResult>, ConversionStats)> = pool.install(|| {
        data_lines
            .par_chunks(chunk_size)
            .map(|chunk| {
                let mut stats = ConversionStats::default();
                let rows = chunk
                    .iter()
                    .map(|line| {
                        if line.starts_with('#') {
                            RowResult::Done(line.clone())
                        } else {
                            convert_row(line, indices, table, &mut stats)
                        }
                    })
                    .collect();
                (rows, stats)
            })
            .collect()
    });

    let mut stats = ConversionStats::default();
    for (rows, chunk_stats) in results {
        stats.merge(&chunk_stats);
        for row in rows {
            write_row(row, output, unformatted)?;
        }
    }
    Ok(stats)
}
