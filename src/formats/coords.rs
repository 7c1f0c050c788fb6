//! Gene coordinate table adapter
//!
//! Loads precomputed chromosome → gene-relative position tables into one
//! [`GeneCoordinateMap`] per gene. The expected layout is tab-separated:
//!
//! ```text
//! #gene     chrom_pos  gene_pos
//! Rv0667    759807     1
//! Rv0667    759808     2
//! ```
//!
//! Columns past the third are ignored. Input may be plain, gzip or bzip2.

use crate::core::{CoordinateTableError, CoordinateTableResult, GeneContext, GeneCoordinateMap};
use log::{debug, info};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Read buffer for table files (128KB)
const BUFFER_SIZE: usize = 128 * 1024;

/// Compression format of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Plain text (uncompressed)
    Plain,
    /// Gzip compressed (.gz)
    Gzip,
    /// Bzip2 compressed (.bz2)
    Bzip2,
}

/// Detect compression format from file path and/or content
pub fn detect_compression(path: &Path) -> std::io::Result<CompressionFormat> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    if extension == "gz" {
        return Ok(CompressionFormat::Gzip);
    }
    if extension == "bz2" {
        return Ok(CompressionFormat::Bzip2);
    }

    let mut file = File::open(path)?;
    let mut magic = [0u8; 3];
    let bytes_read = file.read(&mut magic)?;

    if bytes_read >= 2 && magic[0] == 0x1f && magic[1] == 0x8b {
        return Ok(CompressionFormat::Gzip);
    }
    // BZ2 magic: "BZh" (0x42 0x5a 0x68)
    if bytes_read >= 3 && magic[0] == 0x42 && magic[1] == 0x5a && magic[2] == 0x68 {
        return Ok(CompressionFormat::Bzip2);
    }

    Ok(CompressionFormat::Plain)
}

/// Open a possibly compressed text file for line reading
pub fn open_text(path: &Path) -> std::io::Result<Box<dyn BufRead + Send>> {
    let format = detect_compression(path)?;
    let file = File::open(path)?;
    let reader: Box<dyn BufRead + Send> = match format {
        CompressionFormat::Gzip => Box::new(BufReader::with_capacity(
            BUFFER_SIZE,
            flate2::read::MultiGzDecoder::new(file),
        )),
        CompressionFormat::Bzip2 => Box::new(BufReader::with_capacity(
            BUFFER_SIZE,
            bzip2::read::BzDecoder::new(file),
        )),
        CompressionFormat::Plain => Box::new(BufReader::with_capacity(BUFFER_SIZE, file)),
    };
    Ok(reader)
}

/// Coordinate maps for every gene in a table
#[derive(Debug, Clone, Default)]
pub struct CoordinateTable {
    genes: HashMap<String, GeneCoordinateMap>,
}

impl CoordinateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a table from a path (compression auto-detected)
    pub fn from_file<P: AsRef<Path>>(path: P) -> CoordinateTableResult<Self> {
        parse_coordinate_file(path.as_ref())
    }

    /// Record one position pair, returning the previous gene position if any
    pub fn insert(&mut self, gene_id: &str, chrom_pos: i64, gene_pos: i64) -> Option<i64> {
        match self.genes.get_mut(gene_id) {
            Some(map) => map.insert(chrom_pos, gene_pos),
            None => {
                let mut map = GeneCoordinateMap::new();
                map.insert(chrom_pos, gene_pos);
                self.genes.insert(gene_id.to_string(), map);
                None
            }
        }
    }

    /// Coordinate map of one gene
    pub fn gene(&self, gene_id: &str) -> Option<&GeneCoordinateMap> {
        self.genes.get(gene_id)
    }

    /// Gene context with the strand taken from the identifier suffix
    pub fn context<'a>(&'a self, gene_id: &'a str) -> Option<GeneContext<'a, GeneCoordinateMap>> {
        self.gene(gene_id).map(|map| GeneContext::new(gene_id, map))
    }

    /// Gene identifiers present in the table (unordered)
    pub fn genes(&self) -> impl Iterator<Item = &str> {
        self.genes.keys().map(String::as_str)
    }

    /// Number of genes
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Total number of position pairs over all genes
    pub fn position_count(&self) -> usize {
        self.genes.values().map(GeneCoordinateMap::len).sum()
    }
}

/// Parse a coordinate table from a path
pub fn parse_coordinate_file(path: &Path) -> CoordinateTableResult<CoordinateTable> {
    if !path.exists() {
        return Err(CoordinateTableError::FileNotFound(path.to_path_buf()));
    }
    let table = parse_coordinate_reader(open_text(path)?)?;
    info!(
        "Loaded {} genes ({} positions) from {}",
        table.len(),
        table.position_count(),
        path.display()
    );
    Ok(table)
}

/// Parse a coordinate table from bytes (for testing)
pub fn parse_coordinate_bytes(data: &[u8]) -> CoordinateTableResult<CoordinateTable> {
    parse_coordinate_reader(BufReader::new(data))
}

/// Parse a coordinate table from any buffered reader
pub fn parse_coordinate_reader<R: BufRead>(reader: R) -> CoordinateTableResult<CoordinateTable> {
    let mut table = CoordinateTable::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_num = idx + 1;
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split('\t');
        let (gene, chrom_pos, gene_pos) = match (fields.next(), fields.next(), fields.next()) {
            (Some(g), Some(c), Some(p)) if !g.is_empty() => (g, c, p),
            _ => {
                return Err(CoordinateTableError::InvalidLine {
                    line: line_num,
                    message: "expected gene, chromosome position and gene position".to_string(),
                })
            }
        };

        let chrom_pos = parse_position(chrom_pos, line_num)?;
        let gene_pos = parse_position(gene_pos, line_num)?;

        if let Some(previous) = table.insert(gene, chrom_pos, gene_pos) {
            debug!(
                "Line {}: {} position {} redefined ({} -> {})",
                line_num, gene, chrom_pos, previous, gene_pos
            );
        }
    }

    Ok(table)
}

fn parse_position(value: &str, line: usize) -> CoordinateTableResult<i64> {
    value
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| CoordinateTableError::InvalidLine {
            line,
            message: format!("invalid position '{}': {}", value, e),
        })
}
