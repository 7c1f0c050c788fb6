//! Chromosome to gene-relative coordinate lookup
//!
//! The formatter never builds coordinate maps; it only reads them through
//! [`CoordinateLookup`]. Maps must be fully populated before a batch starts
//! and are shared read-only between worker threads.

use crate::core::error::LookupError;
use std::collections::{BTreeMap, HashMap};

/// Read-only chromosome position → gene position lookup
pub trait CoordinateLookup: Sync {
    /// Gene-relative position of a chromosome position, if known
    fn lookup(&self, chrom_pos: i64) -> Option<i64>;
}

impl CoordinateLookup for HashMap<i64, i64> {
    fn lookup(&self, chrom_pos: i64) -> Option<i64> {
        self.get(&chrom_pos).copied()
    }
}

impl CoordinateLookup for BTreeMap<i64, i64> {
    fn lookup(&self, chrom_pos: i64) -> Option<i64> {
        self.get(&chrom_pos).copied()
    }
}

impl<T: CoordinateLookup + ?Sized> CoordinateLookup for &T {
    fn lookup(&self, chrom_pos: i64) -> Option<i64> {
        (**self).lookup(chrom_pos)
    }
}

/// Look up a position, turning a miss into a [`LookupError`]
///
/// # Examples
/// ```
/// use varnomen::core::{resolve, GeneCoordinateMap};
///
/// let map: GeneCoordinateMap = [(761100, 500)].into_iter().collect();
/// assert_eq!(resolve(&map, "Rv0667", 761100).unwrap(), 500);
/// assert!(resolve(&map, "Rv0667", 761101).is_err());
/// ```
pub fn resolve<M: CoordinateLookup + ?Sized>(
    map: &M,
    gene: &str,
    chrom_pos: i64,
) -> Result<i64, LookupError> {
    map.lookup(chrom_pos).ok_or_else(|| LookupError::PositionNotFound {
        gene: gene.to_string(),
        position: chrom_pos,
    })
}

/// Coordinate map of a single gene
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneCoordinateMap {
    positions: HashMap<i64, i64>,
}

impl GeneCoordinateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a position pair, returning the previous gene position if any
    pub fn insert(&mut self, chrom_pos: i64, gene_pos: i64) -> Option<i64> {
        self.positions.insert(chrom_pos, gene_pos)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl FromIterator<(i64, i64)> for GeneCoordinateMap {
    fn from_iter<I: IntoIterator<Item = (i64, i64)>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

impl CoordinateLookup for GeneCoordinateMap {
    #[inline]
    fn lookup(&self, chrom_pos: i64) -> Option<i64> {
        self.positions.get(&chrom_pos).copied()
    }
}
