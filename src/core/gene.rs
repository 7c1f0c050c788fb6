//! Strand and gene context
//!
//! Upstream annotators signal a minus-strand gene only through a trailing
//! `c` on the gene identifier (`Rv2043c`). That convention is read once
//! here and carried as an explicit [`Strand`] from then on.

use crate::core::mapper::CoordinateLookup;

/// Strand orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Strand {
    #[default]
    Plus,
    Minus,
}

impl Strand {
    /// Derive the strand from a gene identifier
    ///
    /// # Examples
    /// ```
    /// use varnomen::core::Strand;
    /// assert_eq!(Strand::from_gene_id("Rv2043c"), Strand::Minus);
    /// assert_eq!(Strand::from_gene_id("rpoB"), Strand::Plus);
    /// assert_eq!(Strand::from_gene_id("Rv0667C"), Strand::Plus);
    /// ```
    pub fn from_gene_id(gene_id: &str) -> Self {
        if gene_id.ends_with('c') {
            Strand::Minus
        } else {
            Strand::Plus
        }
    }

    /// Convert to char
    pub fn to_char(&self) -> char {
        match self {
            Strand::Plus => '+',
            Strand::Minus => '-',
        }
    }

    pub fn is_minus(&self) -> bool {
        matches!(self, Strand::Minus)
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A gene identifier, its strand and its coordinate map
#[derive(Debug)]
pub struct GeneContext<'a, M: CoordinateLookup + ?Sized> {
    gene_id: &'a str,
    strand: Strand,
    map: &'a M,
}

impl<M: CoordinateLookup + ?Sized> Clone for GeneContext<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: CoordinateLookup + ?Sized> Copy for GeneContext<'_, M> {}

impl<'a, M: CoordinateLookup + ?Sized> GeneContext<'a, M> {
    /// Build a context, taking the strand from the gene identifier suffix
    pub fn new(gene_id: &'a str, map: &'a M) -> Self {
        Self::with_strand(gene_id, Strand::from_gene_id(gene_id), map)
    }

    /// Build a context with a strand the caller already knows
    pub fn with_strand(gene_id: &'a str, strand: Strand, map: &'a M) -> Self {
        Self { gene_id, strand, map }
    }

    pub fn gene_id(&self) -> &'a str {
        self.gene_id
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    pub fn map(&self) -> &'a M {
        self.map
    }
}
