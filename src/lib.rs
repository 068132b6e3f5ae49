//! Annotation of predicted gene fusions with retained protein domains, fusion
//! peptide sequences and reading frame status.

pub mod error;

pub mod annotation;
pub mod cli;
pub mod codon;
pub mod config;
pub mod contig;
pub mod domains;
pub mod fasta;
pub mod fusions;
pub mod gff3;
pub mod index;
pub mod io;
pub mod peptide;
pub mod perf;
pub mod sequence;
pub mod strand;
