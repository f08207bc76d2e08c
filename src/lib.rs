//! `heterogeneity` is a crate for measuring how much patients in a cohort
//! differ in the genomic loci they exhibit.
//!
//! The input is a delimited table with one row per locus, naming the patients
//! in which the locus was observed:
//!
//! ```text
//! locus,n_patients,patients
//! L1,2,"P1, P2"
//! L2,1,P1
//! L3,1,P2
//! ```
//!
//! From such a table, the crate builds two inverted [indices](index::Index)
//! (patient to loci and locus to patients) along with a [`Histogram`] of how
//! many loci are shared by how many patients. Two statistics are then derived:
//!
//! - The [pairwise Jaccard index](similarity::Similarity) between the locus
//!   sets of every unordered pair of patients, reduced to its mean, minimum,
//!   and maximum. Values close to 0 indicate a heterogeneous cohort.
//! - The [Shannon entropy](diversity::Diversity) of the histogram, measuring
//!   how evenly loci spread across sharing levels.
//!
//! Statistics that cannot be computed (fewer than two patients, or no loci at
//! all) are reported as such rather than as zeros.
//!
//! ## Analyzing a table
//!
//! Most users will want [`Analysis`], which runs every stage at once, and
//! [`report::Report`] to render the results.
//!
//! ```
//! use heterogeneity::Analysis;
//! use heterogeneity::index::CountPolicy;
//! use heterogeneity::report::Report;
//!
//! let data = b"locus,n_patients,patients\nL1,2,\"P1, P2\"\nL2,1,P1\nL3,1,P2\n";
//! let analysis = Analysis::try_from_reader(&data[..], CountPolicy::Trust)?;
//!
//! let summary = analysis.similarity().summary().unwrap();
//! assert!((summary.mean() - 1.0 / 3.0).abs() < 1e-12);
//! assert!((analysis.diversity().value() - 0.6365).abs() < 1e-4);
//!
//! println!("{}", Report::new("cohort.csv", &analysis));
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Gene-model files
//!
//! The [`gtf`] module provides a small reader for gene-model files and a
//! [`gtf::Summary`] of annotated versus novel transcripts.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod analysis;
pub mod batch;
pub mod diversity;
pub mod gtf;
pub mod histogram;
pub mod index;
pub mod reader;
pub mod record;
pub mod report;
pub mod similarity;

pub use analysis::Analysis;
pub use histogram::Histogram;

pub use self::reader::Reader;
