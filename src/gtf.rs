//! Gene-model (GTF) files.
//!
//! A merged gene-model file produced by transcript assembly contains both
//! transcripts matching a reference annotation (which carry a `ref_gene_id`
//! attribute) and novel transcripts. [`Summary`] counts the two groups.

pub mod attributes;
pub mod line;
pub mod reader;
pub mod record;
pub mod strand;
pub mod summary;

pub use attributes::Attributes;
pub use line::Line;
pub use reader::Reader;
pub use record::Record;
pub use strand::Strand;
pub use summary::Summary;
