//! Sheet ingestion pipeline
//!
//! Turns the raw character-delimited catalog export into aggregated
//! equipment records: parse rows, normalize them into item drafts, resolve
//! images against the folder manifest, then collapse numbered duplicate
//! units into counted records.

pub mod aggregate;
pub mod images;
pub mod normalize;
pub mod parser;

pub use aggregate::aggregate;
pub use images::resolve_image;
pub use normalize::normalize_rows;
pub use parser::parse_delimited;
