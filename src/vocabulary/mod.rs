//! Controlled construction vocabulary: canonical terms, synonym folding,
//! unit conversion, and persistence.
//!
//! The vocabulary is the authority every other layer normalizes against: a
//! term table keyed by canonical name, a many-to-one surface-form index
//! (synonyms, abbreviations, and canonical names, case- and
//! separator-insensitive), per-category listings sorted for deterministic
//! output, and direct unit-conversion factors on unit terms.
//!
//! Stores are built once (seed table or persisted export) and treated as
//! read-only by analyzers; swapping vocabularies means constructing a new
//! store and replacing the shared reference.

mod seed;
mod store;
mod types;

pub use store::{fold_surface_form, TermRecord, VocabularyExport, VocabularyStore};
pub use types::{TermCategory, VocabularyTerm};
