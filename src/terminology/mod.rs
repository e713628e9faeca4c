/*!
 * Terminology (glossary) handling.
 *
 * - `store`: loading and lookup of the read-only term mapping
 * - `export`: JSON/CSV export and the sample glossary
 */

pub use self::export::{ExportFormat, TermListing, export_terminology, save_sample_terminology};
pub use self::store::{Term, TerminologyStore};

pub mod export;
pub mod store;
