//! Scanner Module Implementation
//!
//! Walks the export for text documents and extracts resource references.

pub mod reference_scanner;

pub use self::reference_scanner::{ReferenceScanner, ScanResult, REFERENCE_PATTERN};
