//! Reference scanner
//!
//! A best-effort lexical scan, not a parser: one combined pattern picks up
//! `src=`/`href=` attribute values and CSS `url(...)` arguments, everything else
//! in the document is ignored.

use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use crate::{
    config::PruneConfig,
    error::{Result, ScannerError},
    normalizer::normalize,
    types::{Reference, ReferenceSet},
    utils::{has_allowed_extension, read_text_lossy},
};

/// Attribute assignment (group 1) or `url(...)` call (group 2)
pub const REFERENCE_PATTERN: &str =
    r#"(?i)(?:src|href)\s*=\s*['"]([^'"]+)['"]|url\(\s*['"]?([^'")]+)['"]?\s*\)"#;

/// Outcome of scanning an export root
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Every normalized reference, relevant to the uploads subtree or not
    pub references: ReferenceSet,
    /// Number of documents read
    pub documents_scanned: usize,
}

#[derive(Debug)]
pub struct ReferenceScanner {
    pattern: Regex,
    document_extensions: Vec<String>,
}

impl ReferenceScanner {
    pub fn new(config: &PruneConfig) -> Result<Self> {
        let pattern = Regex::new(REFERENCE_PATTERN).map_err(ScannerError::from)?;
        Ok(Self {
            pattern,
            document_extensions: config.document_extensions.clone(),
        })
    }

    /// Raw captured values in `text`, in match order
    pub fn raw_references<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|m| m.as_str())
    }

    /// Normalized references in `text`, discarded values skipped
    pub fn references<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Reference> + 'a {
        self.raw_references(text).filter_map(normalize)
    }

    pub fn is_document(&self, path: &Path) -> bool {
        has_allowed_extension(path, &self.document_extensions)
    }

    /// Lazily walk `root` for scannable documents
    pub fn documents<'a>(&'a self, root: &Path) -> impl Iterator<Item = Result<PathBuf>> + 'a {
        WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => {
                    let path = entry.path();
                    (self.is_document(path) && path.is_file()).then(|| Ok(entry.into_path()))
                }
                Err(e) => Some(Err(e.into())),
            })
    }

    /// Read one document and return the references found in it
    pub fn scan_document(&self, path: &Path) -> Result<Vec<Reference>> {
        let text = read_text_lossy(path).map_err(|source| ScannerError::ReadDocument {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.references(&text).collect())
    }

    /// Scan every document below `root`
    #[instrument(skip(self))]
    pub fn scan(&self, root: &Path) -> Result<ScanResult> {
        let mut result = ScanResult::default();

        for document in self.documents(root) {
            let document = document?;
            let found = self.scan_document(&document)?;
            debug!("{}: {} references", document.display(), found.len());
            result.references.extend(found);
            result.documents_scanned += 1;
        }

        info!(
            "Scanned {} documents, {} unique references",
            result.documents_scanned,
            result.references.len()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scanner() -> ReferenceScanner {
        ReferenceScanner::new(&PruneConfig::default()).unwrap()
    }

    #[test]
    fn test_attribute_forms() {
        let scanner = scanner();
        let html = r#"<img src="a.png"><a HREF = 'b.html'>x</a><script Src='c.js'></script>"#;
        let raw: Vec<_> = scanner.raw_references(html).collect();
        assert_eq!(raw, vec!["a.png", "b.html", "c.js"]);
    }

    #[test]
    fn test_url_function_forms() {
        let scanner = scanner();
        let css = "body{background:url(bg.png)} .a{background: URL( 'q.gif' )} .b{src:url(\"f.woff\")}";
        let raw: Vec<_> = scanner.raw_references(css).collect();
        assert_eq!(raw, vec!["bg.png", "q.gif", "f.woff"]);
    }

    #[test]
    fn test_exactly_one_group_per_match() {
        let scanner = scanner();
        let text = r#"<div style="background:url(x.png)" data-src="y.png">"#;
        for caps in scanner.pattern.captures_iter(text) {
            assert!(caps.get(1).is_some() ^ caps.get(2).is_some());
        }
        // data-src ends in "src=" so the attribute form catches it too
        let raw: Vec<_> = scanner.raw_references(text).collect();
        assert_eq!(raw, vec!["x.png", "y.png"]);
    }

    #[test]
    fn test_malformed_markup_is_ignored() {
        let scanner = scanner();
        let text = r#"<img src=unquoted.png> <img src=""> <a href="ok.png"> url( <<< src="#;
        let raw: Vec<_> = scanner.raw_references(text).collect();
        assert_eq!(raw, vec!["ok.png"]);
    }

    #[test]
    fn test_references_are_normalized() {
        let scanner = scanner();
        let html = r##"
            <a href="mailto:me@example.com">mail</a>
            <a href="#top">top</a>
            <img src="https://example.com/wp-content/uploads/a.png?ver=2">
            <img src="./wp-content/uploads/b.png">
        "##;
        let refs: Vec<String> = scanner.references(html).map(|r| r.to_string()).collect();
        assert_eq!(refs, vec!["wp-content/uploads/a.png", "wp-content/uploads/b.png"]);
    }

    #[test]
    fn test_scan_walks_documents_only() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("blog/post")).unwrap();
        fs::create_dir_all(root.join("fake.html")).unwrap();
        fs::write(root.join("index.HTML"), r#"<img src="wp-content/uploads/a.png">"#).unwrap();
        fs::write(root.join("blog/post/style.css"), "i{background:url(/wp-content/uploads/b.png)}").unwrap();
        fs::write(root.join("feed.xml"), b"<link href=\"wp-content/uploads/c\xff.png\"/>").unwrap();
        fs::write(root.join("notes.txt"), r#"<img src="wp-content/uploads/ignored.png">"#).unwrap();

        let result = scanner().scan(root).unwrap();
        assert_eq!(result.documents_scanned, 3);
        let refs: Vec<&str> = result.references.iter().map(|r| r.as_str()).collect();
        assert_eq!(
            refs,
            vec!["wp-content/uploads/a.png", "wp-content/uploads/b.png", "wp-content/uploads/c.png"]
        );
    }

    #[test]
    fn test_scan_missing_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scanner().scan(&dir.path().join("missing")).is_err());
    }
}
