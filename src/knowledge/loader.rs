//! Knowledge base file loader.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::KnowledgeBase;

/// Errors that can occur while loading the knowledge base.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("Failed to read knowledge base {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse knowledge base {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl KnowledgeBase {
    /// Load and validate the knowledge base from a JSON file.
    ///
    /// Loaded once at process start; the result is immutable for the process
    /// lifetime. Routing rules that reference unknown package ids are kept
    /// (the selector treats them as matching nothing that exists) but logged
    /// so the data bug is visible.
    ///
    /// # Errors
    ///
    /// Returns `KnowledgeError::ReadError` if the file cannot be read, or
    /// `KnowledgeError::ParseError` if it is not valid knowledge-base JSON.
    pub fn load(path: &Path) -> Result<Self, KnowledgeError> {
        let content = std::fs::read_to_string(path).map_err(|e| KnowledgeError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let base: Self =
            serde_json::from_str(&content).map_err(|e| KnowledgeError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;

        base.warn_on_dangling_rules();
        tracing::info!(
            path = %path.display(),
            packages = base.packages.len(),
            faq = base.faq.len(),
            rules = base.routing.package_suggestion_rules.len(),
            "Loaded knowledge base"
        );

        Ok(base)
    }

    /// Log routing rules whose target references no known package.
    fn warn_on_dangling_rules(&self) {
        let known: HashSet<&str> = self.packages.iter().map(|p| p.id.as_str()).collect();

        for rule in &self.routing.package_suggestion_rules {
            if let Some(target) = rule.target_package_id.as_deref() {
                if !known.contains(target) {
                    tracing::warn!(
                        target = %target,
                        triggers = ?rule.triggers,
                        "Routing rule targets unknown package id"
                    );
                }
            }
        }
    }
}
