//! Helpful error types for CLI commands
//!
//! Every error includes:
//! - What went wrong
//! - Context about the situation
//! - Suggestions for how to fix it

use std::fmt;
use std::path::Path;

/// An error with helpful context and suggestions
#[derive(Debug)]
pub struct HelpfulError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_suggestions(
        mut self,
        suggestions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.suggestions.extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    // === Common error constructors ===

    /// The catalog store has not been generated yet
    pub fn catalog_not_found(path: &Path) -> Self {
        Self::new(format!("Catalog not found: {}", path.display()))
            .with_context("The creature catalog is built from the MTGJSON bulk dataset")
            .with_suggestions([
                "TRY: Fetch the bulk dataset: volodex download".to_string(),
                "TRY: Build the catalog from it: volodex update".to_string(),
                format!(
                    "TRY: Point at an existing catalog: volodex --catalog {} run",
                    path.display()
                ),
            ])
    }

    /// The catalog store exists but cannot be used
    pub fn catalog_malformed(path: &Path, details: &str) -> Self {
        Self::new(format!("Catalog is malformed: {}", details))
            .with_context(format!("Failed to load catalog: {}", path.display()))
            .with_suggestion("TRY: Regenerate the catalog: volodex update")
    }

    /// The bulk dataset has not been downloaded
    pub fn bulk_not_found(path: &Path) -> Self {
        Self::new(format!("Bulk dataset not found: {}", path.display()))
            .with_context("The update command reads the compressed MTGJSON AtomicCards file")
            .with_suggestions([
                "TRY: Download it first: volodex download".to_string(),
                "TRY: Use a file you already have: volodex update --input FILE".to_string(),
            ])
    }

    /// A deck list file exists but cannot be read
    pub fn deck_list_unreadable(path: &Path, reason: &str) -> Self {
        Self::new(format!("Cannot read deck list: {}", path.display()))
            .with_context(reason.to_string())
            .with_suggestions([
                format!("TRY: Check file permissions: ls -la {}", path.display()),
                "TRY: Pass the deck list as text instead of a path".to_string(),
            ])
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}
