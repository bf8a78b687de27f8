//! Page identifiers
//!
//! Pages are named documents. A page ID is the page name trimmed, lowercased,
//! with every whitespace run collapsed into a single hyphen:
//! `"Side Projects"` becomes `side-projects`.
//!
//! The `main` ID is reserved for the primary document. It always exists and
//! can be neither created nor deleted.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The reserved ID of the primary document
pub const MAIN_PAGE: &str = "main";

/// Placeholder todo written into fresh pages
pub const PLACEHOLDER_TODO: &str = "- Start adding your todos here...";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageIdError {
    #[error("Page name cannot be empty")]
    Invalid,

    #[error("Page '{0}' is reserved")]
    Reserved(String),

    #[error("Page already exists: {0}")]
    Duplicate(String),
}

/// Normalized page identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    /// Normalizes a user-supplied name into an ID
    pub fn normalize(name: &str) -> Result<Self, PageIdError> {
        let id = name
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-");

        if id.is_empty() {
            Err(PageIdError::Invalid)
        } else {
            Ok(Self(id))
        }
    }

    /// Validates a name for a new page against the IDs already in use
    pub fn for_new_page<'a>(
        name: &str,
        existing: impl IntoIterator<Item = &'a PageId>,
    ) -> Result<Self, PageIdError> {
        let id = Self::normalize(name)?;
        if id.is_main() {
            return Err(PageIdError::Reserved(id.0));
        }
        if existing.into_iter().any(|other| other == &id) {
            return Err(PageIdError::Duplicate(id.0));
        }
        Ok(id)
    }

    /// The reserved main page
    pub fn main() -> Self {
        Self(MAIN_PAGE.to_string())
    }

    /// Returns true if this is the reserved main page
    pub fn is_main(&self) -> bool {
        self.0 == MAIN_PAGE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display title: the ID with its first letter uppercased
    pub fn title(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Content for a page visited before it was ever saved
    pub fn template(&self) -> String {
        page_template(&self.title())
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Starter content for a page with the given heading
pub fn page_template(heading: &str) -> String {
    format!("# {}\n\n{}", heading, PLACEHOLDER_TODO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<PageId> {
        names.iter().map(|n| PageId::normalize(n).unwrap()).collect()
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(PageId::normalize("Side  Projects").unwrap().as_str(), "side-projects");
        assert_eq!(PageId::normalize("  Work ").unwrap().as_str(), "work");
        assert_eq!(PageId::normalize("a\tb c").unwrap().as_str(), "a-b-c");
    }

    #[test]
    fn empty_names_are_invalid() {
        assert_eq!(PageId::normalize(""), Err(PageIdError::Invalid));
        assert_eq!(PageId::normalize("   "), Err(PageIdError::Invalid));
    }

    #[test]
    fn main_is_reserved() {
        let existing = ids(&[]);
        assert_eq!(
            PageId::for_new_page("Main ", &existing),
            Err(PageIdError::Reserved("main".to_string()))
        );
        assert!(PageId::main().is_main());
    }

    #[test]
    fn duplicates_are_rejected() {
        let existing = ids(&["work"]);
        assert_eq!(
            PageId::for_new_page("WORK", &existing),
            Err(PageIdError::Duplicate("work".to_string()))
        );
        assert!(PageId::for_new_page("home", &existing).is_ok());
    }

    #[test]
    fn title_capitalizes_first_letter() {
        assert_eq!(PageId::normalize("groceries").unwrap().title(), "Groceries");
        assert_eq!(PageId::normalize("side projects").unwrap().title(), "Side-projects");
    }

    #[test]
    fn template_has_heading_and_placeholder() {
        let id = PageId::normalize("work").unwrap();
        assert_eq!(id.template(), "# Work\n\n- Start adding your todos here...");
    }
}
