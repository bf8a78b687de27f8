//! Multi-document page store
//!
//! Holds the main document plus any number of named pages and keeps exactly
//! one of them active. Two keys are used in the backing store:
//!
//! | Key | Value |
//! |-----|-------|
//! | `todo-content` | raw text of the main document |
//! | `todo-pages` | JSON object mapping page ID to raw text |
//!
//! The in-memory state is authoritative. Every mutating method updates memory
//! first, marks the affected keys dirty and then flushes every dirty key. When
//! a write fails the error is returned but the change stands and the key stays
//! dirty, so any later save retries it.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, warn};

use super::kv::{KeyValueStore, StorageError};
use crate::domain::{page_template, Document, PageId, PageIdError};

/// Key holding the main document
pub const MAIN_KEY: &str = "todo-content";

/// Key holding the serialized page map
pub const PAGES_KEY: &str = "todo-pages";

/// Document used when no main document has been saved yet
pub const DEFAULT_DOCUMENT: &str = "# TODO

6 October 11:20 AM
- ✓ Set up the todo editor

## Today
- Review the open pull requests
- Write the weekly update

## Home
- Water the plants
- Book a dentist appointment

---

## Backlog
- Clean up the downloads folder
- Try the drag handles in preview mode";

#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Id(#[from] PageIdError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to encode page map: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Keyed collection of documents with one active page
pub struct PageStore<S: KeyValueStore> {
    storage: S,
    main: String,
    pages: BTreeMap<PageId, String>,
    active: PageId,
    document: Document,
    main_dirty: bool,
    pages_dirty: bool,
}

impl<S: KeyValueStore> PageStore<S> {
    /// Loads the main document and the page map; the main page is active
    ///
    /// A missing or empty main document falls back to [`DEFAULT_DOCUMENT`]. A
    /// page map that cannot be decoded is logged and treated as empty.
    pub fn open(storage: S) -> Result<Self, PageError> {
        let main = match storage.get(MAIN_KEY)? {
            Some(content) if !content.is_empty() => content,
            _ => {
                debug!("no saved main document, using default");
                DEFAULT_DOCUMENT.to_string()
            }
        };

        let raw_pages: BTreeMap<String, String> = match storage.get(PAGES_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "ignoring unreadable page map");
                BTreeMap::new()
            }),
            None => BTreeMap::new(),
        };
        let (pages, pages_dirty) = normalize_pages(raw_pages);

        let document = Document::from_text(&main);
        Ok(Self {
            storage,
            main,
            pages,
            active: PageId::main(),
            document,
            main_dirty: false,
            pages_dirty,
        })
    }

    /// Returns the backing store
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns the active page ID
    pub fn active(&self) -> &PageId {
        &self.active
    }

    /// Returns the active document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Replaces the active document's lines
    pub fn set_lines(&mut self, lines: Vec<String>) {
        self.document.set_lines(lines);
    }

    /// All page IDs, main first, then the named pages in order
    pub fn page_ids(&self) -> Vec<PageId> {
        let mut ids = vec![PageId::main()];
        ids.extend(self.pages.keys().cloned());
        if !self.active.is_main() && !self.pages.contains_key(&self.active) {
            ids.push(self.active.clone());
        }
        ids
    }

    /// Returns true if the page exists (main always does)
    pub fn contains(&self, id: &PageId) -> bool {
        id.is_main() || self.pages.contains_key(id)
    }

    /// Saved content of a page without switching to it
    pub fn content_of(&self, id: &PageId) -> Option<&str> {
        if id.is_main() {
            Some(&self.main)
        } else {
            self.pages.get(id).map(String::as_str)
        }
    }

    /// Persists the active document along with anything an earlier failed
    /// write left behind
    pub fn save(&mut self) -> Result<(), PageError> {
        self.stash_active();
        self.flush()
    }

    /// Makes another page active, saving the outgoing one first
    ///
    /// Unknown IDs open a templated document; the page is stored the first
    /// time it is saved or switched away from.
    pub fn switch_to(&mut self, id: &PageId) -> Result<(), PageError> {
        if id == &self.active {
            return Ok(());
        }

        let outgoing = self.active.clone();
        self.stash_active();

        let content = match self.content_of(id) {
            Some(content) => content.to_string(),
            None => {
                debug!(page = %id, "opening unseen page from template");
                id.template()
            }
        };
        self.document = Document::from_text(&content);
        self.active = id.clone();
        debug!(from = %outgoing, to = %id, "switched page");

        self.flush()
    }

    /// Creates a page from a user-supplied name and switches to it
    pub fn create(&mut self, name: &str) -> Result<PageId, PageError> {
        let id = PageId::for_new_page(name, self.page_ids().iter())?;

        self.pages.insert(id.clone(), page_template(name.trim()));
        self.pages_dirty = true;
        debug!(page = %id, "created page");

        self.switch_to(&id)?;
        Ok(id)
    }

    /// Deletes a page; deleting the active page switches back to main
    ///
    /// Returns false if there was no such page. The main page is rejected.
    pub fn delete(&mut self, id: &PageId) -> Result<bool, PageError> {
        if id.is_main() {
            return Err(PageIdError::Reserved(id.to_string()).into());
        }

        let existed = self.pages.remove(id).is_some();
        let was_active = id == &self.active;
        if !existed && !was_active {
            return Ok(false);
        }

        if was_active {
            self.active = PageId::main();
            self.document = Document::from_text(&self.main);
        }
        self.pages_dirty = true;
        debug!(page = %id, was_active, "deleted page");

        self.flush()?;
        Ok(true)
    }

    /// Copies the active document into the in-memory page contents
    fn stash_active(&mut self) {
        let text = self.document.to_text();
        if self.active.is_main() {
            self.main = text;
            self.main_dirty = true;
        } else {
            self.pages.insert(self.active.clone(), text);
            self.pages_dirty = true;
        }
    }

    /// Writes every dirty key, returning the first failure
    ///
    /// Both keys are attempted even if the first write fails.
    fn flush(&mut self) -> Result<(), PageError> {
        let mut result = Ok(());

        if self.main_dirty {
            match self.storage.set(MAIN_KEY, &self.main) {
                Ok(()) => self.main_dirty = false,
                Err(e) => {
                    warn!(error = %e, "failed to save main document");
                    result = Err(e.into());
                }
            }
        }

        if self.pages_dirty {
            let encoded = serde_json::to_string(&self.pages)?;
            match self.storage.set(PAGES_KEY, &encoded) {
                Ok(()) => self.pages_dirty = false,
                Err(e) => {
                    warn!(error = %e, "failed to save page map");
                    if result.is_ok() {
                        result = Err(e.into());
                    }
                }
            }
        }

        result
    }
}

/// Rebuilds a loaded page map under normalized IDs
///
/// Keys that do not normalize or that name the main page are dropped. Keys
/// already in normalized form win over hand-edited spellings of the same ID.
/// Returns true if the map changed.
fn normalize_pages(raw: BTreeMap<String, String>) -> (BTreeMap<PageId, String>, bool) {
    let mut pages = BTreeMap::new();
    let mut renamed = Vec::new();
    let mut changed = false;

    for (key, content) in raw {
        match PageId::normalize(&key) {
            Ok(id) if id.is_main() => {
                warn!(key = %key, "dropping page stored under the main ID");
                changed = true;
            }
            Ok(id) if id.as_str() == key => {
                pages.insert(id, content);
            }
            Ok(id) => renamed.push((key, id, content)),
            Err(e) => {
                warn!(key = %key, error = %e, "dropping page with an unusable ID");
                changed = true;
            }
        }
    }

    for (key, id, content) in renamed {
        changed = true;
        if pages.contains_key(&id) {
            warn!(key = %key, page = %id, "dropping page whose ID is already taken");
            continue;
        }
        debug!(key = %key, page = %id, "normalized page ID");
        pages.insert(id, content);
    }

    (pages, changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::kv::MemoryStore;
    use std::io;

    /// Store whose writes fail once `broken` is set
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        broken: bool,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.broken {
                return Err(StorageError::Write {
                    key: key.to_string(),
                    source: io::Error::new(io::ErrorKind::Other, "quota exceeded"),
                });
            }
            self.inner.set(key, value)
        }
    }

    fn id(name: &str) -> PageId {
        PageId::normalize(name).unwrap()
    }

    fn open() -> PageStore<MemoryStore> {
        PageStore::open(MemoryStore::new()).unwrap()
    }

    #[test]
    fn empty_storage_uses_default_document() {
        let store = open();
        assert!(store.active().is_main());
        assert_eq!(store.document().to_text(), DEFAULT_DOCUMENT);
    }

    #[test]
    fn loads_saved_main_document() {
        let mut storage = MemoryStore::new();
        storage.set(MAIN_KEY, "# Mine\n- a").unwrap();
        let store = PageStore::open(storage).unwrap();
        assert_eq!(store.document().to_text(), "# Mine\n- a");
    }

    #[test]
    fn corrupt_page_map_is_ignored() {
        let mut storage = MemoryStore::new();
        storage.set(PAGES_KEY, "not json").unwrap();
        let store = PageStore::open(storage).unwrap();
        assert_eq!(store.page_ids(), vec![PageId::main()]);
    }

    #[test]
    fn save_writes_main_key() {
        let mut store = open();
        store.set_lines(vec!["# Edited".to_string()]);
        store.save().unwrap();
        assert_eq!(
            store.storage().get(MAIN_KEY).unwrap().as_deref(),
            Some("# Edited")
        );
    }

    #[test]
    fn create_switches_to_new_page() {
        let mut store = open();
        let created = store.create("Side Projects").unwrap();

        assert_eq!(created.as_str(), "side-projects");
        assert_eq!(store.active(), &created);
        assert_eq!(
            store.document().to_text(),
            "# Side Projects\n\n- Start adding your todos here..."
        );
        assert_eq!(store.page_ids(), vec![PageId::main(), created]);
    }

    #[test]
    fn create_rejects_reserved_empty_and_duplicate_names() {
        let mut store = open();
        store.create("work").unwrap();
        store.switch_to(&PageId::main()).unwrap();
        let before = store.page_ids();

        assert!(matches!(
            store.create("Main "),
            Err(PageError::Id(PageIdError::Reserved(_)))
        ));
        assert!(matches!(store.create(""), Err(PageError::Id(PageIdError::Invalid))));
        assert!(matches!(
            store.create("Work"),
            Err(PageError::Id(PageIdError::Duplicate(_)))
        ));

        assert_eq!(store.page_ids(), before);
        assert!(store.active().is_main());
    }

    #[test]
    fn switching_preserves_edits_on_both_sides() {
        let mut store = open();
        store.set_lines(vec!["# Main edited".to_string()]);

        store.switch_to(&id("groceries")).unwrap();
        assert_eq!(
            store.document().to_text(),
            "# Groceries\n\n- Start adding your todos here..."
        );
        store.set_lines(vec!["# Groceries".to_string(), "- milk".to_string()]);

        store.switch_to(&PageId::main()).unwrap();
        assert_eq!(store.document().to_text(), "# Main edited");
        assert_eq!(
            store.storage().get(MAIN_KEY).unwrap().as_deref(),
            Some("# Main edited")
        );

        store.switch_to(&id("groceries")).unwrap();
        assert_eq!(store.document().to_text(), "# Groceries\n- milk");
    }

    #[test]
    fn pages_survive_reopen() {
        let mut store = open();
        store.create("work").unwrap();
        store.set_lines(vec!["# Work".to_string(), "- ship it".to_string()]);
        store.save().unwrap();

        let storage = store.storage().clone();
        let mut reopened = PageStore::open(storage).unwrap();
        assert!(reopened.contains(&id("work")));
        reopened.switch_to(&id("work")).unwrap();
        assert_eq!(reopened.document().to_text(), "# Work\n- ship it");
    }

    #[test]
    fn delete_main_is_rejected_without_changes() {
        let mut store = open();
        store.create("work").unwrap();
        let ids = store.page_ids();
        let text = store.document().to_text();

        assert!(matches!(
            store.delete(&PageId::main()),
            Err(PageError::Id(PageIdError::Reserved(_)))
        ));
        assert_eq!(store.page_ids(), ids);
        assert_eq!(store.document().to_text(), text);
        assert_eq!(store.active(), &id("work"));
    }

    #[test]
    fn delete_active_page_returns_to_main() {
        let mut store = open();
        store.create("work").unwrap();
        store.set_lines(vec!["# unsaved".to_string()]);

        assert!(store.delete(&id("work")).unwrap());
        assert!(store.active().is_main());
        assert_eq!(store.document().to_text(), DEFAULT_DOCUMENT);
        assert!(!store.contains(&id("work")));

        let raw = store.storage().get(PAGES_KEY).unwrap().unwrap();
        assert_eq!(raw, "{}");
    }

    #[test]
    fn delete_unknown_page_is_false() {
        let mut store = open();
        assert!(!store.delete(&id("nope")).unwrap());
    }

    #[test]
    fn failed_write_keeps_memory_state() {
        let mut store = PageStore::open(FlakyStore::default()).unwrap();
        store.storage.broken = true;

        store.set_lines(vec!["# Still here".to_string()]);
        assert!(matches!(store.save(), Err(PageError::Storage(_))));
        assert_eq!(store.document().to_text(), "# Still here");

        // Switching still happens; the outgoing content stays in memory.
        assert!(store.switch_to(&id("work")).is_err());
        assert_eq!(store.active(), &id("work"));
        assert_eq!(store.content_of(&PageId::main()), Some("# Still here"));

        // Once storage recovers the next write catches up.
        store.storage.broken = false;
        store.switch_to(&PageId::main()).unwrap();
        store.save().unwrap();
        assert_eq!(
            store.storage().get(MAIN_KEY).unwrap().as_deref(),
            Some("# Still here")
        );
    }

    #[test]
    fn failed_outgoing_write_is_retried_by_a_later_save() {
        let mut store = PageStore::open(FlakyStore::default()).unwrap();
        store.set_lines(vec!["# Main edited".to_string()]);

        store.storage.broken = true;
        assert!(store.switch_to(&id("work")).is_err());

        // Saving from another page still flushes the main document.
        store.storage.broken = false;
        store.save().unwrap();

        let reopened = PageStore::open(store.storage().inner.clone()).unwrap();
        assert_eq!(reopened.document().to_text(), "# Main edited");
        assert!(reopened.contains(&id("work")));
    }

    #[test]
    fn failed_page_map_write_is_retried_from_main() {
        let mut store = PageStore::open(FlakyStore::default()).unwrap();
        store.storage.broken = true;
        assert!(store.create("work").is_err());
        assert!(store.switch_to(&PageId::main()).is_err());

        store.storage.broken = false;
        store.save().unwrap();

        let reopened = PageStore::open(store.storage().inner.clone()).unwrap();
        assert_eq!(reopened.page_ids(), vec![PageId::main(), id("work")]);
    }

    #[test]
    fn hand_edited_page_keys_are_normalized_on_load() {
        let mut storage = MemoryStore::new();
        storage
            .set(
                PAGES_KEY,
                r##"{"Work Notes":"# Notes","main":"# Shadow","work":"# Work","Work":"# Dup","  ":"x"}"##,
            )
            .unwrap();

        let mut store = PageStore::open(storage).unwrap();
        assert_eq!(
            store.page_ids(),
            vec![PageId::main(), id("work"), id("work-notes")]
        );
        assert_eq!(store.content_of(&id("work")), Some("# Work"));
        assert_eq!(store.content_of(&PageId::main()), Some(DEFAULT_DOCUMENT));

        assert!(store.delete(&id("work-notes")).unwrap());
        let raw = store.storage().get(PAGES_KEY).unwrap().unwrap();
        assert_eq!(raw, r##"{"work":"# Work"}"##);
    }
}
