//! Listing source abstraction layer.
//!
//! This module defines the [`ImageSource`] trait and the common [`Item`]
//! type.  Concrete sources live in sub-modules (currently only [`picsum`]).
//!
//! ## For contributors — adding a new source
//!
//! 1. Create a new file in this directory (e.g. `unsplash.rs`).
//! 2. Define a struct and implement [`ImageSource`] for it.
//! 3. Add `mod unsplash;` below and re-export your struct.
//! 4. Construct it in `main.rs` instead of (or alongside) `PicsumSource`.
//!
//! De-duplication, paging and rendering are all source-agnostic.

mod item;
mod picsum;

pub use item::{Item, ItemId};
pub use picsum::{PicsumSource, DEFAULT_ENDPOINT};

#[cfg(test)]
pub(crate) use item::tests::make_item;

use crate::error::FetchError;

/// Trait that every listing source must implement.
///
/// [`fetch_page`](ImageSource::fetch_page) is called from the background
/// fetch worker, so implementations must be [`Send`].
pub trait ImageSource: Send {
    /// Human-readable label used in log lines.
    fn name(&self) -> &str;

    /// Fetch one page of `limit` items.  Pages are 1-based; a page past the
    /// end of the listing comes back empty rather than as an error.
    fn fetch_page(&self, page: u32, limit: u32) -> Result<Vec<Item>, FetchError>;
}

#[cfg(test)]
pub(crate) mod scripted {
    //! An in-memory source that replays canned pages, for tests.

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::{ImageSource, Item};
    use crate::error::FetchError;

    /// Serves `pages[page - 1]`; pages beyond the script come back empty.
    /// Pages listed in `failing` answer with an HTTP 500 instead.
    #[derive(Default)]
    pub struct ScriptedSource {
        pub pages: Vec<Vec<Item>>,
        pub failing: HashMap<u32, u16>,
        /// Repeat the last scripted page forever instead of running dry.
        pub repeat_last: bool,
        pub calls: AtomicUsize,
    }

    impl ScriptedSource {
        pub fn new(pages: Vec<Vec<Item>>) -> Self {
            Self {
                pages,
                ..Self::default()
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ImageSource for ScriptedSource {
        fn name(&self) -> &str {
            "scripted"
        }

        fn fetch_page(&self, page: u32, _limit: u32) -> Result<Vec<Item>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(&status) = self.failing.get(&page) {
                return Err(FetchError::Http {
                    status,
                    reason: "Internal Server Error".into(),
                });
            }
            let idx = page.saturating_sub(1) as usize;
            let page = match self.pages.get(idx) {
                Some(p) => p.clone(),
                None if self.repeat_last => self.pages.last().cloned().unwrap_or_default(),
                None => Vec::new(),
            };
            Ok(page)
        }
    }
}
