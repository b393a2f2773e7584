//! Gallery state: the card list, the known-id set, the page cursor and the
//! in-flight flag, plus every operation that mutates them.
//!
//! The card list is the system of record for what is on screen; `ui` only
//! reads it.  Fetching is split in two so the network can live elsewhere:
//! [`Gallery::begin_load`] hands out a [`PageRequest`], and whoever performed
//! it feeds the outcome back through [`Gallery::complete_page`], which either
//! finishes the load or asks for the next page when everything on this one
//! was already shown.

mod known_ids;
mod status;

pub use known_ids::KnownIds;
pub use status::Status;

use crate::error::FetchError;
use crate::source::Item;

/// Items requested per page.
pub const DEFAULT_PER_PAGE: u32 = 4;

/// All-duplicate pages a single load may skip before giving up.
pub const DEFAULT_MAX_SKIPPED_PAGES: u32 = 10;

#[derive(Debug, Clone, Copy)]
pub struct GalleryConfig {
    pub per_page: u32,
    pub max_skipped_pages: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            max_skipped_pages: DEFAULT_MAX_SKIPPED_PAGES,
        }
    }
}

/// One rendered image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub item: Item,
    pub liked: bool,
}

/// A page the gallery wants fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
    /// Gallery generation the request was issued in; bumped by every clear.
    pub generation: u64,
}

/// What to do after a page outcome has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStep {
    /// The load is over and the gallery is idle again.
    Done,
    /// Every item on the page was a duplicate; fetch this one next.
    Next(PageRequest),
}

pub struct Gallery {
    cards: Vec<Card>,
    known: KnownIds,
    /// Next page to request, 1-based.
    cursor: u32,
    in_flight: bool,
    /// Duplicate pages skipped by the load in progress.
    skipped: u32,
    /// Replies to requests from an older generation are stale.
    generation: u64,
    status: Status,
    config: GalleryConfig,
}

impl Gallery {
    pub fn new(config: GalleryConfig) -> Self {
        Self {
            cards: Vec::new(),
            known: KnownIds::default(),
            cursor: 1,
            in_flight: false,
            skipped: 0,
            generation: 0,
            status: Status::info("Starting…"),
            config,
        }
    }

    // -- accessors -----------------------------------------------------------

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Aggregate line shown next to the status message.
    ///
    /// Held back while a fetch is in flight so the count doesn't flicker
    /// through intermediate values.
    pub fn summary(&self) -> String {
        if self.in_flight {
            "Loading…".into()
        } else if self.cards.is_empty() {
            "The gallery is waiting for images.".into()
        } else {
            format!("Total images: {}", self.cards.len())
        }
    }

    pub fn can_load_more(&self) -> bool {
        !self.in_flight
    }

    pub fn can_remove_last(&self) -> bool {
        !self.cards.is_empty()
    }

    pub fn can_reverse(&self) -> bool {
        self.cards.len() >= 2
    }

    // -- fetching ------------------------------------------------------------

    /// Start a load at the current cursor.
    ///
    /// Returns `None` (and changes nothing) when a load is already running.
    pub fn begin_load(&mut self) -> Option<PageRequest> {
        if self.in_flight {
            tracing::debug!(cursor = self.cursor, "load already in flight; dropping request");
            return None;
        }
        self.in_flight = true;
        self.skipped = 0;
        tracing::info!(page = self.cursor, "loading images");
        Some(self.request_at_cursor())
    }

    /// Apply the outcome of fetching `request`.
    ///
    /// A reply to a request issued before the last clear is discarded and
    /// the load continues from the reset cursor instead.
    pub fn complete_page(&mut self, request: PageRequest, result: Result<Vec<Item>, FetchError>) -> FetchStep {
        let page = request.page;
        if !self.in_flight {
            tracing::warn!(page, "page arrived with no load in flight; ignoring");
            return FetchStep::Done;
        }
        if request.generation != self.generation {
            tracing::debug!(page, restart = self.cursor, "discarding page requested before clear");
            self.skipped = 0;
            return FetchStep::Next(self.request_at_cursor());
        }

        let raw = match result {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(page, transport = err.is_transport(), error = %err, "page fetch failed");
                self.status = Status::error(format!("Load failed: {err}"));
                self.finish_load();
                return FetchStep::Done;
            }
        };

        if raw.is_empty() {
            tracing::info!(page, "listing exhausted");
            self.status = Status::error("No more unique images to load.");
            self.finish_load();
            return FetchStep::Done;
        }

        let unique: Vec<Item> = raw.into_iter().filter(|item| !self.known.has(&item.id)).collect();
        if !unique.is_empty() {
            self.render(unique);
            self.cursor += 1;
            self.finish_load();
            return FetchStep::Done;
        }

        self.cursor += 1;
        self.skipped += 1;
        if self.skipped > self.config.max_skipped_pages {
            tracing::warn!(skipped = self.skipped, cursor = self.cursor, "giving up on duplicate pages");
            self.status = Status::error(format!(
                "Skipped {} pages of images already in the gallery; stopping. Try again to continue.",
                self.skipped
            ));
            self.finish_load();
            return FetchStep::Done;
        }

        tracing::debug!(page, next = self.cursor, "page held only known images");
        self.status = Status::info(format!(
            "Images on page {page} are already in the gallery. Trying page {}…",
            self.cursor
        ));
        FetchStep::Next(self.request_at_cursor())
    }

    fn request_at_cursor(&self) -> PageRequest {
        PageRequest {
            page: self.cursor,
            limit: self.config.per_page,
            generation: self.generation,
        }
    }

    fn finish_load(&mut self) {
        self.in_flight = false;
        self.skipped = 0;
    }

    /// Append a card for every item whose id is not shown yet.
    fn render(&mut self, items: Vec<Item>) -> usize {
        let mut added = 0;
        for item in items {
            if self.known.add(item.id.clone()) {
                self.cards.push(Card { item, liked: false });
                added += 1;
            }
        }
        if added > 0 {
            debug_assert_eq!(self.known.len(), self.cards.len());
            tracing::info!(added, total = self.cards.len(), "rendered images");
            let noun = if added == 1 { "image" } else { "images" };
            self.status = Status::info(format!("Added {added} new {noun}."));
        }
        added
    }

    // -- list mutators -------------------------------------------------------

    pub fn clear(&mut self) {
        if self.cards.is_empty() {
            self.status = Status::info("The gallery is already empty.");
            return;
        }
        self.cards.clear();
        self.known.clear();
        self.cursor = 1;
        self.generation += 1;
        debug_assert_eq!(self.known.len(), 0);
        tracing::info!("gallery cleared");
        self.status = Status::info("Gallery cleared.");
    }

    /// Drop the last card.  Silent when there is nothing to remove.
    pub fn remove_last(&mut self) -> Option<Card> {
        let card = self.cards.pop()?;
        self.known.delete(&card.item.id);
        debug_assert_eq!(self.known.len(), self.cards.len());
        tracing::debug!(id = card.item.id.as_str(), "removed last image");
        self.status = Status::info("Removed the last image.");
        Some(card)
    }

    /// Reverse display order.  Returns `false` when fewer than two cards
    /// are shown, after reporting why nothing happened.
    pub fn reverse(&mut self) -> bool {
        if self.cards.len() < 2 {
            self.status = Status::info("At least 2 images are needed to reverse.");
            return false;
        }
        self.cards.reverse();
        tracing::debug!(count = self.cards.len(), "reversed gallery");
        self.status = Status::info("Gallery reversed.");
        true
    }

    /// Toggle the like on the card at `index`, returning its new state.
    pub fn toggle_like(&mut self, index: usize) -> Option<bool> {
        let card = self.cards.get_mut(index)?;
        card.liked = !card.liked;
        self.status = if card.liked {
            Status::info(format!("Liked a photo by {}!", card.item.author))
        } else {
            Status::info("Like removed.")
        };
        Some(card.liked)
    }
}
