use ratatui::widgets::ListState;

use crate::fetch::PageReply;
use crate::gallery::{FetchStep, Gallery, GalleryConfig, PageRequest};

pub struct App {
    pub gallery: Gallery,
    /// List selection state; the selected card is the like target.
    pub list_state: ListState,
    /// Whether the user has requested to quit.
    pub quit: bool,
    /// Page the gallery asked for that has not been handed to the fetcher.
    outbox: Option<PageRequest>,
}

impl App {
    pub fn new(config: GalleryConfig) -> Self {
        Self {
            gallery: Gallery::new(config),
            list_state: ListState::default(),
            quit: false,
            outbox: None,
        }
    }

    /// The request to send to the fetch worker, if one is waiting.
    pub fn take_request(&mut self) -> Option<PageRequest> {
        self.outbox.take()
    }

    // -- actions -------------------------------------------------------------

    pub fn load_more(&mut self) {
        if let Some(req) = self.gallery.begin_load() {
            self.outbox = Some(req);
        }
    }

    /// Apply a worker reply, queueing the follow-up page if the gallery
    /// wants one.
    pub fn apply_reply(&mut self, reply: PageReply) {
        match self.gallery.complete_page(reply.request, reply.result) {
            FetchStep::Done => {}
            FetchStep::Next(req) => self.outbox = Some(req),
        }
        if self.list_state.selected().is_none() && !self.gallery.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn clear(&mut self) {
        self.gallery.clear();
        self.clamp_selection();
    }

    pub fn remove_last(&mut self) {
        self.gallery.remove_last();
        self.clamp_selection();
    }

    /// Reverse the gallery, keeping the same card selected.
    pub fn reverse(&mut self) {
        if self.gallery.reverse() {
            if let Some(i) = self.list_state.selected() {
                self.list_state.select(Some(self.gallery.len() - 1 - i));
            }
        }
    }

    pub fn like_selected(&mut self) {
        if let Some(i) = self.list_state.selected() {
            self.gallery.toggle_like(i);
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.gallery.len();
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            _ => {}
        }
    }

    // -- navigation ----------------------------------------------------------

    pub fn select_next(&mut self) {
        if self.gallery.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(self.gallery.len() - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.gallery.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if !self.gallery.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        if !self.gallery.is_empty() {
            self.list_state.select(Some(self.gallery.len() - 1));
        }
    }
}
