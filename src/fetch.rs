//! Background page fetching.
//!
//! A dedicated worker thread owns the [`ImageSource`] and performs one
//! request per [`PageRequest`] it receives, sending the outcome back to the
//! UI thread over an [`mpsc`] channel.  The worker holds no gallery state:
//! de-duplication and cursor bookkeeping happen on the UI thread when a
//! [`PageReply`] is applied, so the gallery's in-flight flag alone decides
//! how many requests are outstanding.
//!
//! [`load_more_blocking`] drives the same state machine inline, for headless
//! runs and tests.

use std::sync::mpsc;
use std::thread;

use crate::error::FetchError;
use crate::gallery::{FetchStep, Gallery, PageRequest};
use crate::source::{ImageSource, Item};

/// Outcome of one page request, sent from the worker to the UI thread.
#[derive(Debug)]
pub struct PageReply {
    pub request: PageRequest,
    pub result: Result<Vec<Item>, FetchError>,
}

/// Handle to the fetch worker.
///
/// Dropping it closes the request channel, which stops the worker after any
/// request it is currently serving.
pub struct Fetcher {
    requests: mpsc::Sender<PageRequest>,
    replies: mpsc::Receiver<PageReply>,
}

impl Fetcher {
    /// Queue a page request.  Returns `false` if the worker has gone away.
    pub fn request(&self, req: PageRequest) -> bool {
        self.requests.send(req).is_ok()
    }

    /// Next finished reply, if any.  Never blocks.
    pub fn try_recv(&self) -> Option<PageReply> {
        self.replies.try_recv().ok()
    }
}

/// Spawn the fetch worker thread.
pub fn spawn(source: Box<dyn ImageSource>) -> Fetcher {
    let (req_tx, req_rx) = mpsc::channel::<PageRequest>();
    let (reply_tx, reply_rx) = mpsc::channel();

    thread::spawn(move || {
        for req in req_rx {
            let result = source.fetch_page(req.page, req.limit);
            if let Err(err) = &result {
                tracing::debug!(source = source.name(), page = req.page, error = %err, "fetch failed");
            }
            // If the receiver is gone the UI thread has exited.
            if reply_tx.send(PageReply { request: req, result }).is_err() {
                return;
            }
        }
        tracing::debug!(source = source.name(), "fetch worker stopped");
    });

    Fetcher {
        requests: req_tx,
        replies: reply_rx,
    }
}

/// Run one complete load on the calling thread, following duplicate pages
/// until the gallery says it is done.  A no-op if a load is already running.
pub fn load_more_blocking(gallery: &mut Gallery, source: &dyn ImageSource) {
    let Some(mut req) = gallery.begin_load() else {
        return;
    };
    loop {
        let result = source.fetch_page(req.page, req.limit);
        match gallery.complete_page(req, result) {
            FetchStep::Done => return,
            FetchStep::Next(next) => req = next,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::gallery::GalleryConfig;
    use crate::source::make_item;
    use crate::source::scripted::ScriptedSource;

    fn page(ids: &[u64]) -> Vec<Item> {
        ids.iter().copied().map(make_item).collect()
    }

    fn recv_within(fetcher: &Fetcher, timeout: Duration) -> Option<PageReply> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Some(reply) = fetcher.try_recv() {
                return Some(reply);
            }
            thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn blocking_load_follows_duplicate_pages() {
        let source = ScriptedSource::new(vec![page(&[1, 2, 3, 4]), page(&[1, 2, 3, 4]), page(&[5])]);
        let mut gallery = Gallery::new(GalleryConfig::default());

        load_more_blocking(&mut gallery, &source);
        load_more_blocking(&mut gallery, &source);

        assert_eq!(gallery.len(), 5);
        assert_eq!(gallery.cursor(), 4);
        assert_eq!(source.calls(), 3);
        assert_eq!(gallery.status().message, "Added 1 new image.");
    }

    #[test]
    fn blocking_load_gives_up_on_endless_duplicates() {
        let source = ScriptedSource {
            pages: vec![page(&[1, 2])],
            repeat_last: true,
            ..ScriptedSource::default()
        };
        let mut gallery = Gallery::new(GalleryConfig {
            per_page: 4,
            max_skipped_pages: 3,
        });

        load_more_blocking(&mut gallery, &source);
        load_more_blocking(&mut gallery, &source);

        assert_eq!(source.calls(), 1 + 4);
        assert_eq!(gallery.len(), 2);
        assert!(gallery.status().is_error);
        assert!(!gallery.is_loading());
    }

    #[test]
    fn blocking_load_reports_http_failure() {
        let mut source = ScriptedSource::new(vec![page(&[1])]);
        source.failing.insert(1, 500);
        let mut gallery = Gallery::new(GalleryConfig::default());

        load_more_blocking(&mut gallery, &source);

        assert!(gallery.is_empty());
        assert_eq!(gallery.cursor(), 1);
        assert!(gallery.status().message.contains("500"));
        assert_eq!(source.calls(), 1, "no automatic retry");
    }

    #[test]
    fn blocking_load_is_noop_while_in_flight() {
        let source = ScriptedSource::new(vec![page(&[1])]);
        let mut gallery = Gallery::new(GalleryConfig::default());
        let _outstanding = gallery.begin_load();

        load_more_blocking(&mut gallery, &source);

        assert_eq!(source.calls(), 0);
    }

    #[test]
    fn worker_answers_requests_in_order() {
        let source = ScriptedSource::new(vec![page(&[1]), page(&[2])]);
        let fetcher = spawn(Box::new(source));

        assert!(fetcher.request(PageRequest { page: 1, limit: 4, generation: 0 }));
        assert!(fetcher.request(PageRequest { page: 2, limit: 4, generation: 0 }));

        let first = recv_within(&fetcher, Duration::from_secs(2)).expect("first reply");
        let second = recv_within(&fetcher, Duration::from_secs(2)).expect("second reply");
        assert_eq!(first.request.page, 1);
        assert_eq!(first.result.unwrap(), page(&[1]));
        assert_eq!(second.request.page, 2);
        assert_eq!(second.result.unwrap(), page(&[2]));
    }

    #[test]
    fn worker_replies_drive_gallery_through_skip_chain() {
        let source = ScriptedSource::new(vec![page(&[1]), page(&[1]), page(&[2])]);
        let fetcher = spawn(Box::new(source));
        let mut gallery = Gallery::new(GalleryConfig::default());

        for _ in 0..2 {
            let req = gallery.begin_load().expect("idle");
            assert!(fetcher.request(req));
            loop {
                let reply = recv_within(&fetcher, Duration::from_secs(2)).expect("reply");
                match gallery.complete_page(reply.request, reply.result) {
                    FetchStep::Done => break,
                    FetchStep::Next(next) => assert!(fetcher.request(next)),
                }
            }
        }

        assert_eq!(gallery.len(), 2);
        assert_eq!(gallery.cursor(), 4);
    }
}
