//! Command-line configuration.
//!
//! Every flag can also be set through the environment variable named next
//! to it, which is handy when the gallery is launched from a script.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::gallery::{GalleryConfig, DEFAULT_MAX_SKIPPED_PAGES, DEFAULT_PER_PAGE};
use crate::source::DEFAULT_ENDPOINT;

/// Browse the Picsum image list in the terminal.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Args {
    /// Image listing endpoint (paged with `page` and `limit` query parameters)
    #[arg(long, env = "GALLERY_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Images requested per page
    #[arg(long, env = "GALLERY_PER_PAGE", default_value_t = DEFAULT_PER_PAGE,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub per_page: u32,

    /// Pages of already-shown images one load may skip before giving up
    #[arg(long, env = "GALLERY_MAX_SKIPPED_PAGES", default_value_t = DEFAULT_MAX_SKIPPED_PAGES)]
    pub max_skipped_pages: u32,

    /// Per-request timeout in seconds
    #[arg(long, env = "GALLERY_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Where to write logs while the terminal UI is running
    #[arg(long, env = "GALLERY_LOG_FILE", default_value = "gallery.log")]
    pub log_file: PathBuf,

    /// Fetch without the terminal UI, print the gallery and exit
    #[arg(long)]
    pub headless: bool,

    /// Number of loads to run in headless mode
    #[arg(long, default_value_t = 1, requires = "headless")]
    pub pages: u32,
}

impl Args {
    pub fn gallery_config(&self) -> GalleryConfig {
        GalleryConfig {
            per_page: self.per_page,
            max_skipped_pages: self.max_skipped_pages,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_gallery_defaults() {
        let args = Args::try_parse_from(["picsum-gallery"]).unwrap();
        assert_eq!(args.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(args.per_page, 4);
        assert_eq!(args.timeout(), Duration::from_secs(30));
        assert!(!args.headless);

        let config = args.gallery_config();
        assert_eq!(config.per_page, DEFAULT_PER_PAGE);
        assert_eq!(config.max_skipped_pages, DEFAULT_MAX_SKIPPED_PAGES);
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "picsum-gallery",
            "--endpoint",
            "http://localhost:9000/list",
            "--per-page",
            "8",
            "--max-skipped-pages",
            "0",
            "--headless",
            "--pages",
            "3",
        ])
        .unwrap();
        assert_eq!(args.endpoint, "http://localhost:9000/list");
        assert_eq!(args.gallery_config().per_page, 8);
        assert_eq!(args.gallery_config().max_skipped_pages, 0);
        assert_eq!(args.pages, 3);
    }

    #[test]
    fn zero_per_page_is_rejected() {
        assert!(Args::try_parse_from(["picsum-gallery", "--per-page", "0"]).is_err());
    }

    #[test]
    fn pages_requires_headless() {
        assert!(Args::try_parse_from(["picsum-gallery", "--pages", "2"]).is_err());
    }
}
