//! Live-preview state, independent of any UI toolkit.
//!
//! The owner calls [`PreviewSession::update`] on every edit. Slow renders can
//! be split into [`PreviewSession::begin`] and [`PreviewSession::commit`];
//! a result whose ticket is older than the latest `begin` is dropped.

use std::path::{Path, PathBuf};

use image::{GrayImage, Luma};
use tracing::debug;

use crate::config;
use crate::encoder::{EncodeOptions, encode_text};
use crate::error::{QrError, Result};
use crate::render::to_image_fit;
use crate::tools::{save_png, with_png_extension};

/// Generation marker handed out by [`PreviewSession::begin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Currently displayed symbol and the generation counter
#[derive(Debug, Clone)]
pub struct PreviewSession {
    size: u32,
    quiet_modules: u32,
    options: EncodeOptions,
    current: Option<GrayImage>,
    generation: u64,
}

impl Default for PreviewSession {
    fn default() -> Self {
        Self::new(config::preview_size())
    }
}

impl PreviewSession {
    /// Session rendering `size` x `size` previews at the default error
    /// correction level
    pub fn new(size: u32) -> Self {
        Self {
            size,
            quiet_modules: config::quiet_zone_modules(),
            options: EncodeOptions::new(config::default_ec_level()),
            current: None,
            generation: 0,
        }
    }

    /// Use `options` for subsequent updates
    pub fn with_options(mut self, options: EncodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Re-render for `text`.
    ///
    /// Blank text clears the preview. Encoding failures also clear it and
    /// are not reported. Returns whether a symbol is now shown.
    pub fn update(&mut self, text: &str) -> bool {
        let ticket = self.begin();
        if text.trim().is_empty() {
            self.commit(ticket, None);
            return false;
        }
        let rendered = self.render(text);
        if let Err(err) = &rendered {
            debug!(error = %err, "preview cleared");
        }
        self.commit(ticket, rendered.ok())
    }

    /// Render `text` without touching the session state
    pub fn render(&self, text: &str) -> Result<GrayImage> {
        let code = encode_text(text, &self.options)?;
        to_image_fit(
            &code,
            self.size,
            self.size,
            self.quiet_modules,
            Luma([0]),
            Luma([255]),
        )
    }

    /// Start a new generation; older tickets become stale
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        Ticket(self.generation)
    }

    /// Install a result for `ticket`; stale results are dropped.
    ///
    /// Returns whether a symbol is shown after the call.
    pub fn commit(&mut self, ticket: Ticket, image: Option<GrayImage>) -> bool {
        if ticket.0 != self.generation {
            debug!(ticket = ticket.0, latest = self.generation, "dropping stale preview");
            return self.current.is_some();
        }
        self.current = image;
        self.current.is_some()
    }

    /// Remove the shown symbol
    pub fn clear(&mut self) {
        let ticket = self.begin();
        self.commit(ticket, None);
    }

    /// Symbol currently shown, if any
    pub fn current(&self) -> Option<&GrayImage> {
        self.current.as_ref()
    }

    /// Save the shown symbol as PNG, appending `.png` when missing
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf> {
        let image = self.current.as_ref().ok_or(QrError::NothingToSave)?;
        save_png(image, with_png_extension(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_and_clear() {
        let mut session = PreviewSession::new(300);
        assert!(session.update("https://example.com"));
        let image = session.current().unwrap();
        assert_eq!(image.dimensions(), (300, 300));

        assert!(!session.update("   "));
        assert!(session.current().is_none());

        assert!(session.update("again"));
        session.clear();
        assert!(session.current().is_none());
    }

    #[test]
    fn test_failure_clears_silently() {
        let mut session = PreviewSession::new(300);
        assert!(session.update("ok"));
        let too_long = "x".repeat(3000);
        assert!(!session.update(&too_long));
        assert!(session.current().is_none());
    }

    #[test]
    fn test_stale_ticket_dropped() {
        let mut session = PreviewSession::new(100);
        let old = session.begin();
        let new = session.begin();
        let image = session.render("newest").unwrap();
        assert!(session.commit(new, Some(image)));
        assert!(session.commit(old, None));
        assert!(session.current().is_some());
    }

    #[test]
    fn test_save_without_symbol() {
        let session = PreviewSession::new(100);
        assert!(matches!(session.save("nothing"), Err(QrError::NothingToSave)));
    }
}
