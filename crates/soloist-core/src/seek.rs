//! Seek Navigator
//!
//! Anchors of the form `#video-seek-<seconds>` address a playback offset in
//! the nearest media element that precedes them in document order. Document
//! order is the matching rule; layout proximity is never consulted. The
//! target is repositioned, resumed if paused, and scrolled into view only
//! when its bounding box is not already fully visible.

use crate::error::Result;
use soloist_dom::{Document, NodeId};
use tracing::debug;

/// What an anchor activation did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekOutcome {
    /// The anchor is not a registered seek anchor
    Ignored,
    /// No media element precedes the anchor; nothing was touched
    NoPrecedingMedia,
    /// A media element was repositioned
    Sought {
        /// The element that was repositioned
        target: NodeId,
        /// Offset assigned to its playback position (may be NaN, see below)
        offset: f64,
        /// Whether playback was started by this activation
        played: bool,
        /// Whether a scroll-into-view call was made
        scrolled: bool,
    },
}

/// Parse the seconds offset that follows the seek prefix.
///
/// Reproduces `parseInt(s, 10)`: leading whitespace, an optional sign, then
/// the longest run of decimal digits. Anything else yields NaN, which is
/// still assigned as the playback position; the effect of a NaN position is
/// defined by the document host, not corrected here.
pub fn parse_seek_offset(fragment: &str) -> f64 {
    let s = fragment.trim_start();
    let (sign, digits_part) = match s.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, s.strip_prefix('+').unwrap_or(s)),
    };
    let digit_count = digits_part.chars().take_while(|c| c.is_ascii_digit()).count();
    if digit_count == 0 {
        return f64::NAN;
    }
    digits_part[..digit_count]
        .parse::<f64>()
        .map(|n| sign * n)
        .unwrap_or(f64::NAN)
}

/// Intercepts seek-anchor activations
#[derive(Debug, Default)]
pub struct SeekNavigator {
    /// Registered seek anchors, in document order
    anchors: Vec<NodeId>,
}

impl SeekNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every anchor whose href starts with the seek prefix.
    /// Returns how many anchors are registered afterwards.
    pub fn scan(&mut self, doc: &dyn Document, seek_prefix: &str) -> usize {
        for id in doc.anchors() {
            if let Some(href) = doc.anchor_href(id) {
                if href.starts_with(seek_prefix) && !self.anchors.contains(&id) {
                    self.anchors.push(id);
                }
            }
        }
        self.anchors.len()
    }

    /// Number of registered seek anchors
    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }

    /// Handle an anchor activation. For registered anchors the default
    /// navigation is considered suppressed by the host; this performs the
    /// seek side effects and reports what happened.
    pub fn on_click(
        &self,
        doc: &mut dyn Document,
        anchor: NodeId,
        seek_prefix: &str,
    ) -> Result<SeekOutcome> {
        if !self.anchors.contains(&anchor) {
            return Ok(SeekOutcome::Ignored);
        }
        let href = match doc.anchor_href(anchor) {
            Some(href) => href.to_string(),
            None => return Ok(SeekOutcome::Ignored),
        };

        // Offset sits at the fixed position right after the prefix.
        let offset = parse_seek_offset(&href[seek_prefix.len()..]);

        // Nearest preceding media element: walk backward in document order.
        let videos = doc.media_elements();
        for &video in videos.iter().rev() {
            if !doc.precedes(video, anchor) {
                continue;
            }

            doc.set_current_time(video, offset)?;
            let played = if doc.is_paused(video) {
                doc.play(video)?;
                true
            } else {
                false
            };

            let scrolled = match doc.bounding_box(video) {
                Some(rect) if rect.within_viewport(doc.viewport_height()) => false,
                Some(_) => {
                    doc.scroll_into_view(video)?;
                    true
                }
                None => false,
            };

            debug!(anchor = %anchor, target = %video, offset, played, scrolled, "Seek anchor activated");
            return Ok(SeekOutcome::Sought {
                target: video,
                offset,
                played,
                scrolled,
            });
        }

        Ok(SeekOutcome::NoPrecedingMedia)
    }
}
