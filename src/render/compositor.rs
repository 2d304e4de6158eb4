use std::time::{Duration, Instant};

use crate::{
    foundation::{
        core::{Category, PerCategory},
        error::EmojiResult,
    },
    render::{
        resolve::{Resolution, ResolvedBatch},
        surface::Surface,
    },
    selection::state::BatchToken,
};

/// Short-lived cosmetic cue raised after every draw. It never affects pixels.
#[derive(Clone, Debug)]
pub struct TransitionCue {
    duration: Duration,
    started: Option<Instant>,
}

impl TransitionCue {
    /// Create an inactive cue lasting `duration` once triggered.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            started: None,
        }
    }

    /// Start (or restart) the cue at `now`.
    pub fn trigger(&mut self, now: Instant) {
        self.started = Some(now);
    }

    /// Whether the cue is showing at `now`.
    pub fn is_active(&self, now: Instant) -> bool {
        self.started
            .is_some_and(|t| now.saturating_duration_since(t) < self.duration)
    }
}

/// Result of offering a resolved batch to the compositor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    /// The batch was drawn onto the surface.
    Drawn,
    /// A newer request exists; the batch was discarded untouched.
    Stale,
}

/// Owns the composite surface and applies last-write-wins on batch tokens.
#[derive(Debug)]
pub struct Compositor {
    surface: Surface,
    latest_requested: BatchToken,
    drawn: Option<BatchToken>,
    current: Option<ResolvedBatch>,
    cue: TransitionCue,
}

impl Compositor {
    /// Create a compositor drawing onto a `size`×`size` surface.
    pub fn new(size: u32, pulse: Duration) -> EmojiResult<Self> {
        Ok(Self {
            surface: Surface::new(size)?,
            latest_requested: BatchToken::default(),
            drawn: None,
            current: None,
            cue: TransitionCue::new(pulse),
        })
    }

    /// Record that a request with `token` was issued. Completions of older tokens become stale.
    pub fn note_request(&mut self, token: BatchToken) {
        self.latest_requested = self.latest_requested.max(token);
    }

    /// Draw `batch` unless a newer request has been issued since it was requested.
    ///
    /// The surface is cleared and every resolved layer is painted in category order, stretched to
    /// the full surface.
    pub fn complete(&mut self, batch: ResolvedBatch, now: Instant) -> EmojiResult<DrawOutcome> {
        self.note_request(batch.token);
        if batch.token < self.latest_requested {
            tracing::debug!(
                token = batch.token.0,
                latest = self.latest_requested.0,
                "discarding stale composite"
            );
            return Ok(DrawOutcome::Stale);
        }

        for (category, resolution) in batch.layers.iter() {
            if let Resolution::Failed(reason) = resolution {
                tracing::debug!(%category, %reason, "skipping failed layer");
            }
        }
        self.surface
            .composite(batch.layers.iter().filter_map(|(_, r)| r.image()))?;

        self.cue.trigger(now);
        self.drawn = Some(batch.token);
        self.current = Some(batch);
        Ok(DrawOutcome::Drawn)
    }

    /// The composite surface.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Token of the batch currently on the surface, `None` before the first draw.
    pub fn drawn_token(&self) -> Option<BatchToken> {
        self.drawn
    }

    /// Selection snapshot currently on the surface.
    pub fn drawn_snapshot(&self) -> Option<&PerCategory<usize>> {
        self.current.as_ref().map(|b| &b.snapshot)
    }

    /// Resolved layer for `category` from the batch currently on the surface.
    pub fn resolved(&self, category: Category) -> Option<&Resolution> {
        self.current.as_ref().map(|b| &b.layers[category])
    }

    /// Whether the transition cue is showing at `now`.
    pub fn cue_active(&self, now: Instant) -> bool {
        self.cue.is_active(now)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
