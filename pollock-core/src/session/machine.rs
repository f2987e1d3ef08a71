use std::path::Path;

use anyhow::Context;
use rand::rngs::StdRng;

use crate::config::PollockConfig;
use crate::export::png::{ExportArtifact, export_png};
use crate::foundation::error::{PollockError, PollockResult};
use crate::ingest::normalize::{NormalizedImage, ingest};
use crate::ingest::source::{SelectedFile, SourceImage, validate_selection};
use crate::render::painter::{RenderStats, render_with_stats};
use crate::render::random::{RandomSource, RngSource};
use crate::render::surface::DrawingSurface;

/// Observable lifecycle of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Awaiting a file.
    Empty,
    /// A file was accepted and its bytes are being read.
    Loading,
    /// Image normalized and drawn; export is possible.
    Ready,
}

/// Identifies one in-flight load. Completions carrying an outdated ticket are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

/// Result of [`Session::complete_load`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The image was ingested and rendered.
    Ready,
    /// The load was superseded (removed or restarted) and its result dropped.
    Stale,
}

struct Mounted {
    image: NormalizedImage,
    surface: DrawingSurface,
    stats: RenderStats,
}

enum State {
    Empty,
    Loading {
        ticket: LoadTicket,
        file: SelectedFile,
    },
    Ready(Box<Mounted>),
}

/// One user session: `Empty -> Loading -> Ready -> Empty`.
///
/// The session owns the normalized image and drawing surface while `Ready` and
/// drops both on [`Session::remove`]. Errors never leave the session unusable;
/// they attach a user-facing message (see [`Session::message`]).
pub struct Session<R: RandomSource = RngSource<StdRng>> {
    config: PollockConfig,
    rng: R,
    state: State,
    message: Option<String>,
    next_ticket: u64,
}

impl Session<RngSource<StdRng>> {
    /// Session with an entropy-seeded random source.
    pub fn new(config: PollockConfig) -> PollockResult<Self> {
        Self::with_random(config, RngSource::from_os())
    }
}

impl<R: RandomSource> Session<R> {
    /// Session drawing from `rng`; fails if `config` does not validate.
    pub fn with_random(config: PollockConfig, rng: R) -> PollockResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            state: State::Empty,
            message: None,
            next_ticket: 0,
        })
    }

    /// Configuration the session was created with.
    pub fn config(&self) -> &PollockConfig {
        &self.config
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        match self.state {
            State::Empty => Phase::Empty,
            State::Loading { .. } => Phase::Loading,
            State::Ready(_) => Phase::Ready,
        }
    }

    /// Message from the most recent failed operation, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The normalized image while `Ready`.
    pub fn image(&self) -> Option<&NormalizedImage> {
        match &self.state {
            State::Ready(m) => Some(&m.image),
            _ => None,
        }
    }

    /// The drawn surface while `Ready`.
    pub fn surface(&self) -> Option<&DrawingSurface> {
        match &self.state {
            State::Ready(m) => Some(&m.surface),
            _ => None,
        }
    }

    /// Counters from the render that produced the current surface.
    pub fn render_stats(&self) -> Option<RenderStats> {
        match &self.state {
            State::Ready(m) => Some(m.stats),
            _ => None,
        }
    }

    /// Accept a file for loading. Only valid while `Empty`.
    ///
    /// Type and size are checked here, before any bytes are read; on failure the
    /// session stays `Empty` with a message attached.
    pub fn select(&mut self, file: &SelectedFile) -> PollockResult<LoadTicket> {
        if !matches!(self.state, State::Empty) {
            return Err(PollockError::validation(
                "a file is already selected; remove it before choosing another",
            ));
        }
        self.message = None;

        if let Err(e) = validate_selection(file, &self.config.ingest) {
            tracing::info!(file = %file.name, error = %e, "rejected selection");
            self.message = Some(e.user_message());
            return Err(e);
        }

        let ticket = LoadTicket(self.next_ticket);
        self.next_ticket += 1;
        tracing::debug!(file = %file.name, ticket = ticket.0, "loading");
        self.state = State::Loading {
            ticket,
            file: file.clone(),
        };
        Ok(ticket)
    }

    /// Finish a load started by [`Session::select`] with the file's bytes.
    ///
    /// Completions for a ticket that is no longer current are dropped and
    /// reported as [`LoadOutcome::Stale`].
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        bytes: Vec<u8>,
    ) -> PollockResult<LoadOutcome> {
        let mime = match &self.state {
            State::Loading { ticket: current, file } if *current == ticket => file.mime.clone(),
            _ => {
                tracing::debug!(ticket = ticket.0, "dropping stale load");
                return Ok(LoadOutcome::Stale);
            }
        };

        match self.mount(SourceImage::new(bytes, mime)) {
            Ok(mounted) => {
                self.state = State::Ready(Box::new(mounted));
                Ok(LoadOutcome::Ready)
            }
            Err(e) => {
                tracing::info!(error = %e, "load failed");
                self.state = State::Empty;
                self.message = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Select, read and load a file from disk in one call.
    pub fn load_path(&mut self, path: &Path) -> PollockResult<LoadOutcome> {
        let file = match SelectedFile::from_path(path) {
            Ok(f) => f,
            Err(e) => {
                self.message = Some(e.user_message());
                return Err(e);
            }
        };
        let ticket = self.select(&file)?;
        let bytes = match std::fs::read(path).with_context(|| format!("read '{}'", path.display()))
        {
            Ok(b) => b,
            Err(e) => {
                let e = PollockError::from(e);
                self.state = State::Empty;
                self.message = Some(e.user_message());
                return Err(e);
            }
        };
        self.complete_load(ticket, bytes)
    }

    /// Discard the current image and surface, returning to `Empty`.
    ///
    /// Returns whether anything was discarded; a second call is a no-op.
    pub fn remove(&mut self) -> bool {
        let discarded = !matches!(self.state, State::Empty);
        if discarded {
            tracing::debug!(phase = ?self.phase(), "removing image");
        }
        self.state = State::Empty;
        discarded
    }

    /// Encode the current drawing for download.
    ///
    /// Failures attach a message but leave a `Ready` drawing in place.
    pub fn export(&mut self) -> PollockResult<ExportArtifact> {
        let result = if !self.config.export.enabled {
            Err(PollockError::export_unavailable(
                "download is disabled in this configuration",
            ))
        } else {
            match &self.state {
                State::Ready(m) => export_png(&m.surface, &self.config.export.filename),
                _ => Err(PollockError::export_unavailable("no drawing surface")),
            }
        };
        if let Err(e) = &result {
            self.message = Some(e.user_message());
        }
        result
    }

    fn mount(&mut self, source: SourceImage) -> PollockResult<Mounted> {
        let image = ingest(source, &self.config.ingest)?;
        let (surface, stats) = render_with_stats(&image, &self.config.render, &mut self.rng)?;
        Ok(Mounted {
            image,
            surface,
            stats,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/machine.rs"]
mod tests;
