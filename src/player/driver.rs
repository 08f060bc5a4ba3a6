// SPDX-License-Identifier: MPL-2.0
//! The playback driver: control API, state machine, and tick cadence.
//!
//! [`Player`] owns at most one `Session` at a time and is driven by an
//! external scheduler calling [`Player::tick`] at the cadence reported by
//! [`Player::tick_interval`]. Every pipeline entry point takes `&mut self`,
//! so overlapping calls are unrepresentable and the single-flow contract
//! needs no internal locking.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, warn};

use super::converter::PresentableImage;
use super::session::{PumpOutcome, Session, SessionInfo};
use super::speed::PlaybackSpeed;
use super::state::PlaybackState;
use crate::config::SEEK_STEP_MS;
use crate::error::{OpenError, PlaybackError, SeekError};

/// Display sink: receives each presentable frame and the current position in
/// milliseconds. The image is only valid for the duration of the call.
pub type FrameSink = Box<dyn FnMut(PresentableImage<'_>, i64)>;

/// State sink: receives `(state, duration_ms, current_time_ms)` whenever the
/// playback state or position changes discontinuously.
pub type StateSink = Box<dyn FnMut(PlaybackState, i64, i64)>;

/// Tick-driven video player.
pub struct Player {
    session: Option<Session>,
    on_frame: Option<FrameSink>,
    on_state_changed: Option<StateSink>,
}

impl Player {
    /// Creates a player with no open session and no sinks attached.
    pub fn new() -> Self {
        Self {
            session: None,
            on_frame: None,
            on_state_changed: None,
        }
    }

    /// Installs the frame-ready callback.
    pub fn set_on_frame(&mut self, sink: FrameSink) {
        self.on_frame = Some(sink);
    }

    /// Installs the state-changed callback.
    pub fn set_on_state_changed(&mut self, sink: StateSink) {
        self.on_state_changed = Some(sink);
    }

    /// Opens a media file and auto-starts playback.
    ///
    /// Any existing session is torn down first, even if this open
    /// subsequently fails.
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<SessionInfo, OpenError> {
        self.cleanup();

        let mut session = Session::open(path)?;
        session.state = PlaybackState::Playing;
        let info = session.info();
        self.session = Some(session);
        self.emit_state();
        Ok(info)
    }

    /// Resumes (or starts) the tick cadence from the current position.
    pub fn play(&mut self) -> Result<(), PlaybackError> {
        let session = self
            .session
            .as_mut()
            .ok_or(PlaybackError::NoActiveSession)?;
        if !session.state.is_playing() {
            session.state = PlaybackState::Playing;
            self.emit_state();
        }
        Ok(())
    }

    /// Suspends the cadence, retaining the position exactly.
    pub fn pause(&mut self) -> Result<(), PlaybackError> {
        let session = self
            .session
            .as_mut()
            .ok_or(PlaybackError::NoActiveSession)?;
        if session.state.is_playing() {
            session.state = PlaybackState::Paused;
            self.emit_state();
        }
        Ok(())
    }

    /// Stops playback and rewinds to the start.
    ///
    /// Seeks the source to time 0, flushes the decoder, zeroes the position,
    /// and forces one pump so the first frame is on display while stopped.
    pub fn stop(&mut self) -> Result<(), PlaybackError> {
        let session = self
            .session
            .as_mut()
            .ok_or(PlaybackError::NoActiveSession)?;

        if let Err(e) = session.source.seek_ms(0) {
            warn!(error = %e, "rewind to start failed");
        }
        session.decoder.flush();
        session.state = PlaybackState::Stopped;
        session.pump(&mut self.on_frame);
        // The pumped frame may carry a small pts; the reported position after
        // a stop is always the start.
        session.current_time_ms = 0;

        self.emit_state();
        Ok(())
    }

    /// Seeks to `target_ms`, clamped to `[0, duration]`.
    ///
    /// On success the decoder is flushed and one pump runs immediately, so
    /// the display reflects the new position without waiting for the next
    /// tick. Precision is bounded by the container's keyframe granularity.
    /// On failure, position and state are left unchanged.
    pub fn seek(&mut self, target_ms: i64) -> Result<(), SeekError> {
        let Some(session) = self.session.as_mut() else {
            return Err(SeekError::NoActiveSession);
        };

        let target_ms = if session.duration_ms > 0 {
            target_ms.clamp(0, session.duration_ms)
        } else {
            target_ms.max(0)
        };

        session.source.seek_ms(target_ms)?;
        session.decoder.flush();
        session.current_time_ms = target_ms;
        session.pump(&mut self.on_frame);

        self.emit_state();
        Ok(())
    }

    /// Seeks forward by the configured step.
    pub fn step_forward(&mut self) -> Result<(), SeekError> {
        let target = self.current_time_ms() + SEEK_STEP_MS;
        self.seek(target)
    }

    /// Seeks backward by the configured step.
    pub fn step_backward(&mut self) -> Result<(), SeekError> {
        let target = self.current_time_ms() - SEEK_STEP_MS;
        self.seek(target)
    }

    /// Updates the speed multiplier (clamped to the valid range).
    ///
    /// Speed only changes the cadence the scheduler should use; decoded
    /// content and timestamps are unaffected. The scheduler is expected to
    /// re-read [`tick_interval`](Self::tick_interval) after this call.
    pub fn set_speed(&mut self, multiplier: f64) {
        if let Some(session) = self.session.as_mut() {
            session.speed = PlaybackSpeed::new(multiplier);
            debug!(speed = session.speed.value(), "playback speed changed");
        }
    }

    /// One pump step, invoked by the external scheduler while playing.
    ///
    /// A no-op unless the state is `Playing`. Reaching end-of-stream
    /// transitions to `Stopped` exactly once; subsequent ticks do nothing
    /// until `play` is called again.
    pub fn tick(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.state.is_playing() {
            return;
        }

        if let PumpOutcome::EndOfStream = session.pump(&mut self.on_frame) {
            debug!("end of stream");
            let _ = self.stop();
        }
    }

    /// Releases the current session, if any, and notifies collaborators to
    /// revert to their default display. Safe to call at any time; calling it
    /// repeatedly produces the same reset state.
    pub fn cleanup(&mut self) {
        if self.session.take().is_some() {
            debug!("released playback session");
        }
        self.emit_state();
    }

    /// Current playback speed (1.0x when nothing is open).
    pub fn speed(&self) -> PlaybackSpeed {
        self.session
            .as_ref()
            .map(|s| s.speed)
            .unwrap_or_default()
    }

    /// Interval at which the scheduler should invoke [`tick`](Self::tick).
    pub fn tick_interval(&self) -> Duration {
        self.speed().tick_interval()
    }

    /// Total duration in milliseconds (0 when nothing is open).
    pub fn duration_ms(&self) -> i64 {
        self.session.as_ref().map_or(0, |s| s.duration_ms)
    }

    /// Current position in milliseconds (0 when nothing is open).
    pub fn current_time_ms(&self) -> i64 {
        self.session.as_ref().map_or(0, |s| s.current_time_ms)
    }

    /// True while the tick cadence is active.
    pub fn is_playing(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.state.is_playing())
    }

    /// Current playback state (`Stopped` when nothing is open).
    pub fn state(&self) -> PlaybackState {
        self.session
            .as_ref()
            .map_or(PlaybackState::Stopped, |s| s.state)
    }

    fn emit_state(&mut self) {
        let (state, duration_ms, current_time_ms) = match self.session.as_ref() {
            Some(s) => (s.state, s.duration_ms, s.current_time_ms),
            None => (PlaybackState::Stopped, 0, 0),
        };
        if let Some(sink) = self.on_state_changed.as_mut() {
            sink(state, duration_ms, current_time_ms);
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
