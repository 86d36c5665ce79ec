// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cooldown gate for callers without a personal credential.
//!
//! The gate is an explicit timer object: [`CooldownGate::arm`] opens a
//! window of fixed length, and [`CooldownGate::can_proceed`] stays false until
//! that window elapses. Expiry is derived from the injected [`Clock`] on every
//! query, so the gate clears itself whether or not anyone asks, and whatever
//! the outcome of the call that armed it.

pub mod clock;

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use ryze_config::model::CooldownConfig;
use tracing::{debug, warn};

pub use clock::{Clock, SystemClock};

/// Point-in-time view of the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownState {
    pub active: bool,
    /// End of the current window; `None` once cleared.
    pub expires_at: Option<Instant>,
}

/// Longest window a gate will hold; longer durations are clamped to it.
pub const MAX_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

/// Minimum idle period enforced between free-tier generation calls.
///
/// All methods take `&self`; wrap the gate in an [`Arc`] to share one window
/// across sessions.
pub struct CooldownGate {
    duration: Duration,
    clock: Arc<dyn Clock>,
    expires_at: Mutex<Option<Instant>>,
    enabled: bool,
}

impl CooldownGate {
    /// Creates a gate with the given window length and time source.
    ///
    /// The length is clamped to [`MAX_WINDOW`].
    pub fn new(duration: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            duration: duration.min(MAX_WINDOW),
            clock,
            expires_at: Mutex::new(None),
            enabled: true,
        }
    }

    /// Creates a gate on the system clock.
    pub fn with_system_clock(duration: Duration) -> Self {
        Self::new(duration, Arc::new(SystemClock))
    }

    /// A gate that never blocks.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::with_system_clock(Duration::ZERO)
        }
    }

    /// Builds a gate from the `[cooldown]` section.
    pub fn from_config(config: &CooldownConfig) -> Self {
        if config.enabled {
            Self::with_system_clock(Duration::from_secs(config.duration_secs))
        } else {
            Self::disabled()
        }
    }

    /// Window length, after clamping.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Starts (or restarts) the window at the current instant.
    pub fn arm(&self) {
        if !self.enabled {
            return;
        }
        let now = self.clock.now();
        let Some(expires_at) = now.checked_add(self.duration) else {
            warn!(
                duration_ms = self.duration.as_millis() as u64,
                "cooldown window out of clock range, not armed"
            );
            return;
        };
        *self.lock() = Some(expires_at);
        debug!(duration_ms = self.duration.as_millis() as u64, "cooldown armed");
    }

    /// Whether a new free-tier call may be dispatched now.
    pub fn can_proceed(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Time left in the current window, zero when clear.
    pub fn remaining(&self) -> Duration {
        self.state()
            .expires_at
            .map(|at| at.saturating_duration_since(self.clock.now()))
            .unwrap_or(Duration::ZERO)
    }

    /// Clears the window immediately.
    pub fn release(&self) {
        if self.lock().take().is_some() {
            debug!("cooldown released");
        }
    }

    /// Current state. An elapsed window is dropped before reporting.
    pub fn state(&self) -> CooldownState {
        let now = self.clock.now();
        let mut guard = self.lock();
        if let Some(at) = *guard
            && at <= now
        {
            *guard = None;
        }
        CooldownState {
            active: guard.is_some(),
            expires_at: *guard,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Instant>> {
        self.expires_at
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for CooldownGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CooldownGate")
            .field("duration", &self.duration)
            .field("enabled", &self.enabled)
            .field("state", &self.state())
            .finish()
    }
}
