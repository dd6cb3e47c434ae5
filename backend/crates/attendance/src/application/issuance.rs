//! Issuance Timer
//!
//! Issuer-side state machine:
//!
//! ```text
//! Idle -> Visible(display) -> Blurred -> Revealed(reveal) -> Blurred ...
//! ```
//!
//! Every (re)generation returns to `Visible` with a full countdown and a new
//! issuance time. Ticks are fed in from outside, one per unit.

use kernel::TimestampMs;
use platform::countdown::{Countdown, CountdownTick};

use crate::application::config::AttendanceConfig;
use crate::domain::codec::TokenCodec;
use crate::domain::entities::IssuedToken;
use crate::domain::value_objects::{ClassId, RevealPhase};
use crate::error::{AttendanceError, AttendanceResult};

/// Read-only copy of the timer state, published to renderers
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IssuerSnapshot {
    pub phase: RevealPhase,
    /// Units left on the active countdown
    pub remaining: u32,
    /// Full length of the active countdown
    pub total: u32,
    pub token: Option<IssuedToken>,
    pub reveals_used: u32,
    pub max_reveals: Option<u32>,
    /// Incremented on every (re)generation
    pub generation: u64,
}

impl IssuerSnapshot {
    pub fn can_reveal(&self) -> bool {
        self.phase == RevealPhase::Blurred
            && self.max_reveals.is_none_or(|max| self.reveals_used < max)
    }
}

#[derive(Debug, Clone)]
pub struct IssuanceTimer {
    codec: TokenCodec,
    display_units: u32,
    reveal_units: u32,
    max_reveals: Option<u32>,
    phase: RevealPhase,
    countdown: Countdown,
    token: Option<IssuedToken>,
    reveals_used: u32,
    generation: u64,
}

impl IssuanceTimer {
    pub fn new(config: &AttendanceConfig) -> Self {
        Self {
            codec: config.codec(),
            display_units: config.display_units.max(1),
            reveal_units: config.reveal_units.max(1),
            max_reveals: config.max_reveals,
            phase: RevealPhase::Idle,
            countdown: Countdown::idle(),
            token: None,
            reveals_used: 0,
            generation: 0,
        }
    }

    /// Issue a fresh token for `class_id`. On error the state is unchanged.
    pub fn generate(&mut self, class_id: &str, now_ms: TimestampMs) -> AttendanceResult<&IssuedToken> {
        let class_id = ClassId::parse(class_id)?;
        let payload = self.codec.encode(class_id, now_ms);
        let wire = self.codec.to_wire(&payload)?;

        self.countdown.start(self.display_units);
        self.phase = RevealPhase::Visible;
        self.reveals_used = 0;
        self.generation += 1;
        Ok(self.token.insert(IssuedToken { payload, wire }))
    }

    /// Same as [`generate`](Self::generate); accepted from any phase,
    /// including `Idle`.
    pub fn regenerate(&mut self, class_id: &str, now_ms: TimestampMs) -> AttendanceResult<&IssuedToken> {
        self.generate(class_id, now_ms)
    }

    /// Consume one unit. No-op while `Idle` or `Blurred`.
    pub fn tick(&mut self) -> RevealPhase {
        if let CountdownTick::Elapsed = self.countdown.tick()
            && matches!(self.phase, RevealPhase::Visible | RevealPhase::Revealed)
        {
            self.phase = RevealPhase::Blurred;
        }
        self.phase
    }

    /// Unmask a blurred token for the reveal duration
    pub fn reveal(&mut self) -> AttendanceResult<()> {
        if self.phase != RevealPhase::Blurred {
            return Err(AttendanceError::RevealNotAvailable { phase: self.phase });
        }
        if let Some(max) = self.max_reveals
            && self.reveals_used >= max
        {
            return Err(AttendanceError::RevealLimitReached { max });
        }
        self.reveals_used += 1;
        self.phase = RevealPhase::Revealed;
        self.countdown.start(self.reveal_units);
        Ok(())
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn token(&self) -> Option<&IssuedToken> {
        self.token.as_ref()
    }

    pub fn snapshot(&self) -> IssuerSnapshot {
        let total = match self.phase {
            RevealPhase::Revealed => self.reveal_units,
            RevealPhase::Idle => 0,
            RevealPhase::Visible | RevealPhase::Blurred => self.display_units,
        };
        IssuerSnapshot {
            phase: self.phase,
            remaining: self.countdown.remaining(),
            total,
            token: self.token.clone(),
            reveals_used: self.reveals_used,
            max_reveals: self.max_reveals,
            generation: self.generation,
        }
    }
}
