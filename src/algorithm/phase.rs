//! Cancelable quiescence timer that starts the morph phase
//!
//! Scheduling hands out a monotonic [`PhaseToken`]. Rescheduling or
//! canceling invalidates the previous token, so a stale timer can never fire.

/// Identifies one scheduled phase start
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhaseToken(u64);

/// Emitted when a scheduled phase start comes due
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseStart {
    /// Token of the schedule that fired
    pub token: PhaseToken,
    /// Frame on which it fired
    pub frame: u64,
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    token: PhaseToken,
    due: u64,
}

/// Single-slot timer measured in frames
#[derive(Clone, Debug, Default)]
pub struct PhaseController {
    issued: u64,
    pending: Option<Pending>,
}

impl PhaseController {
    /// Create a controller with nothing scheduled
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a phase start `delay` frames after `now`, replacing any pending one
    pub fn schedule(&mut self, now: u64, delay: u64) -> PhaseToken {
        self.issued += 1;
        let token = PhaseToken(self.issued);
        self.pending = Some(Pending {
            token,
            due: now.saturating_add(delay),
        });
        token
    }

    /// Cancel the pending phase start, returning its token
    pub fn cancel(&mut self) -> Option<PhaseToken> {
        self.pending.take().map(|pending| pending.token)
    }

    /// Whether a phase start is scheduled
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether `token` is the one currently scheduled
    pub fn is_live(&self, token: PhaseToken) -> bool {
        self.pending.is_some_and(|pending| pending.token == token)
    }

    /// Fire the pending phase start if it is due at `now`
    pub fn poll(&mut self, now: u64) -> Option<PhaseStart> {
        let pending = self.pending.filter(|pending| now >= pending.due)?;
        self.pending = None;
        Some(PhaseStart {
            token: pending.token,
            frame: now,
        })
    }
}
