//! Dirty-flag state with nested suppression scopes.
//!
//! Each observable object carries a [`Damage`]. Damaging sets the flag and
//! raises `Modified` unless suppressed:
//!
//! - inside an *unchecked* scope neither the flag is set nor the signal raised;
//! - inside an *unreported* scope the flag is set but no signal is raised.
//!
//! Scopes nest by counter, so suppression only lifts once every enclosing
//! scope has exited. The window owns the scope entry points
//! (`MainWindow::unchecked`, `MainWindow::unreported`) since signals are
//! dispatched through it.

/// Damage state of one observable object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Damage {
    damaged: bool,
    unchecked_depth: u32,
    unreported_depth: u32,
}

/// What a call to [`Damage::mark`] decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marked {
    /// Flagging is suppressed; nothing changed.
    Suppressed,
    /// The flag is set but the change must not be reported.
    Flagged,
    /// The flag is set and a `Modified` signal should be raised.
    Report,
}

impl Damage {
    /// A clean state with no active scopes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the object changed since the last clear.
    pub fn is_damaged(&self) -> bool {
        self.damaged
    }

    /// Whether `mark` currently sets the flag.
    pub fn flagging_enabled(&self) -> bool {
        self.unchecked_depth == 0
    }

    /// Whether `mark` currently asks for a `Modified` signal.
    pub fn reporting_enabled(&self) -> bool {
        self.unchecked_depth == 0 && self.unreported_depth == 0
    }

    /// Set the flag if allowed and report what the caller should do next.
    pub fn mark(&mut self) -> Marked {
        if !self.flagging_enabled() {
            return Marked::Suppressed;
        }
        self.damaged = true;
        if self.reporting_enabled() {
            Marked::Report
        } else {
            Marked::Flagged
        }
    }

    /// Reset the flag.
    pub fn clear(&mut self) {
        self.damaged = false;
    }

    pub fn enter_unchecked(&mut self) {
        self.unchecked_depth += 1;
    }

    pub fn exit_unchecked(&mut self) {
        self.unchecked_depth = self.unchecked_depth.saturating_sub(1);
    }

    pub fn enter_unreported(&mut self) {
        self.unreported_depth += 1;
    }

    pub fn exit_unreported(&mut self) {
        self.unreported_depth = self.unreported_depth.saturating_sub(1);
    }
}

// ===========================================================================
// Tests
// ===========================================================================
