// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outcome of a programmatic controller command.

/// What a command such as `open`, `close` or `dismiss` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum CommandOutcome {
    /// The state changed and a settle was issued.
    Applied,
    /// The controller was already in (or heading to) the requested state.
    ///
    /// A settle may still have been issued to put the surface exactly in
    /// place, but no listener was notified.
    AlreadyInState,
    /// The requested edge is not allowed by the controller's mode.
    IgnoredInvalidEdge,
    /// No surface is laid out.
    NoSurface,
}

impl CommandOutcome {
    /// Returns `true` if the command changed the controller's state.
    #[must_use]
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}
