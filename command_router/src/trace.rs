// Copyright 2026 the Command Router Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing hooks for batch execution.
//!
//! Tracing is optional and `no_std` friendly. The batch loop only emits the
//! events a sink requests through its [`TraceMask`].
//!
//! To enable tracing, pass a [`TraceMask`] and [`TraceSink`] to
//! [`execute_batch`].

#[cfg(doc)]
use crate::batch::execute_batch;

use crate::batch::BatchError;
use crate::dispatch::DispatchError;
use crate::resolve::BatchContext;

/// A set of trace events requested by a [`TraceSink`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TraceMask(u32);

impl core::ops::BitOr for TraceMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl core::ops::BitOrAssign for TraceMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl TraceMask {
    /// No tracing.
    pub const NONE: Self = Self(0);
    /// Trace batch boundaries.
    ///
    /// Enables:
    /// - [`TraceSink::batch_start`]
    /// - [`TraceSink::batch_end`]
    pub const BATCH: Self = Self(1 << 0);
    /// Trace each dispatched command.
    ///
    /// Enables:
    /// - [`TraceSink::command`]
    pub const COMMAND: Self = Self(1 << 1);

    /// Returns `true` if this mask includes all bits in `other`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

/// Outcome of one dispatched command, for tracing.
#[derive(Clone, Debug)]
pub enum CommandOutcome<'a> {
    /// The command succeeded.
    Ok,
    /// The command reported failure (soft failure, or a tolerated handler
    /// failure); `output` is the reported payload.
    Failed(&'a [u8]),
    /// Dispatch aborted fatally.
    Aborted(&'a DispatchError),
}

/// Outcome of a whole batch, for tracing.
#[derive(Clone, Debug)]
pub enum BatchOutcome<'a> {
    /// Every required command succeeded.
    Ok,
    /// The batch ended early.
    Err(&'a BatchError),
}

/// A trace sink that can receive batch-execution events.
pub trait TraceSink {
    /// Returns the set of events the sink wants.
    fn mask(&self) -> TraceMask {
        TraceMask::NONE
    }

    /// Called before the first command of a batch.
    ///
    /// Called only if `mask()` includes [`TraceMask::BATCH`].
    ///
    /// - `ctx`: the locked-caller context for the batch
    /// - `len`: number of commands submitted
    fn batch_start(&mut self, _ctx: &BatchContext, _len: usize) {}

    /// Called after each dispatched command.
    ///
    /// Called only if `mask()` includes [`TraceMask::COMMAND`].
    ///
    /// - `index`: position of the command in the batch
    /// - `raw`: the raw command byte, flags included
    /// - `outcome`: how the command ended
    fn command(&mut self, _index: usize, _raw: u8, _outcome: CommandOutcome<'_>) {}

    /// Called once the batch ends, successfully or not.
    ///
    /// Called only if `mask()` includes [`TraceMask::BATCH`].
    fn batch_end(&mut self, _outcome: BatchOutcome<'_>) {}
}
