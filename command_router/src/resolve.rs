// Copyright 2026 the Command Router Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sentinel-address and payer resolution against the batch context.
//!
//! The context is owned by the embedder: constructed before the first
//! instruction of a batch, passed by shared reference into every dispatch,
//! and dropped after the batch ends. Dispatch only reads it.

use crate::abi::Address;

/// Sentinel operand meaning "substitute the locked caller".
pub const CALLER_SENTINEL: Address = Address::from_low_u64(1);

/// Sentinel operand meaning "substitute the engine's own identity".
pub const ENGINE_SENTINEL: Address = Address::from_low_u64(2);

/// The locked-caller context for one batch.
///
/// Records the identity on whose behalf the batch executes plus the engine's
/// own identity. Both are fixed for the lifetime of the batch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BatchContext {
    /// The locked caller: the identity the batch executes on behalf of.
    pub caller: Address,
    /// The engine's own identity.
    pub engine: Address,
}

impl BatchContext {
    /// Creates a context for a batch locked to `caller`, executed by `engine`.
    #[must_use]
    pub const fn new(caller: Address, engine: Address) -> Self {
        Self { caller, engine }
    }

    /// Resolves a raw address operand.
    ///
    /// The two sentinel values map to the locked caller and the engine
    /// respectively; every other bit pattern is a literal address. Total: no
    /// failure mode.
    #[must_use]
    pub fn resolve_recipient(&self, raw: Address) -> Address {
        if raw == CALLER_SENTINEL {
            self.caller
        } else if raw == ENGINE_SENTINEL {
            self.engine
        } else {
            raw
        }
    }

    /// Resolves the payer for a fund-moving instruction.
    ///
    /// `true` selects the locked caller (funds pulled through the allowance
    /// mechanism); `false` selects the engine's own held balance.
    #[must_use]
    pub fn resolve_payer(&self, payer_is_caller: bool) -> Address {
        if payer_is_caller {
            self.caller
        } else {
            self.engine
        }
    }
}
