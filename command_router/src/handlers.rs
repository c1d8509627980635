// Copyright 2026 the Command Router Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Operation handler boundary.
//!
//! The dispatcher delegates every effectful operation to an embedder-provided
//! [`Handlers`] implementation: swap execution for the two pool families, the
//! value-transfer/allowance subsystem, permit validation, and balance queries.
//! The router treats handler failures as opaque and passes them through
//! unchanged.
//!
//! All addresses reaching a handler are fully resolved: sentinel substitution
//! and payer selection have already happened.

use core::fmt;

use crate::abi::{Address, Word};
use crate::operands::{AllowanceTransferDetails, PermitBatch, PermitSingle};

/// Failure reported by a delegated handler.
///
/// Opaque to the router: every variant is fatal for the dispatch step and is
/// propagated unchanged to the batch caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandlerError {
    /// A swap exceeded its slippage limit.
    SlippageExceeded,
    /// The payer's balance or allowance could not cover the operation.
    InsufficientFunds,
    /// A permit signature failed validation.
    InvalidSignature,
    /// Any other handler failure.
    Failed,
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SlippageExceeded => write!(f, "slippage limit exceeded"),
            Self::InsufficientFunds => write!(f, "insufficient funds or allowance"),
            Self::InvalidSignature => write!(f, "invalid permit signature"),
            Self::Failed => write!(f, "handler failed"),
        }
    }
}

impl core::error::Error for HandlerError {}

/// The set of delegated operations behind the router.
///
/// Implementations may re-enter the engine through external systems they
/// invoke; the dispatcher only reads the batch context, so correctness under
/// reentrancy is the context owner's responsibility.
pub trait Handlers {
    /// Executes an exact-input swap through the concentrated-liquidity family.
    fn concentrated_swap_exact_in(
        &mut self,
        recipient: Address,
        amount_in: Word,
        amount_out_min: Word,
        path: &[u8],
        payer: Address,
    ) -> Result<(), HandlerError>;

    /// Executes an exact-output swap through the concentrated-liquidity family.
    fn concentrated_swap_exact_out(
        &mut self,
        recipient: Address,
        amount_out: Word,
        amount_in_max: Word,
        path: &[u8],
        payer: Address,
    ) -> Result<(), HandlerError>;

    /// Executes an exact-input swap through the classic constant-product family.
    fn classic_swap_exact_in(
        &mut self,
        recipient: Address,
        amount_in: Word,
        amount_out_min: Word,
        path: &[Address],
        payer: Address,
    ) -> Result<(), HandlerError>;

    /// Executes an exact-output swap through the classic constant-product family.
    fn classic_swap_exact_out(
        &mut self,
        recipient: Address,
        amount_out: Word,
        amount_in_max: Word,
        path: &[Address],
        payer: Address,
    ) -> Result<(), HandlerError>;

    /// Pulls `amount` of `token` from `owner` to `recipient` through the
    /// allowance mechanism.
    fn allowance_transfer(
        &mut self,
        token: Address,
        recipient: Address,
        amount: Word,
        owner: Address,
    ) -> Result<(), HandlerError>;

    /// Executes a batch of allowance-funded transfers.
    ///
    /// The dispatcher has already verified that every entry's owner is the
    /// locked caller and resolved every recipient.
    fn allowance_transfer_batch(
        &mut self,
        transfers: &[AllowanceTransferDetails],
    ) -> Result<(), HandlerError>;

    /// Applies a single allowance permit signed by `owner`.
    fn allowance_permit(
        &mut self,
        owner: Address,
        permit: &PermitSingle,
        signature: &[u8],
    ) -> Result<(), HandlerError>;

    /// Applies a batched allowance permit signed by `owner`.
    fn allowance_permit_batch(
        &mut self,
        owner: Address,
        permit: &PermitBatch,
        signature: &[u8],
    ) -> Result<(), HandlerError>;

    /// Sweeps the engine's full balance of `token` to `recipient`, requiring
    /// at least `amount_min`.
    fn sweep(
        &mut self,
        token: Address,
        recipient: Address,
        amount_min: Word,
    ) -> Result<(), HandlerError>;

    /// Transfers `value` of `token` from the engine's balance.
    fn transfer(
        &mut self,
        token: Address,
        recipient: Address,
        value: Word,
    ) -> Result<(), HandlerError>;

    /// Pays `bips` basis points of the engine's `token` balance to `recipient`.
    fn pay_portion(
        &mut self,
        token: Address,
        recipient: Address,
        bips: Word,
    ) -> Result<(), HandlerError>;

    /// Wraps at least `amount_min` native funds for `recipient`.
    fn wrap_native(&mut self, recipient: Address, amount_min: Word) -> Result<(), HandlerError>;

    /// Unwraps at least `amount_min` wrapped native funds for `recipient`.
    fn unwrap_native(&mut self, recipient: Address, amount_min: Word) -> Result<(), HandlerError>;

    /// Returns `owner`'s balance of `token`.
    fn balance_of(&mut self, token: Address, owner: Address) -> Result<Word, HandlerError>;
}
