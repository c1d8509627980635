// Copyright 2026 the Command Router Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Instruction dispatch: mask, decode, resolve, route.
//!
//! [`Dispatcher::dispatch`] interprets one raw instruction: it masks the
//! command byte, decodes the operand buffer into typed inputs, resolves
//! sentinel addresses and the payer against the batch context, and routes to
//! the matched [`Handlers`] operation.
//!
//! Routing is a direct match over the closed [`Command`] enumeration. Failure
//! is dual-channel by design:
//!
//! - fatal errors ([`DispatchError`]) abort the dispatch step: malformed
//!   operands, unknown command bytes, batch-entry owner mismatches, and any
//!   delegated handler failure (passed through unchanged);
//! - the balance assertion alone reports a soft failure, returning
//!   `success == false` with a stable discriminator so the batch loop can
//!   decide whether to continue.

use alloc::vec::Vec;
use core::fmt;

use crate::abi::DecodeError;
use crate::command::{COMMAND_MASK, Command};
use crate::handlers::{HandlerError, Handlers};
use crate::operands::{AllowanceTransferDetails, CommandInputs, decode_inputs};
use crate::resolve::BatchContext;

/// Soft-failure discriminator: an asserted balance was below its minimum.
pub const BALANCE_TOO_LOW: [u8; 4] = discriminator(b"BalanceTooLow()");

/// Fatal discriminator: the command byte is outside the enumeration.
pub const INVALID_COMMAND: [u8; 4] = discriminator(b"InvalidCommand(uint8)");

/// Fatal discriminator: the operand buffer did not match the declared layout.
pub const MALFORMED_OPERANDS: [u8; 4] = discriminator(b"MalformedOperands()");

/// Fatal discriminator: a batch transfer entry's owner is not the locked caller.
pub const OWNER_MISMATCH: [u8; 4] = discriminator(b"OwnerMismatch(uint32)");

/// Fatal discriminator: a delegated handler failed.
pub const HANDLER_FAILED: [u8; 4] = discriminator(b"HandlerFailed()");

/// Stable FNV-1a 64 over `bytes`. Evaluated at compile time; the resulting
/// discriminators are part of the output contract and must never change.
const fn fnv1a_64(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x100_0000_01b3;
    let mut h = OFFSET;
    let mut i = 0;
    while i < bytes.len() {
        h ^= bytes[i] as u64;
        h = h.wrapping_mul(PRIME);
        i += 1;
    }
    h
}

/// Derives a 4-byte discriminator from an error's canonical name.
const fn discriminator(name: &[u8]) -> [u8; 4] {
    let h = fnv1a_64(name).to_be_bytes();
    [h[0], h[1], h[2], h[3]]
}

/// The uniform `(success, output)` contract for one dispatch step.
///
/// On success, `output` is empty for fund-moving instructions and reserved
/// otherwise. On soft failure (`success == false`), `output` carries a fixed
/// discriminator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchOutput {
    /// Whether the instruction's check or operation succeeded.
    pub success: bool,
    /// Empty on success; a structured discriminator on soft failure.
    pub output: Vec<u8>,
}

impl DispatchOutput {
    /// A successful dispatch with empty output.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            success: true,
            output: Vec::new(),
        }
    }

    /// A soft failure carrying `output`.
    #[must_use]
    pub fn soft_failure(output: Vec<u8>) -> Self {
        Self {
            success: false,
            output,
        }
    }
}

/// A fatal dispatch failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchError {
    /// The masked command byte is not in the closed enumeration.
    InvalidCommand {
        /// The offending masked command byte.
        command: u8,
    },
    /// The operand buffer did not match the command's declared layout.
    Decode {
        /// Command whose operands failed to decode.
        command: Command,
        /// Underlying decode failure.
        error: DecodeError,
    },
    /// A batch transfer entry names an owner other than the locked caller.
    OwnerMismatch {
        /// Index of the offending entry.
        index: u32,
    },
    /// A delegated handler failed; propagated unchanged.
    Handler {
        /// Command whose handler failed.
        command: Command,
        /// The handler's failure.
        error: HandlerError,
    },
}

impl DispatchError {
    /// Encodes the canonical diagnostic payload: the discriminator, plus the
    /// offending command byte for invalid commands and the entry index for
    /// owner mismatches.
    #[must_use]
    pub fn diagnostic(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(8);
        match self {
            Self::InvalidCommand { command } => {
                out.extend_from_slice(&INVALID_COMMAND);
                out.push(*command);
            }
            Self::Decode { .. } => out.extend_from_slice(&MALFORMED_OPERANDS),
            Self::OwnerMismatch { index } => {
                out.extend_from_slice(&OWNER_MISMATCH);
                out.extend_from_slice(&index.to_be_bytes());
            }
            Self::Handler { .. } => out.extend_from_slice(&HANDLER_FAILED),
        }
        out
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCommand { command } => write!(f, "invalid command {command:#04x}"),
            Self::Decode { command, error } => {
                write!(f, "malformed operands for {command:?}: {error}")
            }
            Self::OwnerMismatch { index } => {
                write!(f, "transfer entry {index} owner is not the locked caller")
            }
            Self::Handler { command, error } => write!(f, "{command:?} handler failed: {error}"),
        }
    }
}

impl core::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Decode { error, .. } => Some(error),
            Self::Handler { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Decodes and routes single instructions against a fixed handler set.
pub struct Dispatcher<H: Handlers> {
    handlers: H,
}

impl<H: Handlers> fmt::Debug for Dispatcher<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

impl<H: Handlers> Dispatcher<H> {
    /// Creates a dispatcher over `handlers`.
    #[must_use]
    pub fn new(handlers: H) -> Self {
        Self { handlers }
    }

    /// Returns a reference to the handler set.
    pub fn handlers(&self) -> &H {
        &self.handlers
    }

    /// Returns a mutable reference to the handler set.
    pub fn handlers_mut(&mut self) -> &mut H {
        &mut self.handlers
    }

    /// Consumes the dispatcher and returns the handler set.
    #[must_use]
    pub fn into_handlers(self) -> H {
        self.handlers
    }

    /// Dispatches one instruction.
    ///
    /// `command_byte` is taken raw; bits outside [`COMMAND_MASK`] are ignored
    /// here (the batch loop owns their meaning). The context is read-only for
    /// the duration of the call.
    pub fn dispatch(
        &mut self,
        ctx: &BatchContext,
        command_byte: u8,
        input: &[u8],
    ) -> Result<DispatchOutput, DispatchError> {
        let masked = command_byte & COMMAND_MASK;
        let command = Command::from_byte(masked)
            .ok_or(DispatchError::InvalidCommand { command: masked })?;
        let inputs = decode_inputs(command, input)
            .map_err(|error| DispatchError::Decode { command, error })?;
        self.route(ctx, command, inputs)
    }

    fn route(
        &mut self,
        ctx: &BatchContext,
        command: Command,
        inputs: CommandInputs,
    ) -> Result<DispatchOutput, DispatchError> {
        let handler_err = |error| DispatchError::Handler { command, error };
        match inputs {
            CommandInputs::ConcentratedSwapExactIn {
                recipient,
                amount_in,
                amount_out_min,
                path,
                payer_is_caller,
            } => self
                .handlers
                .concentrated_swap_exact_in(
                    ctx.resolve_recipient(recipient),
                    amount_in,
                    amount_out_min,
                    &path,
                    ctx.resolve_payer(payer_is_caller),
                )
                .map_err(handler_err)?,
            CommandInputs::ConcentratedSwapExactOut {
                recipient,
                amount_out,
                amount_in_max,
                path,
                payer_is_caller,
            } => self
                .handlers
                .concentrated_swap_exact_out(
                    ctx.resolve_recipient(recipient),
                    amount_out,
                    amount_in_max,
                    &path,
                    ctx.resolve_payer(payer_is_caller),
                )
                .map_err(handler_err)?,
            CommandInputs::ClassicSwapExactIn {
                recipient,
                amount_in,
                amount_out_min,
                path,
                payer_is_caller,
            } => self
                .handlers
                .classic_swap_exact_in(
                    ctx.resolve_recipient(recipient),
                    amount_in,
                    amount_out_min,
                    &path,
                    ctx.resolve_payer(payer_is_caller),
                )
                .map_err(handler_err)?,
            CommandInputs::ClassicSwapExactOut {
                recipient,
                amount_out,
                amount_in_max,
                path,
                payer_is_caller,
            } => self
                .handlers
                .classic_swap_exact_out(
                    ctx.resolve_recipient(recipient),
                    amount_out,
                    amount_in_max,
                    &path,
                    ctx.resolve_payer(payer_is_caller),
                )
                .map_err(handler_err)?,
            CommandInputs::AllowanceTransfer {
                token,
                recipient,
                amount,
            } => self
                .handlers
                .allowance_transfer(token, ctx.resolve_recipient(recipient), amount, ctx.caller)
                .map_err(handler_err)?,
            CommandInputs::AllowanceTransferBatch { transfers } => {
                let mut resolved = Vec::with_capacity(transfers.len());
                for (i, t) in transfers.into_iter().enumerate() {
                    if t.owner != ctx.caller {
                        return Err(DispatchError::OwnerMismatch { index: i as u32 });
                    }
                    resolved.push(AllowanceTransferDetails {
                        owner: t.owner,
                        recipient: ctx.resolve_recipient(t.recipient),
                        amount: t.amount,
                        token: t.token,
                    });
                }
                self.handlers
                    .allowance_transfer_batch(&resolved)
                    .map_err(handler_err)?;
            }
            CommandInputs::AllowancePermit { permit, signature } => self
                .handlers
                .allowance_permit(ctx.caller, &permit, &signature)
                .map_err(handler_err)?,
            CommandInputs::AllowancePermitBatch { permit, signature } => self
                .handlers
                .allowance_permit_batch(ctx.caller, &permit, &signature)
                .map_err(handler_err)?,
            CommandInputs::Sweep {
                token,
                recipient,
                amount_min,
            } => self
                .handlers
                .sweep(token, ctx.resolve_recipient(recipient), amount_min)
                .map_err(handler_err)?,
            CommandInputs::Transfer {
                token,
                recipient,
                value,
            } => self
                .handlers
                .transfer(token, ctx.resolve_recipient(recipient), value)
                .map_err(handler_err)?,
            CommandInputs::PayPortion {
                token,
                recipient,
                bips,
            } => self
                .handlers
                .pay_portion(token, ctx.resolve_recipient(recipient), bips)
                .map_err(handler_err)?,
            CommandInputs::WrapNative {
                recipient,
                amount_min,
            } => self
                .handlers
                .wrap_native(ctx.resolve_recipient(recipient), amount_min)
                .map_err(handler_err)?,
            CommandInputs::UnwrapNative {
                recipient,
                amount_min,
            } => self
                .handlers
                .unwrap_native(ctx.resolve_recipient(recipient), amount_min)
                .map_err(handler_err)?,
            CommandInputs::BalanceAssert {
                owner,
                token,
                min_balance,
            } => {
                // Never aborts on a failed check: the outcome is reported so
                // the batch loop can decide whether to continue.
                let observed = self
                    .handlers
                    .balance_of(token, ctx.resolve_recipient(owner))
                    .map_err(handler_err)?;
                if observed < min_balance {
                    return Ok(DispatchOutput::soft_failure(BALANCE_TOO_LOW.to_vec()));
                }
            }
        }
        Ok(DispatchOutput::ok())
    }
}
