// Copyright 2026 the Command Router Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Command byte values for the v1 instruction set.
//!
//! The command set is closed and versioned: adding a value is a protocol
//! change. The low 6 bits of an instruction's first byte select the command;
//! the high bits carry batch-level flags and are ignored by the router.

/// Mask extracting the command id from an instruction byte.
///
/// Bits above the mask are not part of the command: bit 7 is
/// [`FLAG_ALLOW_REVERT`], bit 6 is reserved and must be ignored.
pub const COMMAND_MASK: u8 = 0x3f;

/// Batch-level flag: tolerate this command's failure and continue the batch.
///
/// Inspected by the batch loop only, never by the router.
pub const FLAG_ALLOW_REVERT: u8 = 0x80;

/// A command id, drawn from the closed v1 enumeration.
///
/// Byte values are stable. `0x07` is a reserved gap and does not decode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    /// Exact-input swap through the concentrated-liquidity pool family.
    ConcentratedSwapExactIn = 0x00,
    /// Exact-output swap through the concentrated-liquidity pool family.
    ConcentratedSwapExactOut = 0x01,
    /// Single allowance-funded transfer from the locked caller.
    AllowanceTransfer = 0x02,
    /// Batched allowance permit with one signature.
    AllowancePermitBatch = 0x03,
    /// Sweep the engine's full balance of a token to a recipient.
    Sweep = 0x04,
    /// Transfer a fixed value from the engine's balance.
    Transfer = 0x05,
    /// Pay a basis-point portion of the engine's balance.
    PayPortion = 0x06,
    /// Exact-input swap through the classic constant-product pool family.
    ClassicSwapExactIn = 0x08,
    /// Exact-output swap through the classic constant-product pool family.
    ClassicSwapExactOut = 0x09,
    /// Single allowance permit.
    AllowancePermit = 0x0a,
    /// Wrap native funds held by the engine.
    WrapNative = 0x0b,
    /// Unwrap wrapped native funds held by the engine.
    UnwrapNative = 0x0c,
    /// Batched allowance-funded transfers from the locked caller.
    AllowanceTransferBatch = 0x0d,
    /// Soft balance assertion: reports failure instead of aborting.
    BalanceAssert = 0x0e,
}

impl Command {
    /// Every command in the v1 enumeration, in byte order.
    pub const ALL: [Self; 14] = [
        Self::ConcentratedSwapExactIn,
        Self::ConcentratedSwapExactOut,
        Self::AllowanceTransfer,
        Self::AllowancePermitBatch,
        Self::Sweep,
        Self::Transfer,
        Self::PayPortion,
        Self::ClassicSwapExactIn,
        Self::ClassicSwapExactOut,
        Self::AllowancePermit,
        Self::WrapNative,
        Self::UnwrapNative,
        Self::AllowanceTransferBatch,
        Self::BalanceAssert,
    ];

    /// Returns the command byte value.
    #[must_use]
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Parses a command from a masked command id.
    ///
    /// The caller is expected to have applied [`COMMAND_MASK`] already;
    /// values with flag bits set do not decode.
    #[must_use]
    pub const fn from_byte(b: u8) -> Option<Self> {
        Some(match b {
            0x00 => Self::ConcentratedSwapExactIn,
            0x01 => Self::ConcentratedSwapExactOut,
            0x02 => Self::AllowanceTransfer,
            0x03 => Self::AllowancePermitBatch,
            0x04 => Self::Sweep,
            0x05 => Self::Transfer,
            0x06 => Self::PayPortion,
            0x08 => Self::ClassicSwapExactIn,
            0x09 => Self::ClassicSwapExactOut,
            0x0a => Self::AllowancePermit,
            0x0b => Self::WrapNative,
            0x0c => Self::UnwrapNative,
            0x0d => Self::AllowanceTransferBatch,
            0x0e => Self::BalanceAssert,
            _ => return None,
        })
    }

    /// Returns the stable upper-snake name used by the disassembler.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ConcentratedSwapExactIn => "CONCENTRATED_SWAP_EXACT_IN",
            Self::ConcentratedSwapExactOut => "CONCENTRATED_SWAP_EXACT_OUT",
            Self::AllowanceTransfer => "ALLOWANCE_TRANSFER",
            Self::AllowancePermitBatch => "ALLOWANCE_PERMIT_BATCH",
            Self::Sweep => "SWEEP",
            Self::Transfer => "TRANSFER",
            Self::PayPortion => "PAY_PORTION",
            Self::ClassicSwapExactIn => "CLASSIC_SWAP_EXACT_IN",
            Self::ClassicSwapExactOut => "CLASSIC_SWAP_EXACT_OUT",
            Self::AllowancePermit => "ALLOWANCE_PERMIT",
            Self::WrapNative => "WRAP_NATIVE",
            Self::UnwrapNative => "UNWRAP_NATIVE",
            Self::AllowanceTransferBatch => "ALLOWANCE_TRANSFER_BATCH",
            Self::BalanceAssert => "BALANCE_ASSERT",
        }
    }
}
