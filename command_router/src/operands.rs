// Copyright 2026 the Command Router Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed operand decoding for each command.
//!
//! Each command declares a fixed head layout (word slots at byte offsets 0,
//! 32, 64, …) optionally followed by a dynamic tail located by an offset word.
//! [`decode_inputs`] turns an operand buffer into the typed inputs the
//! matched handler needs, failing closed on any under-length buffer.
//!
//! The canonical encoder ([`CommandInputs::encode`]) is the write side used by
//! embedders, tooling, and the round-trip tests.

use alloc::vec::Vec;

use crate::abi::{Address, DecodeError, WORD, Word, WordReader, WordWriter};
use crate::command::Command;

/// One allowance permit entry: token, permitted amount, expiration, nonce.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermitDetails {
    /// Token the permit covers.
    pub token: Address,
    /// Permitted allowance amount.
    pub amount: Word,
    /// Expiration timestamp of the allowance.
    pub expiration: Word,
    /// Replay-protection nonce.
    pub nonce: Word,
}

/// A single allowance permit with its spender and signature deadline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermitSingle {
    /// The permitted allowance.
    pub details: PermitDetails,
    /// Account allowed to spend.
    pub spender: Address,
    /// Deadline for the signature itself.
    pub sig_deadline: Word,
}

/// A batched allowance permit covered by one signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermitBatch {
    /// The permitted allowances.
    pub details: Vec<PermitDetails>,
    /// Account allowed to spend.
    pub spender: Address,
    /// Deadline for the signature itself.
    pub sig_deadline: Word,
}

/// One entry of a batched allowance-funded transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllowanceTransferDetails {
    /// Account the funds are pulled from. Must be the locked caller.
    pub owner: Address,
    /// Raw recipient operand (may be a sentinel).
    pub recipient: Address,
    /// Amount to transfer.
    pub amount: Word,
    /// Token to transfer.
    pub token: Address,
}

/// Typed operand values for one command.
///
/// Address fields hold raw operands: sentinel substitution happens at
/// dispatch time, not at decode time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandInputs {
    /// Exact-input swap, concentrated-liquidity family (encoded path).
    ConcentratedSwapExactIn {
        /// Raw recipient operand.
        recipient: Address,
        /// Exact input amount.
        amount_in: Word,
        /// Minimum acceptable output amount.
        amount_out_min: Word,
        /// Family-encoded swap path.
        path: Vec<u8>,
        /// Whether the locked caller pays (vs. the engine's balance).
        payer_is_caller: bool,
    },
    /// Exact-output swap, concentrated-liquidity family (encoded path).
    ConcentratedSwapExactOut {
        /// Raw recipient operand.
        recipient: Address,
        /// Exact output amount.
        amount_out: Word,
        /// Maximum acceptable input amount.
        amount_in_max: Word,
        /// Family-encoded swap path.
        path: Vec<u8>,
        /// Whether the locked caller pays.
        payer_is_caller: bool,
    },
    /// Exact-input swap, classic constant-product family (token hop list).
    ClassicSwapExactIn {
        /// Raw recipient operand.
        recipient: Address,
        /// Exact input amount.
        amount_in: Word,
        /// Minimum acceptable output amount.
        amount_out_min: Word,
        /// Token hop sequence.
        path: Vec<Address>,
        /// Whether the locked caller pays.
        payer_is_caller: bool,
    },
    /// Exact-output swap, classic constant-product family (token hop list).
    ClassicSwapExactOut {
        /// Raw recipient operand.
        recipient: Address,
        /// Exact output amount.
        amount_out: Word,
        /// Maximum acceptable input amount.
        amount_in_max: Word,
        /// Token hop sequence.
        path: Vec<Address>,
        /// Whether the locked caller pays.
        payer_is_caller: bool,
    },
    /// Single allowance-funded transfer from the locked caller.
    AllowanceTransfer {
        /// Token to transfer.
        token: Address,
        /// Raw recipient operand.
        recipient: Address,
        /// Amount to transfer.
        amount: Word,
    },
    /// Batched allowance-funded transfers, decoded whole.
    AllowanceTransferBatch {
        /// The transfer entries.
        transfers: Vec<AllowanceTransferDetails>,
    },
    /// Single allowance permit plus its signature.
    AllowancePermit {
        /// The permit payload.
        permit: PermitSingle,
        /// Opaque signature bytes.
        signature: Vec<u8>,
    },
    /// Batched allowance permit plus its signature.
    AllowancePermitBatch {
        /// The permit-batch payload.
        permit: PermitBatch,
        /// Opaque signature bytes.
        signature: Vec<u8>,
    },
    /// Sweep the engine's full token balance.
    Sweep {
        /// Token to sweep.
        token: Address,
        /// Raw recipient operand.
        recipient: Address,
        /// Minimum balance the sweep must move.
        amount_min: Word,
    },
    /// Transfer a fixed value from the engine's balance.
    Transfer {
        /// Token to transfer.
        token: Address,
        /// Raw recipient operand.
        recipient: Address,
        /// Value to transfer.
        value: Word,
    },
    /// Pay a basis-point portion of the engine's balance.
    PayPortion {
        /// Token to pay out.
        token: Address,
        /// Raw recipient operand.
        recipient: Address,
        /// Portion in basis points.
        bips: Word,
    },
    /// Wrap native funds held by the engine.
    WrapNative {
        /// Raw recipient operand.
        recipient: Address,
        /// Minimum amount to wrap.
        amount_min: Word,
    },
    /// Unwrap wrapped native funds held by the engine.
    UnwrapNative {
        /// Raw recipient operand.
        recipient: Address,
        /// Minimum amount to unwrap.
        amount_min: Word,
    },
    /// Soft balance assertion.
    BalanceAssert {
        /// Raw owner operand.
        owner: Address,
        /// Token to query.
        token: Address,
        /// Minimum required balance.
        min_balance: Word,
    },
}

/// Decodes the operand buffer for `command` into typed inputs.
pub fn decode_inputs(command: Command, input: &[u8]) -> Result<CommandInputs, DecodeError> {
    let r = WordReader::new(input);
    Ok(match command {
        Command::ConcentratedSwapExactIn => {
            let (recipient, amount, limit, payer_is_caller) = decode_swap_head(&r)?;
            CommandInputs::ConcentratedSwapExactIn {
                recipient,
                amount_in: amount,
                amount_out_min: limit,
                path: r.bytes_tail(3)?.to_vec(),
                payer_is_caller,
            }
        }
        Command::ConcentratedSwapExactOut => {
            let (recipient, amount, limit, payer_is_caller) = decode_swap_head(&r)?;
            CommandInputs::ConcentratedSwapExactOut {
                recipient,
                amount_out: amount,
                amount_in_max: limit,
                path: r.bytes_tail(3)?.to_vec(),
                payer_is_caller,
            }
        }
        Command::ClassicSwapExactIn => {
            let (recipient, amount, limit, payer_is_caller) = decode_swap_head(&r)?;
            CommandInputs::ClassicSwapExactIn {
                recipient,
                amount_in: amount,
                amount_out_min: limit,
                path: r.address_tail(3)?,
                payer_is_caller,
            }
        }
        Command::ClassicSwapExactOut => {
            let (recipient, amount, limit, payer_is_caller) = decode_swap_head(&r)?;
            CommandInputs::ClassicSwapExactOut {
                recipient,
                amount_out: amount,
                amount_in_max: limit,
                path: r.address_tail(3)?,
                payer_is_caller,
            }
        }
        Command::AllowanceTransfer => CommandInputs::AllowanceTransfer {
            token: r.address(0)?,
            recipient: r.address(1)?,
            amount: r.word(2)?,
        },
        Command::AllowanceTransferBatch => {
            let arr = r.subreader(0)?;
            let n = arr.word(0)?.to_usize().ok_or(DecodeError::OutOfBounds)?;
            let mut transfers = Vec::with_capacity(n.min(arr.len() / (4 * WORD)));
            for i in 0..n {
                let base = i
                    .checked_mul(4)
                    .and_then(|v| v.checked_add(1))
                    .ok_or(DecodeError::OutOfBounds)?;
                transfers.push(AllowanceTransferDetails {
                    owner: arr.address(base)?,
                    recipient: arr.address(base + 1)?,
                    amount: arr.word(base + 2)?,
                    token: arr.address(base + 3)?,
                });
            }
            CommandInputs::AllowanceTransferBatch { transfers }
        }
        Command::AllowancePermit => CommandInputs::AllowancePermit {
            permit: PermitSingle {
                details: PermitDetails {
                    token: r.address(0)?,
                    amount: r.word(1)?,
                    expiration: r.word(2)?,
                    nonce: r.word(3)?,
                },
                spender: r.address(4)?,
                sig_deadline: r.word(5)?,
            },
            signature: r.bytes_tail(6)?.to_vec(),
        },
        Command::AllowancePermitBatch => {
            let s = r.subreader(0)?;
            let d = s.subreader(0)?;
            let n = d.word(0)?.to_usize().ok_or(DecodeError::OutOfBounds)?;
            let mut details = Vec::with_capacity(n.min(d.len() / (4 * WORD)));
            for i in 0..n {
                let base = i
                    .checked_mul(4)
                    .and_then(|v| v.checked_add(1))
                    .ok_or(DecodeError::OutOfBounds)?;
                details.push(PermitDetails {
                    token: d.address(base)?,
                    amount: d.word(base + 1)?,
                    expiration: d.word(base + 2)?,
                    nonce: d.word(base + 3)?,
                });
            }
            CommandInputs::AllowancePermitBatch {
                permit: PermitBatch {
                    details,
                    spender: s.address(1)?,
                    sig_deadline: s.word(2)?,
                },
                signature: r.bytes_tail(1)?.to_vec(),
            }
        }
        Command::Sweep => CommandInputs::Sweep {
            token: r.address(0)?,
            recipient: r.address(1)?,
            amount_min: r.word(2)?,
        },
        Command::Transfer => CommandInputs::Transfer {
            token: r.address(0)?,
            recipient: r.address(1)?,
            value: r.word(2)?,
        },
        Command::PayPortion => CommandInputs::PayPortion {
            token: r.address(0)?,
            recipient: r.address(1)?,
            bips: r.word(2)?,
        },
        Command::WrapNative => CommandInputs::WrapNative {
            recipient: r.address(0)?,
            amount_min: r.word(1)?,
        },
        Command::UnwrapNative => CommandInputs::UnwrapNative {
            recipient: r.address(0)?,
            amount_min: r.word(1)?,
        },
        Command::BalanceAssert => CommandInputs::BalanceAssert {
            owner: r.address(0)?,
            token: r.address(1)?,
            min_balance: r.word(2)?,
        },
    })
}

fn decode_swap_head(r: &WordReader<'_>) -> Result<(Address, Word, Word, bool), DecodeError> {
    // Head: recipient, amount, amount limit, tail offset (slot 3), payer flag.
    // The payer flag is read before the tail so truncation anywhere in the
    // head fails before tail arithmetic runs.
    let recipient = r.address(0)?;
    let amount = r.word(1)?;
    let limit = r.word(2)?;
    let payer_is_caller = r.bool_flag(4)?;
    Ok((recipient, amount, limit, payer_is_caller))
}

impl CommandInputs {
    /// Returns the command these inputs belong to.
    #[must_use]
    pub fn command(&self) -> Command {
        match self {
            Self::ConcentratedSwapExactIn { .. } => Command::ConcentratedSwapExactIn,
            Self::ConcentratedSwapExactOut { .. } => Command::ConcentratedSwapExactOut,
            Self::ClassicSwapExactIn { .. } => Command::ClassicSwapExactIn,
            Self::ClassicSwapExactOut { .. } => Command::ClassicSwapExactOut,
            Self::AllowanceTransfer { .. } => Command::AllowanceTransfer,
            Self::AllowanceTransferBatch { .. } => Command::AllowanceTransferBatch,
            Self::AllowancePermit { .. } => Command::AllowancePermit,
            Self::AllowancePermitBatch { .. } => Command::AllowancePermitBatch,
            Self::Sweep { .. } => Command::Sweep,
            Self::Transfer { .. } => Command::Transfer,
            Self::PayPortion { .. } => Command::PayPortion,
            Self::WrapNative { .. } => Command::WrapNative,
            Self::UnwrapNative { .. } => Command::UnwrapNative,
            Self::BalanceAssert { .. } => Command::BalanceAssert,
        }
    }

    /// Encodes these inputs into a canonical operand buffer.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut w = WordWriter::new();
        match self {
            Self::ConcentratedSwapExactIn {
                recipient,
                amount_in,
                amount_out_min,
                path,
                payer_is_caller,
            } => encode_bytes_path_swap(
                &mut w,
                *recipient,
                *amount_in,
                *amount_out_min,
                path,
                *payer_is_caller,
            ),
            Self::ConcentratedSwapExactOut {
                recipient,
                amount_out,
                amount_in_max,
                path,
                payer_is_caller,
            } => encode_bytes_path_swap(
                &mut w,
                *recipient,
                *amount_out,
                *amount_in_max,
                path,
                *payer_is_caller,
            ),
            Self::ClassicSwapExactIn {
                recipient,
                amount_in,
                amount_out_min,
                path,
                payer_is_caller,
            } => encode_address_path_swap(
                &mut w,
                *recipient,
                *amount_in,
                *amount_out_min,
                path,
                *payer_is_caller,
            ),
            Self::ClassicSwapExactOut {
                recipient,
                amount_out,
                amount_in_max,
                path,
                payer_is_caller,
            } => encode_address_path_swap(
                &mut w,
                *recipient,
                *amount_out,
                *amount_in_max,
                path,
                *payer_is_caller,
            ),
            Self::AllowanceTransfer {
                token,
                recipient,
                amount,
            } => {
                w.write_address(*token);
                w.write_address(*recipient);
                w.write_word(*amount);
            }
            Self::AllowanceTransferBatch { transfers } => {
                w.write_offset(WORD);
                w.write_word(Word::from_u64(transfers.len() as u64));
                for t in transfers {
                    w.write_address(t.owner);
                    w.write_address(t.recipient);
                    w.write_word(t.amount);
                    w.write_address(t.token);
                }
            }
            Self::AllowancePermit { permit, signature } => {
                w.write_address(permit.details.token);
                w.write_word(permit.details.amount);
                w.write_word(permit.details.expiration);
                w.write_word(permit.details.nonce);
                w.write_address(permit.spender);
                w.write_word(permit.sig_deadline);
                w.write_offset(7 * WORD);
                w.write_length_prefixed_bytes(signature);
            }
            Self::AllowancePermitBatch { permit, signature } => {
                // Top head: offset to the permit struct, offset to the
                // signature. Offsets inside the struct are relative to the
                // struct's own start.
                let struct_len = (4 + 4 * permit.details.len()) * WORD;
                w.write_offset(2 * WORD);
                w.write_offset(2 * WORD + struct_len);
                w.write_offset(3 * WORD);
                w.write_address(permit.spender);
                w.write_word(permit.sig_deadline);
                w.write_word(Word::from_u64(permit.details.len() as u64));
                for d in &permit.details {
                    w.write_address(d.token);
                    w.write_word(d.amount);
                    w.write_word(d.expiration);
                    w.write_word(d.nonce);
                }
                w.write_length_prefixed_bytes(signature);
            }
            Self::Sweep {
                token,
                recipient,
                amount_min,
            } => {
                w.write_address(*token);
                w.write_address(*recipient);
                w.write_word(*amount_min);
            }
            Self::Transfer {
                token,
                recipient,
                value,
            } => {
                w.write_address(*token);
                w.write_address(*recipient);
                w.write_word(*value);
            }
            Self::PayPortion {
                token,
                recipient,
                bips,
            } => {
                w.write_address(*token);
                w.write_address(*recipient);
                w.write_word(*bips);
            }
            Self::WrapNative {
                recipient,
                amount_min,
            }
            | Self::UnwrapNative {
                recipient,
                amount_min,
            } => {
                w.write_address(*recipient);
                w.write_word(*amount_min);
            }
            Self::BalanceAssert {
                owner,
                token,
                min_balance,
            } => {
                w.write_address(*owner);
                w.write_address(*token);
                w.write_word(*min_balance);
            }
        }
        w.into_vec()
    }
}

fn encode_bytes_path_swap(
    w: &mut WordWriter,
    recipient: Address,
    amount: Word,
    limit: Word,
    path: &[u8],
    payer_is_caller: bool,
) {
    w.write_address(recipient);
    w.write_word(amount);
    w.write_word(limit);
    w.write_offset(5 * WORD);
    w.write_bool(payer_is_caller);
    w.write_length_prefixed_bytes(path);
}

fn encode_address_path_swap(
    w: &mut WordWriter,
    recipient: Address,
    amount: Word,
    limit: Word,
    path: &[Address],
    payer_is_caller: bool,
) {
    w.write_address(recipient);
    w.write_word(amount);
    w.write_word(limit);
    w.write_offset(5 * WORD);
    w.write_bool(payer_is_caller);
    w.write_length_prefixed_addresses(path);
}
