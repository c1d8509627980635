// Copyright 2026 the Command Router Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Disassembler for command batches.
//!
//! This module provides:
//! - A structured view ([`BatchDisassembly`], [`CommandView`]) for
//!   tooling/tests.
//! - A stable, human-readable text format via [`core::fmt::Display`], one
//!   command per line.
//!
//! Disassembly is best-effort: an entry that fails to decode records its
//! error and the remaining entries are still decoded.

use alloc::vec::Vec;
use core::fmt;

use crate::abi::{Address, DecodeError};
use crate::command::{COMMAND_MASK, Command, FLAG_ALLOW_REVERT};
use crate::operands::{CommandInputs, decode_inputs};

/// Why one batch entry could not be disassembled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisasmError {
    /// No operand buffer was supplied for this command.
    MissingInput,
    /// The masked command byte is not in the enumeration.
    UnknownCommand {
        /// The offending masked command byte.
        command: u8,
    },
    /// The operand buffer did not match the command's layout.
    Decode {
        /// Command whose operands failed to decode.
        command: Command,
        /// Underlying decode failure.
        error: DecodeError,
    },
}

impl fmt::Display for DisasmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInput => write!(f, "missing operand buffer"),
            Self::UnknownCommand { command } => write!(f, "unknown command {command:#04x}"),
            Self::Decode { command, error } => {
                write!(f, "malformed operands for {}: {error}", command.name())
            }
        }
    }
}

impl core::error::Error for DisasmError {}

/// One disassembled batch entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandView {
    /// Position in the batch.
    pub index: usize,
    /// The raw command byte, flags included.
    pub raw: u8,
    /// Decoded command and operands, or the per-entry failure.
    pub view: Result<(Command, CommandInputs), DisasmError>,
}

/// A structured disassembly of one batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchDisassembly {
    /// One view per command byte, in batch order.
    pub entries: Vec<CommandView>,
}

/// Disassembles a batch into a structured view.
///
/// Entries past the end of `inputs` are recorded as
/// [`DisasmError::MissingInput`].
#[must_use]
pub fn disassemble(commands: &[u8], inputs: &[&[u8]]) -> BatchDisassembly {
    let mut entries = Vec::with_capacity(commands.len());
    for (index, &raw) in commands.iter().enumerate() {
        let masked = raw & COMMAND_MASK;
        let view = match (Command::from_byte(masked), inputs.get(index)) {
            (_, None) => Err(DisasmError::MissingInput),
            (None, _) => Err(DisasmError::UnknownCommand { command: masked }),
            (Some(command), Some(input)) => decode_inputs(command, input)
                .map(|inputs| (command, inputs))
                .map_err(|error| DisasmError::Decode { command, error }),
        };
        entries.push(CommandView { index, raw, view });
    }
    BatchDisassembly { entries }
}

impl fmt::Display for BatchDisassembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for e in &self.entries {
            writeln!(f, "{e}")?;
        }
        Ok(())
    }
}

impl fmt::Display for CommandView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:3}: ", self.index)?;
        match &self.view {
            Err(e) => write!(f, "<{e}>"),
            Ok((command, inputs)) => {
                write!(f, "{}", command.name())?;
                if self.raw & FLAG_ALLOW_REVERT != 0 {
                    write!(f, " (allow-revert)")?;
                }
                write_operands(f, inputs)
            }
        }
    }
}

fn write_operands(f: &mut fmt::Formatter<'_>, inputs: &CommandInputs) -> fmt::Result {
    match inputs {
        CommandInputs::ConcentratedSwapExactIn {
            recipient,
            amount_in,
            amount_out_min,
            path,
            payer_is_caller,
        } => {
            write!(
                f,
                " recipient={recipient} amount_in={amount_in} amount_out_min={amount_out_min} path="
            )?;
            write_hex(f, path)?;
            write_payer(f, *payer_is_caller)
        }
        CommandInputs::ConcentratedSwapExactOut {
            recipient,
            amount_out,
            amount_in_max,
            path,
            payer_is_caller,
        } => {
            write!(
                f,
                " recipient={recipient} amount_out={amount_out} amount_in_max={amount_in_max} path="
            )?;
            write_hex(f, path)?;
            write_payer(f, *payer_is_caller)
        }
        CommandInputs::ClassicSwapExactIn {
            recipient,
            amount_in,
            amount_out_min,
            path,
            payer_is_caller,
        } => {
            write!(
                f,
                " recipient={recipient} amount_in={amount_in} amount_out_min={amount_out_min} path="
            )?;
            write_addresses(f, path)?;
            write_payer(f, *payer_is_caller)
        }
        CommandInputs::ClassicSwapExactOut {
            recipient,
            amount_out,
            amount_in_max,
            path,
            payer_is_caller,
        } => {
            write!(
                f,
                " recipient={recipient} amount_out={amount_out} amount_in_max={amount_in_max} path="
            )?;
            write_addresses(f, path)?;
            write_payer(f, *payer_is_caller)
        }
        CommandInputs::AllowanceTransfer {
            token,
            recipient,
            amount,
        } => write!(f, " token={token} recipient={recipient} amount={amount}"),
        CommandInputs::AllowanceTransferBatch { transfers } => {
            write!(f, " transfers=[")?;
            for (i, t) in transfers.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(
                    f,
                    "(owner={} recipient={} amount={} token={})",
                    t.owner, t.recipient, t.amount, t.token
                )?;
            }
            write!(f, "]")
        }
        CommandInputs::AllowancePermit { permit, signature } => write!(
            f,
            " token={} amount={} expiration={} nonce={} spender={} sig_deadline={} sig={} bytes",
            permit.details.token,
            permit.details.amount,
            permit.details.expiration,
            permit.details.nonce,
            permit.spender,
            permit.sig_deadline,
            signature.len()
        ),
        CommandInputs::AllowancePermitBatch { permit, signature } => {
            write!(f, " details=[")?;
            for (i, d) in permit.details.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(
                    f,
                    "(token={} amount={} expiration={} nonce={})",
                    d.token, d.amount, d.expiration, d.nonce
                )?;
            }
            write!(
                f,
                "] spender={} sig_deadline={} sig={} bytes",
                permit.spender,
                permit.sig_deadline,
                signature.len()
            )
        }
        CommandInputs::Sweep {
            token,
            recipient,
            amount_min,
        } => write!(f, " token={token} recipient={recipient} amount_min={amount_min}"),
        CommandInputs::Transfer {
            token,
            recipient,
            value,
        } => write!(f, " token={token} recipient={recipient} value={value}"),
        CommandInputs::PayPortion {
            token,
            recipient,
            bips,
        } => write!(f, " token={token} recipient={recipient} bips={bips}"),
        CommandInputs::WrapNative {
            recipient,
            amount_min,
        } => write!(f, " recipient={recipient} amount_min={amount_min}"),
        CommandInputs::UnwrapNative {
            recipient,
            amount_min,
        } => write!(f, " recipient={recipient} amount_min={amount_min}"),
        CommandInputs::BalanceAssert {
            owner,
            token,
            min_balance,
        } => write!(f, " owner={owner} token={token} min_balance={min_balance}"),
    }
}

fn write_payer(f: &mut fmt::Formatter<'_>, payer_is_caller: bool) -> fmt::Result {
    if payer_is_caller {
        write!(f, " payer=caller")
    } else {
        write!(f, " payer=engine")
    }
}

fn write_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    write!(f, "0x")?;
    for b in bytes {
        write!(f, "{b:02x}")?;
    }
    Ok(())
}

fn write_addresses(f: &mut fmt::Formatter<'_>, addrs: &[Address]) -> fmt::Result {
    write!(f, "[")?;
    for (i, a) in addrs.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{a}")?;
    }
    write!(f, "]")
}
