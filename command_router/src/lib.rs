// Copyright 2026 the Command Router Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `command_router`: a batched-instruction decoder and dispatcher with a
//! locked-caller execution context.
//!
//! A batch is a sequence of single-byte commands paired with ABI-encoded
//! operand buffers. The router decodes each operand buffer against its
//! command's layout, resolves sentinel addresses against the batch context,
//! and routes the call to an embedder-supplied [`handlers::Handlers`]
//! implementation. The embedder owns all effects; this crate owns decoding,
//! routing, and the batch continuation policy.
//!
//! ## Example
//!
//! ```
//! extern crate alloc;
//!
//! use command_router::abi::{Address, Word};
//! use command_router::command::Command;
//! use command_router::disasm::disassemble;
//! use command_router::operands::{CommandInputs, decode_inputs};
//!
//! let inputs = CommandInputs::Transfer {
//!     token: Address::from_low_u64(0x70),
//!     recipient: Address::from_low_u64(0x91),
//!     value: Word::from_u64(250),
//! };
//! let encoded = inputs.encode();
//!
//! let decoded = decode_inputs(Command::Transfer, &encoded)?;
//! assert_eq!(decoded, inputs);
//!
//! let listing = disassemble(&[Command::Transfer.byte()], &[&encoded]);
//! assert!(alloc::format!("{listing}").contains("TRANSFER"));
//! # Ok::<(), command_router::abi::DecodeError>(())
//! ```

#![no_std]

extern crate alloc;

pub mod abi;
pub mod batch;
pub mod command;
pub mod disasm;
pub mod dispatch;
pub mod handlers;
pub mod operands;
pub mod resolve;
pub mod trace;

#[cfg(test)]
pub(crate) mod testutil;
