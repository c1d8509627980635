// Copyright 2026 the Command Router Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The outer batch loop.
//!
//! [`execute_batch`] walks paired command-byte and operand-buffer sequences in
//! caller order, dispatching one instruction at a time. Execution is strictly
//! sequential: each instruction fully completes (or fatally aborts the batch)
//! before the next begins.
//!
//! Continuation policy:
//! - a command whose byte carries [`FLAG_ALLOW_REVERT`] may report failure
//!   (the balance assertion's soft failure, or a delegated handler failure)
//!   and the batch continues, collecting a `success == false` result;
//! - without the flag, a reported failure ends the batch at that index;
//! - malformed operands and unknown command bytes abort the batch regardless
//!   of the flag: if the engine cannot even identify what to do, there is no
//!   meaningful way to continue.

use alloc::vec::Vec;
use core::fmt;

use crate::command::FLAG_ALLOW_REVERT;
use crate::dispatch::{DispatchError, DispatchOutput, Dispatcher};
use crate::handlers::Handlers;
use crate::resolve::BatchContext;
use crate::trace::{BatchOutcome, CommandOutcome, TraceMask, TraceSink};

/// A batch-level failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BatchError {
    /// The command and operand-buffer sequences differ in length.
    LengthMismatch {
        /// Number of command bytes submitted.
        commands: usize,
        /// Number of operand buffers submitted.
        inputs: usize,
    },
    /// A command failed fatally and the batch unwound at that point.
    Aborted {
        /// Index of the aborting command.
        index: usize,
        /// The fatal dispatch failure.
        error: DispatchError,
    },
    /// A command without [`FLAG_ALLOW_REVERT`] reported failure.
    ExecutionFailed {
        /// Index of the failing command.
        index: usize,
        /// The failure payload the command reported.
        output: Vec<u8>,
    },
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { commands, inputs } => write!(
                f,
                "length mismatch: {commands} commands but {inputs} operand buffers"
            ),
            Self::Aborted { index, error } => write!(f, "batch aborted at command {index}: {error}"),
            Self::ExecutionFailed { index, .. } => {
                write!(f, "required command {index} reported failure")
            }
        }
    }
}

impl core::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Aborted { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Executes a batch of instructions under one locked-caller context.
///
/// `commands` and `inputs` are paired by position and must have equal length.
/// On success, returns one [`DispatchOutput`] per command, in order; entries
/// with `success == false` are commands whose failure was tolerated by
/// [`FLAG_ALLOW_REVERT`].
///
/// Tracing is controlled by `trace_mask`; pass `None` for `trace` to disable
/// tracing.
pub fn execute_batch<H: Handlers>(
    dispatcher: &mut Dispatcher<H>,
    ctx: &BatchContext,
    commands: &[u8],
    inputs: &[&[u8]],
    trace_mask: TraceMask,
    mut trace: Option<&mut dyn TraceSink>,
) -> Result<Vec<DispatchOutput>, BatchError> {
    if commands.len() != inputs.len() {
        return Err(BatchError::LengthMismatch {
            commands: commands.len(),
            inputs: inputs.len(),
        });
    }

    if trace_mask.contains(TraceMask::BATCH) {
        if let Some(t) = trace.as_mut() {
            t.batch_start(ctx, commands.len());
        }
    }

    let result = batch_body(dispatcher, ctx, commands, inputs, trace_mask, &mut trace);

    if trace_mask.contains(TraceMask::BATCH) {
        if let Some(t) = trace.as_mut() {
            let outcome = match &result {
                Ok(_) => BatchOutcome::Ok,
                Err(e) => BatchOutcome::Err(e),
            };
            t.batch_end(outcome);
        }
    }

    result
}

fn batch_body<H: Handlers>(
    dispatcher: &mut Dispatcher<H>,
    ctx: &BatchContext,
    commands: &[u8],
    inputs: &[&[u8]],
    trace_mask: TraceMask,
    trace: &mut Option<&mut dyn TraceSink>,
) -> Result<Vec<DispatchOutput>, BatchError> {
    let mut results = Vec::with_capacity(commands.len());

    let trace_commands = trace_mask.contains(TraceMask::COMMAND);

    for (index, (&raw, &input)) in commands.iter().zip(inputs).enumerate() {
        let allow_revert = raw & FLAG_ALLOW_REVERT != 0;

        match dispatcher.dispatch(ctx, raw, input) {
            Ok(out) if out.success => {
                if trace_commands {
                    if let Some(t) = trace.as_mut() {
                        t.command(index, raw, CommandOutcome::Ok);
                    }
                }
                results.push(out);
            }
            Ok(out) => {
                if trace_commands {
                    if let Some(t) = trace.as_mut() {
                        t.command(index, raw, CommandOutcome::Failed(&out.output));
                    }
                }
                if !allow_revert {
                    return Err(BatchError::ExecutionFailed {
                        index,
                        output: out.output,
                    });
                }
                results.push(out);
            }
            Err(error @ DispatchError::Handler { .. }) if allow_revert => {
                let output = error.diagnostic();
                if trace_commands {
                    if let Some(t) = trace.as_mut() {
                        t.command(index, raw, CommandOutcome::Failed(&output));
                    }
                }
                results.push(DispatchOutput::soft_failure(output));
            }
            Err(error) => {
                if trace_commands {
                    if let Some(t) = trace.as_mut() {
                        t.command(index, raw, CommandOutcome::Aborted(&error));
                    }
                }
                return Err(BatchError::Aborted { index, error });
            }
        }
    }

    Ok(results)
}
