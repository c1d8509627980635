// Copyright 2026 the Command Router Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared test support: a recording [`Handlers`] implementation.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::abi::{Address, Word};
use crate::handlers::{HandlerError, Handlers};
use crate::operands::{AllowanceTransferDetails, PermitBatch, PermitSingle};
use crate::resolve::BatchContext;

pub(crate) const CALLER: Address = Address::from_low_u64(0xaaaa);
pub(crate) const ENGINE: Address = Address::from_low_u64(0xbbbb);

pub(crate) fn test_ctx() -> BatchContext {
    BatchContext::new(CALLER, ENGINE)
}

/// One recorded handler invocation with its fully resolved arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum RecordedCall {
    ConcentratedSwapExactIn {
        recipient: Address,
        amount_in: Word,
        amount_out_min: Word,
        path: Vec<u8>,
        payer: Address,
    },
    ConcentratedSwapExactOut {
        recipient: Address,
        amount_out: Word,
        amount_in_max: Word,
        path: Vec<u8>,
        payer: Address,
    },
    ClassicSwapExactIn {
        recipient: Address,
        amount_in: Word,
        amount_out_min: Word,
        path: Vec<Address>,
        payer: Address,
    },
    ClassicSwapExactOut {
        recipient: Address,
        amount_out: Word,
        amount_in_max: Word,
        path: Vec<Address>,
        payer: Address,
    },
    AllowanceTransfer {
        token: Address,
        recipient: Address,
        amount: Word,
        owner: Address,
    },
    AllowanceTransferBatch {
        transfers: Vec<AllowanceTransferDetails>,
    },
    AllowancePermit {
        owner: Address,
        permit: PermitSingle,
        signature: Vec<u8>,
    },
    AllowancePermitBatch {
        owner: Address,
        permit: PermitBatch,
        signature: Vec<u8>,
    },
    Sweep {
        token: Address,
        recipient: Address,
        amount_min: Word,
    },
    Transfer {
        token: Address,
        recipient: Address,
        value: Word,
    },
    PayPortion {
        token: Address,
        recipient: Address,
        bips: Word,
    },
    WrapNative {
        recipient: Address,
        amount_min: Word,
    },
    UnwrapNative {
        recipient: Address,
        amount_min: Word,
    },
    BalanceOf {
        token: Address,
        owner: Address,
    },
}

/// Records every handler call; optionally fails them all with a fixed error.
#[derive(Debug, Default)]
pub(crate) struct RecordingHandlers {
    pub(crate) calls: Vec<RecordedCall>,
    pub(crate) fail_with: Option<HandlerError>,
    balances: BTreeMap<(Address, Address), Word>,
}

impl RecordingHandlers {
    pub(crate) fn set_balance(&mut self, token: Address, owner: Address, amount: Word) {
        self.balances.insert((token, owner), amount);
    }

    fn finish(&self) -> Result<(), HandlerError> {
        match self.fail_with {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Handlers for RecordingHandlers {
    fn concentrated_swap_exact_in(
        &mut self,
        recipient: Address,
        amount_in: Word,
        amount_out_min: Word,
        path: &[u8],
        payer: Address,
    ) -> Result<(), HandlerError> {
        self.calls.push(RecordedCall::ConcentratedSwapExactIn {
            recipient,
            amount_in,
            amount_out_min,
            path: path.to_vec(),
            payer,
        });
        self.finish()
    }

    fn concentrated_swap_exact_out(
        &mut self,
        recipient: Address,
        amount_out: Word,
        amount_in_max: Word,
        path: &[u8],
        payer: Address,
    ) -> Result<(), HandlerError> {
        self.calls.push(RecordedCall::ConcentratedSwapExactOut {
            recipient,
            amount_out,
            amount_in_max,
            path: path.to_vec(),
            payer,
        });
        self.finish()
    }

    fn classic_swap_exact_in(
        &mut self,
        recipient: Address,
        amount_in: Word,
        amount_out_min: Word,
        path: &[Address],
        payer: Address,
    ) -> Result<(), HandlerError> {
        self.calls.push(RecordedCall::ClassicSwapExactIn {
            recipient,
            amount_in,
            amount_out_min,
            path: path.to_vec(),
            payer,
        });
        self.finish()
    }

    fn classic_swap_exact_out(
        &mut self,
        recipient: Address,
        amount_out: Word,
        amount_in_max: Word,
        path: &[Address],
        payer: Address,
    ) -> Result<(), HandlerError> {
        self.calls.push(RecordedCall::ClassicSwapExactOut {
            recipient,
            amount_out,
            amount_in_max,
            path: path.to_vec(),
            payer,
        });
        self.finish()
    }

    fn allowance_transfer(
        &mut self,
        token: Address,
        recipient: Address,
        amount: Word,
        owner: Address,
    ) -> Result<(), HandlerError> {
        self.calls.push(RecordedCall::AllowanceTransfer {
            token,
            recipient,
            amount,
            owner,
        });
        self.finish()
    }

    fn allowance_transfer_batch(
        &mut self,
        transfers: &[AllowanceTransferDetails],
    ) -> Result<(), HandlerError> {
        self.calls.push(RecordedCall::AllowanceTransferBatch {
            transfers: transfers.to_vec(),
        });
        self.finish()
    }

    fn allowance_permit(
        &mut self,
        owner: Address,
        permit: &PermitSingle,
        signature: &[u8],
    ) -> Result<(), HandlerError> {
        self.calls.push(RecordedCall::AllowancePermit {
            owner,
            permit: permit.clone(),
            signature: signature.to_vec(),
        });
        self.finish()
    }

    fn allowance_permit_batch(
        &mut self,
        owner: Address,
        permit: &PermitBatch,
        signature: &[u8],
    ) -> Result<(), HandlerError> {
        self.calls.push(RecordedCall::AllowancePermitBatch {
            owner,
            permit: permit.clone(),
            signature: signature.to_vec(),
        });
        self.finish()
    }

    fn sweep(
        &mut self,
        token: Address,
        recipient: Address,
        amount_min: Word,
    ) -> Result<(), HandlerError> {
        self.calls.push(RecordedCall::Sweep {
            token,
            recipient,
            amount_min,
        });
        self.finish()
    }

    fn transfer(
        &mut self,
        token: Address,
        recipient: Address,
        value: Word,
    ) -> Result<(), HandlerError> {
        self.calls.push(RecordedCall::Transfer {
            token,
            recipient,
            value,
        });
        self.finish()
    }

    fn pay_portion(
        &mut self,
        token: Address,
        recipient: Address,
        bips: Word,
    ) -> Result<(), HandlerError> {
        self.calls.push(RecordedCall::PayPortion {
            token,
            recipient,
            bips,
        });
        self.finish()
    }

    fn wrap_native(&mut self, recipient: Address, amount_min: Word) -> Result<(), HandlerError> {
        self.calls
            .push(RecordedCall::WrapNative {
                recipient,
                amount_min,
            });
        self.finish()
    }

    fn unwrap_native(&mut self, recipient: Address, amount_min: Word) -> Result<(), HandlerError> {
        self.calls
            .push(RecordedCall::UnwrapNative {
                recipient,
                amount_min,
            });
        self.finish()
    }

    fn balance_of(&mut self, token: Address, owner: Address) -> Result<Word, HandlerError> {
        self.calls.push(RecordedCall::BalanceOf { token, owner });
        if let Some(e) = self.fail_with {
            return Err(e);
        }
        Ok(*self.balances.get(&(token, owner)).unwrap_or(&Word::ZERO))
    }
}
