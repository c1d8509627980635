// Copyright 2026 the Command Router Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use command_router::abi::{Address, Word};
use command_router::batch::execute_batch;
use command_router::command::Command;
use command_router::dispatch::Dispatcher;
use command_router::handlers::{HandlerError, Handlers};
use command_router::operands::{
    AllowanceTransferDetails, CommandInputs, PermitBatch, PermitSingle, decode_inputs,
};
use command_router::resolve::{BatchContext, CALLER_SENTINEL};
use command_router::trace::TraceMask;

struct NopHandlers;

impl Handlers for NopHandlers {
    fn concentrated_swap_exact_in(
        &mut self,
        _recipient: Address,
        _amount_in: Word,
        _amount_out_min: Word,
        _path: &[u8],
        _payer: Address,
    ) -> Result<(), HandlerError> {
        Ok(())
    }

    fn concentrated_swap_exact_out(
        &mut self,
        _recipient: Address,
        _amount_out: Word,
        _amount_in_max: Word,
        _path: &[u8],
        _payer: Address,
    ) -> Result<(), HandlerError> {
        Ok(())
    }

    fn classic_swap_exact_in(
        &mut self,
        _recipient: Address,
        _amount_in: Word,
        _amount_out_min: Word,
        _path: &[Address],
        _payer: Address,
    ) -> Result<(), HandlerError> {
        Ok(())
    }

    fn classic_swap_exact_out(
        &mut self,
        _recipient: Address,
        _amount_out: Word,
        _amount_in_max: Word,
        _path: &[Address],
        _payer: Address,
    ) -> Result<(), HandlerError> {
        Ok(())
    }

    fn allowance_transfer(
        &mut self,
        _token: Address,
        _recipient: Address,
        _amount: Word,
        _owner: Address,
    ) -> Result<(), HandlerError> {
        Ok(())
    }

    fn allowance_transfer_batch(
        &mut self,
        _transfers: &[AllowanceTransferDetails],
    ) -> Result<(), HandlerError> {
        Ok(())
    }

    fn allowance_permit(
        &mut self,
        _owner: Address,
        _permit: &PermitSingle,
        _signature: &[u8],
    ) -> Result<(), HandlerError> {
        Ok(())
    }

    fn allowance_permit_batch(
        &mut self,
        _owner: Address,
        _permit: &PermitBatch,
        _signature: &[u8],
    ) -> Result<(), HandlerError> {
        Ok(())
    }

    fn sweep(
        &mut self,
        _token: Address,
        _recipient: Address,
        _amount_min: Word,
    ) -> Result<(), HandlerError> {
        Ok(())
    }

    fn transfer(
        &mut self,
        _token: Address,
        _recipient: Address,
        _value: Word,
    ) -> Result<(), HandlerError> {
        Ok(())
    }

    fn pay_portion(
        &mut self,
        _token: Address,
        _recipient: Address,
        _bips: Word,
    ) -> Result<(), HandlerError> {
        Ok(())
    }

    fn wrap_native(&mut self, _recipient: Address, _amount_min: Word) -> Result<(), HandlerError> {
        Ok(())
    }

    fn unwrap_native(
        &mut self,
        _recipient: Address,
        _amount_min: Word,
    ) -> Result<(), HandlerError> {
        Ok(())
    }

    fn balance_of(&mut self, _token: Address, _owner: Address) -> Result<Word, HandlerError> {
        Ok(Word::ZERO)
    }
}

fn bench_ctx() -> BatchContext {
    BatchContext::new(Address::from_low_u64(0xaaaa), Address::from_low_u64(0xbbbb))
}

fn transfer_buf() -> Vec<u8> {
    CommandInputs::Transfer {
        token: Address::from_low_u64(0x70),
        recipient: Address::from_low_u64(0x91),
        value: Word::from_u64(250),
    }
    .encode()
}

fn swap_buf(path_len: usize) -> Vec<u8> {
    CommandInputs::ClassicSwapExactIn {
        recipient: CALLER_SENTINEL,
        amount_in: Word::from_u64(1000),
        amount_out_min: Word::from_u64(990),
        path: (0..path_len)
            .map(|i| Address::from_low_u64(0x70 + i as u64))
            .collect(),
        payer_is_caller: true,
    }
    .encode()
}

fn bench_dispatch(c: &mut Criterion) {
    bench_decode_swap(c);
    bench_dispatch_transfer(c);
    bench_batch_transfers(c);
}

fn bench_decode_swap(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_swap");
    for &path_len in &[2_usize, 4, 8] {
        let buf = swap_buf(path_len);
        group.bench_with_input(BenchmarkId::from_parameter(path_len), &buf, |b, buf| {
            b.iter(|| {
                let inputs = decode_inputs(Command::ClassicSwapExactIn, buf).unwrap();
                black_box(inputs);
            });
        });
    }
    group.finish();
}

fn bench_dispatch_transfer(c: &mut Criterion) {
    let ctx = bench_ctx();
    let mut d = Dispatcher::new(NopHandlers);
    let buf = transfer_buf();
    c.bench_function("dispatch_transfer", |b| {
        b.iter(|| {
            let out = d.dispatch(&ctx, Command::Transfer.byte(), &buf).unwrap();
            black_box(out);
        });
    });
}

fn bench_batch_transfers(c: &mut Criterion) {
    let ctx = bench_ctx();
    let mut d = Dispatcher::new(NopHandlers);
    let buf = transfer_buf();
    let mut group = c.benchmark_group("batch_transfers");
    for &len in &[1_usize, 4, 16, 64] {
        let commands = vec![Command::Transfer.byte(); len];
        let inputs: Vec<&[u8]> = vec![&buf; len];
        group.bench_with_input(BenchmarkId::from_parameter(len), &commands, |b, commands| {
            b.iter(|| {
                let out = execute_batch(&mut d, &ctx, commands, &inputs, TraceMask::NONE, None)
                    .unwrap();
                black_box(out);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
