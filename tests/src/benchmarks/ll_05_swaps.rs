//! # LL-05 Leased Swap Benchmarks
//!
//! Pure constant-product math, then the full path through the rental
//! engine (authorization, fee accrual, pool mutation, history).

use crate::fixtures::{amt, party, TestNode, TOKEN_A, TOKEN_B};
use criterion::{black_box, BenchmarkId, Criterion};
use ll_03_pool_registry::get_amount_out;
use ll_05_rental_engine::{CreateRentalRequest, RentalEngineApi, SwapRequest};
use shared_types::{Address, Amount, RentalId};

pub fn bench_amount_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("ll-05/amount_out");
    let reserve = Amount::exp10(24);

    for amount_in in [1_000u64, 1_000_000, 1_000_000_000] {
        group.bench_with_input(BenchmarkId::from_parameter(amount_in), &amount_in, |b, &n| {
            b.iter(|| black_box(get_amount_out(Amount::from(n), reserve, reserve, 30)))
        });
    }
    group.finish();
}

fn leased_node() -> Option<(TestNode, Address, RentalId)> {
    let node = TestNode::new();
    let renter = party(0x31).ok()?;
    let owner = party(0x32).ok()?;
    node.fund(&renter.address(), 1_000_000_000).ok()?;
    let pool_id = node
        .pool(&owner.address(), 1_000_000_000_000, 1_000_000_000_000)
        .ok()?;
    let rental_id = node
        .node
        .rentals
        .create_rental(CreateRentalRequest {
            pool_id,
            renter: renter.address(),
            duration_secs: 3_600,
            price_per_second: amt(10),
            channel_id: None,
        })
        .ok()?;
    Some((node, renter.address(), rental_id))
}

pub fn bench_execute_swap(c: &mut Criterion) {
    let mut group = c.benchmark_group("ll-05/execute_swap");
    let Some((node, renter, rental_id)) = leased_node() else {
        return;
    };

    let mut flip = false;
    group.bench_function("alternating_direction", |b| {
        b.iter(|| {
            flip = !flip;
            let token_in = if flip { TOKEN_A } else { TOKEN_B };
            black_box(node.node.rentals.execute_swap(SwapRequest {
                rental_id,
                caller: renter,
                token_in,
                amount_in: amt(10_000),
                min_amount_out: Amount::zero(),
                gas_price: amt(1),
                route: None,
            }))
        })
    });
    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_amount_out(c);
    bench_execute_swap(c);
}
