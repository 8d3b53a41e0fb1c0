//! # Concurrency
//!
//! Unrelated channels, rentals and pools make progress independently; racing
//! writers on one record are serialized without losing updates.

#[cfg(test)]
mod tests {
    use crate::fixtures::{amt, dual_signed, party, TestNode, TOKEN_A, TOKEN_B};
    use ll_01_signature_verification::{Intent, IntentSigner};
    use ll_02_channel_ledger::{ChannelError, ChannelLedgerApi, EscrowVault, OpenChannelRequest};
    use ll_03_pool_registry::{PoolKind, PoolRegistryApi};
    use ll_05_rental_engine::{CreateRentalRequest, RentalEngineApi, SwapRequest};
    use shared_types::{Amount, ChannelId, RentalId};
    use std::sync::Arc;

    const PAIRS: u8 = 8;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_independent_channels_progress_in_parallel() {
        let node = Arc::new(TestNode::new());
        let mut pairs: Vec<(Arc<IntentSigner>, Arc<IntentSigner>, ChannelId)> = Vec::new();
        for i in 0..PAIRS {
            let a = party(0x10 + i).unwrap();
            let b = party(0x40 + i).unwrap();
            node.fund(&a.address(), 1_000).unwrap();
            let id = node
                .node
                .ledger
                .open_channel(OpenChannelRequest {
                    participant_a: a.address(),
                    participant_b: b.address(),
                    deposit: amt(1_000),
                    duration_secs: 3_600,
                    reference: [i; 32],
                })
                .unwrap();
            pairs.push((Arc::new(a), Arc::new(b), id));
        }

        let mut handles = Vec::new();
        for (a, b, id) in pairs.clone() {
            let node = node.clone();
            handles.push(tokio::spawn(async move {
                for nonce in 1..=20u64 {
                    let update = dual_signed(&a, &b, Intent::Update, id, amt(1_000 - nonce), amt(nonce), nonce)
                        .unwrap();
                    node.node.ledger.update_channel(update).unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        for (_, _, id) in pairs {
            let channel = node.node.ledger.get_channel(&id).unwrap();
            assert_eq!(channel.nonce, 20);
            assert_eq!(channel.balance_a + channel.balance_b, amt(1_000));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_updates_single_winner_per_nonce() {
        let node = Arc::new(TestNode::new());
        let a = Arc::new(party(1).unwrap());
        let b = Arc::new(party(2).unwrap());
        node.fund(&a.address(), 1_000).unwrap();
        let id = node
            .node
            .ledger
            .open_channel(OpenChannelRequest {
                participant_a: a.address(),
                participant_b: b.address(),
                deposit: amt(1_000),
                duration_secs: 3_600,
                reference: [0u8; 32],
            })
            .unwrap();

        let mut handles = Vec::new();
        for i in 0..16u64 {
            let (node, a, b) = (node.clone(), a.clone(), b.clone());
            handles.push(tokio::spawn(async move {
                let update = dual_signed(&a, &b, Intent::Update, id, amt(1_000 - i), amt(i), 1).unwrap();
                node.node.ledger.update_channel(update)
            }));
        }
        let mut accepted = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => accepted += 1,
                Err(err) => assert!(matches!(err, ChannelError::StaleNonce { current: 1, .. })),
            }
        }
        assert_eq!(accepted, 1);
        assert_eq!(node.node.ledger.get_channel(&id).unwrap().nonce, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_rentals_on_separate_pools_and_shared_vault() {
        let node = Arc::new(TestNode::new());
        let owner = party(0x70).unwrap();
        let mut leases: Vec<(shared_types::Address, RentalId, u64)> = Vec::new();
        for i in 0..PAIRS {
            let renter = party(0x10 + i).unwrap();
            node.fund(&renter.address(), 1_000_000).unwrap();
            let pool_id = node.pool(&owner.address(), 1_000_000, 1_000_000).unwrap();
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
                .unwrap();
            leases.push((renter.address(), rental_id, pool_id));
        }

        let mut handles = Vec::new();
        for (renter, rental_id, _) in leases.clone() {
            let node = node.clone();
            handles.push(tokio::spawn(async move {
                for n in 0..25u64 {
                    let token_in = if n % 2 == 0 { TOKEN_A } else { TOKEN_B };
                    node.node
                        .rentals
                        .execute_swap(SwapRequest {
                            rental_id,
                            caller: renter,
                            token_in,
                            amount_in: amt(1_000 + n),
                            min_amount_out: Amount::zero(),
                            gas_price: amt(1),
                            route: None,
                        })
                        .unwrap();
                }
                node.node.rentals.end_rental(rental_id, renter).unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        for (_, rental_id, pool_id) in leases {
            let rental = node.node.rentals.get_rental(rental_id).unwrap();
            assert_eq!(rental.swap_count, 25);
            assert!(!rental.is_active);
            match node.node.pools.get_pool(pool_id).unwrap().kind {
                PoolKind::Reserves { reserve0, reserve1 } => {
                    assert!(reserve0.full_mul(reserve1) >= Amount::from(1_000_000u64).full_mul(Amount::from(1_000_000u64)));
                }
                PoolKind::Routed { .. } => unreachable!(),
            }
        }
        assert!(node.node.vault.total_locked().is_zero());
    }
}
