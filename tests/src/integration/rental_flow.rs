//! # Rental Flow
//!
//! Pool owner lists a pool, renter leases it, trades through it and the
//! lease is settled through each available path.

#[cfg(test)]
mod tests {
    use crate::fixtures::{amt, dual_signed, party, TestNode, T0, TOKEN_A, TOKEN_B};
    use lease_runtime::LeaseConfig;
    use ll_01_signature_verification::{Intent, IntentSigner};
    use ll_02_channel_ledger::{ChannelLedgerApi, EscrowVault, OpenChannelRequest};
    use ll_03_pool_registry::{constant_product_k, PoolKind, PoolRegistryApi};
    use ll_04_settlement::{aggregate, SignedAmount};
    use ll_05_rental_engine::{
        CreateRentalRequest, EscrowPolicy, RentalEngineApi, RentalError, RentalStatus,
        SwapRequest,
    };
    use shared_types::{Amount, ChannelId, ErrorKind, PoolId, RentalId, TokenId};

    const FUNDS: u64 = 100_000_000;

    struct Lease {
        node: TestNode,
        renter: IntentSigner,
        owner: IntentSigner,
        pool_id: PoolId,
    }

    impl Lease {
        fn new(config: LeaseConfig) -> Self {
            let node = TestNode::with_config(config);
            let renter = party(0x21).unwrap();
            let owner = party(0x22).unwrap();
            node.fund(&renter.address(), FUNDS).unwrap();
            let pool_id = node.pool(&owner.address(), 10_000_000, 10_000_000).unwrap();
            Self {
                node,
                renter,
                owner,
                pool_id,
            }
        }

        fn rent(&self, channel_id: Option<ChannelId>) -> Result<RentalId, RentalError> {
            self.node.node.rentals.create_rental(CreateRentalRequest {
                pool_id: self.pool_id,
                renter: self.renter.address(),
                duration_secs: 3_600,
                price_per_second: amt(25),
                channel_id,
            })
        }

        fn swap(&self, rental_id: RentalId, token_in: TokenId, amount_in: u64) -> Result<Amount, RentalError> {
            self.node.node.rentals.execute_swap(SwapRequest {
                rental_id,
                caller: self.renter.address(),
                token_in,
                amount_in: amt(amount_in),
                min_amount_out: Amount::zero(),
                gas_price: amt(3),
                route: None,
            })
        }

        fn channel(&self, deposit: u64) -> ChannelId {
            self.node
                .node
                .ledger
                .open_channel(OpenChannelRequest {
                    participant_a: self.renter.address(),
                    participant_b: self.owner.address(),
                    deposit: amt(deposit),
                    duration_secs: 3_600,
                    reference: [0x42u8; 32],
                })
                .unwrap()
        }
    }

    #[test]
    fn test_five_alternating_swaps() {
        let lease = Lease::new(LeaseConfig::default());
        let id = lease.rent(None).unwrap();

        let pool_before = lease.node.node.pools.get_pool(lease.pool_id).unwrap();
        for i in 0..5u64 {
            let token = if i % 2 == 0 { TOKEN_A } else { TOKEN_B };
            lease.swap(id, token, 50_000 + i * 7_919).unwrap();
        }

        let rental = lease.node.node.rentals.get_rental(id).unwrap();
        let history = lease.node.node.rentals.get_swap_history(id).unwrap();
        assert_eq!(rental.swap_count, 5);
        let sum = history
            .iter()
            .fold(Amount::zero(), |acc, swap| acc + swap.fee_charged);
        assert_eq!(rental.fees_earned, sum);
        assert!(history.windows(2).all(|w| w[0].token_in != w[1].token_in));

        // Fees never enter the reserves, so k only grows through rounding.
        let k = |kind: &PoolKind| match kind {
            PoolKind::Reserves { reserve0, reserve1 } => {
                constant_product_k(*reserve0, *reserve1).unwrap()
            }
            PoolKind::Routed { .. } => unreachable!(),
        };
        let pool_after = lease.node.node.pools.get_pool(lease.pool_id).unwrap();
        assert!(k(&pool_after.kind) >= k(&pool_before.kind));
    }

    #[test]
    fn test_expiry_without_deactivation() {
        let lease = Lease::new(LeaseConfig::default());
        let id = lease.rent(None).unwrap();
        lease.swap(id, TOKEN_A, 1_000).unwrap();

        lease.node.clock.set(T0 + 3_600);
        let err = lease.swap(id, TOKEN_A, 1_000).unwrap_err();
        assert!(matches!(err, RentalError::RentalExpired { .. }));
        assert_eq!(err.kind(), ErrorKind::State);

        let rental = lease.node.node.rentals.get_rental(id).unwrap();
        assert!(rental.is_active);
        assert_eq!(rental.swap_count, 1);
        assert_eq!(
            lease.node.node.rentals.rental_status(id).unwrap(),
            RentalStatus::Expired
        );
    }

    #[test]
    fn test_profits_are_pure() {
        let lease = Lease::new(LeaseConfig::default());
        let id = lease.rent(None).unwrap();
        for _ in 0..4 {
            lease.swap(id, TOKEN_B, 2_000_000).unwrap();
        }

        let rentals = &lease.node.node.rentals;
        let first = rentals.get_rental_profits(id).unwrap();
        let second = rentals.get_rental_profits(id).unwrap();
        assert_eq!(first, second);

        let expected_net = SignedAmount::positive(first.total_fees_earned)
            .checked_sub_amount(first.rental_cost_paid)
            .and_then(|v| v.checked_sub_amount(first.gas_cost_estimate))
            .unwrap();
        assert_eq!(first.net_profit, expected_net);
        assert_eq!(first.total_fees_earned, amt(4 * 6_000));
        assert_eq!(first.rental_cost_paid, amt(90_000));
        assert_eq!(first.gas_cost_estimate, amt(4 * 3 * 150_000));

        let summary = aggregate(&[first.clone(), second]).unwrap();
        assert_eq!(summary.rentals, 2);
        assert_eq!(summary.total_fees_earned, amt(48_000));
    }

    #[test]
    fn test_escrow_policy_pinned() {
        // Cost 90000, collateral 108000.
        let collateral_only = Lease::new(LeaseConfig::default());
        let id = collateral_only.rent(None).unwrap();
        assert_eq!(
            collateral_only.node.node.rentals.get_rental(id).unwrap().escrowed,
            amt(108_000)
        );

        let mut config = LeaseConfig::default();
        config.rental.escrow_policy = EscrowPolicy::CostPlusCollateral;
        let cost_plus = Lease::new(config);
        let id = cost_plus.rent(None).unwrap();
        assert_eq!(
            cost_plus.node.node.rentals.get_rental(id).unwrap().escrowed,
            amt(198_000)
        );
        assert_eq!(
            cost_plus.node.node.vault.balance_of(&cost_plus.renter.address()),
            amt(FUNDS - 198_000)
        );
    }

    #[test]
    fn test_direct_settlement_pays_owner_and_platform() {
        let lease = Lease::new(LeaseConfig::default());
        let id = lease.rent(None).unwrap();
        lease.swap(id, TOKEN_A, 10_000).unwrap();

        lease.node.clock.advance(3_600);
        let settlement = lease
            .node
            .node
            .rentals
            .end_rental(id, lease.owner.address())
            .unwrap();

        // Cost 90000: 2% platform fee, the rest of the 108000 escrow back to the renter.
        assert_eq!(settlement.platform_fee, amt(1_800));
        assert_eq!(settlement.owner_payout, amt(88_200));
        assert_eq!(settlement.renter_refund, amt(18_000));

        let vault = &lease.node.node.vault;
        let platform = lease.node.node.config.rental.platform_account;
        assert_eq!(vault.balance_of(&lease.owner.address()), amt(88_200));
        assert_eq!(vault.balance_of(&platform), amt(1_800));
        assert_eq!(vault.balance_of(&lease.renter.address()), amt(FUNDS - 90_000));
        assert!(vault.total_locked().is_zero());

        // Pool is free again.
        assert!(lease.rent(None).is_ok());
    }

    #[test]
    fn test_channel_backed_lease() {
        let lease = Lease::new(LeaseConfig::default());
        let channel_id = lease.channel(1_000_000);
        let id = lease.rent(Some(channel_id)).unwrap();
        for i in 0..3u64 {
            let token = if i % 2 == 0 { TOKEN_A } else { TOKEN_B };
            lease.swap(id, token, 100_000).unwrap();
        }

        // Off-ledger: renter pays the 90000 lease cost to the owner.
        let ledger = &lease.node.node.ledger;
        ledger
            .update_channel(
                dual_signed(&lease.renter, &lease.owner, Intent::Update, channel_id, amt(910_000), amt(90_000), 1)
                    .unwrap(),
            )
            .unwrap();

        let stranger = party(0x33).unwrap();
        let close = dual_signed(&lease.renter, &lease.owner, Intent::Close, channel_id, amt(910_000), amt(90_000), 2)
            .unwrap();
        let err = lease
            .node
            .node
            .rentals
            .end_rental_with_channel(id, stranger.address(), close.clone())
            .unwrap_err();
        assert_eq!(err, RentalError::NotAuthorized(stranger.address()));
        assert_eq!(err.kind(), ErrorKind::Authorization);

        let settlement = lease
            .node
            .node
            .rentals
            .end_rental_with_channel(id, lease.renter.address(), close)
            .unwrap();
        assert_eq!(settlement.platform_fee, amt(1_800));
        assert_eq!(settlement.owner_payout, amt(88_200));
        assert_eq!(settlement.renter_refund, amt(108_000));
        let channel = settlement.channel.unwrap();
        assert_eq!(channel.payout_a, amt(910_000));
        assert_eq!(channel.nonce, 2);

        let vault = &lease.node.node.vault;
        assert_eq!(vault.balance_of(&lease.owner.address()), amt(88_200));
        assert_eq!(
            vault.balance_of(&lease.renter.address()),
            amt(FUNDS - 1_000_000 + 910_000)
        );
        assert!(vault.total_locked().is_zero());
        assert_eq!(
            lease.node.node.rentals.rental_status(id).unwrap(),
            RentalStatus::Ended
        );
    }

    #[test]
    fn test_channel_settled_on_ledger_ends_its_lease() {
        let lease = Lease::new(LeaseConfig::default());
        let channel_id = lease.channel(1_000_000);
        let id = lease.rent(Some(channel_id)).unwrap();
        let rentals = &lease.node.node.rentals;

        // Same owner, second pool, same channel.
        let second_pool = lease
            .node
            .pool(&lease.owner.address(), 5_000_000, 5_000_000)
            .unwrap();
        let reuse = CreateRentalRequest {
            pool_id: second_pool,
            renter: lease.renter.address(),
            duration_secs: 3_600,
            price_per_second: amt(25),
            channel_id: Some(channel_id),
        };
        let err = rentals.create_rental(reuse).unwrap_err();
        assert_eq!(
            err,
            RentalError::ChannelAlreadyLinked {
                channel_id,
                rental_id: id
            }
        );
        assert_eq!(err.kind(), ErrorKind::State);

        // The participants close the channel without going through the engine.
        let close = dual_signed(&lease.renter, &lease.owner, Intent::Close, channel_id, amt(910_000), amt(90_000), 1)
            .unwrap();
        let closed = lease.node.node.ledger.close_channel(close).unwrap();
        assert_eq!(closed.platform_fee, amt(1_800));

        assert_eq!(rentals.rental_status(id).unwrap(), RentalStatus::Active);
        let settlement = rentals.end_rental(id, lease.renter.address()).unwrap();
        assert_eq!(settlement.channel, Some(closed));
        assert_eq!(settlement.owner_payout, amt(88_200));
        assert_eq!(settlement.renter_refund, amt(108_000));

        let vault = &lease.node.node.vault;
        let platform = lease.node.node.config.rental.platform_account;
        assert_eq!(vault.balance_of(&platform), amt(1_800));
        assert!(vault.total_locked().is_zero());
        assert_eq!(rentals.rental_status(id).unwrap(), RentalStatus::Ended);
        assert!(lease.rent(None).is_ok());
    }

    #[test]
    fn test_read_views() {
        let lease = Lease::new(LeaseConfig::default());
        let id = lease.rent(None).unwrap();
        let rentals = &lease.node.node.rentals;

        let mine = rentals.get_renter_rentals(&lease.renter.address());
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].rental_id, id);
        assert!(rentals.get_renter_rentals(&lease.owner.address()).is_empty());

        let pools = rentals.get_owner_pools(&lease.owner.address());
        assert_eq!(pools.len(), 1);
        assert_eq!(pools[0].pool_id, lease.pool_id);
    }
}
