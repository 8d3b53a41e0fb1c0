//! # Dispute Flow
//!
//! One party stops responding; the other starts a dispute and settles once
//! the window has elapsed. Time is simulated, nothing sleeps.

#[cfg(test)]
mod tests {
    use crate::fixtures::{amt, dual_signed, party, TestNode, TOKEN_A};
    use lease_runtime::LeaseConfig;
    use ll_01_signature_verification::Intent;
    use ll_02_channel_ledger::{
        ChannelError, ChannelLedgerApi, ChannelStatus, EscrowVault, OpenChannelRequest, Resolution,
    };
    use ll_05_rental_engine::{CreateRentalRequest, RentalEngineApi, RentalError, SwapRequest};
    use shared_types::Amount;

    #[test]
    fn test_dispute_resolves_exactly_once() {
        let node = TestNode::new();
        let (alice, bob) = (party(1).unwrap(), party(2).unwrap());
        node.fund(&alice.address(), 1_000).unwrap();
        let ledger = &node.node.ledger;
        let id = ledger
            .open_channel(OpenChannelRequest {
                participant_a: alice.address(),
                participant_b: bob.address(),
                deposit: amt(1_000),
                duration_secs: 3_600,
                reference: [0u8; 32],
            })
            .unwrap();
        ledger
            .update_channel(dual_signed(&alice, &bob, Intent::Update, id, amt(250), amt(750), 1).unwrap())
            .unwrap();

        let deadline = ledger.start_dispute(id, bob.address()).unwrap();
        assert_eq!(
            ledger.start_dispute(id, alice.address()),
            Err(ChannelError::AlreadyDisputed)
        );
        // Frozen while disputed.
        assert_eq!(
            ledger.update_channel(dual_signed(&alice, &bob, Intent::Update, id, amt(500), amt(500), 2).unwrap()),
            Err(ChannelError::ChannelDisputed)
        );

        node.clock.set(deadline - 1);
        assert_eq!(
            ledger.resolve_dispute(id, bob.address(), amt(250), amt(750)),
            Err(ChannelError::DisputeWindowNotElapsed {
                deadline,
                now: deadline - 1
            })
        );

        node.clock.set(deadline);
        let settlement = ledger
            .resolve_dispute(id, bob.address(), amt(250), amt(750))
            .unwrap();
        assert_eq!(settlement.resolution, Resolution::Dispute);
        assert_eq!(
            ledger.resolve_dispute(id, bob.address(), amt(250), amt(750)),
            Err(ChannelError::AlreadyTerminal)
        );
        assert_eq!(ledger.get_channel(&id).unwrap().status, ChannelStatus::Resolved);
        assert_eq!(node.node.vault.balance_of(&bob.address()), amt(750));
    }

    #[test]
    fn test_silent_renter_owner_recovers_through_dispute() {
        let mut config = LeaseConfig::default();
        config.ledger.dispute_window_secs = 600;
        let node = TestNode::with_config(config);
        let (renter, owner) = (party(0x21).unwrap(), party(0x22).unwrap());
        node.fund(&renter.address(), 10_000_000).unwrap();
        let pool_id = node.pool(&owner.address(), 1_000_000, 1_000_000).unwrap();

        let channel_id = node
            .node
            .ledger
            .open_channel(OpenChannelRequest {
                participant_a: renter.address(),
                participant_b: owner.address(),
                deposit: amt(100_000),
                duration_secs: 3_600,
                reference: [1u8; 32],
            })
            .unwrap();
        let rental_id = node
            .node
            .rentals
            .create_rental(CreateRentalRequest {
                pool_id,
                renter: renter.address(),
                duration_secs: 600,
                price_per_second: amt(50),
                channel_id: Some(channel_id),
            })
            .unwrap();
        node.node
            .rentals
            .execute_swap(SwapRequest {
                rental_id,
                caller: renter.address(),
                token_in: TOKEN_A,
                amount_in: amt(10_000),
                min_amount_out: Amount::zero(),
                gas_price: amt(1),
                route: None,
            })
            .unwrap();

        // Payment for the lease was agreed in-channel, then the renter went silent.
        node.node
            .ledger
            .update_channel(
                dual_signed(&renter, &owner, Intent::Update, channel_id, amt(70_000), amt(30_000), 1)
                    .unwrap(),
            )
            .unwrap();
        node.node.ledger.start_dispute(channel_id, owner.address()).unwrap();

        assert!(matches!(
            node.node
                .rentals
                .resolve_rental_dispute(rental_id, owner.address(), amt(70_000), amt(30_000)),
            Err(RentalError::Channel(ChannelError::DisputeWindowNotElapsed { .. }))
        ));

        node.clock.advance(600);
        let settlement = node
            .node
            .rentals
            .resolve_rental_dispute(rental_id, owner.address(), amt(70_000), amt(30_000))
            .unwrap();
        assert_eq!(settlement.platform_fee, amt(600));
        assert_eq!(settlement.owner_payout, amt(29_400));
        assert_eq!(settlement.renter_refund, amt(36_000));

        assert!(!node.node.rentals.get_rental(rental_id).unwrap().is_active);
        assert!(node.node.vault.total_locked().is_zero());
    }
}
