//! # Persistence Flow
//!
//! Snapshot a running node to disk, restart from the file and keep going.

#[cfg(test)]
mod tests {
    use crate::fixtures::{amt, dual_signed, party, TestNode, TOKEN_B};
    use lease_runtime::SnapshotStore;
    use ll_01_signature_verification::Intent;
    use ll_02_channel_ledger::{
        ChannelError, ChannelLedgerApi, EscrowKey, EscrowVault, OpenChannelRequest,
    };
    use ll_05_rental_engine::{CreateRentalRequest, RentalEngineApi, SwapRequest};
    use shared_types::Amount;

    #[test]
    fn test_restart_preserves_nonce_and_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("lease.json"));
        let (renter, owner) = (party(0x21).unwrap(), party(0x22).unwrap());

        let before = TestNode::new();
        before.fund(&renter.address(), 1_000_000).unwrap();
        let pool_id = before.pool(&owner.address(), 500_000, 500_000).unwrap();
        let channel_id = before
            .node
            .ledger
            .open_channel(OpenChannelRequest {
                participant_a: renter.address(),
                participant_b: owner.address(),
                deposit: amt(10_000),
                duration_secs: 3_600,
                reference: [9u8; 32],
            })
            .unwrap();
        let rental_id = before
            .node
            .rentals
            .create_rental(CreateRentalRequest {
                pool_id,
                renter: renter.address(),
                duration_secs: 3_600,
                price_per_second: amt(1),
                channel_id: Some(channel_id),
            })
            .unwrap();
        before
            .node
            .rentals
            .execute_swap(SwapRequest {
                rental_id,
                caller: renter.address(),
                token_in: TOKEN_B,
                amount_in: amt(5_000),
                min_amount_out: Amount::zero(),
                gas_price: amt(1),
                route: None,
            })
            .unwrap();
        let update = dual_signed(&renter, &owner, Intent::Update, channel_id, amt(6_400), amt(3_600), 1)
            .unwrap();
        before.node.ledger.update_channel(update.clone()).unwrap();
        store.save(&before.node.snapshot()).unwrap();

        let after = TestNode::new();
        after.node.restore(store.load().unwrap().unwrap()).unwrap();

        // The accepted nonce survived: replaying it is stale.
        assert_eq!(
            after.node.ledger.update_channel(update),
            Err(ChannelError::StaleNonce {
                current: 1,
                submitted: 1
            })
        );
        assert_eq!(after.node.rentals.get_swap_history(rental_id).unwrap().len(), 1);

        // Escrow comes back per record, and the channel keeps its fee terms.
        let vault = &after.node.vault;
        assert_eq!(vault.locked_for(&EscrowKey::Channel(channel_id)), amt(10_000));
        assert_eq!(vault.locked_for(&EscrowKey::Rental(rental_id)), amt(4_320));
        assert!(after
            .node
            .ledger
            .get_channel(&channel_id)
            .unwrap()
            .fee_terms
            .is_some());

        let close = dual_signed(&renter, &owner, Intent::Close, channel_id, amt(6_400), amt(3_600), 2)
            .unwrap();
        let settlement = after
            .node
            .rentals
            .end_rental_with_channel(rental_id, owner.address(), close)
            .unwrap();
        assert_eq!(settlement.owner_payout, amt(3_528));
        assert_eq!(settlement.renter_refund, amt(4_320));
    }
}
