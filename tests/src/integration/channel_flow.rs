//! # Channel Flow
//!
//! A two-party channel through its whole cooperative lifecycle, driven the
//! way clients drive it: each party signs independently, the ledger only
//! ever sees complete pairs.

#[cfg(test)]
mod tests {
    use crate::fixtures::{amt, dual_signed, party, TestNode};
    use ll_01_signature_verification::Intent;
    use ll_02_channel_ledger::{
        ChannelError, ChannelLedgerApi, ChannelStatus, EscrowVault, OpenChannelRequest, Party,
    };
    use shared_types::{Address, ChannelId, ErrorKind};

    fn open(node: &TestNode, a: &Address, b: &Address, deposit: u64) -> ChannelId {
        node.node
            .ledger
            .open_channel(OpenChannelRequest {
                participant_a: *a,
                participant_b: *b,
                deposit: amt(deposit),
                duration_secs: 3_600,
                reference: [0x07u8; 32],
            })
            .unwrap()
    }

    #[test]
    fn test_worked_example() {
        let node = TestNode::new();
        let (alice, bob) = (party(1).unwrap(), party(2).unwrap());
        node.fund(&alice.address(), 1_000_000).unwrap();
        let id = open(&node, &alice.address(), &bob.address(), 1_000_000);
        let ledger = &node.node.ledger;

        let channel = ledger.get_channel(&id).unwrap();
        assert_eq!(channel.balance_a, amt(1_000_000));
        assert!(channel.balance_b.is_zero());

        ledger
            .update_channel(
                dual_signed(&alice, &bob, Intent::Update, id, amt(700_000), amt(300_000), 1)
                    .unwrap(),
            )
            .unwrap();

        // Sum mismatch and stale nonce at once: rejected, nothing changes.
        let bad = dual_signed(&alice, &bob, Intent::Update, id, amt(650_000), amt(300_000), 1)
            .unwrap();
        let err = ledger.update_channel(bad).unwrap_err();
        assert!(matches!(err, ChannelError::InvalidBalances { .. }));
        assert_eq!(err.kind(), ErrorKind::Validation);

        let stale = dual_signed(&alice, &bob, Intent::Update, id, amt(650_000), amt(350_000), 1)
            .unwrap();
        assert_eq!(
            ledger.update_channel(stale),
            Err(ChannelError::StaleNonce {
                current: 1,
                submitted: 1
            })
        );
        let channel = ledger.get_channel(&id).unwrap();
        assert_eq!((channel.balance_a, channel.balance_b, channel.nonce), (amt(700_000), amt(300_000), 1));

        let settlement = ledger
            .close_channel(
                dual_signed(&alice, &bob, Intent::Close, id, amt(600_000), amt(400_000), 2)
                    .unwrap(),
            )
            .unwrap();
        assert_eq!(settlement.payout_a, amt(600_000));
        assert_eq!(settlement.payout_b, amt(400_000));

        let channel = ledger.get_channel(&id).unwrap();
        assert_eq!(channel.status, ChannelStatus::Closed);
        assert!(!channel.is_active());
        assert_eq!(node.node.vault.balance_of(&alice.address()), amt(600_000));
        assert_eq!(node.node.vault.balance_of(&bob.address()), amt(400_000));
        assert!(node.node.vault.total_locked().is_zero());

        // Terminal: nothing leaves Closed.
        assert_eq!(
            ledger.update_channel(
                dual_signed(&alice, &bob, Intent::Update, id, amt(500_000), amt(500_000), 3)
                    .unwrap()
            ),
            Err(ChannelError::AlreadyTerminal)
        );
    }

    #[test]
    fn test_update_and_close_messages_not_interchangeable() {
        let node = TestNode::new();
        let (alice, bob) = (party(1).unwrap(), party(2).unwrap());
        node.fund(&alice.address(), 1_000).unwrap();
        let id = open(&node, &alice.address(), &bob.address(), 1_000);
        let ledger = &node.node.ledger;

        let update_sigs = dual_signed(&alice, &bob, Intent::Update, id, amt(400), amt(600), 1).unwrap();
        assert!(matches!(
            ledger.close_channel(update_sigs),
            Err(ChannelError::InvalidSignature { party: Party::A })
        ));

        let close_sigs = dual_signed(&alice, &bob, Intent::Close, id, amt(400), amt(600), 1).unwrap();
        assert!(matches!(
            ledger.update_channel(close_sigs),
            Err(ChannelError::InvalidSignature { party: Party::A })
        ));

        let channel = ledger.get_channel(&id).unwrap();
        assert_eq!(channel.nonce, 0);
        assert!(channel.is_active());
    }

    #[test]
    fn test_either_bad_signature_rejected() {
        let node = TestNode::new();
        let (alice, bob, mallory) = (party(1).unwrap(), party(2).unwrap(), party(3).unwrap());
        node.fund(&alice.address(), 1_000).unwrap();
        let id = open(&node, &alice.address(), &bob.address(), 1_000);

        let forged_b = dual_signed(&alice, &mallory, Intent::Update, id, amt(1), amt(999), 1).unwrap();
        assert_eq!(
            node.node.ledger.update_channel(forged_b),
            Err(ChannelError::InvalidSignature { party: Party::B })
        );
        let forged_a = dual_signed(&mallory, &bob, Intent::Update, id, amt(1), amt(999), 1).unwrap();
        assert_eq!(
            node.node.ledger.update_channel(forged_a),
            Err(ChannelError::InvalidSignature { party: Party::A })
        );
        assert_eq!(node.node.ledger.get_channel(&id).unwrap().balance_b, amt(0));
    }

    #[test]
    fn test_duplicate_open_and_reopen_after_close() {
        let node = TestNode::new();
        let (alice, bob) = (party(1).unwrap(), party(2).unwrap());
        node.fund(&alice.address(), 10_000).unwrap();
        let id = open(&node, &alice.address(), &bob.address(), 1_000);

        let again = node.node.ledger.open_channel(OpenChannelRequest {
            participant_a: alice.address(),
            participant_b: bob.address(),
            deposit: amt(1_000),
            duration_secs: 3_600,
            reference: [0x07u8; 32],
        });
        assert_eq!(again, Err(ChannelError::DuplicateChannel(id)));

        node.node
            .ledger
            .close_channel(dual_signed(&alice, &bob, Intent::Close, id, amt(1_000), amt(0), 1).unwrap())
            .unwrap();
        let reopened = open(&node, &alice.address(), &bob.address(), 1_000);
        assert_ne!(reopened, id);
        assert_eq!(node.node.ledger.channels_for(&bob.address()).len(), 2);
    }
}
