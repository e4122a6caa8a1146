//! # In-Memory Ledger
//!
//! A test stand-in playing the hosting environment's role: balance
//! bookkeeping with asset opt-in semantics and atomic batches. Production
//! deployments never construct one — the real environment implements
//! `Ledger` natively.

use std::collections::BTreeMap;

use pawn_core::{AccountId, AssetId};

use crate::ledger::{Ledger, LedgerError};
use crate::transfer::TransferIntent;

/// BTreeMap-backed ledger with opt-in holdings.
///
/// An account can only be credited with an asset it has opted in to,
/// mirroring real asset ledgers. A zero-amount self-transfer establishes
/// the holding; a close-remainder movement removes it.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    holdings: BTreeMap<(AccountId, AssetId), u64>,
    next_asset: u64,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new asset with `total` units credited to `creator`.
    /// The creator's holding is established implicitly.
    pub fn mint(&mut self, creator: &AccountId, total: u64) -> AssetId {
        self.next_asset += 1;
        let asset = AssetId(self.next_asset);
        self.holdings.insert((creator.clone(), asset), total);
        asset
    }

    /// Establish `account`'s holding of `asset` with a zero balance.
    pub fn opt_in(&mut self, account: &AccountId, asset: AssetId) {
        self.holdings.entry((account.clone(), asset)).or_insert(0);
    }

    /// A snapshot for rollback; the whole ledger is plain data.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    fn execute(&mut self, intent: &TransferIntent) -> Result<(), LedgerError> {
        // Zero-amount self-transfer: opt-in, establishes the holding.
        if intent.from == intent.to && intent.amount == 0 && !intent.close_remainder {
            self.opt_in(&intent.from, intent.asset);
            return Ok(());
        }

        let from_key = (intent.from.clone(), intent.asset);
        let available =
            *self
                .holdings
                .get(&from_key)
                .ok_or_else(|| LedgerError::UnknownHolding {
                    account: intent.from.clone(),
                    asset: intent.asset,
                })?;

        if available < intent.amount {
            return Err(LedgerError::InsufficientBalance {
                account: intent.from.clone(),
                asset: intent.asset,
                available,
                requested: intent.amount,
            });
        }

        let to_key = (intent.to.clone(), intent.asset);
        if !self.holdings.contains_key(&to_key) {
            return Err(LedgerError::ReceiverNotOptedIn {
                account: intent.to.clone(),
                asset: intent.asset,
            });
        }

        let moved = if intent.close_remainder {
            // Sweep everything and remove the holding.
            self.holdings.remove(&from_key);
            available
        } else {
            self.holdings.insert(from_key, available - intent.amount);
            intent.amount
        };

        if let Some(balance) = self.holdings.get_mut(&to_key) {
            *balance += moved;
        }
        Ok(())
    }
}

impl Ledger for InMemoryLedger {
    fn apply_batch(&mut self, intents: &[TransferIntent]) -> Result<(), LedgerError> {
        // Validate-then-commit: run the batch against a scratch copy and
        // swap it in only if every movement succeeds.
        let mut scratch = self.clone();
        for intent in intents {
            scratch.execute(intent)?;
        }
        *self = scratch;
        Ok(())
    }

    fn balance(&self, account: &AccountId, asset: AssetId) -> Option<u64> {
        self.holdings.get(&(account.clone(), asset)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::FeePolicy;

    fn fixture() -> (InMemoryLedger, AccountId, AccountId, AssetId) {
        let mut ledger = InMemoryLedger::new();
        let alice = AccountId::new();
        let bob = AccountId::new();
        let token = ledger.mint(&alice, 10);
        ledger.opt_in(&bob, token);
        (ledger, alice, bob, token)
    }

    fn pay(asset: AssetId, from: &AccountId, to: &AccountId, amount: u64) -> TransferIntent {
        TransferIntent {
            asset,
            from: from.clone(),
            to: to.clone(),
            amount,
            close_remainder: false,
            fee: FeePolicy::ProgramPays,
        }
    }

    #[test]
    fn test_mint_credits_creator() {
        let (ledger, alice, _, token) = fixture();
        assert_eq!(ledger.balance(&alice, token), Some(10));
    }

    #[test]
    fn test_simple_transfer() {
        let (mut ledger, alice, bob, token) = fixture();
        ledger.apply_batch(&[pay(token, &alice, &bob, 4)]).unwrap();
        assert_eq!(ledger.balance(&alice, token), Some(6));
        assert_eq!(ledger.balance(&bob, token), Some(4));
    }

    #[test]
    fn test_insufficient_balance_rejected() {
        let (mut ledger, alice, bob, token) = fixture();
        let err = ledger
            .apply_batch(&[pay(token, &alice, &bob, 11)])
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
        assert_eq!(ledger.balance(&alice, token), Some(10));
    }

    #[test]
    fn test_receiver_must_opt_in() {
        let (mut ledger, alice, _, token) = fixture();
        let carol = AccountId::new();
        let err = ledger
            .apply_batch(&[pay(token, &alice, &carol, 1)])
            .unwrap_err();
        assert!(matches!(err, LedgerError::ReceiverNotOptedIn { .. }));
    }

    #[test]
    fn test_opt_in_intent_establishes_holding() {
        let (mut ledger, _, _, token) = fixture();
        let carol = AccountId::new();
        assert!(!ledger.holds(&carol, token));
        ledger
            .apply_batch(&[TransferIntent::opt_in(
                carol.clone(),
                token,
                FeePolicy::ProgramPays,
            )])
            .unwrap();
        assert!(ledger.holds(&carol, token));
        assert_eq!(ledger.balance(&carol, token), Some(0));
    }

    #[test]
    fn test_close_remainder_sweeps_and_removes_holding() {
        let (mut ledger, alice, bob, token) = fixture();
        ledger
            .apply_batch(&[TransferIntent::close_out(
                token,
                alice.clone(),
                bob.clone(),
                0,
                FeePolicy::ProgramPays,
            )])
            .unwrap();
        assert_eq!(ledger.balance(&bob, token), Some(10));
        assert!(!ledger.holds(&alice, token));
    }

    #[test]
    fn test_batch_is_all_or_nothing() {
        let (mut ledger, alice, bob, token) = fixture();
        let carol = AccountId::new();
        // First intent is valid, second fails: neither may take effect.
        let err = ledger
            .apply_batch(&[pay(token, &alice, &bob, 4), pay(token, &alice, &carol, 1)])
            .unwrap_err();
        assert!(matches!(err, LedgerError::ReceiverNotOptedIn { .. }));
        assert_eq!(ledger.balance(&alice, token), Some(10));
        assert_eq!(ledger.balance(&bob, token), Some(0));
    }

    #[test]
    fn test_total_supply_conserved() {
        let (mut ledger, alice, bob, token) = fixture();
        ledger.apply_batch(&[pay(token, &alice, &bob, 7)]).unwrap();
        let total = ledger.balance(&alice, token).unwrap_or(0)
            + ledger.balance(&bob, token).unwrap_or(0);
        assert_eq!(total, 10);
    }
}
