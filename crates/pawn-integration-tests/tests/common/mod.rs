//! Shared harness: an in-memory stand-in for the hosting ledger
//! environment, executing each protocol call the way the environment
//! would — grouped incoming deposit, engine planning, mediated commit —
//! as one all-or-nothing unit with rollback on any failure.
#![allow(dead_code)]

use std::sync::Once;

use pawn_core::{AccountId, AssetId, LedgerTime, ProtocolError};
use pawn_ledger::{FeePolicy, IncomingTransfer, InMemoryLedger, Ledger, TransferIntent};
use pawn_state::{mediator, CallContext, Loan, LoanTerms, Transition, VariantConfig};

static TRACING: Once = Once::new();

/// One loan instance plus the environment it runs in: accounts, assets,
/// and the ledger. The borrower starts with 1 NFT, the lender with 10
/// loan tokens, and both sides are opted in to the other's asset.
pub struct Sandbox {
    pub ledger: InMemoryLedger,
    pub loan: Loan,
    pub creator: AccountId,
    pub program: AccountId,
    pub borrower: AccountId,
    pub lender: AccountId,
    pub nft: AssetId,
    pub token: AssetId,
}

impl Sandbox {
    pub fn new() -> Self {
        Self::with_config(VariantConfig::default())
    }

    pub fn with_config(config: VariantConfig) -> Self {
        TRACING.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| "warn".into()),
                )
                .with_test_writer()
                .try_init();
        });

        let creator = AccountId::new();
        let program = AccountId::new();
        let borrower = AccountId::new();
        let lender = AccountId::new();

        let mut ledger = InMemoryLedger::new();
        let nft = ledger.mint(&borrower, 1);
        let token = ledger.mint(&lender, 10);
        ledger.opt_in(&borrower, token);
        ledger.opt_in(&lender, nft);

        let loan = Loan::with_borrower(creator.clone(), program.clone(), borrower.clone(), config);
        Self {
            ledger,
            loan,
            creator,
            program,
            borrower,
            lender,
            nft,
            token,
        }
    }

    /// A sandbox whose loan has no fixed borrower (explicit-registration
    /// deployments).
    pub fn without_borrower(config: VariantConfig) -> Self {
        let mut sandbox = Self::with_config(config);
        sandbox.loan = Loan::new(sandbox.creator.clone(), sandbox.program.clone(), config);
        sandbox
    }

    /// Execute one protocol call as the environment would: apply the
    /// grouped incoming deposit, plan, commit — rolling the ledger back
    /// if any step refuses.
    pub fn call(
        &mut self,
        incoming: Option<&IncomingTransfer>,
        plan: impl FnOnce(&Loan) -> Result<Transition, ProtocolError>,
    ) -> Result<(), ProtocolError> {
        let snapshot = self.ledger.snapshot();
        let result = (|| {
            let transition = plan(&self.loan)?;
            if let Some(incoming) = incoming {
                let deposit = TransferIntent {
                    asset: incoming.asset,
                    from: incoming.sender.clone(),
                    to: incoming.receiver.clone(),
                    amount: incoming.amount,
                    close_remainder: false,
                    fee: FeePolicy::CallerPays,
                };
                self.ledger
                    .apply_batch(&[deposit])
                    .map_err(|e| ProtocolError::TransferRejected(e.to_string()))?;
            }
            mediator::apply(&mut self.loan, &mut self.ledger, transition)
        })();
        if result.is_err() {
            self.ledger = snapshot;
        }
        result
    }

    // ── Operation shorthands ─────────────────────────────────────────

    pub fn ctx(&self, caller: &AccountId, now: u64) -> CallContext {
        CallContext::new(caller.clone(), LedgerTime(now))
    }

    pub fn terms(&self) -> LoanTerms {
        LoanTerms {
            loan_asset: self.token,
            principal: 5,
            duration_secs: 100,
            interest_rate: 1,
        }
    }

    pub fn deposit_collateral(&mut self, caller: &AccountId, now: u64) -> Result<(), ProtocolError> {
        let ctx = self.ctx(caller, now);
        let nft = self.nft;
        self.call(None, |loan| loan.deposit_collateral(&ctx, nft))
    }

    pub fn request_loan(
        &mut self,
        caller: &AccountId,
        now: u64,
        terms: LoanTerms,
    ) -> Result<(), ProtocolError> {
        let ctx = self.ctx(caller, now);
        let incoming = IncomingTransfer::new(
            self.nft,
            self.borrower.clone(),
            self.program.clone(),
            1,
        );
        self.call(Some(&incoming.clone()), |loan| {
            loan.request_loan(&ctx, terms, &incoming)
        })
    }

    pub fn cancel_request(&mut self, caller: &AccountId, now: u64) -> Result<(), ProtocolError> {
        let ctx = self.ctx(caller, now);
        self.call(None, |loan| loan.cancel_request(&ctx))
    }

    pub fn accept_loan(
        &mut self,
        caller: &AccountId,
        now: u64,
        amount: u64,
    ) -> Result<(), ProtocolError> {
        let ctx = self.ctx(caller, now);
        let incoming = IncomingTransfer::new(
            self.token,
            caller.clone(),
            self.borrower.clone(),
            amount,
        );
        self.call(Some(&incoming.clone()), |loan| {
            loan.accept_loan(&ctx, &incoming)
        })
    }

    pub fn repay_loan(
        &mut self,
        caller: &AccountId,
        now: u64,
        amount: u64,
    ) -> Result<(), ProtocolError> {
        let ctx = self.ctx(caller, now);
        let incoming = IncomingTransfer::new(
            self.token,
            self.borrower.clone(),
            self.lender.clone(),
            amount,
        );
        self.call(Some(&incoming.clone()), |loan| {
            loan.repay_loan(&ctx, &incoming)
        })
    }

    pub fn liquidate_loan(&mut self, caller: &AccountId, now: u64) -> Result<(), ProtocolError> {
        let ctx = self.ctx(caller, now);
        self.call(None, |loan| loan.liquidate_loan(&ctx))
    }

    /// Drive a fresh sandbox to the Funded phase, accepted at `now`.
    pub fn funded_at(now: u64) -> Sandbox {
        let mut sandbox = Sandbox::new();
        let borrower = sandbox.borrower.clone();
        let lender = sandbox.lender.clone();
        sandbox.deposit_collateral(&borrower, 10).unwrap();
        let terms = sandbox.terms();
        sandbox.request_loan(&borrower, 20, terms).unwrap();
        sandbox.accept_loan(&lender, now, 5).unwrap();
        sandbox
    }

    // ── Balance assertions ───────────────────────────────────────────

    pub fn balance(&self, account: &AccountId, asset: AssetId) -> Option<u64> {
        self.ledger.balance(account, asset)
    }

    /// Total units of `asset` across every account in the sandbox.
    pub fn total_supply(&self, asset: AssetId) -> u64 {
        [&self.creator, &self.program, &self.borrower, &self.lender]
            .iter()
            .filter_map(|account| self.ledger.balance(account, asset))
            .sum()
    }
}
