use log::{debug, error, warn};
use rust_decimal::Decimal;

use super::fees_errors::FeeError;
use super::fees_model::{FeeEntry, TransactionTag};
use super::fees_traits::FeeEntrySource;
use crate::accounts::Account;

/// Fee state of the transaction being edited.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FeeState {
    /// No fee at all
    #[default]
    Empty,
    /// A bare amount that becomes one cash fee entry on commit. Never zero.
    Simple(Decimal),
    /// One or more fee entries owned by the allocator
    Detailed(Vec<FeeEntry>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeMode {
    Empty,
    Simple,
    Detailed,
}

impl FeeState {
    pub fn mode(&self) -> FeeMode {
        match self {
            FeeState::Empty => FeeMode::Empty,
            FeeState::Simple(_) => FeeMode::Simple,
            FeeState::Detailed(_) => FeeMode::Detailed,
        }
    }
}

/// A supplied entry that could not be copied during `load`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeLoadIssue {
    /// Position of the entry in the list passed to `load`
    pub index: usize,
    pub error: FeeError,
}

/// Editor for the fee part of an investment transaction.
///
/// The allocator reconciles a single fee amount typed by the user with the
/// fee entries already stored for the transaction. While there is no stored
/// entry the amount is a simple fee charged against the account's own cash;
/// once entries exist they are authoritative and the amount only mirrors
/// their sum.
///
/// `commit` derives its result from the current state without changing it,
/// so committing twice in one editing session yields the same entries,
/// including the id of a synthesized simple fee.
#[derive(Debug, Clone)]
pub struct FeeAllocator {
    account: Option<Account>,
    state: FeeState,
    issues: Vec<FeeLoadIssue>,
    simple_fee_id: String,
}

impl Default for FeeAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl FeeAllocator {
    pub fn new() -> Self {
        Self {
            account: None,
            state: FeeState::Empty,
            issues: Vec::new(),
            simple_fee_id: new_entry_id(),
        }
    }

    /// Replaces the allocator's state with copies of `entries`, measured
    /// against `account`.
    ///
    /// A single entry drawn from `account`'s own cash collapses into a simple
    /// fee. Entries that fail to duplicate are logged, recorded in `issues()`
    /// and left out; the remaining entries still load.
    pub fn load<S: FeeEntrySource>(&mut self, entries: &[S], account: &Account) {
        self.reset();
        self.account = Some(account.clone());

        if let [source] = entries {
            match source.as_entry() {
                Some(entry) if entry.is_single_account() => self.collapse(entry, account),
                _ => match source.duplicate() {
                    Ok(copy) if copy.is_single_account() => self.collapse(&copy, account),
                    Ok(copy) => self.state = FeeState::Detailed(vec![copy]),
                    Err(e) => self.record_issue(0, e),
                },
            }
        } else {
            let mut copies = Vec::with_capacity(entries.len());
            for (index, entry) in entries.iter().enumerate() {
                match entry.duplicate() {
                    Ok(copy) => copies.push(copy),
                    Err(e) => self.record_issue(index, e),
                }
            }
            if !copies.is_empty() {
                self.state = FeeState::Detailed(copies);
            }
        }

        if let Err(e) = self.total_amount() {
            warn!("Fees for account {} cannot be totalled: {}", account.id, e);
        }

        debug!(
            "Loaded fees for account {}: {:?} mode, amount {}, {} skipped",
            account.id,
            self.mode(),
            self.displayed_amount(),
            self.issues.len()
        );
    }

    /// Sets the fee amount as typed by the user.
    ///
    /// Without stored entries this switches between the empty and simple
    /// states. A single stored entry is re-amounted. With more than one entry
    /// the amount is read-only.
    pub fn set_amount(&mut self, amount: Decimal) -> Result<(), FeeError> {
        if let FeeState::Detailed(entries) = &mut self.state {
            return match entries.as_mut_slice() {
                [entry] => {
                    let amount = if entry.is_single_account() {
                        -amount.abs()
                    } else {
                        amount.abs()
                    };
                    entry.set_amount(amount)
                }
                entries => Err(FeeError::ReadOnlyAmount {
                    entries: entries.len(),
                }),
            };
        }

        self.state = simple_state(amount);
        Ok(())
    }

    /// Returns the fee entries to persist for `account`.
    ///
    /// Stored entries are returned unchanged. A simple fee becomes one entry
    /// against `account` on both sides for `-|amount|`, tagged as an
    /// investment fee. No fee yields no entries.
    pub fn commit(&self, account: &Account) -> Vec<FeeEntry> {
        match &self.state {
            FeeState::Empty => Vec::new(),
            FeeState::Simple(amount) => {
                let mut fee = FeeEntry::single(account.clone(), -amount.abs())
                    .with_tag(TransactionTag::InvestmentFee);
                fee.id = self.simple_fee_id.clone();
                vec![fee]
            }
            FeeState::Detailed(entries) => entries.clone(),
        }
    }

    /// Drops all entries and the amount.
    pub fn clear(&mut self) {
        self.reset();
    }

    pub fn state(&self) -> &FeeState {
        &self.state
    }

    pub fn mode(&self) -> FeeMode {
        self.state.mode()
    }

    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    /// Entries owned by the allocator; empty unless in the detailed state.
    pub fn entries(&self) -> &[FeeEntry] {
        match &self.state {
            FeeState::Detailed(entries) => entries,
            _ => &[],
        }
    }

    /// Amount shown to the user.
    ///
    /// In the detailed state this is the absolute value of the signed sum of
    /// the entries as seen from the edited account. The entries keep their
    /// own signs. A sum too large for a decimal shows as `Decimal::MAX`;
    /// `total_amount` reports it as an error.
    pub fn displayed_amount(&self) -> Decimal {
        self.total_amount().unwrap_or(Decimal::MAX)
    }

    /// Like `displayed_amount`, but an overflowing sum is an error.
    pub fn total_amount(&self) -> Result<Decimal, FeeError> {
        match &self.state {
            FeeState::Empty => Ok(Decimal::ZERO),
            FeeState::Simple(amount) => Ok(*amount),
            FeeState::Detailed(entries) => match &self.account {
                Some(account) => entries
                    .iter()
                    .try_fold(Decimal::ZERO, |total, entry| {
                        total.checked_add(entry.amount_for(account))
                    })
                    .map(|total| total.abs())
                    .ok_or(FeeError::AmountOverflow {
                        entries: entries.len(),
                    }),
                None => Ok(Decimal::ZERO),
            },
        }
    }

    /// False when the amount is a sum of several entries.
    pub fn is_amount_editable(&self) -> bool {
        !matches!(&self.state, FeeState::Detailed(entries) if entries.len() > 1)
    }

    /// Entries skipped by the last `load`.
    pub fn issues(&self) -> &[FeeLoadIssue] {
        &self.issues
    }

    fn reset(&mut self) {
        self.state = FeeState::Empty;
        self.issues.clear();
        self.simple_fee_id = new_entry_id();
    }

    fn collapse(&mut self, entry: &FeeEntry, account: &Account) {
        if entry.debit_account != *account {
            warn!(
                "Fee entry {} is drawn from account {}, not from the edited account {}",
                entry.id, entry.debit_account.id, account.id
            );
        }
        self.state = simple_state(entry.amount_for(account).abs());
    }

    fn record_issue(&mut self, index: usize, error: FeeError) {
        error!("Skipping fee entry #{}: {}", index, error);
        self.issues.push(FeeLoadIssue { index, error });
    }
}

fn simple_state(amount: Decimal) -> FeeState {
    if amount.is_zero() {
        FeeState::Empty
    } else {
        FeeState::Simple(amount)
    }
}

fn new_entry_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
