//! Fee entry domain models.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::fees_errors::FeeError;
use crate::accounts::Account;
use crate::tags::Tag;

/// Classification of a transaction entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionTag {
    #[default]
    Bank,
    Investment,
    InvestmentFee,
    InvestmentCashTransfer,
    GainLoss,
}

/// One fee posting of an investment transaction.
///
/// The debit side pays, the credit side receives. Each side's amount is in
/// that side's account currency, so an entry between accounts of different
/// currencies carries two different magnitudes. When both sides are the same
/// account the entry is a plain cash fee and both amounts are the same signed
/// value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeEntry {
    pub id: String,
    pub debit_account: Account,
    pub credit_account: Account,
    pub debit_amount: Decimal,
    pub credit_amount: Decimal,
    #[serde(default)]
    pub tag: TransactionTag,
    #[serde(default)]
    pub tags: BTreeSet<Tag>,
    #[serde(default)]
    pub memo: String,
}

impl FeeEntry {
    /// Entry against a single account. Negative `amount` is an outflow.
    pub fn single(account: Account, amount: Decimal) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            debit_account: account.clone(),
            credit_account: account,
            debit_amount: amount,
            credit_amount: amount,
            tag: TransactionTag::default(),
            tags: BTreeSet::new(),
            memo: String::new(),
        }
    }

    /// Entry moving `amount` from `debit_account` to `credit_account`, both in
    /// the same currency.
    pub fn transfer(
        debit_account: Account,
        credit_account: Account,
        amount: Decimal,
    ) -> Result<Self, FeeError> {
        if !debit_account.same_currency(&credit_account) {
            return Err(FeeError::CrossCurrencyEntry {
                debit_currency: debit_account.currency,
                credit_currency: credit_account.currency,
            });
        }
        Ok(Self::exchange(
            debit_account,
            credit_account,
            -amount.abs(),
            amount.abs(),
        ))
    }

    /// Entry between accounts of possibly different currencies, with each
    /// side's amount given in its own currency.
    pub fn exchange(
        debit_account: Account,
        credit_account: Account,
        debit_amount: Decimal,
        credit_amount: Decimal,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            debit_account,
            credit_account,
            debit_amount,
            credit_amount,
            tag: TransactionTag::default(),
            tags: BTreeSet::new(),
            memo: String::new(),
        }
    }

    pub fn with_tag(mut self, tag: TransactionTag) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn add_tag(&mut self, tag: Tag) -> bool {
        self.tags.insert(tag)
    }

    /// True when the fee is drawn straight from the account's own cash.
    pub fn is_single_account(&self) -> bool {
        self.debit_account == self.credit_account
    }

    /// Signed amount of the entry as seen from `account`, in that account's
    /// currency. Zero if the account is not part of the entry.
    pub fn amount_for(&self, account: &Account) -> Decimal {
        if *account == self.credit_account {
            self.credit_amount
        } else if *account == self.debit_account {
            self.debit_amount
        } else {
            Decimal::ZERO
        }
    }

    /// Changes the amount of the entry.
    ///
    /// A single-account entry takes `amount` as is. A two-sided entry gets
    /// `-|amount|` on the debit side and `|amount|` on the credit side, which
    /// is only possible when both sides share a currency.
    pub fn set_amount(&mut self, amount: Decimal) -> Result<(), FeeError> {
        if self.is_single_account() {
            self.debit_amount = amount;
            self.credit_amount = amount;
            return Ok(());
        }

        if !self.debit_account.same_currency(&self.credit_account) {
            return Err(FeeError::CrossCurrencyEntry {
                debit_currency: self.debit_account.currency.clone(),
                credit_currency: self.credit_account.currency.clone(),
            });
        }

        self.debit_amount = -amount.abs();
        self.credit_amount = amount.abs();
        Ok(())
    }

    pub fn validate(&self) -> Result<(), FeeError> {
        let invalid = |reason: String| FeeError::InvalidEntry {
            id: self.id.clone(),
            reason,
        };

        if self.is_single_account() {
            if self.debit_amount != self.credit_amount {
                return Err(invalid(format!(
                    "single account entry has mismatched amounts {} and {}",
                    self.debit_amount, self.credit_amount
                )));
            }
            return Ok(());
        }

        if self.debit_amount.is_sign_positive() && !self.debit_amount.is_zero() {
            return Err(invalid(format!(
                "debit amount {} must not be positive",
                self.debit_amount
            )));
        }
        if self.credit_amount.is_sign_negative() && !self.credit_amount.is_zero() {
            return Err(invalid(format!(
                "credit amount {} must not be negative",
                self.credit_amount
            )));
        }
        if self.debit_account.same_currency(&self.credit_account)
            && self.debit_amount.abs() != self.credit_amount.abs()
        {
            return Err(invalid(format!(
                "amounts {} and {} differ within one currency",
                self.debit_amount, self.credit_amount
            )));
        }
        Ok(())
    }
}
