//! Account domain models.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Account a fee entry posts against.
///
/// Only identity and the native currency matter to the ledger core, so
/// equality and hashing look at `id` alone: two snapshots of the same account
/// taken at different times still compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub account_type: String,
    /// ISO code of the account's native currency
    pub currency: String,
    pub is_active: bool,
}

impl Account {
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// True when both accounts hold amounts in the same currency.
    pub fn same_currency(&self, other: &Account) -> bool {
        self.currency.eq_ignore_ascii_case(&other.currency)
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Account {}

impl Hash for Account {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
