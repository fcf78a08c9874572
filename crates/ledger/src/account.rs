use core::str::FromStr;

use serde::{Deserialize, Serialize};

use libreta_core::DomainError;

/// Cash bucket identifier.
///
/// The set is closed: exactly these three accounts exist. They are seeded
/// once at first run and never created or deleted afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountId {
    #[serde(rename = "EFECTIVO")]
    Efectivo,
    #[serde(rename = "CHEQUES")]
    Cheques,
    #[serde(rename = "TRANSFERENCIAS")]
    Transferencias,
}

impl AccountId {
    /// Every account in the fixed chart, in seed order.
    pub const ALL: [AccountId; 3] = [
        AccountId::Efectivo,
        AccountId::Cheques,
        AccountId::Transferencias,
    ];

    /// Stable identifier token, as stored in snapshots and transaction refs.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountId::Efectivo => "EFECTIVO",
            AccountId::Cheques => "CHEQUES",
            AccountId::Transferencias => "TRANSFERENCIAS",
        }
    }

    /// Human-facing display name.
    pub fn label(&self) -> &'static str {
        match self {
            AccountId::Efectivo => "Caja Efectivo",
            AccountId::Cheques => "Caja Cheques",
            AccountId::Transferencias => "Caja Transferencias",
        }
    }
}

impl core::fmt::Display for AccountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EFECTIVO" => Ok(AccountId::Efectivo),
            "CHEQUES" => Ok(AccountId::Cheques),
            "TRANSFERENCIAS" => Ok(AccountId::Transferencias),
            other => Err(DomainError::invalid_id(format!("AccountId: {other}"))),
        }
    }
}

/// One cash-holding account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub label: String,
    /// Balance in minor units (cents). May go negative; nothing at this
    /// layer enforces non-negativity.
    pub balance: i64,
}

impl Account {
    /// Zero-balance account as seeded at first run.
    pub fn opening(id: AccountId) -> Self {
        Self {
            id,
            label: id.label().to_string(),
            balance: 0,
        }
    }
}

/// The full fixed chart with zero balances, in seed order.
pub fn opening_accounts() -> Vec<Account> {
    AccountId::ALL.iter().copied().map(Account::opening).collect()
}
