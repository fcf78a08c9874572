use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::account::AccountId;

/// Movement categories, serialized with the tokens the persisted snapshot
/// has always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Cash moved between two of the fixed accounts.
    #[serde(rename = "TRANSFER")]
    Transfer,
    /// Cash received into an account from a client.
    #[serde(rename = "INCOME")]
    Income,
    /// Cash paid out of an account to a supplier.
    #[serde(rename = "EXPENSE")]
    Expense,
    /// Payable grew: a supplier invoice was recorded, no cash moved.
    #[serde(rename = "DEBT_INCREASE")]
    DebtIncrease,
    /// Receivable grew: a sale was recorded, no cash moved.
    #[serde(rename = "RECEIVABLE_INCREASE")]
    ReceivableIncrease,
}

/// Counterparty of a movement: one of the fixed cash accounts, or a party
/// referenced by display name.
///
/// The persisted form is a bare string. The account identifier namespace is
/// closed, so decoding is unambiguous: the three account tokens map to
/// `Account`, anything else is a party name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterpartyRef {
    Account(AccountId),
    Party(String),
}

impl CounterpartyRef {
    pub fn as_str(&self) -> &str {
        match self {
            CounterpartyRef::Account(id) => id.as_str(),
            CounterpartyRef::Party(name) => name,
        }
    }
}

impl core::fmt::Display for CounterpartyRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<AccountId> for CounterpartyRef {
    fn from(id: AccountId) -> Self {
        CounterpartyRef::Account(id)
    }
}

impl Serialize for CounterpartyRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CounterpartyRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match AccountId::from_str(&raw) {
            Ok(id) => CounterpartyRef::Account(id),
            Err(_) => CounterpartyRef::Party(raw),
        })
    }
}

/// An immutable record of one financial event.
///
/// Appended once, never modified or deleted; the log keeps newest entries
/// first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    /// Stamped at append time, never touched afterwards.
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Positive magnitude in minor units; direction lives in `kind` and the
    /// counterparty refs.
    pub amount: i64,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<CounterpartyRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<CounterpartyRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        Transaction {
            id: Uuid::now_v7(),
            date: Utc::now(),
            kind: TransactionKind::Income,
            amount: 400,
            description: "Cobro a Cliente".to_string(),
            source: Some(CounterpartyRef::Party("Acme".to_string())),
            destination: Some(CounterpartyRef::Account(AccountId::Efectivo)),
        }
    }

    #[test]
    fn wire_shape_matches_persisted_layout() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["type"], "INCOME");
        assert_eq!(value["amount"], 400);
        assert_eq!(value["source"], "Acme");
        assert_eq!(value["destination"], "EFECTIVO");
        // `date` is an ISO-8601 timestamp.
        assert!(value["date"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn absent_refs_are_omitted_entirely() {
        let mut record = sample();
        record.source = None;
        let value = serde_json::to_value(record).unwrap();
        assert!(value.get("source").is_none());
        assert_eq!(value["destination"], "EFECTIVO");
    }

    #[test]
    fn refs_decode_by_namespace() {
        let account: CounterpartyRef = serde_json::from_str("\"CHEQUES\"").unwrap();
        assert_eq!(account, CounterpartyRef::Account(AccountId::Cheques));

        let party: CounterpartyRef = serde_json::from_str("\"Proveedora del Sur\"").unwrap();
        assert_eq!(party, CounterpartyRef::Party("Proveedora del Sur".to_string()));
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = sample();
        let raw = serde_json::to_string(&record).unwrap();
        let decoded: Transaction = serde_json::from_str(&raw).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn missing_refs_decode_as_none() {
        let raw = r#"{
            "id": "0192d9a0-0000-7000-8000-000000000000",
            "date": "2024-05-01T12:00:00Z",
            "type": "TRANSFER",
            "amount": 100,
            "description": "Transferencia Interna"
        }"#;
        let decoded: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(decoded.source, None);
        assert_eq!(decoded.destination, None);
    }
}
