use serde::{Deserialize, Serialize};

use libreta_core::{AggregateId, Entity};

/// Party identifier (clients and suppliers share one id space).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyId(pub AggregateId);

impl PartyId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }

    /// Fresh time-ordered identifier.
    pub fn generate() -> Self {
        Self(AggregateId::new())
    }
}

impl core::fmt::Display for PartyId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A client or supplier with a running balance.
///
/// The sign convention depends on which list the party lives in: for a
/// client, a positive balance is what the client owes us (receivable); for
/// a supplier, a positive balance is what we owe them (payable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub id: PartyId,
    pub name: String,
    /// Balance in minor units (cents).
    pub balance: i64,
}

impl Party {
    /// Newly registered party: zero balance.
    pub fn new(id: PartyId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            balance: 0,
        }
    }
}

impl Entity for Party {
    type Id = PartyId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_party_starts_at_zero() {
        let party = Party::new(PartyId::generate(), "Acme");
        assert_eq!(party.balance, 0);
        assert_eq!(party.name, "Acme");
    }

    #[test]
    fn id_serializes_transparently() {
        let id = PartyId::generate();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }
}
