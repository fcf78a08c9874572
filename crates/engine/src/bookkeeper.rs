use chrono::Utc;
use uuid::Uuid;

use libreta_core::DomainResult;
use libreta_ledger::{
    AccountId, Books, BooksCommand, CollectPayment, PartyId, PaySupplier, RecordPurchase,
    RecordSale, RegisterClient, RegisterSupplier, TransferFunds,
};
use libreta_store::{JsonFileStore, SnapshotStore, StoreError};

/// Outcome of a committed mutation.
///
/// Holding one of these means the domain change succeeded. The snapshot
/// write may still have failed: `persist_error` then carries the cause and
/// the in-memory state stays authoritative for the session. Persistence is
/// attempted exactly once per mutation; there is no retry.
#[derive(Debug)]
pub struct Committed<T = ()> {
    /// Operation-specific output (e.g. the id of a newly registered party).
    pub output: T,
    pub persist_error: Option<StoreError>,
}

/// Owns the current books and couples every mutation to one snapshot write.
///
/// The UI layer reads state through [`Bookkeeper::books`] and mutates it
/// through the seven operations below; it never touches the store directly.
pub struct Bookkeeper {
    store: Box<dyn SnapshotStore>,
    books: Books,
}

impl Bookkeeper {
    /// Load the persisted books, degrading to empty books when nothing was
    /// persisted yet or the slot cannot be read. Never fails to open: a
    /// broken slot costs the old data, not the session.
    pub fn open(store: Box<dyn SnapshotStore>) -> Self {
        let books = match store.load() {
            Ok(Some(books)) => books,
            Ok(None) => Books::default(),
            Err(err) => {
                tracing::warn!(error = %err, "stored snapshot unreadable, starting from empty books");
                Books::default()
            }
        };
        Self { store, books }
    }

    /// Open against the default on-disk slot under the platform data
    /// directory.
    pub fn open_default() -> Result<Self, StoreError> {
        let store = JsonFileStore::in_data_dir()?;
        Ok(Self::open(Box::new(store)))
    }

    /// Current state snapshot. Filtering and presentation belong to the
    /// caller; this is the raw aggregate.
    pub fn books(&self) -> &Books {
        &self.books
    }

    /// Move cash between two of the fixed accounts.
    pub fn transfer_funds(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: i64,
    ) -> DomainResult<Committed> {
        let persist_error = self.commit(BooksCommand::TransferFunds(TransferFunds {
            from,
            to,
            amount,
            transaction_id: Uuid::now_v7(),
            occurred_at: Utc::now(),
        }))?;
        Ok(Committed {
            output: (),
            persist_error,
        })
    }

    /// Register a new client; returns its generated id.
    pub fn register_client(&mut self, name: impl Into<String>) -> DomainResult<Committed<PartyId>> {
        let client_id = PartyId::generate();
        let persist_error = self.commit(BooksCommand::RegisterClient(RegisterClient {
            client_id,
            name: name.into(),
        }))?;
        Ok(Committed {
            output: client_id,
            persist_error,
        })
    }

    /// Record a sale on credit: the client's receivable grows, no cash
    /// moves.
    pub fn record_sale(
        &mut self,
        client_id: PartyId,
        amount: i64,
        description: impl Into<String>,
    ) -> DomainResult<Committed> {
        let persist_error = self.commit(BooksCommand::RecordSale(RecordSale {
            client_id,
            amount,
            description: description.into(),
            transaction_id: Uuid::now_v7(),
            occurred_at: Utc::now(),
        }))?;
        Ok(Committed {
            output: (),
            persist_error,
        })
    }

    /// Collect cash from a client into an account.
    pub fn collect_payment(
        &mut self,
        client_id: PartyId,
        account: AccountId,
        amount: i64,
    ) -> DomainResult<Committed> {
        let persist_error = self.commit(BooksCommand::CollectPayment(CollectPayment {
            client_id,
            account,
            amount,
            transaction_id: Uuid::now_v7(),
            occurred_at: Utc::now(),
        }))?;
        Ok(Committed {
            output: (),
            persist_error,
        })
    }

    /// Register a new supplier; returns its generated id.
    pub fn register_supplier(
        &mut self,
        name: impl Into<String>,
    ) -> DomainResult<Committed<PartyId>> {
        let supplier_id = PartyId::generate();
        let persist_error = self.commit(BooksCommand::RegisterSupplier(RegisterSupplier {
            supplier_id,
            name: name.into(),
        }))?;
        Ok(Committed {
            output: supplier_id,
            persist_error,
        })
    }

    /// Record a supplier invoice: the payable grows, no cash moves.
    pub fn record_purchase(
        &mut self,
        supplier_id: PartyId,
        amount: i64,
        description: impl Into<String>,
    ) -> DomainResult<Committed> {
        let persist_error = self.commit(BooksCommand::RecordPurchase(RecordPurchase {
            supplier_id,
            amount,
            description: description.into(),
            transaction_id: Uuid::now_v7(),
            occurred_at: Utc::now(),
        }))?;
        Ok(Committed {
            output: (),
            persist_error,
        })
    }

    /// Pay a supplier out of an account.
    pub fn pay_supplier(
        &mut self,
        supplier_id: PartyId,
        account: AccountId,
        amount: i64,
    ) -> DomainResult<Committed> {
        let persist_error = self.commit(BooksCommand::PaySupplier(PaySupplier {
            supplier_id,
            account,
            amount,
            transaction_id: Uuid::now_v7(),
            occurred_at: Utc::now(),
        }))?;
        Ok(Committed {
            output: (),
            persist_error,
        })
    }

    /// Decide, apply, persist. A domain rejection leaves state and slot
    /// untouched; a persist failure leaves the applied state in memory and
    /// is reported, not propagated.
    fn commit(&mut self, command: BooksCommand) -> DomainResult<Option<StoreError>> {
        let event = self.books.handle(&command)?;
        self.books.apply(&event);
        tracing::debug!(event = event.event_type(), "applied ledger event");

        match self.store.save(&self.books) {
            Ok(()) => Ok(None),
            Err(err) => {
                tracing::warn!(error = %err, "snapshot write failed, keeping in-memory state");
                Ok(Some(err))
            }
        }
    }
}
