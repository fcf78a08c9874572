use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use libreta_core::{DomainError, DomainResult, Entity};

use crate::account::{Account, AccountId, opening_accounts};
use crate::party::{Party, PartyId};
use crate::transaction::{CounterpartyRef, Transaction, TransactionKind};

/// The full bookkeeping state: the unit of persistence and the aggregate
/// every operation acts on.
///
/// Serialized whole as one object; field names are part of the snapshot
/// layout and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Books {
    pub accounts: Vec<Account>,
    pub clients: Vec<Party>,
    pub suppliers: Vec<Party>,
    /// Newest first.
    pub transactions: Vec<Transaction>,
}

impl Default for Books {
    fn default() -> Self {
        Self {
            accounts: opening_accounts(),
            clients: Vec::new(),
            suppliers: Vec::new(),
            transactions: Vec::new(),
        }
    }
}

/// Command: move cash between two of the fixed accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferFunds {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: i64,
    pub transaction_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

/// Command: register a new client with a zero balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterClient {
    pub client_id: PartyId,
    pub name: String,
}

/// Command: record a sale on credit (receivable grows, no cash moves).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSale {
    pub client_id: PartyId,
    pub amount: i64,
    pub description: String,
    pub transaction_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

/// Command: collect cash from a client into an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectPayment {
    pub client_id: PartyId,
    pub account: AccountId,
    pub amount: i64,
    pub transaction_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

/// Command: register a new supplier with a zero balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterSupplier {
    pub supplier_id: PartyId,
    pub name: String,
}

/// Command: record a supplier invoice (payable grows, no cash moves).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPurchase {
    pub supplier_id: PartyId,
    pub amount: i64,
    pub description: String,
    pub transaction_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

/// Command: pay a supplier out of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaySupplier {
    pub supplier_id: PartyId,
    pub account: AccountId,
    pub amount: i64,
    pub transaction_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BooksCommand {
    TransferFunds(TransferFunds),
    RegisterClient(RegisterClient),
    RecordSale(RecordSale),
    CollectPayment(CollectPayment),
    RegisterSupplier(RegisterSupplier),
    RecordPurchase(RecordPurchase),
    PaySupplier(PaySupplier),
}

/// Event: cash moved between two accounts. Conserves the cash total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundsTransferred {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: i64,
    pub record: Transaction,
}

/// Event: a client joined the books.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRegistered {
    pub client: Party,
}

/// Event: a receivable grew. Carries the client name as resolved at
/// decision time, so the log would not change retroactively were renames
/// ever added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecorded {
    pub client_id: PartyId,
    pub amount: i64,
    pub record: Transaction,
}

/// Event: cash came in from a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCollected {
    pub client_id: PartyId,
    pub account: AccountId,
    pub amount: i64,
    pub record: Transaction,
}

/// Event: a supplier joined the books.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierRegistered {
    pub supplier: Party,
}

/// Event: a payable grew.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecorded {
    pub supplier_id: PartyId,
    pub amount: i64,
    pub record: Transaction,
}

/// Event: cash went out to a supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierPaid {
    pub supplier_id: PartyId,
    pub account: AccountId,
    pub amount: i64,
    pub record: Transaction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BooksEvent {
    FundsTransferred(FundsTransferred),
    ClientRegistered(ClientRegistered),
    SaleRecorded(SaleRecorded),
    PaymentCollected(PaymentCollected),
    SupplierRegistered(SupplierRegistered),
    PurchaseRecorded(PurchaseRecorded),
    SupplierPaid(SupplierPaid),
}

impl BooksEvent {
    /// Stable event name/type identifier.
    pub fn event_type(&self) -> &'static str {
        match self {
            BooksEvent::FundsTransferred(_) => "ledger.funds_transferred",
            BooksEvent::ClientRegistered(_) => "ledger.client_registered",
            BooksEvent::SaleRecorded(_) => "ledger.sale_recorded",
            BooksEvent::PaymentCollected(_) => "ledger.payment_collected",
            BooksEvent::SupplierRegistered(_) => "ledger.supplier_registered",
            BooksEvent::PurchaseRecorded(_) => "ledger.purchase_recorded",
            BooksEvent::SupplierPaid(_) => "ledger.supplier_paid",
        }
    }

    /// The transaction this event appends to the log, if it appends one.
    /// Party registrations move no money and append nothing.
    pub fn record(&self) -> Option<&Transaction> {
        match self {
            BooksEvent::FundsTransferred(e) => Some(&e.record),
            BooksEvent::SaleRecorded(e) => Some(&e.record),
            BooksEvent::PaymentCollected(e) => Some(&e.record),
            BooksEvent::PurchaseRecorded(e) => Some(&e.record),
            BooksEvent::SupplierPaid(e) => Some(&e.record),
            BooksEvent::ClientRegistered(_) | BooksEvent::SupplierRegistered(_) => None,
        }
    }
}

impl Books {
    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn client(&self, id: PartyId) -> Option<&Party> {
        find_by_id(&self.clients, &id)
    }

    pub fn supplier(&self, id: PartyId) -> Option<&Party> {
        find_by_id(&self.suppliers, &id)
    }

    /// Sum of all account balances, in minor units.
    pub fn cash_total(&self) -> i64 {
        self.accounts.iter().map(|a| a.balance).sum()
    }

    /// Decide which event a command produces, without mutating state.
    ///
    /// Every command maps to exactly one event; balance-mutating events
    /// carry exactly one transaction record.
    pub fn handle(&self, command: &BooksCommand) -> DomainResult<BooksEvent> {
        match command {
            BooksCommand::TransferFunds(cmd) => self.handle_transfer(cmd),
            BooksCommand::RegisterClient(cmd) => self.handle_register_client(cmd),
            BooksCommand::RecordSale(cmd) => self.handle_record_sale(cmd),
            BooksCommand::CollectPayment(cmd) => self.handle_collect_payment(cmd),
            BooksCommand::RegisterSupplier(cmd) => self.handle_register_supplier(cmd),
            BooksCommand::RecordPurchase(cmd) => self.handle_record_purchase(cmd),
            BooksCommand::PaySupplier(cmd) => self.handle_pay_supplier(cmd),
        }
    }

    /// Evolve in-memory state from a single event.
    ///
    /// Deterministic: the event carries everything needed, including the
    /// pre-built transaction record.
    pub fn apply(&mut self, event: &BooksEvent) {
        match event {
            BooksEvent::FundsTransferred(e) => {
                self.adjust_account(e.from, -e.amount);
                self.adjust_account(e.to, e.amount);
            }
            BooksEvent::ClientRegistered(e) => self.clients.push(e.client.clone()),
            BooksEvent::SaleRecorded(e) => {
                adjust_party(&mut self.clients, e.client_id, e.amount);
            }
            BooksEvent::PaymentCollected(e) => {
                adjust_party(&mut self.clients, e.client_id, -e.amount);
                self.adjust_account(e.account, e.amount);
            }
            BooksEvent::SupplierRegistered(e) => self.suppliers.push(e.supplier.clone()),
            BooksEvent::PurchaseRecorded(e) => {
                adjust_party(&mut self.suppliers, e.supplier_id, e.amount);
            }
            BooksEvent::SupplierPaid(e) => {
                adjust_party(&mut self.suppliers, e.supplier_id, -e.amount);
                self.adjust_account(e.account, -e.amount);
            }
        }

        if let Some(record) = event.record() {
            // Newest first: the log reads top-down from most recent.
            self.transactions.insert(0, record.clone());
        }
    }

    fn handle_transfer(&self, cmd: &TransferFunds) -> DomainResult<BooksEvent> {
        ensure_positive(cmd.amount)?;
        if cmd.from == cmd.to {
            return Err(DomainError::validation(
                "transfer requires two distinct accounts",
            ));
        }

        Ok(BooksEvent::FundsTransferred(FundsTransferred {
            from: cmd.from,
            to: cmd.to,
            amount: cmd.amount,
            record: Transaction {
                id: cmd.transaction_id,
                date: cmd.occurred_at,
                kind: TransactionKind::Transfer,
                amount: cmd.amount,
                description: "Transferencia Interna".to_string(),
                source: Some(CounterpartyRef::Account(cmd.from)),
                destination: Some(CounterpartyRef::Account(cmd.to)),
            },
        }))
    }

    fn handle_register_client(&self, cmd: &RegisterClient) -> DomainResult<BooksEvent> {
        ensure_name(&cmd.name)?;
        if self.client(cmd.client_id).is_some() {
            return Err(DomainError::conflict("client already exists"));
        }

        Ok(BooksEvent::ClientRegistered(ClientRegistered {
            client: Party::new(cmd.client_id, cmd.name.trim()),
        }))
    }

    fn handle_record_sale(&self, cmd: &RecordSale) -> DomainResult<BooksEvent> {
        ensure_positive(cmd.amount)?;
        let client = self.client(cmd.client_id).ok_or(DomainError::NotFound)?;

        Ok(BooksEvent::SaleRecorded(SaleRecorded {
            client_id: cmd.client_id,
            amount: cmd.amount,
            record: Transaction {
                id: cmd.transaction_id,
                date: cmd.occurred_at,
                kind: TransactionKind::ReceivableIncrease,
                amount: cmd.amount,
                description: format!("Venta: {}", cmd.description),
                source: None,
                destination: Some(CounterpartyRef::Party(client.name.clone())),
            },
        }))
    }

    fn handle_collect_payment(&self, cmd: &CollectPayment) -> DomainResult<BooksEvent> {
        ensure_positive(cmd.amount)?;
        let client = self.client(cmd.client_id).ok_or(DomainError::NotFound)?;

        Ok(BooksEvent::PaymentCollected(PaymentCollected {
            client_id: cmd.client_id,
            account: cmd.account,
            amount: cmd.amount,
            record: Transaction {
                id: cmd.transaction_id,
                date: cmd.occurred_at,
                kind: TransactionKind::Income,
                amount: cmd.amount,
                description: "Cobro a Cliente".to_string(),
                source: Some(CounterpartyRef::Party(client.name.clone())),
                destination: Some(CounterpartyRef::Account(cmd.account)),
            },
        }))
    }

    fn handle_register_supplier(&self, cmd: &RegisterSupplier) -> DomainResult<BooksEvent> {
        ensure_name(&cmd.name)?;
        if self.supplier(cmd.supplier_id).is_some() {
            return Err(DomainError::conflict("supplier already exists"));
        }

        Ok(BooksEvent::SupplierRegistered(SupplierRegistered {
            supplier: Party::new(cmd.supplier_id, cmd.name.trim()),
        }))
    }

    fn handle_record_purchase(&self, cmd: &RecordPurchase) -> DomainResult<BooksEvent> {
        ensure_positive(cmd.amount)?;
        let supplier = self.supplier(cmd.supplier_id).ok_or(DomainError::NotFound)?;

        Ok(BooksEvent::PurchaseRecorded(PurchaseRecorded {
            supplier_id: cmd.supplier_id,
            amount: cmd.amount,
            record: Transaction {
                id: cmd.transaction_id,
                date: cmd.occurred_at,
                kind: TransactionKind::DebtIncrease,
                amount: cmd.amount,
                description: format!("Factura: {}", cmd.description),
                source: Some(CounterpartyRef::Party(supplier.name.clone())),
                destination: None,
            },
        }))
    }

    fn handle_pay_supplier(&self, cmd: &PaySupplier) -> DomainResult<BooksEvent> {
        ensure_positive(cmd.amount)?;
        let supplier = self.supplier(cmd.supplier_id).ok_or(DomainError::NotFound)?;

        Ok(BooksEvent::SupplierPaid(SupplierPaid {
            supplier_id: cmd.supplier_id,
            account: cmd.account,
            amount: cmd.amount,
            record: Transaction {
                id: cmd.transaction_id,
                date: cmd.occurred_at,
                kind: TransactionKind::Expense,
                amount: cmd.amount,
                description: "Pago a Proveedor".to_string(),
                source: Some(CounterpartyRef::Account(cmd.account)),
                destination: Some(CounterpartyRef::Party(supplier.name.clone())),
            },
        }))
    }

    fn adjust_account(&mut self, id: AccountId, delta: i64) {
        // The chart is fixed, so this lookup only misses on a hand-edited
        // snapshot; a miss leaves balances untouched.
        if let Some(account) = self.accounts.iter_mut().find(|a| a.id == id) {
            account.balance += delta;
        }
    }
}

fn adjust_party(parties: &mut [Party], id: PartyId, delta: i64) {
    if let Some(party) = parties.iter_mut().find(|p| p.id == id) {
        party.balance += delta;
    }
}

fn find_by_id<'a, E: Entity>(items: &'a [E], id: &E::Id) -> Option<&'a E> {
    items.iter().find(|item| item.id() == id)
}

fn ensure_positive(amount: i64) -> DomainResult<()> {
    if amount <= 0 {
        return Err(DomainError::validation("amount must be positive"));
    }
    Ok(())
}

fn ensure_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    Ok(())
}
