//! Ledger domain module (accounts, parties, transactions).
//!
//! Pure domain logic only: no IO, no rendering, no persistence concerns.
//! State transitions follow a decide/apply split: [`Books::handle`] validates
//! a command and returns the event describing what happened, and
//! [`Books::apply`] evolves the aggregate from that event deterministically.

pub mod account;
pub mod books;
pub mod party;
pub mod transaction;

pub use account::{Account, AccountId, opening_accounts};
pub use books::{
    Books, BooksCommand, BooksEvent, ClientRegistered, CollectPayment, FundsTransferred,
    PaySupplier, PaymentCollected, PurchaseRecorded, RecordPurchase, RecordSale, RegisterClient,
    RegisterSupplier, SaleRecorded, SupplierPaid, SupplierRegistered, TransferFunds,
};
pub use party::{Party, PartyId};
pub use transaction::{CounterpartyRef, Transaction, TransactionKind};
