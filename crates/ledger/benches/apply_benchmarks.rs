use chrono::Utc;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use uuid::Uuid;

use libreta_ledger::{
    AccountId, Books, BooksCommand, PartyId, RecordSale, RegisterClient, TransferFunds,
};

fn seeded_books(clients: usize) -> (Books, Vec<PartyId>) {
    let mut books = Books::default();
    let mut ids = Vec::with_capacity(clients);
    for i in 0..clients {
        let id = PartyId::generate();
        let event = books
            .handle(&BooksCommand::RegisterClient(RegisterClient {
                client_id: id,
                name: format!("Cliente {i}"),
            }))
            .unwrap();
        books.apply(&event);
        ids.push(id);
    }
    (books, ids)
}

fn bench_transfer_decide_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer_decide_apply");
    for ops in [100u64, 1_000u64] {
        group.throughput(Throughput::Elements(ops));
        group.bench_with_input(BenchmarkId::from_parameter(ops), &ops, |b, &ops| {
            b.iter(|| {
                let mut books = Books::default();
                for _ in 0..ops {
                    let event = books
                        .handle(&BooksCommand::TransferFunds(TransferFunds {
                            from: AccountId::Efectivo,
                            to: AccountId::Cheques,
                            amount: 100,
                            transaction_id: Uuid::now_v7(),
                            occurred_at: Utc::now(),
                        }))
                        .unwrap();
                    books.apply(&event);
                }
                black_box(books.cash_total())
            });
        });
    }
    group.finish();
}

fn bench_sale_with_client_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("sale_with_client_lookup");
    for clients in [10usize, 1_000usize] {
        let (books, ids) = seeded_books(clients);
        let target = *ids.last().unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(clients),
            &books,
            |b, seeded| {
                b.iter(|| {
                    let mut books = seeded.clone();
                    let event = books
                        .handle(&BooksCommand::RecordSale(RecordSale {
                            client_id: target,
                            amount: 100,
                            description: "inv".to_string(),
                            transaction_id: Uuid::now_v7(),
                            occurred_at: Utc::now(),
                        }))
                        .unwrap();
                    books.apply(&event);
                    black_box(books.transactions.len())
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_transfer_decide_apply,
    bench_sale_with_client_lookup
);
criterion_main!(benches);
