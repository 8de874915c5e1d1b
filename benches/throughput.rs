use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::io;
use tokio::runtime::Runtime;
use wanderly::entities::{NewExpense, NewTrip, TripStatus};
use wanderly::{export_kind, EntityKind, Fixtures, Latency, Store};

const BATCH: u64 = 1_000;

struct NoopWriter;

impl io::Write for NoopWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn store() -> Store {
    Store::builder()
        .fixtures(Fixtures::embedded().unwrap())
        .latency(Latency::none())
        .build()
}

fn new_trip(i: u64) -> NewTrip {
    let start = chrono::NaiveDate::from_ymd_opt(2027, 1, 1).unwrap() + chrono::Duration::days(i as i64 % 300);
    NewTrip {
        name: format!("Trip {i}"),
        destination: Some("Lisbon".to_string()),
        start_date: start,
        end_date: start + chrono::Duration::days(4),
        status: TripStatus::Planning,
    }
}

fn repository_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");
    group.throughput(Throughput::Elements(BATCH));

    group.bench_function("create_1K_trips", |b| {
        let rt = Runtime::new().unwrap();
        b.to_async(rt).iter(|| async {
            let trips = store().trips();
            for i in 0..BATCH {
                trips.create(new_trip(i)).await;
            }
        });
    });

    group.bench_function("create_then_update_1K_expenses", |b| {
        let rt = Runtime::new().unwrap();
        b.to_async(rt).iter(|| async {
            let expenses = store().expenses();
            for i in 0..BATCH {
                let expense = expenses
                    .create(NewExpense {
                        trip_id: None,
                        category: "food".to_string(),
                        description: format!("Meal {i}"),
                        amount: rust_decimal::Decimal::new(1250, 2),
                        currency: "EUR".to_string(),
                        date: chrono::NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
                    })
                    .await;
                expenses
                    .update(&expense.expense_id, Default::default())
                    .await
                    .unwrap();
            }
        });
    });

    group.bench_function("search_documents_1K_times", |b| {
        let rt = Runtime::new().unwrap();
        let store = store();
        b.to_async(rt).iter(|| async {
            let documents = store.documents();
            for _ in 0..BATCH {
                documents.search("visa").await;
            }
        });
    });

    group.finish();
}

fn export(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let store = store();
    rt.block_on(async {
        let trips = store.trips();
        for i in 0..BATCH {
            trips.create(new_trip(i)).await;
        }
    });

    c.bench_function("export_1K_trips", |b| {
        b.to_async(&rt)
            .iter(|| async { export_kind(&store, EntityKind::Trip, NoopWriter).await.unwrap() });
    });
}

criterion_group!(benches, repository_throughput, export);
criterion_main!(benches);
