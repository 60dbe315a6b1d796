#![allow(clippy::unwrap_used)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use remittance_hub::application::services::{
    LowestTotalCostStrategy, RankingStrategy, RemittanceHub,
};
use remittance_hub::domain::entities::{
    Address, QuoteBuilder, Recipient, RemittanceQuote, TransactionRequest,
};
use remittance_hub::domain::value_objects::{
    CountryCode, Currency, Money, ProviderName, RecipientId, SenderId, Timestamp,
};
use remittance_hub::infrastructure::providers::{
    FeeModel, RemittanceProvider, SimulatedProvider, SimulatedProviderConfig,
};
use rust_decimal::Decimal;
use std::hint::black_box;
use std::sync::Arc;

fn request() -> TransactionRequest {
    TransactionRequest::builder(
        SenderId::new("snd-1"),
        CountryCode::new("US").unwrap(),
        Recipient::new(
            RecipientId::new("rcp-1"),
            "Maria Santos",
            Address::in_country(CountryCode::new("PH").unwrap()),
        ),
        Money::new(Decimal::new(1000, 0), Currency::USD),
        Currency::PHP,
    )
    .build()
    .unwrap()
}

fn hub(providers: usize) -> RemittanceHub {
    let providers: Vec<Arc<dyn RemittanceProvider>> = (0..providers)
        .map(|i| {
            let fee = Decimal::new(((i * 37) % 2_000) as i64, 2);
            let provider = SimulatedProvider::new(
                SimulatedProviderConfig::new(format!("P{i}"), Decimal::new(115, 2))
                    .with_fee_model(FeeModel::Flat(fee))
                    .with_currencies(&["USD", "PHP"])
                    .with_countries(&["US", "PH"]),
            )
            .unwrap();
            Arc::new(provider) as Arc<dyn RemittanceProvider>
        })
        .collect();
    RemittanceHub::new(providers).unwrap()
}

fn quotes(count: usize) -> Vec<RemittanceQuote> {
    (0..count)
        .map(|i| {
            QuoteBuilder::new(
                ProviderName::new(format!("P{i}")),
                Money::new(Decimal::new(1000, 0), Currency::USD),
                Money::new(Decimal::new(((i * 53) % 2_500) as i64, 2), Currency::USD),
                Decimal::new(118, 2),
                Currency::PHP,
                Timestamp::now().add_secs(3_600),
            )
            .try_build()
            .unwrap()
        })
        .collect()
}

fn fan_out_bench(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let request = request();
    let mut group = c.benchmark_group("hub_get_quotes");

    for providers in [3usize, 16, 64] {
        let hub = hub(providers);
        group.bench_with_input(BenchmarkId::from_parameter(providers), &providers, |b, _| {
            b.to_async(&runtime)
                .iter(|| async { black_box(hub.get_quotes(black_box(&request)).await) });
        });
    }
    group.finish();
}

fn ranking_bench(c: &mut Criterion) {
    let input = quotes(256);

    c.bench_function("rank_lowest_total_cost_256", |b| {
        b.iter(|| LowestTotalCostStrategy.rank(black_box(input.clone())))
    });
}

criterion_group!(benches, fan_out_bench, ranking_bench);
criterion_main!(benches);
