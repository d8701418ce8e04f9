use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sidera::aspects::{AspectCalculator, AspectSettings};
use sidera::{Body, NatalPlacement, SkyPosition};

fn sample_positions() -> Vec<SkyPosition> {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    Body::ALL
        .iter()
        .enumerate()
        .map(|(i, body)| SkyPosition::new(*body, at, (i as f64) * 37.0, false))
        .collect()
}

fn bench_calculate_aspect(c: &mut Criterion) {
    let calculator = AspectCalculator::default();

    c.bench_function("calculate_aspect", |b| {
        b.iter(|| calculator.calculate_aspect("sun", black_box(100.0), "moon", black_box(102.0)))
    });
}

fn bench_daily_aspects(c: &mut Criterion) {
    let settings = AspectSettings {
        include_minor: true,
        ..Default::default()
    };
    let calculator = AspectCalculator::daily(&settings);
    let positions = sample_positions();

    c.bench_function("daily_aspects", |b| b.iter(|| calculator.daily_aspects(black_box(&positions))));
}

fn bench_transit_natal_aspects(c: &mut Criterion) {
    let calculator = AspectCalculator::transit(&AspectSettings::default());
    let positions = sample_positions();
    let placements: Vec<NatalPlacement> = ["sun", "moon", "mercury", "venus", "mars", "ascendant"]
        .iter()
        .zip(["aries", "cancer", "leo", "libra", "capricorn", "pisces"])
        .map(|(planet, sign)| NatalPlacement::new(planet, sign, 12.0, 30.0))
        .collect();

    c.bench_function("transit_natal_aspects", |b| {
        b.iter(|| calculator.transit_natal_aspects(black_box(&positions), black_box(&placements)))
    });
}

criterion_group!(benches, bench_calculate_aspect, bench_daily_aspects, bench_transit_natal_aspects);
criterion_main!(benches);
