use chrono::{NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sidera::parans::{locate_angle_events, ParanCorrelator, ParanQuery, ParanSettings};
use sidera::{AngleTarget, Body, Catalog, MeanElementsEphemeris, Observer};

fn bench_sun_angle_events(c: &mut Criterion) {
    let eph = MeanElementsEphemeris::new();
    let observer = Observer::new(51.5074, -0.1278);
    let day_start = Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap();
    let target = AngleTarget::Body(Body::Sun);

    c.bench_function("sun_angle_events", |b| {
        b.iter(|| locate_angle_events(&eph, black_box(&target), "sun", &observer, black_box(day_start)))
    });
}

fn bench_compute_parans(c: &mut Criterion) {
    let eph = MeanElementsEphemeris::new();
    let catalog = Catalog::builtin().unwrap();
    let correlator = ParanCorrelator::new(&eph, ParanSettings::default());
    let query = ParanQuery::new(NaiveDate::from_ymd_opt(2024, 6, 21).unwrap(), 60, Some(51.5074), Some(-0.1278));

    c.bench_function("compute_parans_builtin_catalog", |b| {
        b.iter(|| correlator.compute_parans(black_box(&catalog.fixed_stars), black_box(&query)))
    });
}

criterion_group!(benches, bench_sun_angle_events, bench_compute_parans);
criterion_main!(benches);
