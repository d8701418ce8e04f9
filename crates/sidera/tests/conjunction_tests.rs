use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use sidera::conjunctions::{
    ecliptic_orb, group_by_exactness, match_conjunctions, natal_conjunctions, transit_activations, Exactness,
    Subject,
};
use sidera::{Body, Catalog, CatalogPoint, NatalPlacement, SkyPosition};

#[test]
fn test_orb_is_symmetric_across_zero() {
    assert_eq!(ecliptic_orb(350.0, 10.0), 20.0);
    assert_eq!(ecliptic_orb(10.0, 350.0), 20.0);
}

#[test]
fn test_boundary_orb_is_reported() {
    let point = CatalogPoint::star("edge", "Edge", 200.0, 1.5);
    let subjects = [Subject { id: "saturn", longitude: 198.5, at: None }];
    let found = match_conjunctions(subjects, &[point], |_| false);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].orb_degree, 1.5);
    assert_eq!(found[0].exactness, Exactness::Wide);
}

#[test]
fn test_exactness_tiers() {
    let point = CatalogPoint::star("p", "P", 100.0, 2.0);
    let tier = |lon: f64| {
        let subjects = [Subject { id: "sun", longitude: lon, at: None }];
        match_conjunctions(subjects, &[point.clone()], |_| false)[0].exactness
    };
    assert_eq!(tier(100.3), Exactness::Exact);
    assert_eq!(tier(100.8), Exactness::Close);
    assert_eq!(tier(101.9), Exactness::Wide);
}

#[test]
fn test_natal_sun_on_builtin_regulus() {
    let catalog = Catalog::builtin().unwrap();
    let placements = vec![NatalPlacement::new("sun", "virgo", 0.0, 0.0)];
    let found = natal_conjunctions(&placements, &catalog.fixed_stars);
    let regulus = found.iter().find(|c| c.point.id == "regulus").unwrap();
    assert_eq!(regulus.orb_degree, 0.0);
    assert!(regulus.is_exact);
    assert!(regulus.is_personal);
}

#[test]
fn test_placements_without_sign_are_skipped() {
    let catalog = Catalog::builtin().unwrap();
    let mut broken = NatalPlacement::new("moon", "virgo", 0.0, 0.0);
    broken.sign_id = None;
    let found = natal_conjunctions(&[broken], &catalog.fixed_stars);
    assert!(found.is_empty());
}

#[test]
fn test_transit_results_sorted_and_grouped() {
    let catalog = Catalog::builtin().unwrap();
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    let sky: Vec<SkyPosition> = [(Body::Sun, 69.5), (Body::Mars, 150.9), (Body::Venus, 203.9), (Body::Moon, 104.1)]
        .iter()
        .map(|(b, lon)| SkyPosition::new(*b, at, *lon, false))
        .collect();
    let found = transit_activations(&sky, &catalog.fixed_stars, &[]);
    assert!(!found.is_empty());
    for pair in found.windows(2) {
        assert!(pair[0].orb_degree <= pair[1].orb_degree);
    }
    assert!(found.iter().all(|c| !c.is_personal));
    assert!(found.iter().all(|c| c.orb_degree <= c.point.orb));

    let groups = group_by_exactness(&found);
    assert_eq!(groups.exact.len() + groups.close.len() + groups.wide.len(), found.len());
    assert!(groups.exact.iter().all(|c| c.orb_degree <= 0.5));
    assert!(groups.close.iter().all(|c| c.orb_degree > 0.5 && c.orb_degree <= 1.0));
    assert!(groups.wide.iter().all(|c| c.orb_degree > 1.0));
}

proptest! {
    #[test]
    fn prop_orb_symmetric_and_bounded(a in -720.0f64..720.0, b in -720.0f64..720.0) {
        let ab = ecliptic_orb(a, b);
        let ba = ecliptic_orb(b, a);
        prop_assert!((ab - ba).abs() < 1e-9);
        prop_assert!((0.0..=180.0).contains(&ab));
    }

    #[test]
    fn prop_reported_iff_within_orb(lon in 0.0f64..360.0, star in 0.0f64..360.0, orb in 0.1f64..10.0) {
        let point = CatalogPoint::star("s", "S", star, orb);
        let subjects = [Subject { id: "mars", longitude: lon, at: None }];
        let found = match_conjunctions(subjects, &[point], |_| false);
        prop_assert_eq!(found.len() == 1, ecliptic_orb(lon, star) <= orb);
    }
}
