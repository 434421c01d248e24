//! Integration tests for sighting radius search.

use dogland_core::geo::{haversine_km, Coordinate};
use dogland_core::pagination::PageRequest;
use dogland_db::models::sighting::{CreateSighting, SightingFilter, UpdateSighting};
use dogland_db::models::status::SightingStatus;
use dogland_db::repositories::SightingRepo;
use sqlx::PgPool;

fn sighting_at(latitude: f64, longitude: f64, description: &str) -> CreateSighting {
    CreateSighting {
        species_id: 1,
        health_status_id: 1,
        description: Some(description.to_string()),
        address: None,
        latitude,
        longitude,
        photo_url: None,
        reported_by: None,
    }
}

/// Puerta del Sol, Madrid.
const SOL: (f64, f64) = (40.4168, -3.7038);

async fn seed_madrid(pool: &PgPool) {
    for (lat, lon, label) in [
        (40.4168, -3.7038, "sol"),
        (40.4530, -3.6883, "bernabeu"),
        (40.4381, -3.6795, "salamanca"),
        (41.3874, 2.1686, "barcelona"),
        (39.4699, -0.3763, "valencia"),
    ] {
        SightingRepo::create(pool, &sighting_at(lat, lon, label))
            .await
            .unwrap();
    }
}

fn radius_filter(radius_km: f64) -> SightingFilter {
    SightingFilter {
        latitude: Some(SOL.0),
        longitude: Some(SOL.1),
        radius_km: Some(radius_km),
        ..Default::default()
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_defaults_to_reported(pool: PgPool) {
    let sighting = SightingRepo::create(&pool, &sighting_at(37.7749, -122.4194, "sf"))
        .await
        .unwrap();
    assert_eq!(sighting.sighting_status_id, SightingStatus::Reported.id());
    assert!(sighting.distance_km.is_none());

    let verified = SightingRepo::update(
        &pool,
        sighting.id,
        &UpdateSighting {
            sighting_status_id: Some(SightingStatus::Verified.id()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(verified.sighting_status_id, SightingStatus::Verified.id());
    assert_eq!(verified.latitude, 37.7749);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_radius_search_returns_nearest_first(pool: PgPool) {
    seed_madrid(&pool).await;

    let page = SightingRepo::list(&pool, &radius_filter(10.0), PageRequest::default())
        .await
        .unwrap();

    assert_eq!(page.total, 3);
    let labels: Vec<_> = page
        .items
        .iter()
        .map(|s| s.description.clone().unwrap())
        .collect();
    assert_eq!(labels[0], "sol");

    let distances: Vec<f64> = page.items.iter().map(|s| s.distance_km.unwrap()).collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    assert!(distances.iter().all(|d| *d <= 10.0));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_radius_distance_matches_haversine(pool: PgPool) {
    seed_madrid(&pool).await;

    let page = SightingRepo::list(&pool, &radius_filter(400.0), PageRequest::default())
        .await
        .unwrap();

    // Valencia (~300 km) is in, Barcelona (~500 km) is out.
    assert_eq!(page.total, 4);
    let center = Coordinate::new(SOL.0, SOL.1);
    for sighting in &page.items {
        let expected = haversine_km(center, sighting.coordinate());
        let actual = sighting.distance_km.unwrap();
        assert!((expected - actual).abs() < 0.01, "{expected} vs {actual}");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_without_radius_has_no_distance(pool: PgPool) {
    seed_madrid(&pool).await;

    let page = SightingRepo::list(&pool, &SightingFilter::default(), PageRequest::new(Some(2), None))
        .await
        .unwrap();

    assert_eq!(page.total, 5);
    assert_eq!(page.items.len(), 2);
    assert!(page.items.iter().all(|s| s.distance_km.is_none()));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_radius_search_combines_with_status_filter(pool: PgPool) {
    seed_madrid(&pool).await;

    let page = SightingRepo::list(
        &pool,
        &SightingFilter {
            sighting_status_id: Some(SightingStatus::Rescued.id()),
            ..radius_filter(10.0)
        },
        PageRequest::default(),
    )
    .await
    .unwrap();
    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_radius_search_at_high_latitude_keeps_edge_of_circle(pool: PgPool) {
    // Easternmost point of a 490 km circle around (80, 0): it sits poleward
    // of the center and further east than radius / cos(80°) would allow.
    SightingRepo::create(&pool, &sighting_at(81.0144, 26.2620, "svalbard-east"))
        .await
        .unwrap();
    SightingRepo::create(&pool, &sighting_at(80.0, 40.0, "too-far"))
        .await
        .unwrap();

    let filter = SightingFilter {
        latitude: Some(80.0),
        longitude: Some(0.0),
        radius_km: Some(500.0),
        ..Default::default()
    };
    let page = SightingRepo::list(&pool, &filter, PageRequest::default())
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].description.as_deref(), Some("svalbard-east"));
    let distance = page.items[0].distance_km.unwrap();
    assert!((489.0..=500.0).contains(&distance), "got {distance}");
}
