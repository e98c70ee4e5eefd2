//! generate -> csv -> latest reading -> http, through the public api only.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use weather_station::server::{router, AppState};
use weather_station::{load_latest_reading, simulate, write_csv, SimulationParams};

#[test]
fn test_simulation_and_load_latest() {
    let readings = simulate(&SimulationParams::new(1, 30, Some(0))).unwrap();
    assert_eq!(readings.len(), 2);

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("readings.csv");
    write_csv(&readings, &csv_path).unwrap();

    let latest = load_latest_reading(&csv_path).unwrap().expect("reading present");
    let json = serde_json::to_value(&latest).unwrap();
    for key in ["timestamp", "temperature", "humidity", "rain"] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert_eq!(&latest, readings.last().unwrap());
}

#[test]
fn test_seeded_runs_write_identical_values() {
    let dir = tempfile::tempdir().unwrap();
    let params = SimulationParams::new(5, 10, Some(42));

    let a = simulate(&params).unwrap();
    let b = simulate(&params).unwrap();
    let strip = |rs: &[weather_station::Reading]| {
        rs.iter().map(|r| (r.temperature, r.humidity, r.rain)).collect::<Vec<_>>()
    };
    assert_eq!(strip(&a), strip(&b));

    write_csv(&a, &dir.path().join("a.csv")).unwrap();
    let latest = load_latest_reading(&dir.path().join("a.csv")).unwrap().unwrap();
    assert_eq!(latest.rain, a[a.len() - 1].rain);
}

#[tokio::test]
async fn test_generated_file_served_over_http() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("readings.csv");
    let state = AppState::new(&path);

    let request = Request::builder().uri("/latest").body(Body::empty()).unwrap();
    let response = router(state.clone()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let readings = simulate(&SimulationParams::new(3, 60, Some(11))).unwrap();
    write_csv(&readings, &path).unwrap();

    let request = Request::builder().uri("/latest").body(Body::empty()).unwrap();
    let response = router(state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let served: weather_station::Reading = serde_json::from_slice(&body).unwrap();
    assert_eq!(&served, readings.last().unwrap());
}
