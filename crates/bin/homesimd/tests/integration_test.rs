//! End-to-end tests for the full homesimd stack.
//!
//! Each test wires the complete application (in-memory `SQLite`, the real
//! log store, seeded randomness, the real axum router) and exercises the
//! HTTP layer via `tower::ServiceExt::oneshot`; no TCP port is bound.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use homesim_adapter_http_axum::router;
use homesim_adapter_http_axum::state::AppState;
use homesim_adapter_storage_sqlite_sqlx::{Config, SqliteLogStore};
use homesim_adapter_virtual::SeededRandom;
use homesim_app::alert_bus::AlertBus;
use homesim_app::home::Home;
use homesim_app::scheduler::Scheduler;
use homesim_app::tasks::{Periods, spawn_all};
use homesim_domain::device::{DeviceId, PowerState};
use homesim_domain::time::TimeOfDay;
use tower::ServiceExt;

type TestHome = Home<SqliteLogStore>;

/// Build a fully-wired home backed by an in-memory `SQLite` database.
async fn home() -> (Arc<TestHome>, Arc<AlertBus>) {
    let db = Config {
        database_url: "sqlite::memory:".to_string(),
    }
    .build()
    .await
    .expect("in-memory database should initialise");

    let alerts = Arc::new(AlertBus::new(64));
    let home = Home::builder()
        .store(SqliteLogStore::new(db.pool().clone()))
        .sensor_random(Arc::new(SeededRandom::stream(7, 0)))
        .log_random(Arc::new(SeededRandom::stream(7, 1)))
        .alerts(Arc::clone(&alerts) as _)
        .build()
        .expect("home should build");
    (Arc::new(home), alerts)
}

async fn app() -> (axum::Router, Arc<TestHome>) {
    let (home, alerts) = home().await;
    (router::build(AppState::new(Arc::clone(&home), alerts)), home)
}

async fn send(app: &axum::Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, body)
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let (app, _) = app().await;
    let (status, _) = send(&app, "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Devices and the event log
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_start_with_every_device_off() {
    let (app, _) = app().await;

    let (status, body) = send(&app, "GET", "/api/devices").await;

    assert_eq!(status, StatusCode::OK);
    let devices = body.as_array().unwrap();
    assert_eq!(devices.len(), 2);
    assert!(devices.iter().all(|d| d["state"] == "OFF"));
}

#[tokio::test]
async fn should_persist_each_toggle_in_order() {
    let (app, _) = app().await;

    for _ in 0..3 {
        let (status, _) = send(&app, "POST", "/api/devices/Light/toggle").await;
        assert_eq!(status, StatusCode::OK);
    }
    send(&app, "POST", "/api/devices/fan/toggle").await;

    let (status, body) = send(&app, "GET", "/api/logs").await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    let rows: Vec<(i64, &str, &str)> = entries
        .iter()
        .map(|e| {
            (
                e["id"].as_i64().unwrap(),
                e["device"].as_str().unwrap(),
                e["status"].as_str().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        rows,
        [
            (4, "Fan", "ON"),
            (3, "Light", "ON"),
            (2, "Light", "OFF"),
            (1, "Light", "ON"),
        ]
    );
    for entry in entries {
        let temperature = entry["temperature"].as_f64().unwrap();
        let humidity = entry["humidity"].as_f64().unwrap();
        assert!((20.0..=30.0).contains(&temperature));
        assert!((40.0..=70.0).contains(&humidity));
    }
}

#[tokio::test]
async fn should_return_404_when_toggling_unknown_device() {
    let (app, _) = app().await;
    let (status, body) = send(&app, "POST", "/api/devices/heater/toggle").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "device heater not found");
}

#[tokio::test]
async fn should_limit_log_query() {
    let (app, home) = app().await;
    for _ in 0..5 {
        home.toggle_device(DeviceId::Fan).await.unwrap();
    }

    let (_, body) = send(&app, "GET", "/api/logs?limit=2").await;

    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, [5, 4]);
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_report_refreshed_reading_in_status() {
    let (app, home) = app().await;
    home.refresh_status().await;

    let (status, body) = send(&app, "GET", "/api/status").await;

    assert_eq!(status, StatusCode::OK);
    let temperature = body["reading"]["temperature_c"].as_i64().unwrap();
    let humidity = body["reading"]["humidity_pct"].as_i64().unwrap();
    assert!((20..=30).contains(&temperature));
    assert!((40..=70).contains(&humidity));
    assert!(body["refreshed_at"].is_string());
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn should_serialize_concurrent_changes_into_gapless_log() {
    let (home, _) = home().await;
    let eight_am = TimeOfDay::new(8, 0).unwrap();
    let mut jobs = tokio::task::JoinSet::new();

    for i in 0..40 {
        let home = Arc::clone(&home);
        let id = if i % 2 == 0 { DeviceId::Light } else { DeviceId::Fan };
        jobs.spawn(async move { home.toggle_device(id).await.map(|_| 1) });
    }
    for _ in 0..40 {
        let home = Arc::clone(&home);
        jobs.spawn(async move { home.auto_light_check().await.map(usize::from) });
    }
    for _ in 0..5 {
        let home = Arc::clone(&home);
        jobs.spawn(async move { home.check_schedule_at(eight_am).await.map(|rules| rules.len()) });
    }

    let mut transitions = 0;
    while let Some(joined) = jobs.join_next().await {
        transitions += joined.unwrap().unwrap();
    }

    let mut entries = home.recent_logs(1_000).await.unwrap();
    entries.reverse();
    let ids: Vec<i64> = entries.iter().map(|e| e.id).collect();
    let expected: Vec<i64> = (1..=i64::try_from(transitions).unwrap()).collect();
    assert_eq!(ids, expected);

    // replaying the log in id order must reproduce every change in the order
    // it was applied
    let mut light = PowerState::Off;
    let mut fan = PowerState::Off;
    for entry in &entries {
        let status: PowerState = entry.status.parse().unwrap();
        match entry.device.as_str() {
            "Light" => {
                assert_eq!(status, light.flipped(), "entry {}", entry.id);
                light = status;
            }
            "Light(Auto)" => {
                assert_eq!(
                    (light, status),
                    (PowerState::Off, PowerState::On),
                    "entry {}",
                    entry.id
                );
                light = status;
            }
            "Light(Scheduled)" => {
                assert_eq!(status, PowerState::On, "entry {}", entry.id);
                light = status;
            }
            "Fan" => {
                assert_eq!(status, fan.flipped(), "entry {}", entry.id);
                fan = status;
            }
            other => panic!("unexpected device label {other}"),
        }
    }

    let [final_light, final_fan] = home.devices().await;
    assert_eq!(final_light.state, light);
    assert_eq!(final_fan.state, fan);
    // twenty fan toggles and nothing else touches the fan
    assert_eq!(final_fan.state, PowerState::Off);
    assert_eq!(entries.iter().filter(|e| e.device == "Fan").count(), 20);
    assert_eq!(entries.iter().filter(|e| e.device == "Light").count(), 20);
    assert_eq!(
        entries
            .iter()
            .filter(|e| e.device == "Light(Scheduled)")
            .count(),
        5
    );
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_run_tasks_until_shutdown() {
    let (home, _) = home().await;
    let mut scheduler = Scheduler::new();
    let periods = Periods {
        status_refresh: Duration::from_millis(20),
        auto_light_check: Duration::from_millis(10),
        fixed_schedule_check: Duration::from_millis(50),
    };
    spawn_all(&mut scheduler, &home, periods);
    assert_eq!(
        scheduler.task_names(),
        ["auto_light_check", "fixed_schedule_check", "status_refresh"]
    );

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(home.status().await.reading.is_some());
    // no manual toggles, so a lit light must come with an automatic entry
    let logged = home.recent_logs(500).await.unwrap();
    if home.device(DeviceId::Light).await.is_on() {
        assert!(logged.iter().any(|e| e.device.starts_with("Light(")));
    }

    scheduler.shutdown().await;
    assert!(scheduler.task_names().is_empty());
    home.shutdown().await;
}
