//! The feeder posting into a live hub.

use sensor_hub::config::FeederConfig;
use sensor_hub::domain::SensorReading;
use sensor_hub::feeder::{Feeder, PostOutcome};

mod common;

fn no_wait(hub_url: String) -> FeederConfig {
    FeederConfig { hub_url, min_interval_seconds: 0, max_interval_seconds: 0 }
}

#[tokio::test]
async fn test_feeder_posts_to_configured_hub() {
    let hub = common::start_hub().await;
    let feeder = Feeder::with_client(common::client(), &no_wait(hub.url("/api/sensor")));

    feeder.run(Some(3)).await.unwrap();

    let stored: Vec<SensorReading> = common::client()
        .get(hub.url("/api/sensor"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stored.len(), 3);
    assert!(stored.iter().all(|r| r.timestamp.is_some()));
}

#[tokio::test]
async fn test_feeder_reports_rejection() {
    let hub = common::start_hub().await;
    // /api/temp only answers GET
    let feeder = Feeder::with_client(common::client(), &no_wait(hub.url("/api/temp")));

    let reading = SensorReading { timestamp: None, temp: 21.0, dust: 60, humidity: 70 };
    match feeder.post(&reading).await.unwrap() {
        PostOutcome::Rejected { status, .. } => assert_eq!(status, 405),
        PostOutcome::Accepted => panic!("POST /api/temp should not be accepted"),
    }
}

#[tokio::test]
async fn test_feeder_survives_unreachable_hub() {
    // nothing listens on port 9 on loopback in test environments
    let feeder =
        Feeder::with_client(common::client(), &no_wait("http://127.0.0.1:9/api/sensor".to_string()));
    let reading = SensorReading { timestamp: None, temp: 21.0, dust: 60, humidity: 70 };
    assert!(feeder.post(&reading).await.is_err());

    feeder.run(Some(2)).await.unwrap();
}
