//! Unit tests for the status module.

use super::*;
use crate::client::ApiError;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Caller that counts requests and fails on selected call numbers (1-based).
struct ScriptedCaller {
    calls: AtomicUsize,
    endpoints: Mutex<Vec<String>>,
    fail_on: Vec<usize>,
}

impl ScriptedCaller {
    fn new(fail_on: Vec<usize>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            endpoints: Mutex::new(Vec::new()),
            fail_on,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ApiCaller for ScriptedCaller {
    async fn call(&self, endpoint: &str, _options: RequestOptions) -> Result<Value, ApiError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.endpoints.lock().unwrap().push(endpoint.to_string());
        if self.fail_on.contains(&n) {
            Err(ApiError::Transport("connection refused".to_string()))
        } else {
            Ok(json!({"success": true, "data": {"cycle": n}}))
        }
    }
}

/// Caller whose requests take longer than the poll interval.
struct SlowCaller {
    calls: AtomicUsize,
    delay: Duration,
}

impl SlowCaller {
    fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            delay,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ApiCaller for SlowCaller {
    async fn call(&self, _endpoint: &str, _options: RequestOptions) -> Result<Value, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(json!({"success": true}))
    }
}

fn poller(caller: Arc<ScriptedCaller>) -> StatusPoller {
    StatusPoller::new(caller, StatusConfig::default())
}

// ============================================================================
// StatusConfig
// ============================================================================

#[test]
fn test_config_default_values() {
    let config = StatusConfig::default();
    assert!(config.enabled);
    assert_eq!(config.endpoint, "/api/environment");
    assert_eq!(config.interval_ms, 30_000);
    assert_eq!(config.interval(), Duration::from_secs(30));
}

#[test]
fn test_config_partial_toml() {
    let config: StatusConfig = toml::from_str("enabled = false").unwrap();
    assert!(!config.enabled);
    assert_eq!(config.interval_ms, 30_000);
}

// ============================================================================
// StatusPayload
// ============================================================================

#[test]
fn test_payload_keeps_extra_fields() {
    let payload =
        StatusPayload::from_value(json!({"success": true, "data": {"git": true}, "n": 1})).unwrap();
    assert!(payload.success);
    assert_eq!(payload.data(), Some(&json!({"git": true})));
    assert_eq!(payload.extra.get("n"), Some(&json!(1)));
    assert!(!payload.extra.contains_key("success"));
}

#[test]
fn test_payload_success_false_is_still_a_payload() {
    let payload = StatusPayload::from_value(json!({"success": false})).unwrap();
    assert!(!payload.success);
}

#[test]
fn test_payload_missing_success() {
    assert_eq!(
        StatusPayload::from_value(json!({"data": {}})),
        Err(PollError::MissingSuccess)
    );
    assert_eq!(
        StatusPayload::from_value(json!({"success": "yes"})),
        Err(PollError::MissingSuccess)
    );
    assert_eq!(
        StatusPayload::from_value(json!([1, 2])),
        Err(PollError::MissingSuccess)
    );
}

#[test]
fn test_payload_recommendations_lenient() {
    let payload = StatusPayload::from_value(json!({
        "success": true,
        "recommendations": [
            {"priority": "HIGH", "message": "Install GitHub CLI", "action": "brew install gh"},
            {"priority": "LOW", "message": "No action"},
            "garbage"
        ]
    }))
    .unwrap();

    let recs = payload.recommendations();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].priority, "HIGH");
    assert_eq!(recs[0].action, "brew install gh");
    assert_eq!(recs[1].action, "");
}

#[test]
fn test_payload_without_recommendations() {
    let payload = StatusPayload::from_value(json!({"success": true})).unwrap();
    assert!(payload.recommendations().is_empty());
}

// ============================================================================
// PollError
// ============================================================================

#[test]
fn test_poll_error_wraps_api_error_transparently() {
    let err = PollError::from(ApiError::HttpStatus(500));
    assert_eq!(err.to_string(), "HTTP error! status: 500");
}

// ============================================================================
// Single cycles
// ============================================================================

#[tokio::test]
async fn test_poll_once_records_stats_and_last_status() {
    let caller = ScriptedCaller::new(vec![2]);
    let poller = poller(caller.clone());

    let first = poller.poll_once().await;
    assert!(first.is_ok());
    let second = poller.poll_once().await;
    assert!(matches!(second, Err(PollError::Api(ApiError::Transport(_)))));

    let stats = poller.stats();
    assert_eq!(stats.cycles, 2);
    assert_eq!(stats.failures, 1);
    assert!(stats.last_poll_time.is_some());

    // Failed cycle keeps the previous payload
    let last = poller.last_status().unwrap();
    assert_eq!(last.data(), Some(&json!({"cycle": 1})));
    assert_eq!(
        caller.endpoints.lock().unwrap().as_slice(),
        ["/api/environment", "/api/environment"]
    );
}

// ============================================================================
// Polling loop
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_start_off_root_issues_nothing() {
    let caller = ScriptedCaller::new(vec![]);
    let poller = poller(caller.clone());

    assert!(!poller.start("/other"));
    assert!(!poller.is_running());
    assert!(poller.take_handle().is_none());

    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(caller.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_start_disabled_issues_nothing() {
    let caller = ScriptedCaller::new(vec![]);
    let poller = StatusPoller::new(
        caller.clone(),
        StatusConfig {
            enabled: false,
            ..StatusConfig::default()
        },
    );

    assert!(!poller.start(ROOT_PATH));
    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(caller.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_start_on_root_polls_immediately_then_every_interval() {
    let caller = ScriptedCaller::new(vec![]);
    let poller = poller(caller.clone());

    assert!(poller.start("/"));
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(caller.calls(), 1);

    tokio::time::sleep(Duration::from_millis(29_000)).await;
    assert_eq!(caller.calls(), 1);

    tokio::time::sleep(Duration::from_millis(1_000)).await;
    assert_eq!(caller.calls(), 2);

    tokio::time::sleep(Duration::from_millis(60_000)).await;
    assert_eq!(caller.calls(), 4);
    assert!(poller.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_failed_cycle_does_not_stop_loop() {
    let caller = ScriptedCaller::new(vec![1, 2]);
    let poller = poller(caller.clone());

    assert!(poller.start("/"));
    tokio::time::sleep(Duration::from_millis(90_001)).await;

    assert_eq!(caller.calls(), 4);
    let stats = poller.stats();
    assert_eq!(stats.cycles, 4);
    assert_eq!(stats.failures, 2);
    assert!(poller.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_slow_cycle_keeps_schedule() {
    let caller = SlowCaller::new(Duration::from_secs(45));
    let poller = StatusPoller::new(caller.clone(), StatusConfig::default());

    assert!(poller.start("/"));
    tokio::time::sleep(Duration::from_millis(1)).await;

    let mut seen = vec![caller.calls()];
    for _ in 0..4 {
        tokio::time::sleep(Duration::from_secs(30)).await;
        seen.push(caller.calls());
    }
    assert_eq!(seen, [1, 2, 3, 4, 5]);

    // Calls started at 0s, 30s and 60s have finished by 120s
    assert_eq!(poller.stats().cycles, 3);
}

#[tokio::test(start_paused = true)]
async fn test_stop_abandons_in_flight_cycle() {
    let caller = SlowCaller::new(Duration::from_secs(45));
    let poller = StatusPoller::new(caller.clone(), StatusConfig::default());

    assert!(poller.start("/"));
    tokio::time::sleep(Duration::from_millis(1)).await;
    poller.stop();

    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(caller.calls(), 1);
    assert_eq!(poller.stats().cycles, 0);
    assert!(poller.last_status().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_receive_each_cycle() {
    let caller = ScriptedCaller::new(vec![2]);
    let poller = poller(caller.clone());
    let mut updates = poller.subscribe();

    assert!(poller.start("/"));
    tokio::time::sleep(Duration::from_millis(30_001)).await;

    let first = updates.try_recv().unwrap();
    assert_eq!(first.unwrap().data(), Some(&json!({"cycle": 1})));
    let second = updates.try_recv().unwrap();
    assert!(matches!(second, Err(PollError::Api(ApiError::Transport(_)))));
    assert!(updates.try_recv().is_err());
}

#[tokio::test]
async fn test_single_cycles_are_not_broadcast() {
    let caller = ScriptedCaller::new(vec![]);
    let poller = poller(caller.clone());
    let mut updates = poller.subscribe();

    poller.refresh().await.unwrap();
    assert!(updates.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_start_is_idempotent() {
    let caller = ScriptedCaller::new(vec![]);
    let poller = poller(caller.clone());

    assert!(poller.start("/"));
    assert!(!poller.start("/"));
    tokio::time::sleep(Duration::from_millis(30_001)).await;

    // A second loop would have doubled these
    assert_eq!(caller.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_stop_cancels_loop() {
    let caller = ScriptedCaller::new(vec![]);
    let poller = poller(caller.clone());

    assert!(poller.start("/"));
    tokio::time::sleep(Duration::from_millis(1)).await;
    poller.stop();

    let handle = poller.take_handle().unwrap();
    handle.await.unwrap();

    tokio::time::sleep(Duration::from_millis(120_000)).await;
    assert_eq!(caller.calls(), 1);
    assert!(!poller.is_running());
    assert!(!poller.start("/"));
}

#[tokio::test(start_paused = true)]
async fn test_drop_cancels_loop() {
    let caller = ScriptedCaller::new(vec![]);
    let poller = poller(caller.clone());

    assert!(poller.start("/"));
    tokio::time::sleep(Duration::from_millis(1)).await;
    drop(poller);

    tokio::time::sleep(Duration::from_millis(120_000)).await;
    assert_eq!(caller.calls(), 1);
}
