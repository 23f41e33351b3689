//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use super::AppState;
use super::types::{DispatchQuery, ErrorResponse};
use crate::io::snapshot::AdvisorySnapshot;
use crate::sim::audit::FinancialAudit;
use crate::sim::types::DispatchRecord;

/// `GET /audit` → 200 + `FinancialAudit` JSON
pub async fn get_audit(State(state): State<Arc<AppState>>) -> Json<FinancialAudit> {
    Json(state.result.audit.clone())
}

/// Returns dispatch records, optionally filtered by hour range.
///
/// `GET /dispatch` → 200 + `Vec<DispatchRecord>` JSON
/// `GET /dispatch?from=N&to=M` → filtered range (inclusive)
/// `GET /dispatch?from=10&to=5` → 400 + `ErrorResponse`
pub async fn get_dispatch(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DispatchQuery>,
) -> Result<Json<Vec<DispatchRecord>>, (StatusCode, Json<ErrorResponse>)> {
    let (from, to) = query
        .bounds()
        .map_err(|error| (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })))?;

    let records: Vec<DispatchRecord> = state
        .result
        .records
        .iter()
        .filter(|r| (from..=to).contains(&r.hour))
        .cloned()
        .collect();

    Ok(Json(records))
}

/// `GET /snapshot` → 200 + `AdvisorySnapshot` JSON
pub async fn get_snapshot(State(state): State<Arc<AppState>>) -> Json<AdvisorySnapshot> {
    Json(state.snapshot.clone())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::config::SimulationConfig;
    use crate::runner::run_simulation;
    use crate::sim::profile::HourOverrides;

    fn make_test_state() -> Arc<AppState> {
        let config = SimulationConfig::default();
        let result = run_simulation(&config, &HourOverrides::new(), &HourOverrides::new());
        let snapshot = AdvisorySnapshot::new(&config, &result);
        Arc::new(AppState { result, snapshot })
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = router(make_test_state());
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn audit_returns_200() {
        let (status, json) = get_json("/audit").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json.get("total_bill_grid_only").is_some());
        assert!(json.get("arbitrage_savings").is_some());
    }

    #[tokio::test]
    async fn dispatch_returns_all_hours() {
        let (status, json) = get_json("/dispatch").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().map(Vec::len), Some(24));
    }

    #[tokio::test]
    async fn dispatch_range_query() {
        let (status, json) = get_json("/dispatch?from=5&to=10").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().map(Vec::len), Some(6));
        assert_eq!(json[0]["hour"], 5);
        assert_eq!(json[5]["hour"], 10);
    }

    #[tokio::test]
    async fn dispatch_invalid_range_returns_400() {
        let (status, json) = get_json("/dispatch?from=10&to=5").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn snapshot_returns_telemetry() {
        let (status, json) = get_json("/snapshot").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["telemetry"].as_array().map(Vec::len), Some(24));
        assert_eq!(json["meta"]["strategy"], "Economic Arbitrage");
    }
}
