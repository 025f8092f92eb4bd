//! HTTP route handlers.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::batch::batch_orders;
use crate::domain::InvalidPreference;
use crate::network::{ClosureSet, build_network};
use crate::planner::{RankError, RankRequest, rank};

use super::dto::*;
use super::state::AppState;

/// Most alternatives a single request may ask for.
pub const MAX_ALTERNATIVES: usize = 20;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/optimize_route", post(optimize_route))
        .route("/recalculate", post(recalculate))
        .route("/batch_orders", post(batch_orders_handler))
        .route("/analytics", get(analytics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Rank routes for a shipment on the full network.
async fn optimize_route(
    State(state): State<AppState>,
    payload: Result<Json<OptimizeRequest>, JsonRejection>,
) -> Result<Json<OptimizeResponse>, AppError> {
    let Json(req) = payload?;
    let response = rank_shipment(
        &state,
        &req.shipment,
        &req.preferences,
        req.k_alternatives,
        &ClosureSet::new(),
    )?;
    Ok(Json(response))
}

/// Rank routes for a shipment with hubs or links closed.
async fn recalculate(
    State(state): State<AppState>,
    payload: Result<Json<RecalculateRequest>, JsonRejection>,
) -> Result<Json<OptimizeResponse>, AppError> {
    let Json(req) = payload?;
    let closures = req.closures();
    info!(
        route_id = req.route_id.as_deref().unwrap_or("-"),
        closed_nodes = req.closed_nodes.len(),
        closed_edges = req.closed_edges.len(),
        "Recalculating"
    );
    let response = rank_shipment(
        &state,
        &req.shipment,
        &req.preferences,
        req.k_alternatives,
        &closures,
    )?;
    Ok(Json(response))
}

/// Group orders by lane and time window.
async fn batch_orders_handler(
    payload: Result<Json<BatchOrdersRequest>, JsonRejection>,
) -> Result<Json<BatchOrdersResponse>, AppError> {
    let Json(req) = payload?;
    let batches = batch_orders(req.orders, req.window_minutes);
    Ok(Json(BatchOrdersResponse {
        num_batches: batches.len(),
        batches,
    }))
}

/// Counters since startup.
async fn analytics(State(state): State<AppState>) -> Json<AnalyticsResponse> {
    let snapshot = state.stats.snapshot();
    Json(AnalyticsResponse {
        status: "ok",
        requests_served: snapshot.requests_served,
        routes_served: snapshot.routes_served,
        avg_latency_ms: snapshot.avg_latency_ms,
    })
}

/// Build the network with `closures` applied and rank routes on it.
fn rank_shipment(
    state: &AppState,
    shipment: &Shipment,
    preferences: &Preferences,
    k: Option<usize>,
    closures: &ClosureSet,
) -> Result<OptimizeResponse, AppError> {
    let started = Instant::now();

    let (preference, constraints) = preferences.resolve()?;
    let mut request = RankRequest::new(
        shipment.origin_id.clone(),
        shipment.destination_id.clone(),
        preference,
    )
    .with_constraints(constraints);
    if let Some(k) = k {
        if k > MAX_ALTERNATIVES {
            return Err(AppError::BadRequest {
                message: format!("k_alternatives must be at most {MAX_ALTERNATIVES}, got {k}"),
            });
        }
        request = request.with_k(k);
    }

    let network = build_network(state.network.as_ref(), closures);
    let candidates = rank(&network, &request, &state.config)?;

    let elapsed = started.elapsed();
    state.stats.record(candidates.len(), elapsed);
    info!(
        origin = %shipment.origin_id,
        destination = %shipment.destination_id,
        cargo_class = ?shipment.cargo_class,
        routes = candidates.len(),
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "Ranked shipment"
    );

    Ok(OptimizeResponse::from_candidates(
        &candidates,
        closures,
        state.config.reliability_floor,
    ))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<RankError> for AppError {
    fn from(e: RankError) -> Self {
        match e {
            RankError::UnknownNode(_) => AppError::NotFound {
                message: e.to_string(),
            },
            RankError::InvalidPreference(_) | RankError::InvalidRequest(_) => {
                AppError::BadRequest {
                    message: e.to_string(),
                }
            }
            RankError::InvalidRoute(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<InvalidPreference> for AppError {
    fn from(e: InvalidPreference) -> Self {
        RankError::from(e).into()
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::{Request, header};

    use crate::domain::{CargoClass, NodeId, TransportMode};
    use crate::network::SyntheticNetwork;
    use crate::planner::RankConfig;

    fn state() -> AppState {
        AppState::new(SyntheticNetwork, RankConfig::default())
    }

    fn shipment(origin: &str, destination: &str) -> Shipment {
        Shipment {
            origin_id: NodeId::parse(origin).unwrap(),
            destination_id: NodeId::parse(destination).unwrap(),
            weight_kg: 100.0,
            volume_m3: 1.0,
            cargo_class: CargoClass::Standard,
            required_delivery: None,
        }
    }

    fn optimize(origin: &str, destination: &str, optimize_for: &str) -> OptimizeRequest {
        OptimizeRequest {
            shipment: shipment(origin, destination),
            preferences: Preferences {
                optimize_for: Some(optimize_for.to_string()),
                ..Preferences::default()
            },
            k_alternatives: None,
        }
    }

    fn recalc(closed_nodes: &[&str], closed_edges: &[(&str, &str)]) -> RecalculateRequest {
        RecalculateRequest {
            route_id: None,
            shipment: shipment("NODE_000", "NODE_010"),
            preferences: Preferences {
                optimize_for: Some("time".into()),
                ..Preferences::default()
            },
            k_alternatives: None,
            closed_nodes: closed_nodes
                .iter()
                .map(|n| NodeId::parse(n).unwrap())
                .collect(),
            closed_edges: closed_edges
                .iter()
                .map(|(x, y)| [NodeId::parse(x).unwrap(), NodeId::parse(y).unwrap()])
                .collect(),
        }
    }

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    async fn json_rejection(body: &str) -> JsonRejection {
        let request = Request::builder()
            .method("POST")
            .uri("/optimize_route")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        Json::<OptimizeRequest>::from_request(request, &())
            .await
            .unwrap_err()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let Json(body) = health().await;
        assert_eq!(body.status, "ok");
    }

    #[tokio::test]
    async fn optimize_prefers_air_for_time() {
        let state = state();
        let Json(response) = optimize_route(
            State(state.clone()),
            Ok(Json(optimize("NODE_000", "NODE_010", "time"))),
        )
        .await
        .unwrap();

        assert_eq!(response.recommendations.len(), 2);
        let best = &response.recommendations[0];
        assert_eq!(best.transport_modes, vec![TransportMode::Air]);
        assert_eq!(best.total_cost, 4000.0);
        assert_eq!(best.total_duration_hours, 1.3);
        assert_eq!(best.reliability_score, 0.96);

        let road = &response.recommendations[1];
        assert_eq!(road.total_cost, 2225.0);
        assert_eq!(road.total_duration_hours, 12.25);
        assert_eq!(road.reliability_score, 0.78);

        assert_eq!(response.analytics.alternative_routes, 2);
        assert_eq!(response.analytics.cost_breakdown["air"], 4000.0);
        assert!(response.analytics.risk_factors.is_empty());
    }

    #[tokio::test]
    async fn optimize_respects_budget_and_k() {
        let mut req = optimize("NODE_000", "NODE_010", "time");
        req.preferences.max_budget = Some(3000.0);
        let Json(response) = optimize_route(State(state()), Ok(Json(req))).await.unwrap();
        assert_eq!(response.recommendations.len(), 1);
        assert_eq!(
            response.recommendations[0].transport_modes,
            vec![TransportMode::Road]
        );

        let mut req = optimize("NODE_000", "NODE_010", "cost");
        req.k_alternatives = Some(1);
        let Json(response) = optimize_route(State(state()), Ok(Json(req))).await.unwrap();
        assert_eq!(response.recommendations.len(), 1);
    }

    #[tokio::test]
    async fn optimize_unknown_node_is_not_found() {
        let err = optimize_route(
            State(state()),
            Ok(Json(optimize("NODE_000", "NODE_999", "balanced"))),
        )
        .await
        .unwrap_err();
        assert_eq!(status_of(err), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn optimize_bad_preference_is_bad_request() {
        let err = optimize_route(
            State(state()),
            Ok(Json(optimize("NODE_000", "NODE_010", "fastest"))),
        )
        .await
        .unwrap_err();
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn optimize_same_endpoints_is_bad_request() {
        let err = optimize_route(
            State(state()),
            Ok(Json(optimize("NODE_003", "NODE_003", "time"))),
        )
        .await
        .unwrap_err();
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn optimize_too_many_alternatives() {
        let mut req = optimize("NODE_000", "NODE_010", "time");
        req.k_alternatives = Some(MAX_ALTERNATIVES + 1);
        let err = optimize_route(State(state()), Ok(Json(req))).await.unwrap_err();
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let rejection = json_rejection("{\"shipment\": ").await;
        assert_eq!(status_of(rejection.into()), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_cargo_class_is_bad_request() {
        let body = r#"{"shipment": {"origin_id": "NODE_000", "destination_id": "NODE_010",
            "weight_kg": 1.0, "volume_m3": 1.0, "cargo_class": "livestock"}}"#;
        let rejection = json_rejection(body).await;
        assert_eq!(status_of(rejection.into()), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn recalculate_routes_around_closure() {
        let Json(response) = recalculate(State(state()), Ok(Json(recalc(&["NODE_005"], &[]))))
            .await
            .unwrap();

        assert_eq!(response.recommendations.len(), 1);
        let only = &response.recommendations[0];
        assert_eq!(only.transport_modes, vec![TransportMode::Air]);
        assert!(only.segments.iter().all(|s| s.from != "NODE_005" && s.to != "NODE_005"));
        assert_eq!(
            response.analytics.risk_factors,
            vec!["node closed: NODE_005".to_string()]
        );
    }

    #[tokio::test]
    async fn recalculate_unreachable_is_empty() {
        let Json(response) = recalculate(
            State(state()),
            Ok(Json(recalc(&["NODE_005"], &[("NODE_010", "NODE_000")]))),
        )
        .await
        .unwrap();

        assert!(response.recommendations.is_empty());
        assert_eq!(response.analytics.alternative_routes, 0);
        assert_eq!(response.analytics.risk_factors.len(), 2);
    }

    #[tokio::test]
    async fn recalculate_closed_endpoint_is_not_found() {
        let err = recalculate(State(state()), Ok(Json(recalc(&["NODE_010"], &[]))))
            .await
            .unwrap_err();
        assert_eq!(status_of(err), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn batch_orders_groups() {
        let req: BatchOrdersRequest = serde_json::from_value(serde_json::json!({
            "orders": [
                {"origin_id": "NODE_000", "destination_id": "NODE_010", "ts": "2024-03-01T08:10:00"},
                {"origin_id": "NODE_000", "destination_id": "NODE_010", "ts": "2024-03-01T09:50:00"},
                {"origin_id": "NODE_000", "destination_id": "NODE_011"}
            ]
        }))
        .unwrap();

        let Json(response) = batch_orders_handler(Ok(Json(req))).await.unwrap();
        assert_eq!(response.num_batches, 2);
        assert_eq!(response.batches[0].len(), 2);
        assert_eq!(response.batches[1].len(), 1);
    }

    #[tokio::test]
    async fn batch_orders_echoes_orders() {
        let sent = serde_json::json!({
            "origin_id": "NODE_000",
            "destination_id": "NODE_010",
            "weight_kg": 1500.0,
            "volume_m3": 10.0,
            "cargo_class": "standard",
            "required_delivery": "2024-03-02T18:00:00",
            "ts": "2024-03-01T08:00:00+00:00"
        });
        let req: BatchOrdersRequest =
            serde_json::from_value(serde_json::json!({ "orders": [sent.clone()] })).unwrap();

        let Json(response) = batch_orders_handler(Ok(Json(req))).await.unwrap();
        let body = serde_json::to_value(&response).unwrap();

        assert_eq!(body["num_batches"], 1);
        assert_eq!(body["batches"][0][0], sent);
    }

    #[tokio::test]
    async fn analytics_counts_requests() {
        let state = state();
        let Json(before) = analytics(State(state.clone())).await;
        assert_eq!(before.requests_served, 0);

        for _ in 0..2 {
            optimize_route(
                State(state.clone()),
                Ok(Json(optimize("NODE_000", "NODE_010", "time"))),
            )
            .await
            .unwrap();
        }

        let Json(after) = analytics(State(state)).await;
        assert_eq!(after.status, "ok");
        assert_eq!(after.requests_served, 2);
        assert_eq!(after.routes_served, 4);
        assert!(after.avg_latency_ms >= 0.0);
    }
}
