use crate::infra::AppState;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use rugby_hub::access::{can_act_as, permissions_for, rank, Role};
use rugby_hub::error::AppError;
use rugby_hub::wellness::{
    classify, compute_readiness, wellness_router, ReadinessInputs, ReadinessStatus,
    WellnessRepository, WellnessService,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub(crate) struct ReadinessScoreResponse {
    pub(crate) readiness_score: f64,
    pub(crate) readiness_status: ReadinessStatus,
    pub(crate) defaulted_fields: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RolePermissionsView {
    pub(crate) role: Role,
    pub(crate) display_name: &'static str,
    pub(crate) rank: u8,
    pub(crate) permissions: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CanActAsView {
    pub(crate) acting: Role,
    pub(crate) target: Role,
    pub(crate) allowed: bool,
}

pub(crate) fn with_wellness_routes<R>(service: Arc<WellnessService<R>>) -> axum::Router
where
    R: WellnessRepository + 'static,
{
    wellness_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/readiness/score",
            axum::routing::post(readiness_score_endpoint),
        )
        .route(
            "/api/v1/roles/:role/permissions",
            axum::routing::get(role_permissions_endpoint),
        )
        .route(
            "/api/v1/roles/:acting/can-act-as/:target",
            axum::routing::get(can_act_as_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Stateless scoring for dashboards that only need the number.
pub(crate) async fn readiness_score_endpoint(
    Json(inputs): Json<ReadinessInputs>,
) -> Json<ReadinessScoreResponse> {
    let readiness_score = compute_readiness(&inputs);
    Json(ReadinessScoreResponse {
        readiness_score,
        readiness_status: classify(readiness_score),
        defaulted_fields: inputs.defaulted_fields(),
    })
}

pub(crate) async fn role_permissions_endpoint(
    Path(role): Path<String>,
) -> Result<Json<RolePermissionsView>, AppError> {
    let role: Role = role.parse()?;
    Ok(Json(RolePermissionsView {
        role,
        display_name: role.display_name(),
        rank: rank(role),
        permissions: permissions_for(role)
            .iter()
            .map(|permission| permission.label())
            .collect(),
    }))
}

pub(crate) async fn can_act_as_endpoint(
    Path((acting, target)): Path<(String, String)>,
) -> Result<Json<CanActAsView>, AppError> {
    let acting: Role = acting.parse()?;
    let target: Role = target.parse()?;
    Ok(Json(CanActAsView {
        acting,
        target,
        allowed: can_act_as(acting, target),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryWellnessRepository;
    use axum::body::Body;
    use axum::http::Request;
    use rugby_hub::wellness::{TrendConfig, ROLE_HEADER};
    use tower::ServiceExt;

    fn app() -> axum::Router {
        let service = Arc::new(WellnessService::new(
            Arc::new(InMemoryWellnessRepository::default()),
            TrendConfig::default(),
        ));
        with_wellness_routes(service)
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn readiness_score_endpoint_defaults_missing_answers() {
        let Json(body) = readiness_score_endpoint(Json(ReadinessInputs {
            sleep_quality: Some(5),
            mood: Some(5),
            ..ReadinessInputs::default()
        }))
        .await;

        // 5 + 3 + 3 + 3 + 5 = 19 -> 3.8
        assert_eq!(body.readiness_score, 3.8);
        assert_eq!(body.readiness_status, ReadinessStatus::Amber);
        assert_eq!(
            body.defaulted_fields,
            vec!["fatigue_level", "muscle_soreness", "stress_level"]
        );
    }

    #[tokio::test]
    async fn readiness_score_route_accepts_json() {
        let response = app()
            .oneshot(
                Request::post("/api/v1/readiness/score")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"sleep_quality":5,"fatigue_level":1,"muscle_soreness":1,"stress_level":1,"mood":5}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["readiness_score"], 5.0);
        assert_eq!(body["readiness_status"], "green");
    }

    #[tokio::test]
    async fn role_permissions_route_lists_labels() {
        let response = app()
            .oneshot(
                Request::get("/api/v1/roles/player/permissions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["rank"], 10);
        assert_eq!(body["permissions"], json!(["view_own_data", "submit_wellness"]));
    }

    #[tokio::test]
    async fn unknown_roles_fail_closed() {
        let response = app()
            .oneshot(
                Request::get("/api/v1/roles/mascot/permissions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn can_act_as_compares_rank() {
        let Json(view) = can_act_as_endpoint(Path((
            "head_coach".to_string(),
            "analyst".to_string(),
        )))
        .await
        .expect("known roles");
        assert!(view.allowed);

        let Json(view) = can_act_as_endpoint(Path((
            "physiotherapist".to_string(),
            "strength_conditioning".to_string(),
        )))
        .await
        .expect("known roles");
        assert!(view.allowed);

        let Json(view) = can_act_as_endpoint(Path(("player".to_string(), "admin".to_string())))
            .await
            .expect("known roles");
        assert!(!view.allowed);
    }

    #[tokio::test]
    async fn wellness_routes_are_mounted() {
        let response = app()
            .oneshot(
                Request::get("/api/v1/wellness/summary?date=2025-06-01")
                    .header(ROLE_HEADER, "head_coach")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["submitted"], 0);
    }
}
