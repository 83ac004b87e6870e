use axum::{
    Router,
    extract::{
        Json, Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::core::format::format_percent;
use crate::core::metrics::tax_burden_ratio;
use crate::core::{Blueprint, Page, ProgressView, render_page};

type SharedBlueprint = Arc<Blueprint>;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CompletedQuery {
    completed: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CompletedPayload {
    completed: Vec<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProgressQuery {
    current: Option<f64>,
    target: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TaxBurdenQuery {
    tax_paid: Option<f64>,
    gross_income: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NavigationEntry {
    slug: &'static str,
    title: &'static str,
    description: &'static str,
    href: &'static str,
}

#[derive(Debug, Serialize)]
struct NavigationResponse {
    pages: Vec<NavigationEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TaxBurdenResponse {
    tax_paid: f64,
    gross_income: f64,
    ratio: f64,
    label: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(blueprint: SharedBlueprint) -> Router {
    Router::new()
        .route("/", get(navigation_handler))
        .route("/api/pages", get(navigation_handler))
        .route(
            "/api/pages/:slug",
            get(page_get_handler).post(page_post_handler),
        )
        .route("/api/metrics/progress", get(progress_handler))
        .route("/api/metrics/tax-burden", get(tax_burden_handler))
        .fallback(not_found_handler)
        .with_state(blueprint)
}

pub async fn run_http_server(port: u16, blueprint: Blueprint) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router(Arc::new(blueprint));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "blueprint HTTP API listening");
    tracing::info!("local access: http://127.0.0.1:{port}/api/pages");

    axum::serve(listener, app).await
}

fn navigation() -> NavigationResponse {
    NavigationResponse {
        pages: Page::ALL
            .into_iter()
            .map(|page| NavigationEntry {
                slug: page.slug(),
                title: page.title(),
                description: page.description(),
                href: page.href(),
            })
            .collect(),
    }
}

async fn navigation_handler() -> Response {
    json_response(StatusCode::OK, navigation())
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

fn parse_page(slug: &str) -> Result<Page, Response> {
    slug.parse::<Page>().map_err(|e| {
        tracing::debug!(%slug, "unknown page requested");
        error_response(StatusCode::NOT_FOUND, &e.to_string())
    })
}

fn rejection_response(rejection: impl std::fmt::Display) -> Response {
    error_response(StatusCode::BAD_REQUEST, &rejection.to_string())
}

/// `completed` is only meaningful for the action plan; other pages ignore it.
async fn page_get_handler(
    State(blueprint): State<SharedBlueprint>,
    Path(slug): Path<String>,
    query: Result<Query<CompletedQuery>, QueryRejection>,
) -> Response {
    let page = match parse_page(&slug) {
        Ok(page) => page,
        Err(response) => return response,
    };
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return rejection_response(rejection),
    };
    let completed = match query.completed.as_deref().map(parse_completed) {
        None => BTreeSet::new(),
        Some(Ok(ids)) => ids,
        Some(Err(msg)) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };
    page_response(&blueprint, page, &completed)
}

async fn page_post_handler(
    State(blueprint): State<SharedBlueprint>,
    Path(slug): Path<String>,
    payload: Result<Json<CompletedPayload>, JsonRejection>,
) -> Response {
    let page = match parse_page(&slug) {
        Ok(page) => page,
        Err(response) => return response,
    };
    if page != Page::ActionPlan {
        return error_response(
            StatusCode::METHOD_NOT_ALLOWED,
            "Only the action plan accepts completed items",
        );
    }
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    let completed: BTreeSet<u32> = payload.completed.into_iter().collect();
    page_response(&blueprint, page, &completed)
}

async fn progress_handler(query: Result<Query<ProgressQuery>, QueryRejection>) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return rejection_response(rejection),
    };
    match progress_from_query(query) {
        Ok(view) => json_response(StatusCode::OK, view),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

async fn tax_burden_handler(query: Result<Query<TaxBurdenQuery>, QueryRejection>) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return rejection_response(rejection),
    };
    match tax_burden_from_query(query) {
        Ok(body) => json_response(StatusCode::OK, body),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

fn page_response(blueprint: &Blueprint, page: Page, completed: &BTreeSet<u32>) -> Response {
    tracing::debug!(%page, completed = completed.len(), "rendering page");
    json_response(StatusCode::OK, render_page(blueprint, page, completed))
}

fn parse_completed(raw: &str) -> Result<BTreeSet<u32>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u32>().map_err(|_| {
                format!("completed must be a comma-separated list of action ids, got '{part}'")
            })
        })
        .collect()
}

fn progress_from_query(query: ProgressQuery) -> Result<ProgressView, String> {
    let Some(current) = query.current else {
        return Err("current is required".to_string());
    };
    let Some(target) = query.target else {
        return Err("target is required".to_string());
    };
    if !current.is_finite() || current < 0.0 {
        return Err("current must be >= 0".to_string());
    }
    if !target.is_finite() || target <= 0.0 {
        return Err("target must be > 0".to_string());
    }
    Ok(ProgressView::new("Progress", current, target))
}

fn tax_burden_from_query(query: TaxBurdenQuery) -> Result<TaxBurdenResponse, String> {
    let Some(tax_paid) = query.tax_paid else {
        return Err("taxPaid is required".to_string());
    };
    let Some(gross_income) = query.gross_income else {
        return Err("grossIncome is required".to_string());
    };
    if !tax_paid.is_finite() || tax_paid < 0.0 {
        return Err("taxPaid must be >= 0".to_string());
    }
    if !gross_income.is_finite() || gross_income <= 0.0 {
        return Err("grossIncome must be > 0".to_string());
    }
    let ratio = tax_burden_ratio(tax_paid, gross_income);
    Ok(TaxBurdenResponse {
        tax_paid,
        gross_income,
        ratio,
        label: format_percent(ratio, 1),
    })
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    if status.is_client_error() {
        tracing::debug!(%status, error = msg, "request rejected");
    }
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sample_blueprint;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn shared() -> SharedBlueprint {
        Arc::new(sample_blueprint())
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        serde_json::from_slice(&bytes).expect("body should be JSON")
    }

    #[test]
    fn parse_completed_accepts_comma_separated_ids() {
        let ids = parse_completed(" 1, 3,,8 ").expect("valid ids");
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![1, 3, 8]);
        assert!(parse_completed("").expect("empty is valid").is_empty());
    }

    #[test]
    fn parse_completed_rejects_garbage() {
        let err = parse_completed("1,two").expect_err("must reject non-numeric id");
        assert!(err.contains("'two'"));
    }

    #[test]
    fn progress_query_requires_positive_target() {
        let err = progress_from_query(ProgressQuery {
            current: Some(100.0),
            target: Some(0.0),
        })
        .expect_err("must reject zero target");
        assert!(err.contains("target"));

        let err = progress_from_query(ProgressQuery {
            current: None,
            target: Some(10.0),
        })
        .expect_err("must require current");
        assert!(err.contains("current"));
    }

    #[test]
    fn tax_burden_query_formats_one_decimal() {
        let body = tax_burden_from_query(TaxBurdenQuery {
            tax_paid: Some(15_732.0),
            gross_income: Some(65_000.0),
        })
        .expect("valid query");
        assert_eq!(body.label, "24.2%");
    }

    #[test]
    fn navigation_lists_every_page() {
        let nav = navigation();
        assert_eq!(nav.pages.len(), Page::ALL.len());
        assert_eq!(nav.pages[0].href, "/");
        assert_eq!(nav.pages[6].slug, "action-plan");
    }

    async fn get_page(slug: &str, completed: Option<&str>) -> Response {
        page_get_handler(
            State(shared()),
            Path(slug.to_string()),
            Ok(Query(CompletedQuery {
                completed: completed.map(str::to_string),
            })),
        )
        .await
    }

    #[tokio::test]
    async fn page_get_renders_known_page() {
        let response = get_page("protection", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(&b"no-store"[..])
        );
        let json = body_json(response).await;
        assert_eq!(json["page"], "protection");
        assert_eq!(json["view"]["statusCounts"]["notCovered"], 1);
        assert_eq!(json["view"]["emergencyFund"]["monthsCovered"], 4.5);
    }

    #[tokio::test]
    async fn page_get_rejects_unknown_page() {
        let response = get_page("settings", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Unknown page: settings");
    }

    #[tokio::test]
    async fn action_plan_get_applies_completed_query() {
        let response = get_page("action-plan", Some("2,4")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["view"]["completed"], 2);
        assert_eq!(json["view"]["completionPercentage"], 25);
    }

    #[tokio::test]
    async fn action_plan_get_rejects_bad_ids() {
        let response = get_page("action-plan", Some("x")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn action_plan_post_reads_json_body() {
        let payload: CompletedPayload =
            serde_json::from_str(r#"{"completed": [1, 2, 3, 4, 5, 6, 7, 8]}"#)
                .expect("payload parses");
        let response = page_post_handler(
            State(shared()),
            Path("action-plan".to_string()),
            Ok(Json(payload)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["view"]["remaining"], 0);
        assert_eq!(json["view"]["completionPercentage"], 100);
    }

    #[tokio::test]
    async fn post_to_other_pages_is_not_allowed() {
        let response = page_post_handler(
            State(shared()),
            Path("mindset".to_string()),
            Ok(Json(CompletedPayload::default())),
        )
        .await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn progress_handler_returns_metrics() {
        let response = progress_handler(Ok(Query(ProgressQuery {
            current: Some(12_400.0),
            target: Some(20_000.0),
        })))
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["percentage"], 62.0);
        assert_eq!(json["remaining"], 7_600.0);
        assert_eq!(json["remainingLabel"], "£7,600 remaining");
    }

    #[tokio::test]
    async fn progress_handler_rejects_zero_target() {
        let response = progress_handler(Ok(Query(ProgressQuery {
            current: Some(1.0),
            target: Some(0.0),
        })))
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "target must be > 0");
    }

    #[tokio::test]
    async fn fallback_is_json_not_found() {
        let response = not_found_handler().await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Not found");
    }

    async fn send(method: &str, uri: &str, body: Option<&str>) -> Response {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        router(shared())
            .oneshot(request.body(body).expect("request builds"))
            .await
            .expect("router is infallible")
    }

    #[tokio::test]
    async fn route_lists_pages() {
        for uri in ["/", "/api/pages"] {
            let response = send("GET", uri, None).await;
            assert_eq!(response.status(), StatusCode::OK);
            let json = body_json(response).await;
            assert_eq!(json["pages"].as_array().map(Vec::len), Some(7));
        }
    }

    #[tokio::test]
    async fn route_serves_page_by_slug() {
        let response = send("GET", "/api/pages/mindset", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["page"], "mindset");

        let response = send("GET", "/api/pages/nowhere", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Unknown page: nowhere");
    }

    #[tokio::test]
    async fn route_action_plan_get_and_post() {
        let response = send("GET", "/api/pages/action-plan?completed=1,3", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["view"]["completionPercentage"], 25);

        let response = send("POST", "/api/pages/action-plan", Some(r#"{"completed":[2]}"#)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["view"]["completed"], 1);
    }

    #[tokio::test]
    async fn route_post_checks_page_before_body() {
        let response = send("POST", "/api/pages/mindset", None).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Only the action plan accepts completed items");

        let response = send("POST", "/api/pages/nowhere", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn route_action_plan_post_rejects_bad_body_as_json() {
        let response = send("POST", "/api/pages/action-plan", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"].is_string());

        let response = send("POST", "/api/pages/action-plan", Some("{not json")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn route_metrics() {
        let response = send("GET", "/api/metrics/progress?current=12400&target=20000", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["percentageLabel"], "62% complete");

        let response = send(
            "GET",
            "/api/metrics/tax-burden?taxPaid=15732&grossIncome=65000",
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["label"], "24.2%");
    }

    #[tokio::test]
    async fn route_malformed_query_is_json_bad_request() {
        for uri in [
            "/api/metrics/progress?current=abc&target=10",
            "/api/metrics/tax-burden?taxPaid=x&grossIncome=1",
        ] {
            let response = send("GET", uri, None).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let json = body_json(response).await;
            assert!(json["error"].is_string(), "{uri} must answer a JSON error");
        }
    }

    #[tokio::test]
    async fn route_unknown_path_is_json_not_found() {
        let response = send("GET", "/api/unknown", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Not found");
    }
}
