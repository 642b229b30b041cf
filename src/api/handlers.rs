//! Request handlers.

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::AppState;
use crate::error::ConcordError;
use crate::export::{ExportOptions, to_tsv};
use crate::search::ConcordanceEntry;

fn default_context() -> usize {
    10
}

fn default_true() -> bool {
    true
}

/// Query string parameters of `GET /query`.
#[derive(Debug, Deserialize)]
pub struct QueryParams {
    /// The pattern string.
    pub query: String,
    /// Left context width in tokens.
    #[serde(default = "default_context")]
    pub left: usize,
    /// Right context width in tokens.
    #[serde(default = "default_context")]
    pub right: usize,
    /// 0 or 1 filters by author gender; any other value disables the
    /// filter.
    pub gender: Option<i64>,
}

/// Query string parameters of `GET /export`.
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    /// Handle of a published result set; the latest one when absent.
    pub id: Option<Uuid>,
    #[serde(default = "default_true")]
    pub kwtag: bool,
    #[serde(default = "default_true")]
    pub ctxtag: bool,
}

#[derive(Debug, Serialize)]
struct QueryResponse<'a> {
    id: Uuid,
    total: usize,
    matches: &'a [ConcordanceEntry],
}

fn gender_filter(gender: Option<i64>) -> Option<u8> {
    match gender {
        Some(0) => Some(0),
        Some(1) => Some(1),
        _ => None,
    }
}

/// Run a pattern query and publish its result set.
pub async fn query(
    state: web::Data<AppState>,
    params: web::Query<QueryParams>,
) -> Result<HttpResponse, ConcordError> {
    let params = params.into_inner();
    if params.query.trim().is_empty() {
        return Err(ConcordError::invalid_query("empty query"));
    }
    let gender = gender_filter(params.gender);
    let engine = Arc::clone(&state.engine);

    let results = web::block(move || {
        engine.concordance_query(&params.query, gender, params.left, params.right)
    })
    .await
    .map_err(|e| ConcordError::other(format!("query task failed: {e}")))??;

    let (id, results) = state.store.publish(results);

    Ok(HttpResponse::Ok().json(QueryResponse {
        id,
        total: results.len(),
        matches: &results.entries,
    }))
}

/// Render a published result set as TSV.
pub async fn export(
    state: web::Data<AppState>,
    params: web::Query<ExportParams>,
) -> Result<HttpResponse, ConcordError> {
    let results = match params.id {
        Some(id) => state.store.get(id),
        None => state.store.latest(),
    };
    let Some(results) = results else {
        return Ok(HttpResponse::NotFound()
            .json(serde_json::json!({ "error": "result set not found" })));
    };

    let options = ExportOptions {
        kwtag: params.kwtag,
        ctxtag: params.ctxtag,
    };

    Ok(HttpResponse::Ok()
        .content_type("text/tsv")
        .body(to_tsv(&results, options)))
}

/// Corpus and vocabulary counts.
pub async fn stats(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.engine.stats())
}

/// Liveness probe.
pub async fn healthz() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test};

    use super::*;
    use crate::api::ResultStore;
    use crate::corpus::{Corpus, Text, Token};
    use crate::search::ConcordanceEngine;

    fn sentence(pairs: &[(&str, &str)]) -> Vec<Token> {
        pairs.iter().map(|(w, t)| Token::new(*w, *t)).collect()
    }

    fn sample_state() -> web::Data<AppState> {
        let mut corpus = Corpus::new();
        corpus.add_text(Text::with_gender(
            vec![sentence(&[("他們", "Nh"), ("打", "VC"), ("球", "Na")])],
            0,
        ));
        corpus.add_text(Text::with_gender(
            vec![sentence(&[("我們", "Nh"), ("打", "VC"), ("架", "Na")])],
            1,
        ));

        web::Data::new(AppState {
            engine: Arc::new(ConcordanceEngine::new(corpus).unwrap()),
            store: ResultStore::new(4),
        })
    }

    macro_rules! test_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state.clone())
                    .route("/query", web::get().to(query))
                    .route("/export", web::get().to(export))
                    .route("/stats", web::get().to(stats))
                    .route("/healthz", web::get().to(healthz)),
            )
            .await
        };
    }

    #[derive(Debug, serde::Deserialize)]
    struct QueryBody {
        id: Uuid,
        total: usize,
        matches: Vec<serde_json::Value>,
    }

    // 打 is %E6%89%93 in percent-encoded UTF-8
    const QUERY_DA: &str = "/query?query=%E6%89%93";

    #[actix_web::test]
    async fn test_query_returns_matches_and_handle() {
        let state = sample_state();
        let app = test_app!(state);

        let req = test::TestRequest::get().uri(QUERY_DA).to_request();
        let body: QueryBody = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.total, 2);
        assert_eq!(body.matches.len(), 2);
        assert_eq!(body.matches[0]["keyword"][0][0], "打");
        assert_eq!(state.store.get(body.id).unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_query_gender_filter() {
        let state = sample_state();
        let app = test_app!(state);

        let req = test::TestRequest::get()
            .uri(&format!("{QUERY_DA}&gender=1"))
            .to_request();
        let body: QueryBody = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.total, 1);
        assert_eq!(body.matches[0]["gender"], 1);

        // out-of-range values disable the filter
        let req = test::TestRequest::get()
            .uri(&format!("{QUERY_DA}&gender=3"))
            .to_request();
        let body: QueryBody = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.total, 2);
    }

    #[actix_web::test]
    async fn test_query_context_widths() {
        let state = sample_state();
        let app = test_app!(state);

        let req = test::TestRequest::get()
            .uri(&format!("{QUERY_DA}&left=0&right=1"))
            .to_request();
        let body: QueryBody = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.matches[0]["left"].as_array().unwrap().len(), 0);
        assert_eq!(body.matches[0]["right"].as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_malformed_pattern_is_bad_request() {
        let state = sample_state();
        let app = test_app!(state);

        // unbalanced opening bracket, %5B is '['
        let req = test::TestRequest::get()
            .uri("/query?query=%5Bword%3D%22x%22")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_empty_query_is_bad_request() {
        let state = sample_state();
        let app = test_app!(state);

        let req = test::TestRequest::get().uri("/query?query=").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

        // absent parameter is rejected by extraction
        let req = test::TestRequest::get().uri("/query").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_export_round_trip() {
        let state = sample_state();
        let app = test_app!(state);

        let req = test::TestRequest::get().uri(QUERY_DA).to_request();
        let body: QueryBody = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::get()
            .uri(&format!("/export?id={}", body.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "text/tsv"
        );

        let tsv = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(tsv.starts_with("left\tkeyword\tright\n"));
        assert!(tsv.contains("打/VC"));
    }

    #[actix_web::test]
    async fn test_export_without_id_uses_latest() {
        let state = sample_state();
        let app = test_app!(state);

        let req = test::TestRequest::get().uri(QUERY_DA).to_request();
        let _: QueryBody = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::get()
            .uri("/export?ctxtag=false")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);

        let tsv = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        // bare context tokens collapse with no separator
        assert!(tsv.contains("他們\t打/VC\t球"));
    }

    #[actix_web::test]
    async fn test_export_unknown_handle_is_not_found() {
        let state = sample_state();
        let app = test_app!(state);

        let req = test::TestRequest::get()
            .uri(&format!("/export?id={}", Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/export").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_stats_and_healthz() {
        let state = sample_state();
        let app = test_app!(state);

        let req = test::TestRequest::get().uri("/stats").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["texts"], 2);
        assert_eq!(body["tokens"], 6);

        let req = test::TestRequest::get().uri("/healthz").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
    }
}
