use crate::{AppState, error::AppError};
use analytics::{AggregateStats, AggregatedEntry};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::header,
    response::IntoResponse,
};
use core_types::{DateRange, EntryUpdate, FinancialEntry, NewEntry};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

/// `?sort_by=amount&sort_by=date`, or the comma-separated `?sort_by=amount,date`.
#[derive(Debug, Default, Deserialize)]
pub struct SortQuery {
    #[serde(default)]
    pub sort_by: Vec<String>,
}

impl SortQuery {
    fn fields(&self) -> Vec<String> {
        self.sort_by
            .iter()
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .map(String::from)
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl RangeQuery {
    fn range(&self) -> Result<DateRange, AppError> {
        let range = DateRange::parse(self.from.as_deref(), self.to.as_deref())
            .map_err(tracker::TrackerError::from)?;
        Ok(range)
    }
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::BadRequest(format!("Invalid item id '{raw}'")))
}

fn payload<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(format!("Invalid payload: {}", rejection.body_text())))
}

fn csv_attachment(filename: &str, body: Vec<u8>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
}

/// # POST /items
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewEntry>, JsonRejection>,
) -> Result<Json<FinancialEntry>, AppError> {
    let entry = payload(body)?;
    let created = state.service.create_entry(entry).await?;
    Ok(Json(created))
}

/// # GET /items
pub async fn list_items(
    State(state): State<Arc<AppState>>,
    axum_extra::extract::Query(query): axum_extra::extract::Query<SortQuery>,
) -> Result<Json<Vec<FinancialEntry>>, AppError> {
    let entries = state.service.list_entries(&query.fields()).await?;
    Ok(Json(entries))
}

/// # PUT /items/:id
pub async fn update_item(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    body: Result<Json<EntryUpdate>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id)?;
    let update = payload(body)?;
    if update.is_empty() {
        return Err(AppError::BadRequest("The update sets no fields".to_string()));
    }
    state.service.update_entry(id, update).await?;
    Ok(Json(json!({ "status": "successfully updated item" })))
}

/// # DELETE /items/:id
pub async fn delete_item(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id)?;
    state.service.delete_entry(id).await?;
    Ok(Json(json!({ "status": "successfully deleted item" })))
}

/// # GET /analytics
/// Every entry in `[from, to]` together with the statistics of that range.
pub async fn get_analytics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<AggregatedEntry>>, AppError> {
    let rows = state.service.aggregated_entries(&query.range()?).await?;
    Ok(Json(rows))
}

/// # GET /analytics/summary
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<AggregateStats>, AppError> {
    let stats = state.service.statistics(&query.range()?).await?;
    Ok(Json(stats))
}

/// # GET /analytics/csv
pub async fn export_analytics_csv(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let csv = state.service.export_aggregated_csv(&query.range()?).await?;
    Ok(csv_attachment("aggregated_data.csv", csv))
}

/// # GET /items/csv
pub async fn export_items_csv(
    State(state): State<Arc<AppState>>,
    axum_extra::extract::Query(query): axum_extra::extract::Query<SortQuery>,
) -> Result<impl IntoResponse, AppError> {
    let csv = state.service.export_entries_csv(&query.fields()).await?;
    Ok(csv_attachment("filtered_data.csv", csv))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_router;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode},
        response::Response,
    };
    use database::MemoryStore;
    use tower::ServiceExt;
    use tracker::TrackerService;

    fn app() -> Router {
        let service = TrackerService::new(Arc::new(MemoryStore::new()));
        build_router(Arc::new(AppState { service }))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        app.clone().oneshot(request.body(body).unwrap()).await.unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    async fn seeded_app() -> Router {
        let app = app();
        for (kind, amount, date, category) in [
            ("income", 100, "2023-01-01", "salary"),
            ("expense", 50, "2023-01-02", "food"),
        ] {
            let response = send(
                &app,
                "POST",
                "/items",
                Some(json!({ "type": kind, "amount": amount, "date": date, "category": category })),
            )
            .await;
            assert_eq!(response.status(), StatusCode::OK);
        }
        app
    }

    #[test]
    fn sort_query_splits_commas() {
        let query = SortQuery {
            sort_by: vec!["amount, date".to_string(), "id".to_string(), String::new()],
        };
        assert_eq!(query.fields(), vec!["amount", "date", "id"]);
    }

    #[tokio::test]
    async fn health_check() {
        let response = send(&app(), "GET", "/api/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"OK");
    }

    #[tokio::test]
    async fn create_returns_stored_entry() {
        let app = app();
        let response = send(
            &app,
            "POST",
            "/items",
            Some(json!({ "type": "доход", "amount": 100, "date": "2023-01-01", "category": "test" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let created = body_json(response).await;
        assert_eq!(created["id"], 1);
        assert_eq!(created["type"], "income");
        assert_eq!(created["amount"], 100);
        assert_eq!(created["date"], "2023-01-01");
    }

    #[tokio::test]
    async fn create_rejects_bad_payloads() {
        let app = app();

        let negative = send(
            &app,
            "POST",
            "/items",
            Some(json!({ "type": "income", "amount": -1, "date": "2023-01-01", "category": "x" })),
        )
        .await;
        assert_eq!(negative.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(negative).await["error"].as_str().unwrap().contains("amount"));

        let unknown_kind = send(
            &app,
            "POST",
            "/items",
            Some(json!({ "type": "gift", "amount": 1, "date": "2023-01-01", "category": "x" })),
        )
        .await;
        assert_eq!(unknown_kind.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(unknown_kind).await["error"].is_string());
    }

    #[tokio::test]
    async fn list_supports_repeated_and_comma_sort_keys() {
        let app = seeded_app().await;

        let repeated = body_json(send(&app, "GET", "/items?sort_by=amount&sort_by=date", None).await).await;
        assert_eq!(repeated[0]["amount"], 50);
        assert_eq!(repeated[1]["amount"], 100);

        let comma = body_json(send(&app, "GET", "/items?sort_by=type,id", None).await).await;
        assert_eq!(comma[0]["type"], "expense");
        assert_eq!(comma[1]["type"], "income");

        let unsorted = body_json(send(&app, "GET", "/items", None).await).await;
        assert_eq!(unsorted.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn list_rejects_unknown_sort_field() {
        let app = seeded_app().await;

        let response = send(&app, "GET", "/items?sort_by=amount;DROP", None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("amount;DROP"));
    }

    #[tokio::test]
    async fn analytics_annotates_each_row() {
        let app = seeded_app().await;

        let response = send(&app, "GET", "/analytics?from=2023-01-01&to=2023-01-31", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let rows = body_json(response).await;
        assert_eq!(rows.as_array().unwrap().len(), 2);
        let stats = &rows[1]["aggregated_data"];
        assert_eq!(stats["sum"], 50);
        assert_eq!(stats["count"], 2);
        assert_eq!(stats["average"], 25.0);
        assert_eq!(stats["median"], 25.0);
        assert_eq!(stats["percentile_90"], 85.0);
        assert_eq!(rows[1]["category"], "food");
    }

    #[tokio::test]
    async fn analytics_empty_range_is_empty_list() {
        let app = seeded_app().await;

        let response = send(&app, "GET", "/analytics?from=2030-01-01", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn analytics_rejects_bad_ranges() {
        let app = seeded_app().await;

        let malformed = send(&app, "GET", "/analytics?from=01/02/2023", None).await;
        assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);

        let inverted = send(&app, "GET", "/analytics?from=2023-02-01&to=2023-01-01", None).await;
        assert_eq!(inverted.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn summary_without_data_is_not_found() {
        let app = app();

        let response = send(&app, "GET", "/analytics/summary", None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn summary_reports_range_statistics() {
        let app = seeded_app().await;

        let stats = body_json(send(&app, "GET", "/analytics/summary?to=2023-01-01", None).await).await;

        assert_eq!(stats["sum"], 100);
        assert_eq!(stats["count"], 1);
        assert_eq!(stats["percentile_90"], 100.0);
    }

    #[tokio::test]
    async fn analytics_csv_is_an_attachment() {
        let app = seeded_app().await;

        let response = send(&app, "GET", "/analytics/csv", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"aggregated_data.csv\""
        );
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/csv")
        );
        let text = String::from_utf8(body_bytes(response).await).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("id,type,amount,date,category,created_at,sum,average,count,median,percentile_90")
        );
        assert!(lines.next().unwrap().ends_with(",50,25.00,2,25.00,85.00"));
    }

    #[tokio::test]
    async fn items_csv_follows_sort() {
        let app = seeded_app().await;

        let response = send(&app, "GET", "/items/csv?sort_by=amount", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"filtered_data.csv\""
        );
        let text = String::from_utf8(body_bytes(response).await).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("2,expense,50,"));
    }

    #[tokio::test]
    async fn update_and_delete_lifecycle() {
        let app = seeded_app().await;

        let updated = send(&app, "PUT", "/items/2", Some(json!({ "amount": 70 }))).await;
        assert_eq!(updated.status(), StatusCode::OK);
        assert_eq!(body_json(updated).await["status"], "successfully updated item");

        let items = body_json(send(&app, "GET", "/items?sort_by=id", None).await).await;
        assert_eq!(items[1]["amount"], 70);
        assert_eq!(items[1]["category"], "food");

        let deleted = send(&app, "DELETE", "/items/1", None).await;
        assert_eq!(deleted.status(), StatusCode::OK);

        let again = send(&app, "DELETE", "/items/1", None).await;
        assert_eq!(again.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_validates_id_and_body() {
        let app = seeded_app().await;

        let bad_id = send(&app, "PUT", "/items/abc", Some(json!({ "amount": 1 }))).await;
        assert_eq!(bad_id.status(), StatusCode::BAD_REQUEST);

        let empty = send(&app, "PUT", "/items/1", Some(json!({}))).await;
        assert_eq!(empty.status(), StatusCode::BAD_REQUEST);

        let missing = send(&app, "PUT", "/items/99", Some(json!({ "category": "x" }))).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
