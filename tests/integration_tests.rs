//! Integration tests using a mock HTTP server
//!
//! Tests the full end-to-end flow: entity resolution → query building →
//! auto-pagination → HTTP executor → classified errors.

use crmkit::entity::EntityDescriptor;
use crmkit::http::{HttpClientConfig, HttpPageExecutor, RestClient};
use crmkit::paginate::Paginator;
use crmkit::query::QueryBuilder;
use crmkit::taxonomy::ApiErrorKind;
use crmkit::version::ApiVersion;
use crmkit::Error;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn executor_for(server: &MockServer, version: ApiVersion) -> HttpPageExecutor {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let client = RestClient::new(
        HttpClientConfig::builder()
            .base_url(server.uri())
            .build(),
    )
    .unwrap();
    HttpPageExecutor::new(client, version)
}

fn lead_rows(count: usize, offset: usize) -> Vec<Value> {
    (0..count)
        .map(|i| json!({ "LEADID": (offset + i).to_string() }))
        .collect()
}

// ============================================================================
// Auto-pagination end to end
// ============================================================================

#[tokio::test]
async fn test_auto_pagination_merges_three_pages() {
    let mock_server = MockServer::start().await;

    for (page, count, offset) in [(1u32, 200usize, 0usize), (2, 200, 200), (3, 57, 400)] {
        Mock::given(method("GET"))
            .and(path("/Leads"))
            .and(query_param("page", page.to_string()))
            .and(query_param("per_page", "200"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": lead_rows(count, offset),
                "info": {"count": 457, "more_records": page < 3}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let executor = executor_for(&mock_server, ApiVersion::V2);
    let builder = QueryBuilder::new("Leads", ApiVersion::V2)
        .per_page(200)
        .unwrap();

    let merged = Paginator::new().fetch_all(&builder, &executor).await.unwrap();

    assert_eq!(merged.len(), 457);
    assert_eq!(merged.pages_fetched(), 3);
    assert_eq!(merged.records()[0]["LEADID"], "0");
    assert_eq!(merged.records()[456]["LEADID"], "456");
}

#[tokio::test]
async fn test_auto_pagination_stops_on_reported_total() {
    let mock_server = MockServer::start().await;

    // Both pages full-size; the reported total is the only stop signal.
    for (page, offset) in [(1u32, 0usize), (2, 200)] {
        Mock::given(method("GET"))
            .and(path("/Accounts"))
            .and(query_param("page", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": lead_rows(200, offset),
                "info": {"count": 400}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let executor = executor_for(&mock_server, ApiVersion::V2);
    let builder = QueryBuilder::new("Accounts", ApiVersion::V2)
        .per_page(200)
        .unwrap();

    let merged = Paginator::new().fetch_all(&builder, &executor).await.unwrap();
    assert_eq!(merged.len(), 400);
}

#[tokio::test]
async fn test_failure_mid_pagination_discards_partial_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Leads"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": lead_rows(200, 0),
            "info": {"count": 1000}
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/Leads"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "4820",
            "message": "capacity exhausted for today"
        })))
        .mount(&mock_server)
        .await;

    let executor = executor_for(&mock_server, ApiVersion::V2);
    let builder = QueryBuilder::new("Leads", ApiVersion::V2)
        .per_page(200)
        .unwrap();

    let err = Paginator::new()
        .fetch_all(&builder, &executor)
        .await
        .unwrap_err();

    let condition = err.as_api_condition().expect("expected an API condition");
    assert_eq!(condition.kind, ApiErrorKind::CapacityExceeded);
    assert_eq!(condition.message, "capacity exhausted for today");
}

// ============================================================================
// Manual pagination
// ============================================================================

#[tokio::test]
async fn test_explicit_page_is_fetched_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Leads"))
        .and(query_param("page", "7"))
        .and(query_param("per_page", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": lead_rows(50, 300),
            "info": {"count": 9999}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let executor = executor_for(&mock_server, ApiVersion::V2);
    let builder = QueryBuilder::new("Leads", ApiVersion::V2)
        .page(7)
        .unwrap()
        .per_page(50)
        .unwrap();

    let merged = Paginator::new().fetch_all(&builder, &executor).await.unwrap();

    // One page, even though the reported total says there is far more.
    assert_eq!(merged.len(), 50);
    assert_eq!(merged.pages_fetched(), 1);
}

// ============================================================================
// Entity resolution end to end
// ============================================================================

#[tokio::test]
async fn test_entity_resolution_targets_the_derived_module() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Potentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"POTENTIALID": "1"}],
            "info": {"count": 1}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    static POTENTIAL: EntityDescriptor = EntityDescriptor::new("Potential");

    let executor = executor_for(&mock_server, ApiVersion::V2);
    let builder = QueryBuilder::for_entity(&POTENTIAL, ApiVersion::V2);

    let merged = Paginator::new().fetch_all(&builder, &executor).await.unwrap();
    assert_eq!(merged.len(), 1);
}

#[tokio::test]
async fn test_overridden_module_is_used_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/PotStageHistory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [],
            "info": {"count": 0}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    static STAGE_HISTORY: EntityDescriptor = EntityDescriptor::new("PotentialStageHistoryEntry")
        .with_module("PotStageHistory")
        .with_id_field("POTENTIALSTAGEHISTORYID");

    let executor = executor_for(&mock_server, ApiVersion::V2);
    let builder = QueryBuilder::for_entity(&STAGE_HISTORY, ApiVersion::V2);

    let merged = Paginator::new().fetch_all(&builder, &executor).await.unwrap();
    assert!(merged.is_empty());
}

// ============================================================================
// Legacy generation
// ============================================================================

#[tokio::test]
async fn test_v1_envelope_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Leads"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "result": {
                    "rows": lead_rows(3, 0),
                    "count": 3
                }
            }
        })))
        .mount(&mock_server)
        .await;

    let executor = executor_for(&mock_server, ApiVersion::V1);
    let builder = QueryBuilder::new("Leads", ApiVersion::V1);

    let merged = Paginator::new().fetch_all(&builder, &executor).await.unwrap();
    assert_eq!(merged.len(), 3);
}

#[tokio::test]
async fn test_v1_error_envelope_uses_legacy_wording() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Leads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "error": {"code": "4834", "message": "Invalid Ticket Id"}
            }
        })))
        .mount(&mock_server)
        .await;

    let executor = executor_for(&mock_server, ApiVersion::V1);
    let builder = QueryBuilder::new("Leads", ApiVersion::V1);

    let err = Paginator::new()
        .fetch_all(&builder, &executor)
        .await
        .unwrap_err();

    let condition = err.as_api_condition().expect("expected an API condition");
    assert_eq!(condition.kind, ApiErrorKind::InvalidToken);
    assert_eq!(condition.generic_description, "Invalid or expired ticket");
    assert_eq!(condition.message, "Invalid Ticket Id");
}

// ============================================================================
// Validation before the network
// ============================================================================

#[tokio::test]
async fn test_invalid_parameters_never_reach_the_server() {
    // No mocks mounted: a request would fail loudly.
    let mock_server = MockServer::start().await;
    let _executor = executor_for(&mock_server, ApiVersion::V2);

    let err = QueryBuilder::new("Leads", ApiVersion::V2)
        .per_page(500)
        .unwrap_err();

    assert!(matches!(err, Error::InvalidParameter { .. }));
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 0);
}
