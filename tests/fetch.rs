//! Pagination and request shape against a mock HeavyJob API.

use heavyjob_sync::api_client::ApiClient;
use heavyjob_sync::session::{Session, SessionHandle};
use heavyjob_sync::types::TimecardFilters;
use heavyjob_sync::Error;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
	let session = SessionHandle::new(Session {
		api_root: server.uri(),
		token: "test-token".into(),
	});
	ApiClient::new(reqwest::Client::new(), session)
}

fn summaries(prefix: &str, count: usize) -> Vec<Value> {
	(0..count)
		.map(|i| json!({ "id": format!("{}-{}", prefix, i), "jobId": "job-1", "revision": 1 }))
		.collect()
}

fn page(results: Vec<Value>, next_cursor: &str) -> ResponseTemplate {
	ResponseTemplate::new(200).set_body_json(json!({
		"results": results,
		"metadata": { "nextCursor": next_cursor },
	}))
}

#[tokio::test]
async fn fetch_all_follows_cursors_in_order() {
	let server = MockServer::start().await;

	Mock::given(method("GET"))
		.and(path("/timeCardInfo"))
		.and(query_param_is_missing("cursor"))
		.respond_with(page(summaries("p1", 50), "a"))
		.expect(1)
		.mount(&server)
		.await;
	Mock::given(method("GET"))
		.and(path("/timeCardInfo"))
		.and(query_param("cursor", "a"))
		.respond_with(page(summaries("p2", 50), "b"))
		.expect(1)
		.mount(&server)
		.await;
	Mock::given(method("GET"))
		.and(path("/timeCardInfo"))
		.and(query_param("cursor", "b"))
		.respond_with(page(summaries("p3", 7), ""))
		.expect(1)
		.mount(&server)
		.await;

	let records = client(&server)
		.get_timecard_summaries(&TimecardFilters::new())
		.await
		.unwrap_or_else(|e| panic!("Expected Ok, got Err: {e}"));

	assert_eq!(records.len(), 107);
	assert_eq!(records[0].id, "p1-0");
	assert_eq!(records[49].id, "p1-49");
	assert_eq!(records[50].id, "p2-0");
	assert_eq!(records[106].id, "p3-6");
	assert_eq!(server.received_requests().await.map(|x| x.len()), Some(3));
}

#[tokio::test]
async fn fetch_all_keeps_filters_on_every_page() {
	let server = MockServer::start().await;

	Mock::given(method("GET"))
		.and(path("/timeCardInfo"))
		.and(query_param("jobId", "job 1/2"))
		.and(query_param_is_missing("cursor"))
		.respond_with(page(summaries("p1", 2), "next"))
		.expect(1)
		.mount(&server)
		.await;
	Mock::given(method("GET"))
		.and(path("/timeCardInfo"))
		.and(query_param("jobId", "job 1/2"))
		.and(query_param("cursor", "next"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": summaries("p2", 1), "metadata": {} })))
		.expect(1)
		.mount(&server)
		.await;

	let records = client(&server)
		.get_timecard_summaries(&TimecardFilters::new().job_id("job 1/2"))
		.await
		.unwrap_or_else(|e| panic!("Expected Ok, got Err: {e}"));
	assert_eq!(records.len(), 3);
}

#[tokio::test]
async fn failed_page_discards_everything() {
	let server = MockServer::start().await;

	Mock::given(method("GET"))
		.and(path("/timeCardInfo"))
		.and(query_param_is_missing("cursor"))
		.respond_with(page(summaries("p1", 50), "a"))
		.mount(&server)
		.await;
	Mock::given(method("GET"))
		.and(path("/timeCardInfo"))
		.and(query_param("cursor", "a"))
		.respond_with(ResponseTemplate::new(502))
		.mount(&server)
		.await;

	let result = client(&server).get_timecard_summaries(&TimecardFilters::new()).await;
	match result {
		Err(Error::Status { status, .. }) => assert_eq!(status.as_u16(), 502),
		other => panic!("Expected status error, got: {other:?}"),
	}
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
	let server = MockServer::start().await;

	Mock::given(method("GET"))
		.and(path("/jobs"))
		.respond_with(ResponseTemplate::new(200).set_body_string("not json"))
		.mount(&server)
		.await;

	let result = client(&server).get_jobs().await;
	assert!(matches!(result, Err(Error::Decode { .. })), "got: {result:?}");
}

#[tokio::test]
async fn requests_carry_bearer_token_and_accept_header() {
	let server = MockServer::start().await;

	Mock::given(method("GET"))
		.and(path("/jobs"))
		.and(header("authorization", "Bearer test-token"))
		.and(header("accept", "application/json"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!([
			{ "id": "job-1", "code": "J100", "description": "Highway 9", "businessUnitId": "bu", "status": "active" },
		])))
		.expect(1)
		.mount(&server)
		.await;

	let jobs = client(&server).get_jobs().await.unwrap_or_else(|e| panic!("Expected Ok, got Err: {e}"));
	assert_eq!(jobs.len(), 1);
	assert_eq!(jobs[0].code, "J100");
}

#[tokio::test]
async fn timecard_detail_is_fetched_by_id() {
	let server = MockServer::start().await;

	Mock::given(method("GET"))
		.and(path("/timeCards/tc-9"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({
			"id": "tc-9",
			"costCodes": [],
			"employees": [{ "timeCardEmployeeId": "tce-1", "regularHours": [{ "timeCardCostCodeId": "tcc", "tagCode": "", "hours": 7.5 }] }],
		})))
		.expect(1)
		.mount(&server)
		.await;

	let timecard = client(&server).get_timecard("tc-9").await.unwrap_or_else(|e| panic!("Expected Ok, got Err: {e}"));
	assert_eq!(timecard.id, "tc-9");
	assert_eq!(timecard.employees[0].regular_hours[0].hours, 7.5);
}

#[tokio::test]
async fn repeated_cursor_is_an_error() {
	let server = MockServer::start().await;

	Mock::given(method("GET"))
		.and(path("/timeCardInfo"))
		.and(query_param_is_missing("cursor"))
		.respond_with(page(summaries("p1", 5), "a"))
		.expect(1)
		.mount(&server)
		.await;
	Mock::given(method("GET"))
		.and(path("/timeCardInfo"))
		.and(query_param("cursor", "a"))
		.respond_with(page(summaries("p2", 5), "a"))
		.expect(1)
		.mount(&server)
		.await;

	let result = client(&server).get_timecard_summaries(&TimecardFilters::new()).await;
	match result {
		Err(Error::RepeatedCursor { cursor, .. }) => assert_eq!(cursor, "a"),
		other => panic!("Expected repeated cursor error, got: {other:?}"),
	}
}
