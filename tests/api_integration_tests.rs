//! Integration tests for the voter-info client against a mock HTTP server,
//! plus an end-to-end walk through the page state machine driven by real
//! fetch results.

use std::time::Duration;

use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use govote::api::client::{CivicClient, FetchError};
use govote::core::action::{Action, Effect, update};
use govote::core::address::InputAddress;
use govote::core::state::{App, Screen};

const TEST_ADDRESS: &str = "1600 Pennsylvania Ave, Washington, DC 20500";

fn sample_body() -> serde_json::Value {
    serde_json::json!({
        "kind": "civicinfo#voterInfoResponse",
        "election": {
            "id": "2000",
            "name": "VIP Test Election",
            "electionDay": "2024-11-05"
        },
        "pollingLocations": [{
            "address": {
                "locationName": "City Hall",
                "line1": "123 Main St",
                "city": "Washington",
                "state": "DC",
                "zip": "20001"
            },
            "pollingHours": "Mon: 9am - 5pm\nTue: 9am - 5pm"
        }],
        "contests": [{
            "type": "General",
            "office": "President of the United States",
            "candidates": [
                {"name": "Candidate A", "party": "Party A"},
                {"name": "Candidate B", "party": "Party B"}
            ]
        }],
        "state": [{
            "name": "District of Columbia",
            "electionAdministrationBody": {
                "name": "Board of Elections",
                "electionRegistrationUrl": "https://example.org/register"
            }
        }]
    })
}

fn client_for(server: &MockServer) -> CivicClient {
    CivicClient::new(
        "test-key",
        Some(format!("{}/voterinfo", server.uri())),
        Duration::from_secs(2),
    )
}

#[tokio::test]
async fn fetch_parses_a_full_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("key", "test-key"))
        .and(query_param("address", TEST_ADDRESS))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
        .mount(&server)
        .await;

    let data = client_for(&server)
        .voter_info(TEST_ADDRESS)
        .await
        .expect("fetch should succeed");

    assert_eq!(data.election.election_day, "2024-11-05");
    assert_eq!(data.polling_locations.len(), 1);
    assert_eq!(
        data.polling_locations[0].display_name(),
        "City Hall"
    );
    assert_eq!(data.contests.len(), 1);
    assert_eq!(data.contests[0].candidates.len(), 2);
    assert_eq!(data.state[0].name, "District of Columbia");
}

#[tokio::test]
async fn client_error_status_is_reported_as_http_4xx() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .voter_info("not an address")
        .await
        .unwrap_err();
    assert_eq!(err, FetchError::Http { status: 400 });
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn server_error_status_is_reported_as_http_5xx() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .voter_info(TEST_ADDRESS)
        .await
        .unwrap_err();
    assert_eq!(err, FetchError::Http { status: 503 });
}

#[tokio::test]
async fn missing_election_day_is_its_own_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .voter_info(TEST_ADDRESS)
        .await
        .unwrap_err();
    assert_eq!(err, FetchError::MissingElectionDay);
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn undecodable_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .voter_info(TEST_ADDRESS)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Parse(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    // Nothing listens on this port.
    let client = CivicClient::new(
        "test-key",
        Some("http://127.0.0.1:1/voterinfo".to_string()),
        Duration::from_secs(2),
    );
    let err = client.voter_info(TEST_ADDRESS).await.unwrap_err();
    assert!(matches!(err, FetchError::Network(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn slow_response_times_out_as_a_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_body())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = CivicClient::new(
        "test-key",
        Some(format!("{}/voterinfo", server.uri())),
        Duration::from_millis(100),
    );
    let err = client.voter_info(TEST_ADDRESS).await.unwrap_err();
    assert!(matches!(err, FetchError::Network(_)));
}

fn test_address() -> InputAddress {
    InputAddress {
        street: "1600 Pennsylvania Ave".into(),
        city: "Washington".into(),
        state: "DC".into(),
        postal_code: "20500".into(),
    }
}

#[tokio::test]
async fn failed_fetch_walks_the_error_retry_cycle() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let mut app = App::new(80, 24);
    let address = test_address();

    let effect = update(&mut app, Action::SubmitAddress(address.clone()));
    assert_eq!(effect, Effect::Fetch(address.clone()));
    assert_eq!(app.screen, Screen::Loading);

    let err = client.voter_info(&address.to_string()).await.unwrap_err();
    update(&mut app, Action::FetchFailed(err));
    assert_eq!(app.screen, Screen::ErrorRetry);
    assert_eq!(app.error.as_ref().unwrap().status(), Some(503));

    update(&mut app, Action::DismissError);
    assert_eq!(app.screen, Screen::AddressInput);
    assert!(app.error.is_none());
}

#[tokio::test]
async fn successful_fetch_walks_into_the_browse_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let mut app = App::new(80, 24);
    let address = test_address();

    update(&mut app, Action::SubmitAddress(address.clone()));
    let data = client.voter_info(&address.to_string()).await.unwrap();
    let effect = update(&mut app, Action::FetchSucceeded(Box::new(data)));

    assert_eq!(effect, Effect::ListsReady);
    assert_eq!(app.screen, Screen::VotingOptions);
    assert!(app.has_menu());

    update(&mut app, Action::ShowContests);
    assert_eq!(app.screen, Screen::ContestList);
    update(&mut app, Action::ShowRegister);
    assert_eq!(app.screen, Screen::Registration);
}
