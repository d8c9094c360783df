use mockito::{Matcher, Server};
use serde_json::{Value, json};
use tripgen::itinerary::{EventType, ItineraryClient};
use tripgen::{ClientConfig, ErrorKind};

const PARIS_FIXTURE: &str = include_str!("fixtures/paris_itinerary.json");
const PATH: &str = "/v1/chat/completions";

fn envelope(content: &str) -> String {
    json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
    .to_string()
}

fn client(server: &Server) -> ItineraryClient {
    ItineraryClient::new(
        ClientConfig::default()
            .with_endpoint(format!("{}{PATH}", server.url()))
            .with_api_key("test-key"),
    )
    .expect("client should build")
}

#[test]
fn paris_one_shot_example_round_trips() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", PATH)
        .match_body(Matcher::PartialJson(json!({ "model": "asi1-mini" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(PARIS_FIXTURE))
        .expect(1)
        .create();

    let itinerary = client(&server)
        .generate("Paris, France", "2025-12-20", "2025-12-27")
        .expect("generation should succeed");

    assert_eq!(itinerary["id"], "itinerary-1700000000000");
    let events = itinerary["events"].as_array().expect("events should be an array");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["coordinates"], json!([49.0097, 2.5479]));
    let expected: Value = serde_json::from_str(PARIS_FIXTURE).unwrap();
    assert_eq!(itinerary, expected);
    mock.assert();
}

#[test]
fn typed_generation_decodes_the_example() {
    let mut server = Server::new();
    server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(envelope(PARIS_FIXTURE))
        .create();

    let itinerary = client(&server)
        .generate_typed("Paris, France", "2025-12-20", "2025-12-27")
        .expect("typed generation should succeed");

    assert_eq!(itinerary.location, "Paris, France");
    assert_eq!(itinerary.end_date, "2025-12-27");
    assert_eq!(itinerary.events[0].kind, EventType::Flight);
    assert_eq!(itinerary.events[0].coordinates, [49.0097, 2.5479]);
}

#[test]
fn default_path_does_not_enforce_the_schema() {
    let mut server = Server::new();
    server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(envelope(r#"{"events": "soon", "coordinates": null}"#))
        .expect(2)
        .create();
    let client = client(&server);

    let loose = client.generate("Nowhere", "2025-01-01", "2025-01-02").unwrap();
    assert_eq!(loose, json!({ "events": "soon", "coordinates": null }));

    let err = client
        .generate_typed("Nowhere", "2025-01-01", "2025-01-02")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

#[test]
fn client_is_reusable_and_issues_one_call_per_generation() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(envelope("[]"))
        .expect(3)
        .create();
    let client = client(&server);

    for _ in 0..3 {
        assert_eq!(client.generate("a", "b", "c").unwrap(), json!([]));
    }
    mock.assert();
}
