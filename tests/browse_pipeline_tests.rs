//! Envelope parsing through to projections and the browser state.

use std::sync::Arc;

use placement_intake::browse::{
    Browsable, BrowserEvent, BrowserState, CountingScrollLock, LoadState, OfferRecord, Rect,
};
use placement_intake::intake::Identity;
use placement_intake::transport::{
    ApiClient, ApiRequest, ApiResponse, Method, Transport, TransportError,
};

struct CannedTransport {
    status: u16,
    body: String,
}

impl Transport for CannedTransport {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        assert_eq!(request.method, Method::Get);
        Ok(ApiResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

fn client(status: u16, body: serde_json::Value) -> ApiClient<CannedTransport> {
    ApiClient::new(
        CannedTransport {
            status,
            body: body.to_string(),
        },
        Some(Identity::new("token-1")),
    )
}

fn offers_body() -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "data": {
            "offer": [
                {
                    "_id": "o1",
                    "company": {"name": "Acme", "logo": "acme.example/logo.png", "link": ""},
                    "role": "Firmware Engineer",
                    "location": {"city": "Pune", "state": "MH", "country": "India", "pincode": 411001},
                    "total_opening": "4",
                    "drive": "on campus",
                    "type": "placement",
                    "sector": "Core",
                    "salary": {"min": 600000, "max": 950000},
                    "criteria": {"min_result": 7.5, "max_backlog": 0, "passout_year": [2025], "branch": "ECE"},
                    "skills": ["C", " ", "Rust"]
                },
                {"_id": "o2", "role": null, "company": null},
                "not a record"
            ]
        }
    })
}

#[test]
fn offers_flow_from_envelope_to_detail() {
    let collection = client(200, offers_body()).list_offers().unwrap();
    assert_eq!(collection.items.len(), 2);
    assert_eq!(collection.skipped, 1);

    let lock = Arc::new(CountingScrollLock::default());
    let mut state = BrowserState::new(lock.clone());
    let ticket = state.begin_fetch();
    assert!(state.complete_fetch(ticket, Ok(collection)));
    assert_eq!(state.load_state(), &LoadState::Ready);

    let cards = state.cards();
    assert_eq!(cards[0].title, "Acme");
    assert_eq!(cards[0].logo, "https://acme.example/logo.png");
    assert_eq!(cards[0].link, "#");
    assert_eq!(cards[0].description, "Location: Pune, MH | Criteria: CGPA > 7.5");
    assert_eq!(cards[1].title, "Unknown Company");
    assert_eq!(cards[1].subtitle, "Unknown Role");

    assert!(state.handle(BrowserEvent::Select(0)));
    let detail = state.active_detail().unwrap();
    assert_eq!(detail.value_of("Salary"), Some("₹6.00 - ₹9.50 LPA"));
    assert_eq!(detail.value_of("Openings"), Some("4"));
    assert_eq!(detail.value_of("Location"), Some("Pune, MH, India 411001"));
    assert_eq!(detail.tags, ["CGPA 7.5, Max Backlogs: 0, Branch: ECE, Passout: 2025", "C", "Rust"]);
    assert_eq!(lock.held(), 1);

    assert!(state.pointer_at(3, 40, Rect::new(0, 0, 40, 12)));
    assert_eq!(state.active_index(), None);
    assert_eq!(lock.held(), 0);
}

#[test]
fn projections_are_stable_across_calls() {
    let collection = client(200, offers_body()).list_offers().unwrap();
    let record: &OfferRecord = &collection.items[0];
    assert_eq!(record.card(), record.card());
    assert_eq!(record.detail(), record.detail());
}

#[test]
fn nested_envelope_shapes_are_accepted() {
    let nested = serde_json::json!({"data": {"company": {"company": [{"name": "Globex"}]}}});
    let doubled = serde_json::json!({"data": {"data": {"company": [{"name": "Initech"}]}}});
    assert_eq!(client(200, nested).list_companies().unwrap().items[0].name.as_deref(), Some("Globex"));
    assert_eq!(client(200, doubled).list_companies().unwrap().items[0].name.as_deref(), Some("Initech"));
}

#[test]
fn missing_collection_surfaces_as_failed_state() {
    let collection = client(200, serde_json::json!({"data": {}})).list_offers().unwrap();
    let mut state = BrowserState::new(Arc::new(CountingScrollLock::default()));
    let ticket = state.begin_fetch();
    state.complete_fetch(ticket, Ok(collection));
    assert!(matches!(state.load_state(), LoadState::Failed(message) if message.contains("offer")));
    assert!(state.items().is_empty());
}

#[test]
fn error_status_carries_server_message() {
    let err = client(500, serde_json::json!({"message": "database offline"}))
        .list_companies()
        .unwrap_err();
    match err {
        TransportError::Status { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database offline");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn stale_completion_after_refetch_is_ignored() {
    let mut state = BrowserState::new(Arc::new(CountingScrollLock::default()));
    let first = state.begin_fetch();
    let second = state.begin_fetch();
    let fresh = client(200, offers_body()).list_offers().unwrap();
    assert!(state.complete_fetch(second, Ok(fresh)));
    assert!(!state.complete_fetch(first, Err(TransportError::Network("late".into()))));
    assert_eq!(state.items().len(), 2);
}
