//! Backend boundary: request/response types, the `Transport` seam and the
//! typed `ApiClient` built on top of it.

pub mod envelope;
pub mod http;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::browse::records::{CompanyRecord, OfferRecord};
use crate::intake::identity::Identity;
use crate::intake::{CompanyPayload, OfferPayload, StudentPayload};

pub use envelope::{parse_collection, Collection};
pub use http::HttpTransport;

pub const STUDENT_PATH: &str = "/api/v1/student/";
pub const COMPANY_PATH: &str = "/api/v1/company";
pub const OFFER_PATH: &str = "/api/v1/offer";

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network failure: {0}")]
    Network(String),
    #[error("server responded with HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("malformed response: {0}")]
    Envelope(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: &'static str,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes one request against the backend.
pub trait Transport {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Typed calls for every endpoint the intake tools use.
pub struct ApiClient<T: Transport> {
    transport: T,
    identity: Option<Identity>,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, identity: Option<Identity>) -> Self {
        Self {
            transport,
            identity,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn create_student(&self, payload: &StudentPayload) -> Result<Value, TransportError> {
        self.post(STUDENT_PATH, payload)
    }

    pub fn create_company(&self, payload: &CompanyPayload) -> Result<Value, TransportError> {
        self.post(COMPANY_PATH, payload)
    }

    pub fn create_offer(&self, payload: &OfferPayload) -> Result<Value, TransportError> {
        self.post(OFFER_PATH, payload)
    }

    pub fn list_offers(&self) -> Result<Collection<OfferRecord>, TransportError> {
        let response = self.send(self.request(Method::Get, OFFER_PATH, None))?;
        let collection = parse_collection::<OfferRecord>(&response.body, "offer")?;
        for (index, offer) in collection.items.iter().enumerate() {
            if !offer.is_complete() {
                tracing::warn!(index, id = ?offer.id, "offer record is missing role, openings or salary");
            }
        }
        Ok(collection)
    }

    pub fn list_companies(&self) -> Result<Collection<CompanyRecord>, TransportError> {
        let response = self.send(self.request(Method::Get, COMPANY_PATH, None))?;
        parse_collection::<CompanyRecord>(&response.body, "company")
    }

    fn post<P: Serialize>(&self, path: &'static str, payload: &P) -> Result<Value, TransportError> {
        let body = serde_json::to_value(payload)
            .map_err(|err| TransportError::Envelope(format!("could not encode payload: {err}")))?;
        let response = self.send(self.request(Method::Post, path, Some(body)))?;
        let value: Value = if response.body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&response.body)
                .map_err(|err| TransportError::Envelope(err.to_string()))?
        };
        if value.get("success").and_then(Value::as_bool) == Some(false) {
            return Err(TransportError::Rejected(envelope::message_of(&value)));
        }
        tracing::info!(path, status = response.status, "record created");
        Ok(value)
    }

    fn request(&self, method: Method, path: &'static str, body: Option<Value>) -> ApiRequest {
        ApiRequest {
            method,
            path,
            body,
            bearer: self.identity.as_ref().map(|identity| identity.token.clone()),
        }
    }

    fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        tracing::debug!(method = request.method.as_str(), path = request.path, "sending request");
        let response = self.transport.execute(&request).map_err(|err| {
            tracing::warn!(path = request.path, error = %err, "request failed");
            err
        })?;
        if !response.is_success() {
            let message = serde_json::from_str::<Value>(&response.body)
                .map(|value| envelope::message_of(&value))
                .unwrap_or_else(|_| response.body.trim().to_string());
            tracing::warn!(path = request.path, status = response.status, "non-success status");
            return Err(TransportError::Status {
                status: response.status,
                message,
            });
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Recorder {
        requests: RefCell<Vec<ApiRequest>>,
        reply: ApiResponse,
    }

    impl Recorder {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                requests: RefCell::new(Vec::new()),
                reply: ApiResponse {
                    status,
                    body: body.to_string(),
                },
            }
        }
    }

    impl Transport for Recorder {
        fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
            self.requests.borrow_mut().push(request.clone());
            Ok(self.reply.clone())
        }
    }

    #[test]
    fn bearer_follows_identity() {
        let recorder = Recorder::replying(200, r#"{"success":true,"data":{"company":[]}}"#);
        let client = ApiClient::new(&recorder, Some(Identity::new("tok-1")));
        client.list_companies().unwrap();
        let anonymous = ApiClient::new(&recorder, None);
        anonymous.list_companies().unwrap();

        let requests = recorder.requests.borrow();
        assert_eq!(requests[0].bearer.as_deref(), Some("tok-1"));
        assert_eq!(requests[0].path, COMPANY_PATH);
        assert_eq!(requests[1].bearer, None);
    }

    #[test]
    fn error_status_carries_server_message() {
        let recorder = Recorder::replying(400, r#"{"success":false,"message":"duplicate email"}"#);
        let client = ApiClient::new(&recorder, None);
        let err = client.list_offers().unwrap_err();
        match err {
            TransportError::Status { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "duplicate email");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn success_false_on_ok_status_is_rejected() {
        let recorder = Recorder::replying(200, r#"{"success":false,"message":"not allowed"}"#);
        let client = ApiClient::new(&recorder, None);
        let mut flow = crate::intake::CompanyFlow::new();
        flow.details.name = "Acme Labs".into();
        flow.address.pincode = "411001".into();
        let err = client.create_company(&flow.to_payload().unwrap()).unwrap_err();
        assert!(matches!(err, TransportError::Rejected(ref msg) if msg == "not allowed"));
    }
}
