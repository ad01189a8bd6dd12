use std::sync::Arc;
use std::time::Duration;

use hyper::body::to_bytes;
use hyper::client::HttpConnector;
use hyper::header::CONTENT_TYPE;
use hyper::{Body, Client, Request, StatusCode, Uri};
use hyper_rustls::HttpsConnector;
use rustls::{ClientConfig, OwnedTrustAnchor, RootCertStore};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::time::timeout;
use webpki_roots::TLS_SERVER_ROOTS;

use crate::traits::{AdapterError, AdapterResult};

pub(crate) type HyperClient = Client<HttpsConnector<HttpConnector>, Body>;

/// Builds a client that speaks plain HTTP to local daemons and HTTPS elsewhere.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn build_https_client() -> AdapterResult<HyperClient> {
    let mut roots = RootCertStore::empty();
    roots.add_trust_anchors(TLS_SERVER_ROOTS.iter().map(|anchor| {
        OwnedTrustAnchor::from_subject_spki_name_constraints(
            anchor.subject,
            anchor.spki,
            anchor.name_constraints,
        )
    }));

    let config = ClientConfig::builder()
        .with_safe_defaults()
        .with_root_certificates(roots)
        .with_no_client_auth();

    let mut http = HttpConnector::new();
    http.enforce_http(false);

    let connector = HttpsConnector::from((http, Arc::new(config)));

    Ok(Client::builder().build::<_, Body>(connector))
}

/// Raw outcome of a JSON POST: status plus undecoded body.
pub(crate) struct JsonReply {
    pub(crate) status: StatusCode,
    pub(crate) body: Vec<u8>,
}

impl JsonReply {
    /// Decodes the body, treating non-success statuses as response errors.
    pub(crate) fn decode<T: DeserializeOwned>(self, backend: &str) -> AdapterResult<T> {
        if !self.status.is_success() {
            let reason = String::from_utf8_lossy(&self.body);
            return Err(AdapterError::response(format!(
                "{backend} returned {}: {reason}",
                self.status
            )));
        }

        serde_json::from_slice(&self.body).map_err(|err| {
            AdapterError::response(format!("failed to decode {backend} response: {err}"))
        })
    }
}

/// Posts `payload` as JSON and collects the whole reply within `limit`.
pub(crate) async fn post_json<P: Serialize>(
    client: &HyperClient,
    endpoint: &Uri,
    payload: &P,
    limit: Duration,
) -> AdapterResult<JsonReply> {
    let body = serde_json::to_vec(payload)
        .map_err(|err| AdapterError::invalid_request(format!("failed to encode request: {err}")))?;

    let request = Request::post(endpoint.clone())
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .map_err(|err| AdapterError::transport(format!("failed to build request: {err}")))?;

    let response = timeout(limit, client.request(request))
        .await
        .map_err(|_| AdapterError::Timeout { after: limit })?
        .map_err(|err| AdapterError::transport(format!("request to {endpoint} failed: {err}")))?;

    let status = response.status();
    let bytes = to_bytes(response.into_body())
        .await
        .map_err(|err| AdapterError::transport(format!("failed to read response: {err}")))?;

    Ok(JsonReply {
        status,
        body: bytes.to_vec(),
    })
}
