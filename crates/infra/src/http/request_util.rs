//! The single HTTP transport every service goes through
//!
//! Each call resolves auth headers from the active [`AuthStrategy`],
//! records `{operation, payload}` in an in-memory transcript, sends the
//! request and decodes a typed response. Any status other than 200 is an
//! error carrying the status code and body.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use reqwest::blocking::multipart::Form;
use reqwest::blocking::Response;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, instrument};
use vectara_core::AuthStrategy;
use vectara_domain::{ClientSettings, Result, UploadDocumentResponse, VectaraError};

use super::client::HttpClient;
use super::upload::FileSource;
use crate::errors::InfraError;

const JSON_MIME: &str = "application/json";
const UPLOAD_FILE_FIELD: &str = "file";

/// One recorded outbound call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub operation: String,
    pub payload: Value,
}

/// Authenticated JSON and multipart transport with a call transcript.
///
/// Safe to share across threads; the transcript is appended under a lock
/// so entries are ordered by the time each call started.
pub struct RequestUtil {
    http: HttpClient,
    base_url: String,
    auth: Arc<dyn AuthStrategy>,
    transcript: Mutex<Vec<TranscriptEntry>>,
}

impl RequestUtil {
    pub fn new(auth: Arc<dyn AuthStrategy>, settings: &ClientSettings) -> Result<Self> {
        let http = HttpClient::builder().timeout(settings.timeout).build()?;
        Ok(Self::with_client(http, &settings.base_url, auth))
    }

    pub fn with_client(http: HttpClient, base_url: &str, auth: Arc<dyn AuthStrategy>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
            transcript: Mutex::new(Vec::new()),
        }
    }

    /// URL of an operation, e.g. `{base}/list-corpora`
    pub fn endpoint(&self, operation: &str) -> String {
        format!("{}/{}", self.base_url, operation.trim_start_matches('/'))
    }

    pub fn auth_type(&self) -> &'static str {
        self.auth.auth_type()
    }

    /// Send `payload` as JSON to `operation` and decode the response.
    ///
    /// A `GET` carries no body; its payload is only recorded in the
    /// transcript.
    ///
    /// # Errors
    ///
    /// - [`VectaraError::Transport`] when the host cannot be reached
    /// - [`VectaraError::Api`] / [`VectaraError::Authorization`] on any
    ///   status other than 200
    /// - [`VectaraError::ResponseDecode`] when a 200 body does not match `R`
    /// - whatever the auth strategy returns while resolving headers
    #[instrument(skip(self, payload), fields(operation = %operation, method = %method))]
    pub fn request<P, R>(&self, operation: &str, payload: &P, method: Method) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(payload).map_err(|err| {
            VectaraError::InvalidArgument(format!("payload for [{operation}] is not serializable: {err}"))
        })?;
        self.record(operation, body.clone());

        let mut headers = self.auth_headers()?;
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_MIME));
        let sends_body = method != Method::GET;
        if sends_body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_MIME));
        }

        let url = self.endpoint(operation);
        info!(%url, "Sending request");
        let mut builder = self.http.request(method, &url).headers(headers);
        if sends_body {
            builder = builder.json(&body);
        }
        let response = self.http.send(builder)?;

        decode_response(operation, response)
    }

    /// [`RequestUtil::request`] with `POST`
    pub fn post<P, R>(&self, operation: &str, payload: &P) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request(operation, payload, Method::POST)
    }

    /// Upload a file as the `file` field of a multipart POST.
    ///
    /// `fields` are sent as extra text fields; `headers` are merged under the
    /// auth headers. The file is streamed, never buffered whole.
    #[instrument(skip(self, source, fields, headers), fields(operation = %operation))]
    pub fn multipart_post(
        &self,
        operation: &str,
        source: FileSource,
        fields: &BTreeMap<String, String>,
        headers: &BTreeMap<String, String>,
    ) -> Result<UploadDocumentResponse> {
        let file_name = source.file_name();
        self.record(
            operation,
            serde_json::json!({ "file": file_name.clone(), "fields": fields }),
        );

        let mut header_map = to_header_map(headers)?;
        header_map.extend(self.auth_headers()?);
        header_map.insert(ACCEPT, HeaderValue::from_static(JSON_MIME));

        let mut form = Form::new();
        for (name, value) in fields {
            form = form.text(name.clone(), value.clone());
        }
        form = form.part(UPLOAD_FILE_FIELD, source.into_part()?);

        let url = self.endpoint(operation);
        info!(%url, file = %file_name, "Sending multipart upload");
        let builder = self
            .http
            .request(Method::POST, &url)
            .query(&fields.iter().collect::<Vec<_>>())
            .headers(header_map)
            .multipart(form);
        let response = self.http.send(builder)?;

        decode_response(operation, response)
    }

    /// Every call recorded so far, oldest first
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.transcript.lock().clone()
    }

    pub fn clear_transcript(&self) {
        self.transcript.lock().clear();
    }

    fn record(&self, operation: &str, payload: Value) {
        self.transcript.lock().push(TranscriptEntry { operation: operation.to_string(), payload });
    }

    fn auth_headers(&self) -> Result<HeaderMap> {
        let headers = self.auth.headers()?;
        debug!(auth_type = self.auth.auth_type(), names = ?headers.keys().collect::<Vec<_>>(), "Resolved auth headers");
        to_header_map(&headers)
    }
}

fn to_header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
            VectaraError::InvalidArgument(format!("invalid header name [{name}]"))
        })?;
        let mut header_value = HeaderValue::from_str(value).map_err(|_| {
            VectaraError::InvalidArgument(format!("invalid value for header [{name}]"))
        })?;
        header_value.set_sensitive(true);
        map.insert(header_name, header_value);
    }
    Ok(map)
}

fn decode_response<R: DeserializeOwned>(operation: &str, response: Response) -> Result<R> {
    let status = response.status();
    let body = response.text().map_err(InfraError::from)?;

    if status != StatusCode::OK {
        error!(operation, status = status.as_u16(), "Received non 200 response");
        return Err(VectaraError::from_status(status.as_u16(), body));
    }

    serde_json::from_str(&body).map_err(|err| VectaraError::ResponseDecode {
        operation: operation.to_string(),
        message: err.to_string(),
    })
}
