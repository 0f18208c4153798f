//! Stateless XRPC plumbing: typed requests, HTTP request construction and
//! response processing.
//!
//! Every endpoint the client calls is described by a type implementing
//! [`XrpcRequest`]. The request type knows its NSID, whether it's a query
//! (GET, parameters in the query string) or a procedure (POST, encoded body),
//! and which output schema the response decodes into. Decoding fails closed:
//! a response that doesn't match the schema is a [`DecodeError`], never a
//! panic.

use http::{
    HeaderValue, Request,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::AuthorizationToken;
use crate::error::{ClientError, DecodeError, HttpError, TransportError, XrpcResult};
use crate::http_client::HttpClient;

/// Error type for encoding XRPC requests
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum EncodeError {
    /// Failed to serialize query parameters
    #[error("Failed to serialize query: {0}")]
    Query(
        #[from]
        #[source]
        serde_html_form::ser::Error,
    ),
    /// Failed to serialize JSON body
    #[error("Failed to serialize JSON: {0}")]
    Json(
        #[from]
        #[source]
        serde_json::Error,
    ),
}

/// XRPC method type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XrpcMethod {
    /// Query (HTTP GET)
    Query,
    /// Procedure (HTTP POST) with its default body encoding
    Procedure(&'static str),
}

impl XrpcMethod {
    /// Get the HTTP method
    pub fn http_method(&self) -> http::Method {
        match self {
            Self::Query => http::Method::GET,
            Self::Procedure(_) => http::Method::POST,
        }
    }

    /// Get the body encoding type for this method (procedures only)
    pub const fn body_encoding(&self) -> Option<&'static str> {
        match self {
            Self::Query => None,
            Self::Procedure(enc) => Some(enc),
        }
    }
}

/// Trait for XRPC request types (queries and procedures)
///
/// Query parameters are produced by serializing the request with
/// `serde_html_form`; procedure bodies by [`XrpcRequest::encode_body`].
pub trait XrpcRequest: Serialize {
    /// The NSID for this XRPC method
    const NSID: &'static str;

    /// XRPC method (query/GET or procedure/POST)
    const METHOD: XrpcMethod;

    /// Output schema the success body decodes into
    type Output: DeserializeOwned;

    /// Encode the request body for procedures.
    ///
    /// Default implementation serializes to JSON. Override for raw bodies.
    fn encode_body(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Content type of the encoded body.
    ///
    /// Defaults to the method's encoding; raw uploads override it per request.
    fn content_type(&self) -> Option<&str> {
        Self::METHOD.body_encoding()
    }
}

/// Per-request options for XRPC calls.
#[derive(Debug, Default, Clone)]
pub struct CallOptions {
    /// Optional Authorization to apply.
    pub auth: Option<AuthorizationToken>,
}

/// Build an HTTP request for an XRPC call given base URL and options
pub fn build_http_request<R>(
    base: &Url,
    req: &R,
    opts: &CallOptions,
) -> XrpcResult<Request<Vec<u8>>>
where
    R: XrpcRequest,
{
    let mut url = base.clone();
    let mut path = url.path().trim_end_matches('/').to_owned();
    path.push_str("/xrpc/");
    path.push_str(R::NSID);
    url.set_path(&path);

    if let XrpcMethod::Query = R::METHOD {
        let qs = serde_html_form::to_string(req).map_err(EncodeError::from)?;
        if !qs.is_empty() {
            url.set_query(Some(&qs));
        } else {
            url.set_query(None);
        }
    }

    let mut builder = Request::builder()
        .method(R::METHOD.http_method())
        .uri(url.as_str())
        .header(ACCEPT, "application/json");

    if let Some(content_type) = req.content_type() {
        builder = builder.header(CONTENT_TYPE, content_type);
    }

    if let Some(AuthorizationToken::Bearer(token)) = &opts.auth {
        let hv = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| crate::error::AuthError::InvalidToken)?;
        builder = builder.header(AUTHORIZATION, hv);
    }

    let body = if let XrpcMethod::Procedure(_) = R::METHOD {
        req.encode_body()?
    } else {
        vec![]
    };

    builder
        .body(body)
        .map_err(|e| TransportError::InvalidRequest(e.to_string()).into())
}

/// Process the HTTP response from the server into the request's output type.
///
/// Any non-2xx status becomes [`HttpError`] carrying the status and body, so
/// callers can tell an authoritative rejection from a transport failure.
pub fn process_response<R>(http_response: http::Response<Vec<u8>>) -> XrpcResult<R::Output>
where
    R: XrpcRequest,
{
    let status = http_response.status();
    let body = http_response.into_body();

    if !status.is_success() {
        return Err(HttpError {
            status,
            body: Some(body.into()),
        }
        .into());
    }

    serde_json::from_slice(&body)
        .map_err(DecodeError::from)
        .map_err(ClientError::from)
}

/// Extension for stateless XRPC calls on any `HttpClient`.
///
/// ```no_run
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// use skypost_common::xrpc::XrpcExt;
///
/// let http = reqwest::Client::new();
/// let base = url::Url::parse("https://bsky.social")?;
/// let call = http.xrpc(base);
/// // let output = call.send(&request).await?;
/// # Ok(())
/// # }
/// ```
pub trait XrpcExt: HttpClient {
    /// Start building an XRPC call for the given base URL.
    fn xrpc(&self, base: Url) -> XrpcCall<'_, Self>
    where
        Self: Sized,
    {
        XrpcCall {
            client: self,
            base,
            opts: CallOptions::default(),
        }
    }
}

impl<T: HttpClient> XrpcExt for T {}

/// Stateless XRPC call builder.
pub struct XrpcCall<'a, C: HttpClient> {
    client: &'a C,
    base: Url,
    opts: CallOptions,
}

impl<'a, C: HttpClient> XrpcCall<'a, C> {
    /// Apply Authorization to this call.
    pub fn auth(mut self, token: AuthorizationToken) -> Self {
        self.opts.auth = Some(token);
        self
    }

    /// Send the given typed XRPC request and decode its output.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip(self, request), fields(nsid = R::NSID)))]
    pub async fn send<R>(self, request: &R) -> XrpcResult<R::Output>
    where
        R: XrpcRequest + Sync,
    {
        let http_request = build_http_request(&self.base, request, &self.opts)?;

        let http_response = self
            .client
            .send_http(http_request)
            .await
            .map_err(TransportError::from_client_error)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(status = %http_response.status(), "xrpc response");

        process_response::<R>(http_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use smol_str::SmolStr;

    #[derive(Serialize)]
    struct Lookup {
        handle: SmolStr,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct LookupOutput {
        did: SmolStr,
    }

    impl XrpcRequest for Lookup {
        const NSID: &'static str = "com.example.lookup";
        const METHOD: XrpcMethod = XrpcMethod::Query;
        type Output = LookupOutput;
    }

    #[derive(Serialize)]
    struct Submit {
        text: SmolStr,
    }

    impl XrpcRequest for Submit {
        const NSID: &'static str = "com.example.submit";
        const METHOD: XrpcMethod = XrpcMethod::Procedure("application/json");
        type Output = LookupOutput;
    }

    fn base() -> Url {
        Url::parse("https://pds.example/").unwrap()
    }

    #[test]
    fn query_parameters_go_in_the_url() {
        let req = Lookup {
            handle: "alice.bsky.social".into(),
        };
        let request = build_http_request(&base(), &req, &CallOptions::default()).unwrap();
        assert_eq!(request.method(), http::Method::GET);
        assert_eq!(
            request.uri().to_string(),
            "https://pds.example/xrpc/com.example.lookup?handle=alice.bsky.social"
        );
        assert!(request.body().is_empty());
        assert!(request.headers().get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn procedures_carry_json_body_and_bearer() {
        let req = Submit {
            text: "hi".into(),
        };
        let opts = CallOptions {
            auth: Some(AuthorizationToken::Bearer("tok".into())),
        };
        let request = build_http_request(&base(), &req, &opts).unwrap();
        assert_eq!(request.method(), http::Method::POST);
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer tok");
        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(request.body().as_slice(), br#"{"text":"hi"}"#);
    }

    #[test]
    fn non_success_status_is_http_error() {
        let resp = http::Response::builder()
            .status(400)
            .body(br#"{"error":"InvalidRequest"}"#.to_vec())
            .unwrap();
        let err = process_response::<Lookup>(resp).unwrap_err();
        assert_eq!(err.status(), Some(http::StatusCode::BAD_REQUEST));
    }

    #[test]
    fn missing_fields_fail_closed() {
        let resp = http::Response::builder()
            .status(200)
            .body(br#"{"handle":"alice"}"#.to_vec())
            .unwrap();
        let err = process_response::<Lookup>(resp).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn success_decodes_output() {
        let resp = http::Response::builder()
            .status(200)
            .body(br#"{"did":"did:plc:alice"}"#.to_vec())
            .unwrap();
        let out = process_response::<Lookup>(resp).unwrap();
        assert_eq!(out.did, "did:plc:alice");
    }
}
