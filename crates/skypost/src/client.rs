use std::fmt;

use skypost_api::com_atproto::server::create_session::{CreateSession, CreateSessionOutput};
use skypost_common::AuthorizationToken;
use skypost_common::error::{AuthError, XrpcResult};
use skypost_common::http_client::HttpClient;
use skypost_common::xrpc::{XrpcExt, XrpcRequest};
use smol_str::SmolStr;
use url::Url;

/// Session obtained from `com.atproto.server.createSession`.
#[derive(Clone, PartialEq, Eq)]
pub struct AtpSession {
    /// Access token sent as `Authorization: Bearer`
    pub access_jwt: SmolStr,
    /// Account DID, the repository new records are written to
    pub did: SmolStr,
    /// Account handle
    pub handle: SmolStr,
}

impl fmt::Debug for AtpSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtpSession")
            .field("access_jwt", &"<redacted>")
            .field("did", &self.did)
            .field("handle", &self.handle)
            .finish()
    }
}

impl From<CreateSessionOutput> for AtpSession {
    fn from(output: CreateSessionOutput) -> Self {
        Self {
            access_jwt: output.access_jwt,
            did: output.did,
            handle: output.handle,
        }
    }
}

/// XRPC agent bound to one PDS.
///
/// Holds the injected HTTP client, the PDS base URL and, after
/// [`login`](Agent::login), the session whose access token authorizes
/// uploads and record creation.
pub struct Agent<C: HttpClient> {
    http: C,
    base: Url,
    session: Option<AtpSession>,
}

impl<C: HttpClient> Agent<C> {
    /// Create an unauthenticated agent for the PDS at `base`.
    pub fn new(http: C, base: Url) -> Self {
        Self {
            http,
            base,
            session: None,
        }
    }

    /// Current session, if logged in
    pub fn session(&self) -> Option<&AtpSession> {
        self.session.as_ref()
    }
}

impl<C: HttpClient + Sync> Agent<C> {
    /// Log in with an identifier (handle, DID or email) and password.
    ///
    /// On success the session is installed on the agent and a copy returned.
    #[tracing::instrument(level = "info", skip_all, fields(identifier = %identifier.as_ref()))]
    pub async fn login(
        &mut self,
        identifier: impl AsRef<str>,
        password: impl AsRef<str>,
    ) -> XrpcResult<AtpSession> {
        let request = CreateSession::new()
            .identifier(identifier.as_ref())
            .password(password.as_ref())
            .build();
        let session = AtpSession::from(self.send(&request).await?);
        tracing::info!(did = %session.did, handle = %session.handle, "logged in");
        self.session = Some(session.clone());
        Ok(session)
    }

    /// Send an XRPC request without authorization.
    pub async fn send<R>(&self, request: &R) -> XrpcResult<R::Output>
    where
        R: XrpcRequest + Sync,
    {
        self.http.xrpc(self.base.clone()).send(request).await
    }

    /// Send an XRPC request authorized with the session's access token.
    ///
    /// Fails with [`AuthError::NotAuthenticated`] before touching the network
    /// if there is no session.
    pub async fn send_authed<R>(&self, request: &R) -> XrpcResult<R::Output>
    where
        R: XrpcRequest + Sync,
    {
        let session = self.session.as_ref().ok_or(AuthError::NotAuthenticated)?;
        self.http
            .xrpc(self.base.clone())
            .auth(AuthorizationToken::Bearer(session.access_jwt.clone()))
            .send(request)
            .await
    }

    /// DID of the logged-in account.
    pub(crate) fn session_did(&self) -> XrpcResult<SmolStr> {
        self.session
            .as_ref()
            .map(|s| s.did.clone())
            .ok_or_else(|| AuthError::NotAuthenticated.into())
    }
}
