use std::future::Future;

use http::StatusCode;
use miette::Diagnostic;
use skypost_api::com_atproto::identity::resolve_handle::ResolveHandle;
use skypost_common::error::ClientError;
use skypost_common::http_client::HttpClient;
use smol_str::SmolStr;
use thiserror::Error;

use crate::client::Agent;

/// Errors that abort handle resolution.
///
/// An authoritative "no such handle" is not one of these: resolvers report it
/// as `Ok(None)`.
#[derive(Debug, Error, Diagnostic)]
pub enum IdentityError {
    /// The lookup failed for a reason other than the handle not resolving
    #[error("failed to resolve handle @{handle}")]
    #[diagnostic(
        code(skypost::identity::lookup),
        help("the PDS could not be reached or answered with an unexpected response")
    )]
    Lookup {
        /// Handle being resolved
        handle: SmolStr,
        /// Underlying client error
        #[source]
        #[diagnostic_source]
        source: ClientError,
    },
}

/// Resolves handles to DIDs.
pub trait IdentityResolver {
    /// Resolve a handle (without the leading `@`).
    ///
    /// `Ok(None)` means the server authoritatively said the handle doesn't
    /// resolve; callers treat the mention as plain text.
    fn resolve_handle(
        &self,
        handle: &str,
    ) -> impl Future<Output = Result<Option<SmolStr>, IdentityError>> + Send
    where
        Self: Sync;
}

impl<C: HttpClient + Sync> IdentityResolver for Agent<C> {
    #[tracing::instrument(level = "debug", skip_all, fields(handle = %handle))]
    async fn resolve_handle(&self, handle: &str) -> Result<Option<SmolStr>, IdentityError> {
        let request = ResolveHandle::new().handle(handle).build();
        match self.send(&request).await {
            Ok(output) => Ok(Some(output.did)),
            // 400 is the server's answer for a handle it can't resolve
            Err(e) if e.status() == Some(StatusCode::BAD_REQUEST) => {
                tracing::debug!("handle did not resolve, leaving as plain text");
                Ok(None)
            }
            Err(source) => Err(IdentityError::Lookup {
                handle: SmolStr::new(handle),
                source,
            }),
        }
    }
}
