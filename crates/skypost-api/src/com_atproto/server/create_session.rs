use std::fmt;

use skypost_common::smol_str::SmolStr;
use skypost_common::xrpc::{XrpcMethod, XrpcRequest};

#[derive(serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, bon::Builder)]
#[serde(rename_all = "camelCase")]
#[builder(start_fn = new)]
pub struct CreateSession {
    #[builder(into)]
    pub identifier: SmolStr,
    #[builder(into)]
    pub password: SmolStr,
    #[serde(skip_serializing_if = "std::option::Option::is_none")]
    #[builder(into)]
    pub auth_factor_token: std::option::Option<SmolStr>,
}

impl fmt::Debug for CreateSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateSession")
            .field("identifier", &self.identifier)
            .field("password", &"<redacted>")
            .finish_non_exhaustive()
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionOutput {
    pub access_jwt: SmolStr,
    #[serde(default, skip_serializing_if = "std::option::Option::is_none")]
    pub refresh_jwt: std::option::Option<SmolStr>,
    pub did: SmolStr,
    pub handle: SmolStr,
    #[serde(default, skip_serializing_if = "std::option::Option::is_none")]
    pub active: std::option::Option<bool>,
}

impl XrpcRequest for CreateSession {
    const NSID: &'static str = "com.atproto.server.createSession";
    const METHOD: XrpcMethod = XrpcMethod::Procedure("application/json");
    type Output = CreateSessionOutput;
}
