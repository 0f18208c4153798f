use skypost_common::smol_str::SmolStr;
use skypost_common::xrpc::{XrpcMethod, XrpcRequest};

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq, bon::Builder)]
#[serde(rename_all = "camelCase")]
#[builder(start_fn = new)]
pub struct ResolveHandle {
    #[builder(into)]
    pub handle: SmolStr,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResolveHandleOutput {
    pub did: SmolStr,
}

impl XrpcRequest for ResolveHandle {
    const NSID: &'static str = "com.atproto.identity.resolveHandle";
    const METHOD: XrpcMethod = XrpcMethod::Query;
    type Output = ResolveHandleOutput;
}
