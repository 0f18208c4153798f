use std::collections::BTreeMap;

use skypost_common::smol_str::SmolStr;
use skypost_common::xrpc::{XrpcMethod, XrpcRequest};

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq, bon::Builder)]
#[serde(rename_all = "camelCase")]
#[builder(start_fn = new)]
pub struct CreateRecord<R> {
    #[builder(into)]
    pub repo: SmolStr,
    #[builder(into)]
    pub collection: SmolStr,
    #[serde(skip_serializing_if = "std::option::Option::is_none")]
    #[builder(into)]
    pub rkey: std::option::Option<SmolStr>,
    #[serde(skip_serializing_if = "std::option::Option::is_none")]
    pub validate: std::option::Option<bool>,
    pub record: R,
}

/// Server answer to `createRecord`. Fields beyond `uri`/`cid` (commit
/// metadata, validation status) are kept as-is for display.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordOutput {
    pub uri: SmolStr,
    pub cid: SmolStr,
    #[serde(flatten)]
    pub extra_data: BTreeMap<SmolStr, serde_json::Value>,
}

impl<R: serde::Serialize> XrpcRequest for CreateRecord<R> {
    const NSID: &'static str = "com.atproto.repo.createRecord";
    const METHOD: XrpcMethod = XrpcMethod::Procedure("application/json");
    type Output = CreateRecordOutput;
}
