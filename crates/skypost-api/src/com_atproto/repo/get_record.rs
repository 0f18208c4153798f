use skypost_common::smol_str::SmolStr;
use skypost_common::types::RecordLocator;
use skypost_common::xrpc::{XrpcMethod, XrpcRequest};

use super::strong_ref::StrongRef;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq, bon::Builder)]
#[serde(rename_all = "camelCase")]
#[builder(start_fn = new)]
pub struct GetRecord {
    #[builder(into)]
    pub repo: SmolStr,
    #[builder(into)]
    pub collection: SmolStr,
    #[builder(into)]
    pub rkey: SmolStr,
    #[serde(skip_serializing_if = "std::option::Option::is_none")]
    #[builder(into)]
    pub cid: std::option::Option<SmolStr>,
}

impl From<&RecordLocator> for GetRecord {
    fn from(locator: &RecordLocator) -> Self {
        GetRecord::new()
            .repo(locator.repo.clone())
            .collection(locator.collection.clone())
            .rkey(locator.rkey.clone())
            .build()
    }
}

/// A fetched record. `value` is schema-less here; callers decode the parts
/// they need.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GetRecordOutput {
    pub uri: SmolStr,
    pub cid: SmolStr,
    pub value: serde_json::Value,
}

impl GetRecordOutput {
    pub fn strong_ref(&self) -> StrongRef {
        StrongRef {
            uri: self.uri.clone(),
            cid: self.cid.clone(),
        }
    }
}

impl XrpcRequest for GetRecord {
    const NSID: &'static str = "com.atproto.repo.getRecord";
    const METHOD: XrpcMethod = XrpcMethod::Query;
    type Output = GetRecordOutput;
}
