use skypost_common::smol_str::SmolStr;

/// A URI with a content-hash fingerprint.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct StrongRef {
    pub uri: SmolStr,
    pub cid: SmolStr,
}
