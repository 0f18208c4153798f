use skypost_common::smol_str::SmolStr;
use skypost_common::types::BlobRef;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Images {
    pub images: Vec<Image>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Alt text description of the image, for accessibility.
    pub alt: SmolStr,
    pub image: BlobRef,
}
