//! Minimal subset of OpenRTB 2.x (plus Native 1.1) spoken by the
//! creativecdn bidding endpoint.
//!
//! The endpoint accepts a closed dialect: banner and native impressions
//! only, a `site` block, a currency list, and optional consent extensions.
//! Optional fields are omitted from the serialized payload entirely rather
//! than sent as null.

use serde::{Deserialize, Serialize};

/// Outbound bid request covering one batch of slots.
#[derive(Debug, Serialize, Deserialize)]
pub struct BidRequest {
    /// Auction identifier shared by every slot in the batch.
    pub id: String,
    pub imp: Vec<Imp>,
    pub site: Site,
    pub cur: Vec<String>,
    pub test: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regs: Option<Regs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// One ad-slot opportunity within the request.
#[derive(Debug, Serialize, Deserialize)]
pub struct Imp {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<Banner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native: Option<Native>,
    pub tagid: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Banner {
    pub w: u32,
    pub h: u32,
    pub format: Vec<Format>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Format {
    pub w: u32,
    pub h: u32,
}

/// Native impression; the endpoint takes the request as a JSON object.
#[derive(Debug, Serialize, Deserialize)]
pub struct Native {
    pub request: NativeRequest,
    pub ver: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NativeRequest {
    pub assets: Vec<Asset>,
}

/// One requested native element; exactly one payload field is set.
#[derive(Debug, Serialize, Deserialize)]
pub struct Asset {
    pub id: u64,
    pub required: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<TitleAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<ImageAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<DataAsset>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TitleAsset {
    pub len: u64,
}

/// Image constraints. `hmin` keeps fractional precision.
#[derive(Debug, Serialize, Deserialize)]
pub struct ImageAsset {
    #[serde(rename = "type")]
    pub image_type: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wmin: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hmin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DataAsset {
    #[serde(rename = "type")]
    pub data_type: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub len: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Site {
    pub publisher: Publisher,
    pub page: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Publisher {
    pub id: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Regs {
    pub ext: RegsExt,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RegsExt {
    pub gdpr: u8,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct User {
    pub ext: UserExt,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UserExt {
    pub consent: String,
}

/// One bid as returned by the endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerBid {
    pub impid: String,
    pub price: f64,
    #[serde(default)]
    pub adid: Option<String>,
    pub adm: String,
    #[serde(default)]
    pub w: u32,
    #[serde(default)]
    pub h: u32,
}

/// Native 1.1 markup envelope carried in a native bid's `adm`.
#[derive(Debug, Deserialize)]
pub struct NativeMarkup {
    pub native: NativeAdMarkup,
}

#[derive(Debug, Deserialize)]
pub struct NativeAdMarkup {
    pub link: NativeLink,
    #[serde(default)]
    pub imptrackers: Vec<String>,
    #[serde(default)]
    pub assets: Vec<MarkupAsset>,
}

#[derive(Debug, Deserialize)]
pub struct NativeLink {
    pub url: String,
}

/// One returned native element, keyed by its numeric asset id.
#[derive(Debug, Deserialize)]
pub struct MarkupAsset {
    pub id: u64,
    #[serde(default)]
    pub title: Option<MarkupTitle>,
    #[serde(default)]
    pub img: Option<MarkupImage>,
    #[serde(default)]
    pub data: Option<MarkupData>,
}

#[derive(Debug, Deserialize)]
pub struct MarkupTitle {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct MarkupImage {
    pub url: String,
    #[serde(default)]
    pub w: Option<u32>,
    #[serde(default)]
    pub h: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct MarkupData {
    pub value: String,
}
