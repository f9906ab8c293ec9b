//! Framework-side types for bid requests and bid results.

use http::Method;
use serde::{Deserialize, Serialize};

use crate::consent::GdprConsent;

/// Media type of a creative, as understood by the host framework.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Banner,
    Native,
}

/// Requested creative dimensions for one slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdSize {
    pub w: u32,
    pub h: u32,
}

/// Declared media-type configuration for a slot.
///
/// Slots that declare nothing are treated as banner requests; that
/// resolution happens in [`MediaTypeConfig::wants_banner`] as a single
/// explicit rule.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaTypeConfig {
    Banner,
    Native,
    Both,
    #[default]
    Unspecified,
}

impl MediaTypeConfig {
    /// True when the slot should carry a Banner impression object.
    #[must_use]
    pub fn wants_banner(self) -> bool {
        matches!(self, Self::Banner | Self::Both | Self::Unspecified)
    }

    /// True when the slot should carry a Native impression object.
    #[must_use]
    pub fn wants_native(self) -> bool {
        matches!(self, Self::Native | Self::Both)
    }
}

/// Endpoint-specific parameters carried in the slot's parameter bag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotParams {
    /// Publisher account identifier at the endpoint.
    #[serde(default)]
    pub publisher_id: Option<String>,
    /// Regional endpoint prefix, e.g. "prebid-eu".
    #[serde(default)]
    pub region: Option<String>,
    /// Endpoint test-mode flag.
    #[serde(default)]
    pub test: Option<u8>,
}

/// Size constraints accepted either as one `[w, h]` pair or a list of pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeList {
    Single([u32; 2]),
    Many(Vec<[u32; 2]>),
}

impl SizeList {
    /// First pair, if any.
    #[must_use]
    pub fn first(&self) -> Option<(u32, u32)> {
        match self {
            Self::Single([w, h]) => Some((*w, *h)),
            Self::Many(pairs) => pairs.first().map(|[w, h]| (*w, *h)),
        }
    }
}

/// Aspect-ratio constraint for a native image element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AspectRatio {
    #[serde(default)]
    pub min_width: Option<u64>,
    pub ratio_width: u64,
    pub ratio_height: u64,
}

/// Requirements for the native title element.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NativeTitleParams {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub len: Option<u64>,
}

/// Requirements for a native image or icon element.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NativeImageParams {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub sizes: Option<SizeList>,
    #[serde(default)]
    pub aspect_ratios: Option<Vec<AspectRatio>>,
}

/// Requirements for a plain data element (sponsored-by, click-url).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NativeDataParams {
    #[serde(default)]
    pub required: bool,
}

/// Requirements for the native body element.
///
/// Carries both `required` and the legacy `request` flag; the builder
/// consults `request`, not `required`, when emitting the asset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NativeBodyParams {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub request: bool,
    #[serde(default)]
    pub len: Option<u64>,
}

/// Requirements for the call-to-action element.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NativeCtaParams {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub len: Option<u64>,
}

/// Per-asset requirements for a native slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeRequestParams {
    #[serde(default)]
    pub title: Option<NativeTitleParams>,
    #[serde(default)]
    pub image: Option<NativeImageParams>,
    #[serde(default)]
    pub icon: Option<NativeImageParams>,
    #[serde(default)]
    pub sponsored_by: Option<NativeDataParams>,
    #[serde(default)]
    pub body: Option<NativeBodyParams>,
    #[serde(default)]
    pub click_url: Option<NativeDataParams>,
    #[serde(default)]
    pub cta: Option<NativeCtaParams>,
}

/// One ad slot the framework wants bids for.
///
/// Owned by the host framework; read-only to the adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidRequestDescriptor {
    /// Unique bid identifier, echoed back as the impression id.
    pub bid_id: String,
    /// Auction this slot belongs to; shared across the batch.
    pub auction_id: String,
    /// Ad-unit code; becomes the impression `tagid`.
    pub ad_unit_code: String,
    /// Requested creative sizes, in preference order.
    #[serde(default)]
    pub sizes: Vec<AdSize>,
    /// Declared media types for the slot.
    #[serde(default)]
    pub media: MediaTypeConfig,
    /// Native asset requirements; consulted when `media` wants native.
    #[serde(default)]
    pub native_params: Option<NativeRequestParams>,
    /// Endpoint-specific parameter bag.
    #[serde(default)]
    pub params: SlotParams,
}

/// Top-level page information supplied by the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageContext {
    /// Full URL of the page the auction runs on.
    pub page: String,
    /// Origin (scheme + host) of that page.
    pub origin: String,
}

/// Auction-wide context shared by every slot in the batch.
#[derive(Debug, Clone, Default)]
pub struct AuctionContext {
    pub gdpr_consent: Option<GdprConsent>,
    pub page: PageContext,
}

/// Outbound HTTP request descriptor handed to the transport collaborator.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: String,
    pub body: String,
}

/// Image element of a decoded native creative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NativeAdImage {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Decoded native creative returned to the framework.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NativeAd {
    pub click_url: String,
    #[serde(default)]
    pub impression_trackers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<NativeAdImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<NativeAdImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sponsored_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
}

/// Creative payload of a bid result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdPayload {
    /// Raw HTML/JS markup for a banner creative.
    Banner(String),
    /// Decoded native creative.
    Native(NativeAd),
}

/// One bid outcome in the framework's shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidResult {
    /// Correlates back to the originating slot's bid id.
    pub request_id: String,
    pub media_type: MediaType,
    /// Bid price in CPM.
    pub cpm: f64,
    pub creative_id: String,
    pub width: u32,
    pub height: u32,
    pub ttl: u32,
    pub currency: String,
    pub net_revenue: bool,
    pub ad: AdPayload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unspecified_media_config_resolves_to_banner() {
        assert!(MediaTypeConfig::Unspecified.wants_banner());
        assert!(!MediaTypeConfig::Unspecified.wants_native());
    }

    #[test]
    fn both_media_config_wants_banner_and_native() {
        assert!(MediaTypeConfig::Both.wants_banner());
        assert!(MediaTypeConfig::Both.wants_native());
    }

    #[test]
    fn native_media_config_excludes_banner() {
        assert!(!MediaTypeConfig::Native.wants_banner());
        assert!(MediaTypeConfig::Native.wants_native());
    }

    #[test]
    fn size_list_accepts_single_pair() {
        let sizes: SizeList =
            serde_json::from_str("[300, 250]").expect("should parse a bare pair");
        assert_eq!(sizes.first(), Some((300, 250)));
    }

    #[test]
    fn size_list_accepts_list_of_pairs() {
        let sizes: SizeList =
            serde_json::from_str("[[728, 90], [300, 250]]").expect("should parse a pair list");
        assert_eq!(sizes.first(), Some((728, 90)));
    }

    #[test]
    fn descriptor_deserializes_from_camel_case() {
        let descriptor: BidRequestDescriptor = serde_json::from_str(
            r#"{
                "bidId": "b1",
                "auctionId": "a1",
                "adUnitCode": "div-1",
                "sizes": [{"w": 300, "h": 250}],
                "params": {"publisherId": "pub-7", "region": "prebid-eu"}
            }"#,
        )
        .expect("should parse descriptor JSON");

        assert_eq!(descriptor.bid_id, "b1");
        assert_eq!(descriptor.media, MediaTypeConfig::Unspecified);
        assert_eq!(descriptor.params.publisher_id.as_deref(), Some("pub-7"));
        assert!(descriptor.native_params.is_none());
    }

    #[test]
    fn native_params_accept_camel_case_asset_keys() {
        let params: NativeRequestParams = serde_json::from_str(
            r#"{
                "title": {"required": true, "len": 80},
                "sponsoredBy": {"required": true},
                "clickUrl": {"required": false}
            }"#,
        )
        .expect("should parse native params");

        assert!(params.title.as_ref().is_some_and(|t| t.required));
        assert!(params.sponsored_by.is_some());
        assert!(params.click_url.is_some());
        assert!(params.body.is_none());
    }
}
