//! Validation, request building, and response interpretation for the
//! creativecdn bidding endpoint.
//!
//! Three pure transforms, invoked once per auction round:
//!
//! 1. [`is_bid_request_valid`] filters slots that carry the configuration
//!    the endpoint requires.
//! 2. [`build_bid_request`] turns the surviving slots into one outbound
//!    POST descriptor with an OpenRTB JSON body.
//! 3. [`interpret_response`] turns the endpoint's parsed response body
//!    back into framework bid results.

use error_stack::{Report, ResultExt};
use http::Method;
use serde_json::Value;

use crate::consent::normalize_consent_string;
use crate::constants::{
    BID_CURRENCY, BID_TTL_SECONDS, ENDPOINT_PATH, NATIVE_VERSION, SUPPORTED_REGIONS,
};
use crate::error::AdapterError;
use crate::native::{decode_native_assets, map_native_assets};
use crate::openrtb::{
    Banner, BidRequest, Format, Imp, Native, NativeMarkup, NativeRequest, Publisher, Regs,
    RegsExt, ServerBid, Site, User, UserExt,
};
use crate::types::{
    AdPayload, AuctionContext, BidRequestDescriptor, BidResult, MediaType, NativeAd,
    OutboundRequest, PageContext,
};

/// Prefix that marks a native creative in a bid's ad markup.
const NATIVE_ADM_PREFIX: &str = "{\"native";

/// Publisher id sent when the batch carries no descriptors.
const UNKNOWN_PUBLISHER: &str = "unknown";

/// Whether a slot is eligible for the endpoint.
///
/// Requires a supported region and a non-empty publisher id; everything
/// else is the builder's concern. Ineligible slots are a filtering
/// decision, not an error.
#[must_use]
pub fn is_bid_request_valid(slot: &BidRequestDescriptor) -> bool {
    let region_ok = slot
        .params
        .region
        .as_deref()
        .is_some_and(|region| SUPPORTED_REGIONS.contains(&region));
    let publisher_ok = slot
        .params
        .publisher_id
        .as_deref()
        .is_some_and(|id| !id.is_empty());
    region_ok && publisher_ok
}

/// Build one outbound request covering the whole batch of valid slots.
///
/// One impression per slot, input order preserved. Consent extensions are
/// added only when the context says GDPR applies.
///
/// # Errors
///
/// Returns an error when the batch is empty, when the first slot carries
/// no region, when a banner slot has no sizes, or when a native slot has
/// no native parameters.
pub fn build_bid_request(
    slots: &[BidRequestDescriptor],
    ctx: &AuctionContext,
) -> Result<OutboundRequest, Report<AdapterError>> {
    let Some(first) = slots.first() else {
        return Err(Report::new(AdapterError::EmptyBatch));
    };
    let region = first.params.region.as_deref().ok_or_else(|| {
        Report::new(AdapterError::InvalidSlot {
            message: format!("slot {} has no region", first.bid_id),
        })
    })?;

    let imp = slots
        .iter()
        .map(map_impression)
        .collect::<Result<Vec<_>, _>>()?;

    let mut request = BidRequest {
        id: first.auction_id.clone(),
        imp,
        site: map_site(slots, &ctx.page),
        cur: vec![BID_CURRENCY.to_string()],
        test: first.params.test.unwrap_or(0),
        regs: None,
        user: None,
    };

    if let Some(consent) = ctx.gdpr_consent.as_ref().filter(|c| c.gdpr_applies) {
        let consent_str = consent
            .consent_string
            .as_deref()
            .map(normalize_consent_string)
            .unwrap_or_default();
        request.regs = Some(Regs {
            ext: RegsExt { gdpr: 1 },
        });
        request.user = Some(User {
            ext: UserExt {
                consent: consent_str,
            },
        });
    }

    let body =
        serde_json::to_string(&request).change_context(AdapterError::Serialization {
            message: "bid request did not serialize".to_string(),
        })?;

    log::debug!(
        "Built bid request for auction {} with {} impressions",
        request.id,
        request.imp.len()
    );

    Ok(OutboundRequest {
        method: Method::POST,
        url: build_endpoint_url(region),
        body,
    })
}

/// Interpret the endpoint's parsed response body as a list of bid results.
///
/// Anything that is not a JSON array yields an empty list. Zero-priced
/// bids are the endpoint's no-bid sentinel and are dropped. Bids that fail
/// to decode are skipped with a warning; the rest of the batch is still
/// returned.
#[must_use]
pub fn interpret_response(body: &Value) -> Vec<BidResult> {
    let Some(entries) = body.as_array() else {
        return Vec::new();
    };

    let mut results = Vec::with_capacity(entries.len());
    for entry in entries {
        let bid: ServerBid = match serde_json::from_value(entry.clone()) {
            Ok(bid) => bid,
            Err(err) => {
                log::warn!("Skipping undecodable bid entry: {err}");
                continue;
            }
        };
        if bid.price == 0.0 {
            continue;
        }
        if bid.adm.starts_with(NATIVE_ADM_PREFIX) {
            match interpret_native_bid(&bid) {
                Ok(result) => results.push(result),
                Err(err) => {
                    log::warn!("Skipping native bid for imp {}: {err:?}", bid.impid);
                }
            }
        } else {
            results.push(interpret_banner_bid(&bid));
        }
    }
    results
}

fn build_endpoint_url(region: &str) -> String {
    format!("https://{region}.{ENDPOINT_PATH}")
}

fn map_impression(slot: &BidRequestDescriptor) -> Result<Imp, Report<AdapterError>> {
    Ok(Imp {
        id: slot.bid_id.clone(),
        banner: map_banner(slot)?,
        native: map_native(slot)?,
        tagid: slot.ad_unit_code.clone(),
    })
}

fn map_banner(slot: &BidRequestDescriptor) -> Result<Option<Banner>, Report<AdapterError>> {
    if !slot.media.wants_banner() {
        return Ok(None);
    }
    let Some(first) = slot.sizes.first() else {
        return Err(Report::new(AdapterError::InvalidSlot {
            message: format!("banner slot {} has no sizes", slot.bid_id),
        }));
    };
    Ok(Some(Banner {
        w: first.w,
        h: first.h,
        format: slot
            .sizes
            .iter()
            .map(|size| Format {
                w: size.w,
                h: size.h,
            })
            .collect(),
    }))
}

fn map_native(slot: &BidRequestDescriptor) -> Result<Option<Native>, Report<AdapterError>> {
    if !slot.media.wants_native() {
        return Ok(None);
    }
    let Some(params) = slot.native_params.as_ref() else {
        return Err(Report::new(AdapterError::InvalidSlot {
            message: format!("native slot {} has no native parameters", slot.bid_id),
        }));
    };
    Ok(Some(Native {
        request: NativeRequest {
            assets: map_native_assets(params),
        },
        ver: NATIVE_VERSION.to_string(),
    }))
}

fn map_site(slots: &[BidRequestDescriptor], page: &PageContext) -> Site {
    let publisher_id = slots
        .first()
        .and_then(|slot| slot.params.publisher_id.clone())
        .unwrap_or_else(|| UNKNOWN_PUBLISHER.to_string());
    Site {
        publisher: Publisher { id: publisher_id },
        page: page.page.clone(),
        name: page.origin.clone(),
    }
}

fn interpret_banner_bid(bid: &ServerBid) -> BidResult {
    BidResult {
        request_id: bid.impid.clone(),
        media_type: MediaType::Banner,
        cpm: bid.price,
        creative_id: bid.adid.clone().unwrap_or_default(),
        width: bid.w,
        height: bid.h,
        ttl: BID_TTL_SECONDS,
        currency: BID_CURRENCY.to_string(),
        net_revenue: true,
        ad: AdPayload::Banner(bid.adm.clone()),
    }
}

fn interpret_native_bid(bid: &ServerBid) -> Result<BidResult, Report<AdapterError>> {
    let markup: NativeMarkup =
        serde_json::from_str(&bid.adm).change_context(AdapterError::MalformedResponse {
            message: "native ad markup is not valid JSON".to_string(),
        })?;

    let native = markup.native;
    let mut ad = NativeAd {
        click_url: urlencoding::encode(&native.link.url).into_owned(),
        // Trackers pass through verbatim; only asset URLs and the click
        // URL are percent-encoded.
        impression_trackers: native.imptrackers.clone(),
        ..NativeAd::default()
    };
    decode_native_assets(&native.assets, &mut ad);

    Ok(BidResult {
        request_id: bid.impid.clone(),
        media_type: MediaType::Native,
        cpm: bid.price,
        creative_id: bid.adid.clone().unwrap_or_default(),
        // Native creatives have no inherent pixel size.
        width: 1,
        height: 1,
        ttl: BID_TTL_SECONDS,
        currency: BID_CURRENCY.to_string(),
        net_revenue: true,
        ad: AdPayload::Native(ad),
    })
}
