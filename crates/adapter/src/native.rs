//! Native-asset vocabulary shared by the encode and decode paths.
//!
//! [`AssetId`] is the single source of truth for the numeric asset ids
//! agreed with the endpoint: request construction emits them and response
//! decoding matches on them, so the two directions cannot drift apart.

use crate::openrtb::{Asset, DataAsset, ImageAsset, MarkupAsset, MarkupImage, TitleAsset};
use crate::types::{NativeAd, NativeAdImage, NativeImageParams, NativeRequestParams, SizeList};

/// Numeric asset ids agreed with the endpoint (OpenRTB Native 1.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetId {
    Title = 1,
    Image = 2,
    Icon = 3,
    Body = 4,
    Sponsored = 5,
    ClickUrl = 6,
    Cta = 7,
}

impl AssetId {
    /// Numeric wire id.
    #[must_use]
    pub fn id(self) -> u64 {
        self as u64
    }

    /// Reverse lookup used when decoding response assets.
    #[must_use]
    pub fn from_id(id: u64) -> Option<Self> {
        match id {
            1 => Some(Self::Title),
            2 => Some(Self::Image),
            3 => Some(Self::Icon),
            4 => Some(Self::Body),
            5 => Some(Self::Sponsored),
            6 => Some(Self::ClickUrl),
            7 => Some(Self::Cta),
            _ => None,
        }
    }
}

/// OpenRTB Native 1.1 image type codes.
pub const IMAGE_TYPE_ICON: u32 = 1;
pub const IMAGE_TYPE_MAIN: u32 = 3;

/// OpenRTB Native 1.1 data type codes.
pub const DATA_TYPE_SPONSORED: u32 = 1;
pub const DATA_TYPE_DESC: u32 = 2;
pub const DATA_TYPE_CTA_TEXT: u32 = 12;
pub const DATA_TYPE_CLICK_URL: u32 = 501;

/// Title length sent when the slot does not constrain it.
const DEFAULT_TITLE_LEN: u64 = 140;

/// Minimum width assumed for aspect-ratio constrained images.
const DEFAULT_MIN_WIDTH: u64 = 100;

/// Build the request asset list from a slot's native parameters.
///
/// Assets are emitted in a fixed order (title, image, icon, sponsored-by,
/// body, click-url, CTA); parameter keys that are absent produce no asset
/// at all.
pub fn map_native_assets(params: &NativeRequestParams) -> Vec<Asset> {
    let mut assets = Vec::new();

    if let Some(title) = &params.title {
        assets.push(Asset {
            id: AssetId::Title.id(),
            required: u8::from(title.required),
            title: Some(TitleAsset {
                len: title.len.unwrap_or(DEFAULT_TITLE_LEN),
            }),
            img: None,
            data: None,
        });
    }
    if let Some(image) = &params.image {
        assets.push(Asset {
            id: AssetId::Image.id(),
            required: u8::from(image.required),
            title: None,
            img: Some(map_native_image(image, IMAGE_TYPE_MAIN)),
            data: None,
        });
    }
    if let Some(icon) = &params.icon {
        assets.push(Asset {
            id: AssetId::Icon.id(),
            required: u8::from(icon.required),
            title: None,
            img: Some(map_native_image(icon, IMAGE_TYPE_ICON)),
            data: None,
        });
    }
    if let Some(sponsored) = &params.sponsored_by {
        assets.push(Asset {
            id: AssetId::Sponsored.id(),
            required: u8::from(sponsored.required),
            title: None,
            img: None,
            data: Some(DataAsset {
                data_type: DATA_TYPE_SPONSORED,
                len: None,
            }),
        });
    }
    if let Some(body) = &params.body {
        // The `request` flag, not `required`, drives this one.
        assets.push(Asset {
            id: AssetId::Body.id(),
            required: u8::from(body.request),
            title: None,
            img: None,
            data: Some(DataAsset {
                data_type: DATA_TYPE_DESC,
                len: body.len,
            }),
        });
    }
    if let Some(click_url) = &params.click_url {
        assets.push(Asset {
            id: AssetId::ClickUrl.id(),
            required: u8::from(click_url.required),
            title: None,
            img: None,
            data: Some(DataAsset {
                data_type: DATA_TYPE_CLICK_URL,
                len: None,
            }),
        });
    }
    if let Some(cta) = &params.cta {
        assets.push(Asset {
            id: AssetId::Cta.id(),
            required: u8::from(cta.required),
            title: None,
            img: None,
            data: Some(DataAsset {
                data_type: DATA_TYPE_CTA_TEXT,
                len: cta.len,
            }),
        });
    }

    assets
}

/// Build the image constraint block for an image or icon asset.
///
/// Aspect ratios yield `wmin`/`hmin`, with `hmin` scaled from the minimum
/// width without rounding; explicit sizes yield `w`/`h` from the first
/// entry.
fn map_native_image(image: &NativeImageParams, image_type: u32) -> ImageAsset {
    let mut img = ImageAsset {
        image_type,
        wmin: None,
        hmin: None,
        w: None,
        h: None,
    };
    if let Some(ratio) = image.aspect_ratios.as_ref().and_then(|r| r.first()) {
        let min_width = ratio.min_width.unwrap_or(DEFAULT_MIN_WIDTH);
        img.wmin = Some(min_width);
        img.hmin =
            Some(min_width as f64 / ratio.ratio_width as f64 * ratio.ratio_height as f64);
    }
    if let Some((w, h)) = image.sizes.as_ref().and_then(SizeList::first) {
        img.w = Some(w);
        img.h = Some(h);
    }
    img
}

/// Decode a response asset list into the framework's native-ad shape.
///
/// Assets may arrive in any order; ids outside the agreed enumeration are
/// ignored, as are assets whose payload does not match their id. A
/// click-url asset overrides the link-level click URL.
pub fn decode_native_assets(assets: &[MarkupAsset], ad: &mut NativeAd) {
    for asset in assets {
        let Some(id) = AssetId::from_id(asset.id) else {
            continue;
        };
        match id {
            AssetId::Title => {
                if let Some(title) = &asset.title {
                    ad.title = Some(title.text.clone());
                }
            }
            AssetId::Image => {
                if let Some(img) = &asset.img {
                    ad.image = Some(decode_image(img));
                }
            }
            AssetId::Icon => {
                if let Some(img) = &asset.img {
                    ad.icon = Some(decode_image(img));
                }
            }
            AssetId::Body => {
                if let Some(data) = &asset.data {
                    ad.body = Some(data.value.clone());
                }
            }
            AssetId::Sponsored => {
                if let Some(data) = &asset.data {
                    ad.sponsored_by = Some(data.value.clone());
                }
            }
            AssetId::ClickUrl => {
                if let Some(data) = &asset.data {
                    ad.click_url = urlencoding::encode(&data.value).into_owned();
                }
            }
            AssetId::Cta => {
                if let Some(data) = &asset.data {
                    ad.cta = Some(data.value.clone());
                }
            }
        }
    }
}

fn decode_image(img: &MarkupImage) -> NativeAdImage {
    NativeAdImage {
        url: urlencoding::encode(&img.url).into_owned(),
        width: img.w,
        height: img.h,
    }
}
