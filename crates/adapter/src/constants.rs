/// Bidder code reported to the host registry.
pub const BIDDER_CODE: &str = "creativecdn";

/// Regional endpoint prefixes the bidder accepts in slot params.
pub const SUPPORTED_REGIONS: &[&str] = &["prebid-eu", "prebid-us", "prebid-asia"];

/// Host and path of the bidding endpoint; a regional prefix is prepended.
pub const ENDPOINT_PATH: &str = "creativecdn.com/bidder/prebid/bids";

/// The endpoint bids in USD only.
pub const BID_CURRENCY: &str = "USD";

/// Cache lifetime advertised on every returned bid, in seconds.
pub const BID_TTL_SECONDS: u32 = 55;

/// OpenRTB Native version tag sent with native requests.
pub const NATIVE_VERSION: &str = "1.1";
