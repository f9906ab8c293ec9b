//! Adapter trait and host-registry plumbing.
//!
//! The host framework discovers adapters through [`register_adapters`] and
//! drives them through the [`BidderAdapter`] trait: validate each slot,
//! build one outbound request per auction round, interpret the response.
//! Adapters hold no mutable state; concurrent auctions are naturally
//! independent.

use std::collections::HashMap;
use std::sync::Arc;

use error_stack::Report;
use serde_json::Value;

use crate::adapter;
use crate::constants::BIDDER_CODE;
use crate::error::AdapterError;
use crate::settings::{AdapterConfig, Settings};
use crate::types::{
    AuctionContext, BidRequestDescriptor, BidResult, MediaType, OutboundRequest,
};

/// Trait implemented by bidder adapters the host registry can drive.
pub trait BidderAdapter: Send + Sync {
    /// Unique bidder code (e.g. "creativecdn").
    fn code(&self) -> &'static str;

    /// Media types this adapter can request.
    fn supported_media_types(&self) -> &'static [MediaType];

    /// Whether a slot carries the configuration the endpoint requires.
    fn is_valid(&self, slot: &BidRequestDescriptor) -> bool;

    /// Build the outbound request descriptor for a batch of valid slots.
    ///
    /// # Errors
    ///
    /// Returns an error when the batch cannot be represented as a bid
    /// request (empty batch, missing sizes or native parameters).
    fn build(
        &self,
        slots: &[BidRequestDescriptor],
        ctx: &AuctionContext,
    ) -> Result<OutboundRequest, Report<AdapterError>>;

    /// Interpret the endpoint's parsed response body.
    fn interpret(&self, body: &Value) -> Vec<BidResult>;

    /// Budget the transport should allow for the endpoint call.
    fn timeout_ms(&self) -> u32 {
        1000
    }
}

/// Bidder adapter for the creativecdn endpoint.
pub struct CreativeCdnAdapter {
    config: AdapterConfig,
}

impl CreativeCdnAdapter {
    /// Create a new adapter from its configuration.
    #[must_use]
    pub fn new(config: AdapterConfig) -> Self {
        Self { config }
    }
}

impl BidderAdapter for CreativeCdnAdapter {
    fn code(&self) -> &'static str {
        BIDDER_CODE
    }

    fn supported_media_types(&self) -> &'static [MediaType] {
        &[MediaType::Banner, MediaType::Native]
    }

    fn is_valid(&self, slot: &BidRequestDescriptor) -> bool {
        adapter::is_bid_request_valid(slot)
    }

    fn build(
        &self,
        slots: &[BidRequestDescriptor],
        ctx: &AuctionContext,
    ) -> Result<OutboundRequest, Report<AdapterError>> {
        adapter::build_bid_request(slots, ctx)
    }

    fn interpret(&self, body: &Value) -> Vec<BidResult> {
        adapter::interpret_response(body)
    }

    fn timeout_ms(&self) -> u32 {
        self.config.timeout_ms
    }
}

/// Registry of bidder adapters keyed by code.
pub struct AdapterRegistry {
    adapters: HashMap<String, Arc<dyn BidderAdapter>>,
}

impl AdapterRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            adapters: HashMap::new(),
        }
    }

    /// Register an adapter under its bidder code.
    pub fn register(&mut self, adapter: Arc<dyn BidderAdapter>) {
        let code = adapter.code().to_string();
        log::info!("Registering bidder adapter: {}", code);
        self.adapters.insert(code, adapter);
    }

    /// Look up an adapter by its bidder code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Arc<dyn BidderAdapter>> {
        self.adapters.get(code)
    }

    /// Number of registered adapters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Whether the registry holds no adapters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Return every adapter enabled by the settings.
#[must_use]
pub fn register_adapters(settings: &Settings) -> Vec<Arc<dyn BidderAdapter>> {
    let mut adapters: Vec<Arc<dyn BidderAdapter>> = Vec::new();

    if settings.adapter.enabled {
        log::info!(
            "Registering creativecdn bidder adapter (timeout_ms={})",
            settings.adapter.timeout_ms
        );
        adapters.push(Arc::new(CreativeCdnAdapter::new(settings.adapter.clone())));
    } else {
        log::info!("creativecdn bidder adapter not registered: disabled in settings");
    }

    adapters
}

/// Build a registry holding every adapter enabled by the settings.
#[must_use]
pub fn build_registry(settings: &Settings) -> AdapterRegistry {
    let mut registry = AdapterRegistry::new();
    for adapter in register_adapters(settings) {
        registry.register(adapter);
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_settings_register_the_adapter() {
        let settings = Settings::default();
        let registry = build_registry(&settings);
        assert_eq!(registry.len(), 1);

        let adapter = registry.get(BIDDER_CODE).expect("adapter should be registered");
        assert_eq!(adapter.code(), "creativecdn");
        assert_eq!(
            adapter.supported_media_types(),
            &[MediaType::Banner, MediaType::Native]
        );
    }

    #[test]
    fn disabled_settings_register_nothing() {
        let settings = Settings::from_toml(
            r#"
            [adapter]
            enabled = false
            "#,
        )
        .expect("should parse settings");

        let registry = build_registry(&settings);
        assert!(registry.is_empty());
        assert!(registry.get(BIDDER_CODE).is_none());
    }

    #[test]
    fn timeout_comes_from_configuration() {
        let settings = Settings::from_toml(
            r#"
            [adapter]
            timeout_ms = 500
            "#,
        )
        .expect("should parse settings");

        let adapters = register_adapters(&settings);
        assert_eq!(adapters.len(), 1);
        assert_eq!(adapters[0].timeout_ms(), 500);
    }

    #[test]
    fn trait_methods_delegate_to_the_pure_operations() {
        use crate::types::{AdSize, MediaTypeConfig, PageContext, SlotParams};

        let adapter = CreativeCdnAdapter::new(AdapterConfig::default());
        let slot = BidRequestDescriptor {
            bid_id: "b1".to_string(),
            auction_id: "a1".to_string(),
            ad_unit_code: "div-1".to_string(),
            sizes: vec![AdSize { w: 300, h: 250 }],
            media: MediaTypeConfig::Banner,
            native_params: None,
            params: SlotParams {
                publisher_id: Some("pub-7".to_string()),
                region: Some("prebid-us".to_string()),
                test: None,
            },
        };
        assert!(adapter.is_valid(&slot));

        let ctx = AuctionContext {
            gdpr_consent: None,
            page: PageContext::default(),
        };
        let request = adapter.build(&[slot], &ctx).expect("should build");
        assert_eq!(
            request.url,
            "https://prebid-us.creativecdn.com/bidder/prebid/bids"
        );

        let bids = adapter.interpret(&serde_json::Value::Null);
        assert!(bids.is_empty());
    }
}
