//! # Preference Gateway Trait
//!
//! Seam between the checkout flow and the payment provider.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │          PreferenceGateway (trait)           │
//! │  ├── create_preference()                     │
//! │  └── provider_name()                         │
//! └──────────────────────────────────────────────┘
//!                       ▲
//!            ┌──────────┴──────────┐
//!  ┌─────────┴─────────┐ ┌─────────┴─────────┐
//!  │ MercadoPagoGateway│ │  test doubles     │
//!  └───────────────────┘ └───────────────────┘
//! ```

use crate::cart::ValidCart;
use crate::error::PaymentResult;
use crate::preference::{BackUrls, PreferenceRequest, PreferenceResult};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// A provider able to create a checkout preference.
///
/// Implementations must be safe to share between concurrent requests.
/// They make exactly one attempt per call and never retry.
#[async_trait]
pub trait PreferenceGateway: Send + Sync {
    /// Create the preference and return the hosted checkout URL.
    async fn create_preference(&self, request: &PreferenceRequest)
        -> PaymentResult<PreferenceResult>;

    /// Get the provider name (for logging and error tagging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedPreferenceGateway = Arc<dyn PreferenceGateway>;

/// Build the preference for a validated cart and submit it.
///
/// Redirect URLs are passed in per call; the gateway only ever sees the
/// finished [`PreferenceRequest`].
#[instrument(skip_all, fields(provider = gateway.provider_name(), lines = cart.items().len()))]
pub async fn create_preference(
    gateway: &dyn PreferenceGateway,
    cart: &ValidCart,
    back_urls: &BackUrls,
) -> PaymentResult<PreferenceResult> {
    let request = PreferenceRequest::build(cart, back_urls);

    debug!(
        "Submitting preference: {} lines, {} units, success_url={}",
        request.items.len(),
        cart.item_count(),
        request.back_urls.success
    );

    let result = gateway.create_preference(&request).await?;

    info!("Preference created: init_point={}", result.init_point);

    Ok(result)
}
