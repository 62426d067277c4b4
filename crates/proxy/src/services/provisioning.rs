//! Idempotent provisioning of gift card products and variants.
//!
//! Every denomination maps to a deterministic product handle (one product
//! per hundred-dollar bucket per card type) and variant SKU (one variant
//! per exact price). Provisioning looks the handle up in the catalog and
//! creates only what is missing, so repeating a request converges on the
//! same variant instead of duplicating it.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Mutex;
use tracing::{info, instrument};

use custom_gift_card_core::{
    Amount, GiftCardSettings, GiftCardType, PriceBucket, ProductHandle, VariantSku,
};

use crate::error::AppError;
use crate::shopify::{AdminClient, Product, Variant};

/// Upper bound on live per-handle locks.
const LOCK_CAPACITY: u64 = 1024;

/// Idle locks are evicted after this many seconds.
const LOCK_IDLE_SECS: u64 = 600;

/// Outcome of a successful provisioning run.
#[derive(Debug, Clone)]
pub struct Provisioned {
    /// Variant GID the caller should add to the cart.
    pub variant_id: String,
    /// Price attached to that variant, as a decimal string.
    pub price: String,
    /// Whether this request created the variant or found it.
    pub created: bool,
    /// Human-readable summary for the response body.
    pub message: &'static str,
}

/// What the catalog walk decided to do for a requested denomination.
#[derive(Debug)]
enum ProvisionPlan<'a> {
    /// No product exists for the bucket yet.
    CreateProduct,
    /// The exact variant already exists.
    Reuse(&'a Variant),
    /// The bucket product exists but lacks this denomination.
    CreateVariant {
        product_id: &'a str,
        option_id: &'a str,
    },
    /// The bucket product exists but has no option to attach a variant to.
    NoOption,
}

/// Pure decision core: given the current catalog state, pick the plan.
fn plan<'a>(product: Option<&'a Product>, sku: &VariantSku) -> ProvisionPlan<'a> {
    let Some(product) = product else {
        return ProvisionPlan::CreateProduct;
    };

    if let Some(variant) = product.variant_with_sku(sku) {
        return ProvisionPlan::Reuse(variant);
    }

    match product.first_option() {
        Some(option) => ProvisionPlan::CreateVariant {
            product_id: &product.id,
            option_id: &option.id,
        },
        None => ProvisionPlan::NoOption,
    }
}

/// Runs the lookup-or-create pipeline behind a per-handle lock.
///
/// Two concurrent requests for the same new bucket would otherwise both
/// observe "product absent" and both create it. Locks are keyed by product
/// handle, so only same-bucket requests serialize; distinct buckets
/// proceed in parallel. Idle locks age out of the registry.
#[derive(Clone)]
pub struct ProvisioningService {
    locks: Cache<String, Arc<Mutex<()>>>,
}

impl ProvisioningService {
    #[must_use]
    pub fn new() -> Self {
        let locks = Cache::builder()
            .max_capacity(LOCK_CAPACITY)
            .time_to_idle(Duration::from_secs(LOCK_IDLE_SECS))
            .build();

        Self { locks }
    }

    /// Ensures a purchasable variant exists for the requested amount.
    ///
    /// Validates the amount against the store's configured range, derives
    /// the bucket handle and SKU, then walks the catalog: missing product
    /// and variant are created, an existing variant is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Range`] when the amount falls outside the
    /// configured bounds, and the matching [`AppError`] variant when a
    /// Shopify mutation is rejected or the API is unreachable.
    #[instrument(skip(self, client, settings), fields(card_type = %card_type, amount = %amount))]
    pub async fn provision(
        &self,
        client: &AdminClient,
        card_type: GiftCardType,
        amount: Amount,
        settings: &GiftCardSettings,
    ) -> Result<Provisioned, AppError> {
        settings.validate_amount(amount)?;

        let bucket = PriceBucket::for_amount(amount);
        let handle = ProductHandle::for_bucket(card_type, &bucket);
        let sku = VariantSku::for_price(card_type, &bucket.price);

        // Serialize same-handle requests so concurrent lookups cannot
        // both decide to create the same product.
        let lock = self
            .locks
            .get_with(handle.as_str().to_string(), async {
                Arc::new(Mutex::new(()))
            })
            .await;
        let _guard = lock.lock().await;

        let product = client.product_by_handle(&handle).await?;

        match plan(product.as_ref(), &sku) {
            ProvisionPlan::CreateProduct => {
                create_bucket_product(client, card_type, &handle, &sku, &bucket.price).await
            }
            ProvisionPlan::Reuse(variant) => {
                info!(variant_id = %variant.id, "Existing gift card variant found");
                Ok(Provisioned {
                    variant_id: variant.id.clone(),
                    price: variant.price.clone(),
                    created: false,
                    message: "Existing gift card variant found",
                })
            }
            ProvisionPlan::CreateVariant {
                product_id,
                option_id,
            } => {
                let payload = client
                    .create_variant(product_id, option_id, &bucket.price, &sku)
                    .await?;

                if !payload.user_errors.is_empty() {
                    return Err(AppError::VariantCreate {
                        errors: payload.user_errors,
                    });
                }
                let Some(variant) = payload.variants.into_iter().next() else {
                    return Err(AppError::VariantCreate { errors: vec![] });
                };

                info!(
                    product_id = %product_id,
                    variant_id = %variant.id,
                    "Gift card variant created",
                );
                Ok(Provisioned {
                    variant_id: variant.id,
                    price: bucket.price,
                    created: true,
                    message: "Gift card variant created successfully",
                })
            }
            ProvisionPlan::NoOption => Err(AppError::NoProductOption),
        }
    }
}

impl Default for ProvisioningService {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProvisioningService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProvisioningService")
            .field("locks", &self.locks.entry_count())
            .finish()
    }
}

/// Creates the bucket product and prices its auto-created variant.
///
/// `productCreate` seeds one variant from the option values; it still
/// needs the real price and SKU applied. No compensation on partial
/// failure: if the price update is rejected the product stays behind and
/// the next attempt for this bucket walks the create-variant path instead.
async fn create_bucket_product(
    client: &AdminClient,
    card_type: GiftCardType,
    handle: &ProductHandle,
    sku: &VariantSku,
    price: &str,
) -> Result<Provisioned, AppError> {
    let payload = client.create_product(handle, card_type, price).await?;

    if !payload.user_errors.is_empty() {
        return Err(AppError::ProductCreate {
            errors: payload.user_errors,
        });
    }
    let Some(product) = payload.product else {
        return Err(AppError::ProductCreate { errors: vec![] });
    };
    let Some(variant) = product.first_variant() else {
        return Err(AppError::ProductCreate { errors: vec![] });
    };

    let update = client
        .update_variant_price(&product.id, &variant.id, price, sku)
        .await?;
    if !update.user_errors.is_empty() {
        return Err(AppError::PriceUpdate {
            errors: update.user_errors,
        });
    }

    info!(
        product_id = %product.id,
        variant_id = %variant.id,
        "Gift card product created",
    );
    Ok(Provisioned {
        variant_id: variant.id.clone(),
        price: price.to_string(),
        created: true,
        message: "Gift card created successfully",
    })
}
