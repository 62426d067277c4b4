//! Product and variant operations for gift card provisioning.
//!
//! Covers the four Admin API calls the provisioning flow needs: look up a
//! product by handle, create the bucket product, re-price its default
//! variant, and attach new denomination variants.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use custom_gift_card_core::{GiftCardType, ProductHandle, VariantSku};

use super::ShopifyError;
use super::client::AdminClient;

// =============================================================================
// GraphQL Documents
// =============================================================================

const PRODUCT_BY_HANDLE_QUERY: &str = r"
    query GetProductWithVariants($handle: String!) {
        productByHandle(handle: $handle) {
            id
            title
            handle
            variants(first: 100) {
                edges {
                    node {
                        id
                        sku
                        price
                    }
                }
            }
            options {
                id
                name
                position
                values
            }
        }
    }
";

const PRODUCT_CREATE_MUTATION: &str = r"
    mutation CreateGiftCardProduct($input: ProductInput!) {
        productCreate(input: $input) {
            product {
                id
                title
                handle
                variants(first: 10) {
                    edges {
                        node {
                            id
                            sku
                            price
                        }
                    }
                }
                options {
                    id
                    name
                    position
                    values
                }
            }
            userErrors {
                field
                message
            }
        }
    }
";

const VARIANTS_BULK_UPDATE_MUTATION: &str = r"
    mutation UpdateGiftCardVariants($productId: ID!, $variants: [ProductVariantsBulkInput!]!) {
        productVariantsBulkUpdate(productId: $productId, variants: $variants) {
            productVariants {
                id
                sku
                price
            }
            userErrors {
                field
                message
            }
        }
    }
";

const VARIANTS_BULK_CREATE_MUTATION: &str = r"
    mutation CreateGiftCardVariants($productId: ID!, $variants: [ProductVariantsBulkInput!]!) {
        productVariantsBulkCreate(productId: $productId, variants: $variants) {
            productVariants {
                id
                sku
                price
            }
            userErrors {
                field
                message
            }
        }
    }
";

// =============================================================================
// Domain Types
// =============================================================================

/// A gift card product holding the variants for one price bucket.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Product GID (e.g., `gid://shopify/Product/123`).
    pub id: String,
    /// Product title.
    pub title: String,
    /// Product handle.
    pub handle: String,
    /// Denomination variants.
    pub variants: Vec<Variant>,
    /// Product options.
    pub options: Vec<ProductOption>,
}

/// A product variant carrying one denomination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    /// Variant GID (e.g., `gid://shopify/ProductVariant/123`).
    pub id: String,
    /// Variant SKU (absent until assigned).
    #[serde(default)]
    pub sku: Option<String>,
    /// Price as a decimal string (e.g., `"350.00"`).
    pub price: String,
}

/// A product option that new variants attach to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductOption {
    /// Option GID.
    pub id: String,
    /// Option name (e.g., `"Denominations"`).
    pub name: String,
    /// Option position (1-indexed).
    pub position: i64,
    /// Existing option values.
    #[serde(default)]
    pub values: Vec<String>,
}

/// A user error returned by an Admin API mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopifyUserError {
    /// Path to the input field that caused the error.
    #[serde(default)]
    pub field: Option<Vec<String>>,
    /// Human-readable error message.
    pub message: String,
}

/// Result of a `productCreate` mutation.
#[derive(Debug, Clone)]
pub struct ProductCreatePayload {
    /// The created product, when creation succeeded.
    pub product: Option<Product>,
    /// Validation errors reported by Shopify.
    pub user_errors: Vec<ShopifyUserError>,
}

/// Result of a variants bulk create/update mutation.
#[derive(Debug, Clone)]
pub struct VariantsBulkPayload {
    /// The affected variants.
    pub variants: Vec<Variant>,
    /// Validation errors reported by Shopify.
    pub user_errors: Vec<ShopifyUserError>,
}

impl Product {
    /// Find the variant carrying the given SKU.
    #[must_use]
    pub fn variant_with_sku(&self, sku: &VariantSku) -> Option<&Variant> {
        self.variants
            .iter()
            .find(|v| v.sku.as_deref() == Some(sku.as_str()))
    }

    /// First product option, used to attach new variants.
    #[must_use]
    pub fn first_option(&self) -> Option<&ProductOption> {
        self.options.first()
    }

    /// First variant, the default one on freshly created products.
    #[must_use]
    pub fn first_variant(&self) -> Option<&Variant> {
        self.variants.first()
    }
}

/// Format mutation user errors into a single diagnostic string.
#[must_use]
pub fn format_user_errors(errors: &[ShopifyUserError]) -> String {
    errors
        .iter()
        .map(|e| match &e.field {
            Some(field) if !field.is_empty() => format!("{}: {}", field.join("."), e.message),
            _ => e.message.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct ProductNode {
    id: String,
    title: String,
    handle: String,
    variants: VariantConnection,
    #[serde(default)]
    options: Vec<ProductOption>,
}

#[derive(Debug, Deserialize)]
struct VariantConnection {
    edges: Vec<VariantEdge>,
}

#[derive(Debug, Deserialize)]
struct VariantEdge {
    node: Variant,
}

impl From<ProductNode> for Product {
    fn from(node: ProductNode) -> Self {
        Self {
            id: node.id,
            title: node.title,
            handle: node.handle,
            variants: node.variants.edges.into_iter().map(|e| e.node).collect(),
            options: node.options,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VariantsBulkResponse {
    #[serde(default)]
    product_variants: Vec<Variant>,
    #[serde(default)]
    user_errors: Vec<ShopifyUserError>,
}

impl From<VariantsBulkResponse> for VariantsBulkPayload {
    fn from(response: VariantsBulkResponse) -> Self {
        Self {
            variants: response.product_variants,
            user_errors: response.user_errors,
        }
    }
}

// =============================================================================
// AdminClient Product Methods
// =============================================================================

impl AdminClient {
    /// Look up a gift card product by handle.
    ///
    /// Returns `None` when no product carries the handle yet.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError` if the API call fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn product_by_handle(
        &self,
        handle: &ProductHandle,
    ) -> Result<Option<Product>, ShopifyError> {
        #[derive(Debug, Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Response {
            product_by_handle: Option<ProductNode>,
        }

        let variables = serde_json::json!({ "handle": handle.as_str() });
        let response: Response = self
            .execute(PRODUCT_BY_HANDLE_QUERY, Some(variables))
            .await?;

        Ok(response.product_by_handle.map(Product::from))
    }

    /// Create the gift card product for a price bucket.
    ///
    /// The product is created active and published, with a single
    /// `Denominations` option seeded with the requested price. Digital
    /// cards are flagged as Shopify gift cards; physical cards are plain
    /// products.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError` if the API call fails. Validation failures
    /// surface as `user_errors` on the payload, not as `Err`.
    #[instrument(skip(self), fields(handle = %handle, price = %price))]
    pub async fn create_product(
        &self,
        handle: &ProductHandle,
        card_type: GiftCardType,
        price: &str,
    ) -> Result<ProductCreatePayload, ShopifyError> {
        #[derive(Debug, Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Response {
            product_create: ProductCreateResponse,
        }

        #[derive(Debug, Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct ProductCreateResponse {
            product: Option<ProductNode>,
            #[serde(default)]
            user_errors: Vec<ShopifyUserError>,
        }

        let variables = serde_json::json!({
            "input": {
                "title": "Gift Card",
                "handle": handle.as_str(),
                "productType": "Gift Card",
                "giftCard": !card_type.is_physical(),
                "status": "ACTIVE",
                "published": true,
                "productOptions": [{
                    "name": "Denominations",
                    "position": 1,
                    "values": [{ "name": price }],
                }],
            },
        });

        let response: Response = self
            .execute(PRODUCT_CREATE_MUTATION, Some(variables))
            .await?;

        Ok(ProductCreatePayload {
            product: response.product_create.product.map(Product::from),
            user_errors: response.product_create.user_errors,
        })
    }

    /// Re-price a variant and assign its SKU.
    ///
    /// Used on the default variant of a freshly created product, which
    /// comes back with a zero price and no SKU. Inventory tracking is
    /// disabled so denominations never sell out.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError` if the API call fails. Validation failures
    /// surface as `user_errors` on the payload, not as `Err`.
    #[instrument(skip(self), fields(variant_id = %variant_id, price = %price))]
    pub async fn update_variant_price(
        &self,
        product_id: &str,
        variant_id: &str,
        price: &str,
        sku: &VariantSku,
    ) -> Result<VariantsBulkPayload, ShopifyError> {
        #[derive(Debug, Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Response {
            product_variants_bulk_update: VariantsBulkResponse,
        }

        let variables = serde_json::json!({
            "productId": product_id,
            "variants": [{
                "id": variant_id,
                "price": price,
                "inventoryItem": {
                    "sku": sku.as_str(),
                    "tracked": false,
                },
            }],
        });

        let response: Response = self
            .execute(VARIANTS_BULK_UPDATE_MUTATION, Some(variables))
            .await?;

        Ok(response.product_variants_bulk_update.into())
    }

    /// Attach a new denomination variant to an existing product.
    ///
    /// The variant takes the price as its option value on the product's
    /// first option, with inventory tracking disabled.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError` if the API call fails. Validation failures
    /// surface as `user_errors` on the payload, not as `Err`.
    #[instrument(skip(self), fields(product_id = %product_id, price = %price))]
    pub async fn create_variant(
        &self,
        product_id: &str,
        option_id: &str,
        price: &str,
        sku: &VariantSku,
    ) -> Result<VariantsBulkPayload, ShopifyError> {
        #[derive(Debug, Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Response {
            product_variants_bulk_create: VariantsBulkResponse,
        }

        let variables = serde_json::json!({
            "productId": product_id,
            "variants": [{
                "price": price,
                "optionValues": [{ "name": price, "optionId": option_id }],
                "inventoryItem": {
                    "sku": sku.as_str(),
                    "tracked": false,
                },
                "inventoryQuantities": [],
            }],
        });

        let response: Response = self
            .execute(VARIANTS_BULK_CREATE_MUTATION, Some(variables))
            .await?;

        Ok(response.product_variants_bulk_create.into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product {
            id: "gid://shopify/Product/1".to_string(),
            title: "Gift Card".to_string(),
            handle: "custom-gift-card-300-399".to_string(),
            variants: vec![
                Variant {
                    id: "gid://shopify/ProductVariant/10".to_string(),
                    sku: Some("GIFT-DIGITAL-300-00".to_string()),
                    price: "300.00".to_string(),
                },
                Variant {
                    id: "gid://shopify/ProductVariant/11".to_string(),
                    sku: Some("GIFT-DIGITAL-350-00".to_string()),
                    price: "350.00".to_string(),
                },
            ],
            options: vec![ProductOption {
                id: "gid://shopify/ProductOption/1".to_string(),
                name: "Denominations".to_string(),
                position: 1,
                values: vec!["300.00".to_string(), "350.00".to_string()],
            }],
        }
    }

    #[test]
    fn test_variant_with_sku_found() {
        let product = sample_product();
        let sku = VariantSku::for_price(GiftCardType::Digital, "350.00");
        let variant = product.variant_with_sku(&sku).unwrap();
        assert_eq!(variant.id, "gid://shopify/ProductVariant/11");
        assert_eq!(variant.price, "350.00");
    }

    #[test]
    fn test_variant_with_sku_missing() {
        let product = sample_product();
        let sku = VariantSku::for_price(GiftCardType::Physical, "350.00");
        assert!(product.variant_with_sku(&sku).is_none());
    }

    #[test]
    fn test_variant_without_sku_never_matches() {
        let mut product = sample_product();
        product.variants = vec![Variant {
            id: "gid://shopify/ProductVariant/12".to_string(),
            sku: None,
            price: "350.00".to_string(),
        }];
        let sku = VariantSku::for_price(GiftCardType::Digital, "350.00");
        assert!(product.variant_with_sku(&sku).is_none());
    }

    #[test]
    fn test_first_option_and_variant() {
        let product = sample_product();
        assert_eq!(product.first_option().unwrap().name, "Denominations");
        assert_eq!(
            product.first_variant().unwrap().id,
            "gid://shopify/ProductVariant/10"
        );
    }

    #[test]
    fn test_product_node_deserialization() {
        let json = serde_json::json!({
            "id": "gid://shopify/Product/1",
            "title": "Gift Card",
            "handle": "custom-gift-card-300-399",
            "variants": {
                "edges": [
                    { "node": { "id": "gid://shopify/ProductVariant/10", "sku": "GIFT-DIGITAL-300-00", "price": "300.00" } },
                    { "node": { "id": "gid://shopify/ProductVariant/11", "sku": null, "price": "0.00" } }
                ]
            },
            "options": [
                { "id": "gid://shopify/ProductOption/1", "name": "Denominations", "position": 1, "values": ["300.00"] }
            ]
        });

        let node: ProductNode = serde_json::from_value(json).unwrap();
        let product = Product::from(node);

        assert_eq!(product.variants.len(), 2);
        assert_eq!(
            product.variants[0].sku.as_deref(),
            Some("GIFT-DIGITAL-300-00")
        );
        assert!(product.variants[1].sku.is_none());
        assert_eq!(product.options[0].position, 1);
    }

    #[test]
    fn test_variants_bulk_response_deserialization() {
        let json = serde_json::json!({
            "productVariants": [
                { "id": "gid://shopify/ProductVariant/20", "sku": "GIFT-DIGITAL-350-00", "price": "350.00" }
            ],
            "userErrors": []
        });

        let payload: VariantsBulkPayload = serde_json::from_value::<VariantsBulkResponse>(json)
            .unwrap()
            .into();
        assert_eq!(payload.variants.len(), 1);
        assert!(payload.user_errors.is_empty());
    }

    #[test]
    fn test_user_error_deserialization_null_field() {
        let json = serde_json::json!({ "field": null, "message": "Handle taken" });
        let err: ShopifyUserError = serde_json::from_value(json).unwrap();
        assert!(err.field.is_none());
        assert_eq!(err.message, "Handle taken");
    }

    #[test]
    fn test_format_user_errors() {
        let errors = vec![
            ShopifyUserError {
                field: Some(vec!["input".to_string(), "handle".to_string()]),
                message: "Handle taken".to_string(),
            },
            ShopifyUserError {
                field: None,
                message: "Something else".to_string(),
            },
        ];
        assert_eq!(
            format_user_errors(&errors),
            "input.handle: Handle taken; Something else"
        );
    }

    #[test]
    fn test_format_user_errors_empty_field_list() {
        let errors = vec![ShopifyUserError {
            field: Some(vec![]),
            message: "Bare message".to_string(),
        }];
        assert_eq!(format_user_errors(&errors), "Bare message");
    }
}
