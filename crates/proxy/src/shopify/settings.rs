//! Gift card settings stored as shop metafields.
//!
//! The merchant's settings live in the `gift_card_settings` metafield
//! namespace on the shop. Reads always go to Shopify so an admin change
//! applies to the very next proxy request.

use serde::Deserialize;
use tracing::instrument;

use custom_gift_card_core::GiftCardSettings;

use super::ShopifyError;
use super::client::AdminClient;
use super::products::ShopifyUserError;

const SETTINGS_QUERY: &str = r#"
    query {
        shop {
            id
            metafields(namespace: "gift_card_settings", first: 20) {
                edges {
                    node {
                        key
                        value
                    }
                }
            }
        }
    }
"#;

const METAFIELDS_SET_MUTATION: &str = r"
    mutation SetGiftCardSettings($metafields: [MetafieldsSetInput!]!) {
        metafieldsSet(metafields: $metafields) {
            metafields {
                id
            }
            userErrors {
                field
                message
            }
        }
    }
";

/// Shop identity plus the gift card settings read from metafields.
#[derive(Debug, Clone)]
pub struct ShopSettings {
    /// Shop GID, used as the owner for settings writes.
    pub shop_id: String,
    /// Parsed settings with defaults filled in.
    pub settings: GiftCardSettings,
}

impl AdminClient {
    /// Fetch the shop's gift card settings.
    ///
    /// Reads every metafield in the settings namespace and folds them
    /// into a [`GiftCardSettings`], falling back to defaults for missing
    /// keys.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError` if the API call fails.
    #[instrument(skip(self))]
    pub async fn get_shop_settings(&self) -> Result<ShopSettings, ShopifyError> {
        #[derive(Debug, Deserialize)]
        struct Response {
            shop: ShopNode,
        }

        #[derive(Debug, Deserialize)]
        struct ShopNode {
            id: String,
            metafields: MetafieldConnection,
        }

        #[derive(Debug, Deserialize)]
        struct MetafieldConnection {
            edges: Vec<MetafieldEdge>,
        }

        #[derive(Debug, Deserialize)]
        struct MetafieldEdge {
            node: Metafield,
        }

        #[derive(Debug, Deserialize)]
        struct Metafield {
            key: String,
            value: String,
        }

        let response: Response = self.execute(SETTINGS_QUERY, None).await?;

        let settings = GiftCardSettings::from_metafields(
            response
                .shop
                .metafields
                .edges
                .into_iter()
                .map(|edge| (edge.node.key, edge.node.value)),
        );

        Ok(ShopSettings {
            shop_id: response.shop.id,
            settings,
        })
    }

    /// Write the shop's gift card settings back to metafields.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError` if the API call fails. Validation failures
    /// surface as the returned user errors, not as `Err`.
    #[instrument(skip(self, settings), fields(shop_id = %shop_id))]
    pub async fn set_settings(
        &self,
        shop_id: &str,
        settings: &GiftCardSettings,
    ) -> Result<Vec<ShopifyUserError>, ShopifyError> {
        #[derive(Debug, Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Response {
            metafields_set: MetafieldsSetResponse,
        }

        #[derive(Debug, Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct MetafieldsSetResponse {
            #[serde(default)]
            user_errors: Vec<ShopifyUserError>,
        }

        let variables = serde_json::json!({
            "metafields": settings_metafields(shop_id, settings),
        });

        let response: Response = self
            .execute(METAFIELDS_SET_MUTATION, Some(variables))
            .await?;

        Ok(response.metafields_set.user_errors)
    }
}

/// Build the `metafieldsSet` inputs for a settings write.
fn settings_metafields(shop_id: &str, settings: &GiftCardSettings) -> Vec<serde_json::Value> {
    let mut metafields = vec![
        metafield_input(shop_id, "enabled", "boolean", settings.enabled.to_string()),
        metafield_input(
            shop_id,
            "digital_enabled",
            "boolean",
            settings.digital_enabled.to_string(),
        ),
        metafield_input(
            shop_id,
            "physical_enabled",
            "boolean",
            settings.physical_enabled.to_string(),
        ),
        metafield_input(
            shop_id,
            "physical_giftbox_enabled",
            "boolean",
            settings.physical_giftbox_enabled.to_string(),
        ),
        metafield_input(
            shop_id,
            "min_price",
            "number_integer",
            settings.min_price.to_string(),
        ),
        metafield_input(
            shop_id,
            "max_price",
            "number_integer",
            settings.max_price.to_string(),
        ),
    ];

    if let Some(product) = &settings.selected_product {
        metafields.push(metafield_input(
            shop_id,
            "selected_product",
            "json",
            product.to_string(),
        ));
    }

    metafields
}

fn metafield_input(
    shop_id: &str,
    key: &str,
    value_type: &str,
    value: String,
) -> serde_json::Value {
    serde_json::json!({
        "namespace": GiftCardSettings::NAMESPACE,
        "key": key,
        "type": value_type,
        "value": value,
        "ownerId": shop_id,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_metafield_input_shape() {
        let input = metafield_input(
            "gid://shopify/Shop/1",
            "min_price",
            "number_integer",
            "100".to_string(),
        );
        assert_eq!(input["namespace"], "gift_card_settings");
        assert_eq!(input["key"], "min_price");
        assert_eq!(input["type"], "number_integer");
        assert_eq!(input["value"], "100");
        assert_eq!(input["ownerId"], "gid://shopify/Shop/1");
    }

    #[test]
    fn test_settings_metafields_without_product() {
        let settings = GiftCardSettings::default();
        let metafields = settings_metafields("gid://shopify/Shop/1", &settings);

        assert_eq!(metafields.len(), 6);
        let keys: Vec<&str> = metafields
            .iter()
            .map(|m| m["key"].as_str().unwrap())
            .collect();
        assert!(keys.contains(&"enabled"));
        assert!(keys.contains(&"min_price"));
        assert!(!keys.contains(&"selected_product"));
    }

    #[test]
    fn test_settings_metafields_with_product() {
        let settings = GiftCardSettings {
            selected_product: Some(serde_json::json!({"id": "gid://shopify/Product/9"})),
            ..GiftCardSettings::default()
        };
        let metafields = settings_metafields("gid://shopify/Shop/1", &settings);

        assert_eq!(metafields.len(), 7);
        let product = metafields
            .iter()
            .find(|m| m["key"] == "selected_product")
            .unwrap();
        assert_eq!(product["type"], "json");
        assert_eq!(product["value"], r#"{"id":"gid://shopify/Product/9"}"#);
    }

    #[test]
    fn test_settings_metafields_booleans_serialize_as_strings() {
        let settings = GiftCardSettings {
            enabled: true,
            ..GiftCardSettings::default()
        };
        let metafields = settings_metafields("gid://shopify/Shop/1", &settings);

        let enabled = metafields.iter().find(|m| m["key"] == "enabled").unwrap();
        assert_eq!(enabled["value"], "true");
    }
}
