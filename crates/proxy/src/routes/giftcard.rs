//! Gift card provisioning endpoint.
//!
//! Shopify's app proxy forwards storefront requests here with the shop
//! domain and an HMAC signature in the query string. The POST body names
//! an amount and a card type; the response names the variant the theme
//! should add to the cart.

use axum::Json;
use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use custom_gift_card_core::{Amount, GiftCardType};

use crate::error::AppError;
use crate::shopify::verify_proxy_signature;
use crate::state::AppState;

/// Reachability probe for the proxy path.
///
/// GET /api/giftcard
pub async fn probe() -> Json<Value> {
    Json(json!({ "message": "API Proxy ready for POST" }))
}

/// CORS preflight. The headers come from the router layers.
///
/// OPTIONS /api/giftcard
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Provision a gift card variant for the requested amount.
///
/// POST /api/giftcard?shop=...&signature=...
///
/// Verifies the app-proxy signature before anything else touches the
/// request, then parses the body, resolves credentials for the shop, and
/// hands off to the provisioning service. Created variants come back as
/// 201, reused ones as 200.
///
/// # Errors
///
/// Returns the matching [`AppError`] for each failure; the error's
/// `IntoResponse` conversion renders the JSON envelope.
pub async fn provision(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    body: String,
) -> Result<Response, AppError> {
    let query = query.unwrap_or_default();

    let shop = shop_param(&query).ok_or(AppError::MissingParams)?;

    if !verify_proxy_signature(&query, &state.config().shopify.api_secret) {
        return Err(AppError::Unauthorized);
    }

    let (card_type, amount) = parse_request(&body)?;

    let client = state.credentials().resolve(&shop)?;
    let shop_settings = client.get_shop_settings().await?;

    let provisioned = state
        .provisioner()
        .provision(&client, card_type, amount, &shop_settings.settings)
        .await?;

    let status = if provisioned.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let payload = Json(json!({
        "variant": {
            "id": provisioned.variant_id,
            "price": provisioned.price,
        },
        "created": provisioned.created,
        "message": provisioned.message,
    }));

    Ok((status, payload).into_response())
}

/// Extract the non-empty `shop` parameter from the raw query string.
fn shop_param(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "shop")
        .map(|(_, value)| value.into_owned())
        .filter(|shop| !shop.is_empty())
}

/// Parse the request body into a card type and amount.
///
/// Any shape problem collapses to [`AppError::InvalidInput`]; the caller
/// does not learn which field was wrong.
fn parse_request(body: &str) -> Result<(GiftCardType, Amount), AppError> {
    let value: Value = serde_json::from_str(body).map_err(|_| AppError::InvalidInput)?;

    let amount = value
        .get("amount")
        .ok_or(AppError::InvalidInput)
        .and_then(|raw| Amount::from_json(raw).map_err(|_| AppError::InvalidInput))?;

    let card_type = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(AppError::InvalidInput)?
        .parse::<GiftCardType>()
        .map_err(|_| AppError::InvalidInput)?;

    Ok((card_type, amount))
}
