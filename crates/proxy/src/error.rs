//! Unified error handling with Sentry integration.
//!
//! Handlers and services return typed [`AppError`] values; the single
//! `IntoResponse` conversion turns them into the JSON error envelope
//! `{"success": false, "error": "...", "details": [...]}` and captures
//! server errors to Sentry.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use custom_gift_card_core::AmountRangeError;

use crate::shopify::{ShopifyError, ShopifyUserError};

/// Application-level error type for the gift card proxy.
#[derive(Debug, Error)]
pub enum AppError {
    /// Required query parameters are missing.
    #[error("Missing required parameters")]
    MissingParams,

    /// Proxy signature or shop check failed.
    #[error("Unauthorized request")]
    Unauthorized,

    /// Body failed to parse or carried an unusable amount/type.
    #[error("Invalid gift card input")]
    InvalidInput,

    /// Amount is outside the configured range.
    #[error(transparent)]
    Range(#[from] AmountRangeError),

    /// Existing product has no option to attach a variant to.
    #[error("Product has no options to assign variant")]
    NoProductOption,

    /// `productCreate` rejected the bucket product.
    #[error("Failed to create product")]
    ProductCreate {
        /// Validation errors reported by Shopify.
        errors: Vec<ShopifyUserError>,
    },

    /// `productVariantsBulkUpdate` rejected the default variant re-price.
    #[error("Failed to update variant price")]
    PriceUpdate {
        /// Validation errors reported by Shopify.
        errors: Vec<ShopifyUserError>,
    },

    /// `productVariantsBulkCreate` rejected the new variant.
    #[error("Failed to create variant")]
    VariantCreate {
        /// Validation errors reported by Shopify.
        errors: Vec<ShopifyUserError>,
    },

    /// Shopify API call failed.
    #[error("Shopify error: {0}")]
    Shopify(#[from] ShopifyError),
}

impl AppError {
    /// Shopify user errors attached to this error, if any.
    #[must_use]
    pub fn user_errors(&self) -> Option<&[ShopifyUserError]> {
        match self {
            Self::ProductCreate { errors }
            | Self::PriceUpdate { errors }
            | Self::VariantCreate { errors } => Some(errors),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(
            self,
            Self::ProductCreate { .. } | Self::PriceUpdate { .. } | Self::Shopify(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Gift card request error"
            );
        }

        let status = match &self {
            Self::MissingParams
            | Self::InvalidInput
            | Self::Range(_)
            | Self::NoProductOption
            | Self::VariantCreate { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::FORBIDDEN,
            Self::ProductCreate { .. } | Self::PriceUpdate { .. } | Self::Shopify(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let mut body = serde_json::json!({
            "success": false,
            "error": self.to_string(),
        });

        if let Some(errors) = self.user_errors()
            && !errors.is_empty()
            && let Ok(details) = serde_json::to_value(errors)
        {
            body["details"] = details;
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        assert_eq!(
            AppError::MissingParams.to_string(),
            "Missing required parameters"
        );
        assert_eq!(AppError::Unauthorized.to_string(), "Unauthorized request");
        assert_eq!(
            AppError::InvalidInput.to_string(),
            "Invalid gift card input"
        );
        assert_eq!(
            AppError::NoProductOption.to_string(),
            "Product has no options to assign variant"
        );
        assert_eq!(
            AppError::ProductCreate { errors: vec![] }.to_string(),
            "Failed to create product"
        );
        assert_eq!(
            AppError::PriceUpdate { errors: vec![] }.to_string(),
            "Failed to update variant price"
        );
        assert_eq!(
            AppError::VariantCreate { errors: vec![] }.to_string(),
            "Failed to create variant"
        );
    }

    #[test]
    fn test_range_error_display_passes_through() {
        let err = AppError::Range(AmountRangeError { min: 100, max: 1000 });
        assert_eq!(err.to_string(), "Amount must be between 100 and 1000");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(get_status(AppError::MissingParams), StatusCode::BAD_REQUEST);
        assert_eq!(get_status(AppError::Unauthorized), StatusCode::FORBIDDEN);
        assert_eq!(get_status(AppError::InvalidInput), StatusCode::BAD_REQUEST);
        assert_eq!(
            get_status(AppError::Range(AmountRangeError { min: 100, max: 1000 })),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::NoProductOption),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::ProductCreate { errors: vec![] }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::PriceUpdate { errors: vec![] }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::VariantCreate { errors: vec![] }),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_error_envelope_includes_details() {
        let err = AppError::VariantCreate {
            errors: vec![ShopifyUserError {
                field: Some(vec!["variants".to_string()]),
                message: "Price must be positive".to_string(),
            }],
        };

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Failed to create variant");
        assert_eq!(body["details"][0]["message"], "Price must be positive");
    }

    #[tokio::test]
    async fn test_error_envelope_omits_empty_details() {
        let response = AppError::Unauthorized.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Unauthorized request");
        assert!(body.get("details").is_none());
    }
}
