//! App proxy request signature verification.
//!
//! Shopify signs every app proxy request by sorting the query parameters,
//! concatenating them, and attaching an HMAC-SHA256 digest as the
//! `signature` parameter:
//! <https://shopify.dev/docs/apps/build/online-store/display-dynamic-data#verify-the-request>

use std::collections::BTreeMap;

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

/// Verify the signature Shopify attaches to app proxy requests.
///
/// The `signature` parameter is removed, remaining parameters are grouped
/// by key (multiple values joined with `,`), rendered as `key=value`,
/// sorted by key, and concatenated without a delimiter. The HMAC-SHA256
/// of that string under the app's API secret must match the signature.
///
/// Returns `false` for requests without a `signature` parameter.
#[must_use]
pub fn verify_proxy_signature(query: &str, api_secret: &SecretString) -> bool {
    let mut signature = None;
    let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        if key == "signature" {
            signature = Some(value.into_owned());
        } else {
            params
                .entry(key.into_owned())
                .or_default()
                .push(value.into_owned());
        }
    }

    let Some(signature) = signature else {
        return false;
    };

    // BTreeMap iteration is already key-sorted
    let message: String = params
        .into_iter()
        .map(|(key, values)| format!("{key}={}", values.join(",")))
        .collect();

    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(api_secret.expose_secret().as_bytes()) else {
        return false;
    };
    mac.update(message.as_bytes());
    let expected = hex::encode(mac.finalize().into_bytes());

    constant_time_compare(&expected, &signature)
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "hush-app-api-secret";

    fn sign_message(message: &str, secret: &str) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("valid key length");
        mac.update(message.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn secret() -> SecretString {
        SecretString::from(TEST_SECRET)
    }

    #[test]
    fn test_constant_time_compare_equal() {
        assert!(constant_time_compare("hello", "hello"));
        assert!(constant_time_compare("", ""));
    }

    #[test]
    fn test_constant_time_compare_not_equal() {
        assert!(!constant_time_compare("hello", "world"));
        assert!(!constant_time_compare("hello", "hell"));
        assert!(!constant_time_compare("hello", "helloo"));
    }

    #[test]
    fn test_valid_signature() {
        let message =
            "path_prefix=/apps/giftcardshop=test-shop.myshopify.comtimestamp=1717171717";
        let signature = sign_message(message, TEST_SECRET);

        let query = format!(
            "shop=test-shop.myshopify.com&path_prefix=/apps/giftcard&timestamp=1717171717&signature={signature}"
        );
        assert!(verify_proxy_signature(&query, &secret()));
    }

    #[test]
    fn test_signature_position_irrelevant() {
        let message = "shop=test-shop.myshopify.comtimestamp=1717171717";
        let signature = sign_message(message, TEST_SECRET);

        let query =
            format!("shop=test-shop.myshopify.com&signature={signature}&timestamp=1717171717");
        assert!(verify_proxy_signature(&query, &secret()));
    }

    #[test]
    fn test_multi_value_params_grouped() {
        // Repeated keys contribute a single comma-joined entry
        let message = "ids=1,2,3shop=test-shop.myshopify.com";
        let signature = sign_message(message, TEST_SECRET);

        let query = format!(
            "ids=1&ids=2&ids=3&shop=test-shop.myshopify.com&signature={signature}"
        );
        assert!(verify_proxy_signature(&query, &secret()));
    }

    #[test]
    fn test_missing_signature() {
        assert!(!verify_proxy_signature(
            "shop=test-shop.myshopify.com&timestamp=1717171717",
            &secret()
        ));
        assert!(!verify_proxy_signature("", &secret()));
    }

    #[test]
    fn test_tampered_query() {
        let message = "shop=test-shop.myshopify.comtimestamp=1717171717";
        let signature = sign_message(message, TEST_SECRET);

        let query =
            format!("shop=evil-shop.myshopify.com&timestamp=1717171717&signature={signature}");
        assert!(!verify_proxy_signature(&query, &secret()));
    }

    #[test]
    fn test_wrong_secret() {
        let message = "shop=test-shop.myshopify.comtimestamp=1717171717";
        let signature = sign_message(message, "some-other-secret");

        let query =
            format!("shop=test-shop.myshopify.com&timestamp=1717171717&signature={signature}");
        assert!(!verify_proxy_signature(&query, &secret()));
    }

    #[test]
    fn test_percent_encoded_values_verify_decoded() {
        // Shopify signs the decoded parameter values
        let message = "path_prefix=/apps/gift cardshop=test-shop.myshopify.com";
        let signature = sign_message(message, TEST_SECRET);

        let query = format!(
            "path_prefix=%2Fapps%2Fgift%20card&shop=test-shop.myshopify.com&signature={signature}"
        );
        assert!(verify_proxy_signature(&query, &secret()));
    }
}
