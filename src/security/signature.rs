//! Feishu/Lark custom-bot request signing.
//!
//! The bot verifies `base64(HMAC-SHA256(key = "{timestamp}\n{secret}", message = ""))`,
//! where `timestamp` is whole seconds since the Unix epoch and must be the
//! same value sent alongside the signature.

use base64::Engine;
use ring::hmac;

pub const SIGNATURE_HEADER: &str = "X-Lark-Signature";

/// Signature for `timestamp`, or `None` when no secret is configured.
pub fn sign(secret: Option<&str>, timestamp: i64) -> Option<String> {
    let secret = secret.filter(|s| !s.is_empty())?;

    let string_to_sign = format!("{timestamp}\n{secret}");
    let key = hmac::Key::new(hmac::HMAC_SHA256, string_to_sign.as_bytes());
    let tag = hmac::sign(&key, &[]);

    Some(base64::engine::general_purpose::STANDARD.encode(tag.as_ref()))
}

/// Value for the [`SIGNATURE_HEADER`] header.
pub fn signature_header(timestamp: i64, signature: &str) -> String {
    format!("timestamp:{timestamp},sign:{signature}")
}

/// Current Unix time in whole seconds.
pub fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}
