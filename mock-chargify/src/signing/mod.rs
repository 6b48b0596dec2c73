//! Signed callback parameters
//!
//! Chargify Direct redirects back to the merchant with a query string of the
//! form
//!
//! ```text
//! api_id=..&timestamp=..&nonce=..&status_code=200&result_code=2000&call_id=..&signature=..
//! ```
//!
//! where `signature` is the lowercase hex HMAC-SHA1 of the six preceding
//! values concatenated in order with no separator, keyed by the shared API
//! secret. Order is part of the contract, so parameters are kept in a `Vec`.

mod parameter;
mod zone;

pub use parameter::Parameter;
pub use zone::SigningZone;

use crate::error::MockError;
use crate::error::MockResult;
use crate::services::Clock;
use chrono::DateTime;
use chrono::Utc;
use hmac::Hmac;
use hmac::Mac;
use rand::RngCore;
use rand::rngs::OsRng;
use sha1::Sha1;
use std::fmt;
use subtle::ConstantTimeEq;

type HmacSha1 = Hmac<Sha1>;

/// Value of the `status_code` parameter
pub const STATUS_CODE: &str = "200";
/// Value of the `result_code` parameter
pub const RESULT_CODE: &str = "2000";
/// Value of the `call_id` parameter
pub const CALL_ID: &str = "chargify_id";
/// Random bytes behind each nonce (hex-encoded to twice this length)
pub const NONCE_BYTES: usize = 20;
/// Name of the trailing signature parameter
pub const SIGNATURE: &str = "signature";

/// Names of the signed parameters, in signing order
pub const SIGNED_FIELDS: [&str; 6] = [
    "api_id",
    "timestamp",
    "nonce",
    "status_code",
    "result_code",
    "call_id",
];

/// The ordered, signed parameter list of one signup callback
///
/// Built fresh for every request; the nonce and timestamp make reuse wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedParameterSet {
    parameters: Vec<Parameter>,
}

impl SignedParameterSet {
    /// Build a set stamped with `clock` in `zone` and a fresh nonce
    pub fn generate(
        secret: &str,
        api_id: &str,
        clock: &dyn Clock,
        zone: SigningZone,
    ) -> MockResult<Self> {
        let timestamp = format_timestamp(clock.now(), zone);
        let nonce = generate_nonce();
        Self::build_at(secret, api_id, &timestamp, &nonce)
    }

    /// Build a set from explicit timestamp and nonce values
    pub fn build_at(secret: &str, api_id: &str, timestamp: &str, nonce: &str) -> MockResult<Self> {
        if api_id.is_empty() {
            return Err(MockError::Config("API id is empty".to_string()));
        }

        let values = [api_id, timestamp, nonce, STATUS_CODE, RESULT_CODE, CALL_ID];
        let mut parameters: Vec<Parameter> = SIGNED_FIELDS
            .iter()
            .zip(values)
            .map(|(name, value)| Parameter::new(*name, value))
            .collect();

        // Signature covers only what has been appended so far.
        let signature = sign(secret, parameters.iter().map(Parameter::value))?;
        parameters.push(Parameter::new(SIGNATURE, signature));

        Ok(Self { parameters })
    }

    /// All parameters in wire order, signature last
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Value of the parameter called `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|p| p.name() == name)
            .map(Parameter::value)
    }

    /// Hex HMAC-SHA1 signature
    pub fn signature(&self) -> &str {
        // build_at always appends the signature last
        self.parameters.last().map(Parameter::value).unwrap_or_default()
    }

    /// Render as `name=value` pairs joined with `&`
    pub fn to_query_string(&self) -> String {
        self.parameters
            .iter()
            .map(Parameter::to_string)
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl fmt::Display for SignedParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// Lowercase hex HMAC-SHA1 of `values` concatenated without separators
pub fn sign<'a>(secret: &str, values: impl IntoIterator<Item = &'a str>) -> MockResult<String> {
    if secret.is_empty() {
        return Err(MockError::Config("signing secret is empty".to_string()));
    }

    let mut mac = HmacSha1::new_from_slice(secret.as_bytes())
        .map_err(|e| MockError::Internal(format!("HMAC key rejected: {e}")))?;
    for value in values {
        mac.update(value.as_bytes());
    }
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Split a rendered query string back into parameters
///
/// Entries without `=` get an empty value. No percent-decoding is applied.
pub fn parse_query(query: &str) -> Vec<Parameter> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((name, value)) => Parameter::new(name, value),
            None => Parameter::new(pair, ""),
        })
        .collect()
}

/// Check a callback query string the way a merchant would
///
/// Returns `Ok(false)` when the layout is wrong or the signature does not
/// match; `Err` only when `secret` is unusable.
pub fn verify(secret: &str, query: &str) -> MockResult<bool> {
    let parameters = parse_query(query);
    if parameters.len() != SIGNED_FIELDS.len() + 1 {
        return Ok(false);
    }

    let (signed, trailer) = parameters.split_at(SIGNED_FIELDS.len());
    let names_match = signed
        .iter()
        .zip(SIGNED_FIELDS)
        .all(|(p, expected)| p.name() == expected);
    if !names_match || trailer[0].name() != SIGNATURE {
        return Ok(false);
    }

    let expected = sign(secret, signed.iter().map(Parameter::value))?;
    Ok(expected
        .as_bytes()
        .ct_eq(trailer[0].value().as_bytes())
        .into())
}

/// Render `instant` in `zone` as `YYYY-MM-DD HH:MM:SS UTC` or `... +HHMM`
///
/// Named zones use the offset in effect at `instant`.
pub fn format_timestamp(instant: DateTime<Utc>, zone: SigningZone) -> String {
    let local = instant.with_timezone(&zone.offset_at(instant));
    if zone.is_utc() {
        local.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    } else {
        local.format("%Y-%m-%d %H:%M:%S %z").to_string()
    }
}

/// 20 bytes from the OS CSPRNG, lowercase hex
pub fn generate_nonce() -> String {
    let mut bytes = [0u8; NONCE_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
