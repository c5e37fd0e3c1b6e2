//! Minimal AWS Signature Version 4 request signer.
//!
//! Managed Elasticsearch domains behind IAM only accept requests carrying a
//! SigV4 `Authorization` header. This signer covers exactly what the roster
//! client sends: a single-host request with `host` and `x-amz-date` as the
//! signed headers. Signing time is a parameter so the output is
//! deterministic and testable.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const SIGNED_HEADERS: &str = "host;x-amz-date";

/// The service name Elasticsearch domains sign under.
pub const SERVICE: &str = "es";

/// Headers to attach to an outgoing signed request.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    /// Value for the `x-amz-date` header, e.g. `20150830T123600Z`.
    pub amz_date: String,
    /// Value for the `Authorization` header.
    pub authorization: String,
}

/// Signs requests for one credential triple.
#[derive(Debug, Clone)]
pub struct SigV4Signer {
    access_key_id: String,
    secret_access_key: String,
    region: String,
}

impl SigV4Signer {
    pub fn new(access_key_id: &str, secret_access_key: &str, region: &str) -> Self {
        Self {
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
            region: region.to_string(),
        }
    }

    /// Sign one request. `host` is the authority (no scheme), `path` the
    /// absolute request path, `query` the raw query string without the `?`
    /// (empty for none).
    pub fn sign(
        &self,
        method: &str,
        host: &str,
        path: &str,
        query: &str,
        payload: &[u8],
        at: DateTime<Utc>,
    ) -> SignedRequest {
        let amz_date = at.format("%Y%m%dT%H%M%SZ").to_string();
        let datestamp = at.format("%Y%m%d").to_string();

        let payload_hash = sha256_hex(payload);
        let canonical_headers = format!("host:{host}\nx-amz-date:{amz_date}\n");
        let canonical_request = format!(
            "{method}\n{path}\n{query}\n{canonical_headers}\n{SIGNED_HEADERS}\n{payload_hash}"
        );

        let scope = format!("{datestamp}/{}/{SERVICE}/aws4_request", self.region);
        let string_to_sign = format!(
            "{ALGORITHM}\n{amz_date}\n{scope}\n{}",
            sha256_hex(canonical_request.as_bytes())
        );

        let signature = hex::encode(hmac_sha256(
            &self.signing_key(&datestamp),
            string_to_sign.as_bytes(),
        ));

        let authorization = format!(
            "{ALGORITHM} Credential={}/{scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
            self.access_key_id
        );

        SignedRequest {
            amz_date,
            authorization,
        }
    }

    /// Derive the per-day signing key: the HMAC chain over date, region,
    /// service, and the fixed terminator.
    fn signing_key(&self, datestamp: &str) -> Vec<u8> {
        let k_secret = format!("AWS4{}", self.secret_access_key);
        let k_date = hmac_sha256(k_secret.as_bytes(), datestamp.as_bytes());
        let k_region = hmac_sha256(&k_date, self.region.as_bytes());
        let k_service = hmac_sha256(&k_region, SERVICE.as_bytes());
        hmac_sha256(&k_service, b"aws4_request")
    }
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

mod hex {
    /// Encode bytes as a lowercase hex string.
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }
}
