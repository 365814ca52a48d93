//! AWS Signature Version 4 signing for Comprehend requests.
//!
//! The canonical request covers the POST to `/` with the content-type, host,
//! x-amz-date, optional x-amz-security-token, and x-amz-target headers.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use super::{AMZ_JSON_CONTENT_TYPE, SERVICE};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

pub(crate) struct SigningParams<'a> {
    pub access_key_id: &'a str,
    pub secret_access_key: &'a str,
    pub session_token: Option<&'a str>,
    pub region: &'a str,
    pub host: &'a str,
    pub target: &'a str,
    pub timestamp: DateTime<Utc>,
}

pub(crate) struct SignedRequest {
    pub amz_date: String,
    pub authorization: String,
}

/// Produce the `X-Amz-Date` and `Authorization` header values for a payload.
pub(crate) fn sign(params: &SigningParams<'_>, payload: &[u8]) -> SignedRequest {
    let amz_date = params.timestamp.format("%Y%m%dT%H%M%SZ").to_string();
    let date = params.timestamp.format("%Y%m%d").to_string();

    // Canonical headers must stay in byte order of their lowercased names.
    let mut canonical_headers = format!(
        "content-type:{AMZ_JSON_CONTENT_TYPE}\nhost:{}\nx-amz-date:{amz_date}\n",
        params.host
    );
    let mut signed_headers = String::from("content-type;host;x-amz-date");
    if let Some(token) = params.session_token {
        canonical_headers.push_str(&format!("x-amz-security-token:{token}\n"));
        signed_headers.push_str(";x-amz-security-token");
    }
    canonical_headers.push_str(&format!("x-amz-target:{}\n", params.target));
    signed_headers.push_str(";x-amz-target");

    let canonical_request = format!(
        "POST\n/\n\n{canonical_headers}\n{signed_headers}\n{}",
        hex_sha256(payload)
    );

    let scope = format!("{date}/{}/{SERVICE}/aws4_request", params.region);
    let string_to_sign = format!(
        "{ALGORITHM}\n{amz_date}\n{scope}\n{}",
        hex_sha256(canonical_request.as_bytes())
    );

    let secret = format!("AWS4{}", params.secret_access_key);
    let k_date = hmac_sha256(secret.as_bytes(), date.as_bytes());
    let k_region = hmac_sha256(&k_date, params.region.as_bytes());
    let k_service = hmac_sha256(&k_region, SERVICE.as_bytes());
    let k_signing = hmac_sha256(&k_service, b"aws4_request");
    let signature = hex::encode(hmac_sha256(&k_signing, string_to_sign.as_bytes()));

    let authorization = format!(
        "{ALGORITHM} Credential={}/{scope}, SignedHeaders={signed_headers}, Signature={signature}",
        params.access_key_id
    );

    SignedRequest {
        amz_date,
        authorization,
    }
}

fn hex_sha256(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac =
        HmacSha256::new_from_slice(key).expect("hmac-sha256 accepts keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn params(token: Option<&'static str>) -> SigningParams<'static> {
        SigningParams {
            access_key_id: "AKIDEXAMPLE",
            secret_access_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            session_token: token,
            region: "us-east-1",
            host: "comprehend.us-east-1.amazonaws.com",
            target: "Comprehend_20171127.DetectSentiment",
            timestamp: Utc.with_ymd_and_hms(2021, 3, 15, 12, 30, 45).unwrap(),
        }
    }

    #[test]
    fn signature_is_deterministic_for_fixed_inputs() {
        let a = sign(&params(None), b"{\"Text\":\"hello\"}");
        let b = sign(&params(None), b"{\"Text\":\"hello\"}");
        assert_eq!(a.authorization, b.authorization);
        assert_eq!(a.amz_date, "20210315T123045Z");
    }

    #[test]
    fn different_payloads_sign_differently() {
        let a = sign(&params(None), b"{\"Text\":\"hello\"}");
        let b = sign(&params(None), b"{\"Text\":\"goodbye\"}");
        assert_ne!(a.authorization, b.authorization);
    }

    #[test]
    fn authorization_carries_scope_and_signed_headers() {
        let signed = sign(&params(None), b"{}");
        assert!(signed.authorization.starts_with(
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20210315/us-east-1/comprehend/aws4_request"
        ));
        assert!(signed
            .authorization
            .contains("SignedHeaders=content-type;host;x-amz-date;x-amz-target"));
        let signature = signed.authorization.rsplit('=').next().unwrap();
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn session_token_joins_the_signed_headers() {
        let signed = sign(&params(Some("FwoGZXIvYXdzEBQ")), b"{}");
        assert!(signed.authorization.contains(
            "SignedHeaders=content-type;host;x-amz-date;x-amz-security-token;x-amz-target"
        ));
    }
}
