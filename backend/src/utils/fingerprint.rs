use axum::http::HeaderMap;
use sha2::{Digest, Sha256};
use std::net::IpAddr;

/// Stable device fingerprint: SHA-256 over `user-agent|accept-language|ip`.
///
/// An empty fingerprint (no identifying signal at all) never matches
/// anything, including another empty fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn compute(headers: &HeaderMap, peer_ip: Option<IpAddr>) -> Self {
        let user_agent = header_str(headers, "user-agent");
        let language = header_str(headers, "accept-language");
        let ip = client_ip(headers, peer_ip);

        if user_agent.is_empty() && language.is_empty() && ip.is_empty() {
            return Fingerprint(String::new());
        }

        let mut hasher = Sha256::new();
        hasher.update(format!("{}|{}|{}", user_agent, language, ip));
        Fingerprint(hex::encode(hasher.finalize()))
    }

    pub fn from_raw(raw: impl Into<String>) -> Self {
        Fingerprint(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn matches(&self, other: &Fingerprint) -> bool {
        !self.0.is_empty() && !other.0.is_empty() && self.0 == other.0
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// First hop of `x-forwarded-for` when present, otherwise the socket peer.
fn client_ip(headers: &HeaderMap, peer_ip: Option<IpAddr>) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }
    peer_ip.map(|ip| ip.to_string()).unwrap_or_default()
}
