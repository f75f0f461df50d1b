//! QR payload classifier for Tizim Scan.
//!
//! Deterministic, side-effect-free mapping from a raw decoded string to a
//! [`ScanResult`]. Classification is an ordered cascade of shape parsers —
//! first match wins, because the patterns are not mutually exclusive (a URL
//! containing `@` must stay a URL, not become an email). Unclassifiable
//! input always degrades to plain text; `classify` is a total function.

use crate::types::scan::{ScanFields, ScanResult};

/// URI scheme the production client registers for payment QR codes.
pub const DEFAULT_TRANSACTION_SCHEME: &str = "tizim";

/// Ordered-cascade classifier for decoded QR payloads.
#[derive(Debug, Clone)]
pub struct Classifier {
    transaction_scheme: String,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    /// Creates a classifier recognizing the default payment scheme.
    pub fn new() -> Self {
        Self::with_scheme(DEFAULT_TRANSACTION_SCHEME)
    }

    /// Creates a classifier recognizing `scheme://transaction?...` payment codes.
    pub fn with_scheme(scheme: &str) -> Self {
        Self {
            transaction_scheme: scheme.to_string(),
        }
    }

    /// Classifies a decoded QR payload. Never fails; the worst case is a
    /// plain-text result carrying the trimmed input verbatim.
    pub fn classify(&self, raw: &str) -> ScanResult {
        let trimmed = raw.trim();
        let fields = parse_url(trimmed)
            .or_else(|| parse_phone(trimmed))
            .or_else(|| parse_email(trimmed))
            .or_else(|| parse_wifi(trimmed))
            .or_else(|| self.parse_transaction(trimmed));
        ScanResult {
            raw: trimmed.to_string(),
            fields,
        }
    }

    /// Payment URI: `<scheme>://transaction?amount=<float>&description=<text>`.
    ///
    /// The URI shape alone decides classification — an absent or
    /// unparseable amount leaves the field unset but the result is still a
    /// transaction. Query values are percent-decoded with `+` as space.
    fn parse_transaction(&self, s: &str) -> Option<ScanFields> {
        let prefix = format!("{}://transaction?", self.transaction_scheme);
        let query = strip_prefix_ignore_case(s, &prefix)?;
        if query.is_empty() {
            return None;
        }

        let mut amount = None;
        let mut description = String::new();
        for pair in query.split('&') {
            let (key, value) = match pair.split_once('=') {
                Some((k, v)) => (k, v),
                None => (pair, ""),
            };
            match percent_decode(key).as_str() {
                "amount" => amount = percent_decode(value).parse::<f64>().ok(),
                "description" => description = percent_decode(value),
                _ => {}
            }
        }

        Some(ScanFields::Transaction {
            amount,
            description,
        })
    }
}

/// URL: begins (case-insensitively) with `http://`, `https://` or `www.`.
/// A `www.` payload is normalized by prefixing `https://`.
fn parse_url(s: &str) -> Option<ScanFields> {
    if starts_with_ignore_case(s, "http://") || starts_with_ignore_case(s, "https://") {
        return Some(ScanFields::Url { url: s.to_string() });
    }
    if starts_with_ignore_case(s, "www.") {
        return Some(ScanFields::Url {
            url: format!("https://{}", s),
        });
    }
    None
}

/// Phone: optional `tel:`/`phone:` prefix, optional leading `+`, then a
/// 10–12 character run of digits, whitespace, hyphens and parentheses.
/// Normalized by stripping the prefix and all whitespace.
fn parse_phone(s: &str) -> Option<ScanFields> {
    let rest = strip_prefix_ignore_case(s, "tel:")
        .or_else(|| strip_prefix_ignore_case(s, "phone:"))
        .unwrap_or(s);

    let run = rest.strip_prefix('+').unwrap_or(rest);
    let len = run.chars().count();
    if !(10..=12).contains(&len) {
        return None;
    }
    if !run
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || c == '-' || c == '(' || c == ')')
    {
        return None;
    }

    let number: String = rest.chars().filter(|c| !c.is_whitespace()).collect();
    Some(ScanFields::Phone { number })
}

/// Email: optional `mailto:` prefix, then `local@domain.tld` where the
/// domain has at least one dot and the TLD is at least two letters.
fn parse_email(s: &str) -> Option<ScanFields> {
    let rest = strip_prefix_ignore_case(s, "mailto:").unwrap_or(s);

    let (local, domain) = rest.split_once('@')?;
    if local.is_empty()
        || !local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
    {
        return None;
    }

    let (host, tld) = domain.rsplit_once('.')?;
    if host.is_empty()
        || !host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return None;
    }
    if tld.chars().count() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    Some(ScanFields::Email {
        address: rest.to_string(),
    })
}

/// WiFi: the exact structured form `WIFI:T:<auth>;S:<ssid>;P:<password>;;`.
///
/// Field content is captured verbatim. Embedded `;` inside the SSID or
/// password breaks the grammar and falls through to the next parser —
/// escape sequences are not interpreted, matching the format the client
/// has always emitted and accepted.
fn parse_wifi(s: &str) -> Option<ScanFields> {
    let rest = strip_prefix_ignore_case(s, "WIFI:T:")?;
    let (auth, rest) = rest.split_once(';')?;
    if auth.is_empty()
        || !auth
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return None;
    }

    let rest = strip_prefix_ignore_case(rest, "S:")?;
    let (ssid, rest) = rest.split_once(';')?;
    if ssid.is_empty() {
        return None;
    }

    let rest = strip_prefix_ignore_case(rest, "P:")?;
    let password = rest.strip_suffix(";;")?;
    if password.is_empty() || password.contains(';') {
        return None;
    }

    Some(ScanFields::Wifi {
        ssid: ssid.to_string(),
        password: password.to_string(),
    })
}

/// Case-insensitive ASCII prefix strip. Returns the remainder on match.
fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    strip_prefix_ignore_case(s, prefix).is_some()
}

/// Decodes `%XX` escapes and maps `+` to space. Malformed escapes are kept
/// literally rather than rejected, so decoding never fails.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => match (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                (Some(hi), Some(lo)) => {
                    out.push((hi << 4) | lo);
                    i += 3;
                }
                _ => {
                    out.push(b'%');
                    i += 1;
                }
            },
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_val(b: u8) -> Option<u8> {
    (b as char).to_digit(16).map(|d| d as u8)
}
