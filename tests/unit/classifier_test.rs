//! Unit tests for the QR payload classifier.
//!
//! These tests exercise the ordered classification cascade: URL, phone,
//! email, WiFi, transaction, and the plain-text fallback, including the
//! first-match-wins ordering and normalization rules.

use rstest::rstest;
use tizim_scan::services::classifier::Classifier;
use tizim_scan::types::scan::{ScanFields, ScanKind};

#[rstest]
#[case("https://example.com")]
#[case("http://example.com/path?x=1")]
#[case("HTTPS://EXAMPLE.COM")]
#[case("www.example.com")]
fn test_url_payloads_classify_as_url(#[case] input: &str) {
    let result = Classifier::new().classify(input);
    assert_eq!(result.kind(), ScanKind::Url);
    assert_eq!(result.raw, input);
}

#[test]
fn test_www_payload_is_normalized_to_https() {
    let result = Classifier::new().classify("www.example.com/page");
    match result.fields {
        Some(ScanFields::Url { url }) => {
            assert_eq!(url, "https://www.example.com/page");
        }
        other => panic!("expected URL fields, got {:?}", other),
    }
}

#[test]
fn test_absolute_url_is_kept_verbatim() {
    let result = Classifier::new().classify("https://example.com/a?b=c");
    match result.fields {
        Some(ScanFields::Url { url }) => assert_eq!(url, "https://example.com/a?b=c"),
        other => panic!("expected URL fields, got {:?}", other),
    }
}

/// A URL containing an `@` stays a URL — the cascade checks URL first.
#[test]
fn test_url_with_at_sign_is_not_email() {
    let result = Classifier::new().classify("https://user@example.com");
    assert_eq!(result.kind(), ScanKind::Url);
}

#[test]
fn test_plain_international_number_classifies_as_phone() {
    let result = Classifier::new().classify("+998901234567");
    match result.fields {
        Some(ScanFields::Phone { number }) => assert_eq!(number, "+998901234567"),
        other => panic!("expected phone fields, got {:?}", other),
    }
}

#[test]
fn test_tel_prefix_is_stripped_and_whitespace_removed() {
    let result = Classifier::new().classify("tel:+998901234567");
    match result.fields {
        Some(ScanFields::Phone { number }) => assert_eq!(number, "+998901234567"),
        other => panic!("expected phone fields, got {:?}", other),
    }

    let result = Classifier::new().classify("90 123-45-67");
    match result.fields {
        Some(ScanFields::Phone { number }) => assert_eq!(number, "90123-45-67"),
        other => panic!("expected phone fields, got {:?}", other),
    }
}

#[rstest]
#[case("123456789")] // 9 characters, below the minimum
#[case("+9989012345678901")] // above the maximum
#[case("90-123-45-ab")] // letters in the run
fn test_non_phone_runs_fall_through(#[case] input: &str) {
    let result = Classifier::new().classify(input);
    assert_ne!(result.kind(), ScanKind::Phone);
}

#[rstest]
#[case("user@example.com", "user@example.com")]
#[case("mailto:user.name+tag@mail.example.org", "user.name+tag@mail.example.org")]
fn test_email_payloads(#[case] input: &str, #[case] expected: &str) {
    let result = Classifier::new().classify(input);
    match result.fields {
        Some(ScanFields::Email { address }) => assert_eq!(address, expected),
        other => panic!("expected email fields, got {:?}", other),
    }
}

#[rstest]
#[case("user@example")] // domain has no dot
#[case("user@example.c")] // TLD too short
#[case("@example.com")] // empty local part
fn test_invalid_emails_fall_through_to_plain_text(#[case] input: &str) {
    let result = Classifier::new().classify(input);
    assert_eq!(result.kind(), ScanKind::PlainText);
}

#[test]
fn test_wifi_credentials_are_extracted_verbatim() {
    let result = Classifier::new().classify("WIFI:T:WPA;S:HomeNet;P:secret123;;");
    match result.fields {
        Some(ScanFields::Wifi { ssid, password }) => {
            assert_eq!(ssid, "HomeNet");
            assert_eq!(password, "secret123");
        }
        other => panic!("expected wifi fields, got {:?}", other),
    }
}

#[test]
fn test_wifi_markers_match_case_insensitively() {
    let result = Classifier::new().classify("wifi:t:wpa2;s:Cafe Wifi;p:pass word;;");
    match result.fields {
        Some(ScanFields::Wifi { ssid, password }) => {
            assert_eq!(ssid, "Cafe Wifi");
            assert_eq!(password, "pass word");
        }
        other => panic!("expected wifi fields, got {:?}", other),
    }
}

/// A semicolon inside the password breaks the grammar — no escaping is
/// interpreted, so the payload degrades to plain text.
#[test]
fn test_wifi_with_embedded_semicolon_is_plain_text() {
    let result = Classifier::new().classify("WIFI:T:WPA;S:Net;P:se;cret;;");
    assert_eq!(result.kind(), ScanKind::PlainText);
}

#[test]
fn test_transaction_with_amount_and_description() {
    let result = Classifier::new().classify("tizim://transaction?amount=50000&description=Lunch");
    match result.fields {
        Some(ScanFields::Transaction {
            amount,
            description,
        }) => {
            assert_eq!(amount, Some(50000.0));
            assert_eq!(description, "Lunch");
        }
        other => panic!("expected transaction fields, got {:?}", other),
    }
}

#[test]
fn test_transaction_description_is_urldecoded() {
    let result = Classifier::new()
        .classify("tizim://transaction?amount=12500.50&description=Kofe%20va+non");
    match result.fields {
        Some(ScanFields::Transaction {
            amount,
            description,
        }) => {
            assert_eq!(amount, Some(12500.50));
            assert_eq!(description, "Kofe va non");
        }
        other => panic!("expected transaction fields, got {:?}", other),
    }
}

/// Shape decides classification — a missing or unparseable amount leaves
/// the field unset but the result is still a transaction.
#[rstest]
#[case("tizim://transaction?description=Lunch")]
#[case("tizim://transaction?amount=abc&description=Lunch")]
fn test_transaction_without_usable_amount(#[case] input: &str) {
    let result = Classifier::new().classify(input);
    match result.fields {
        Some(ScanFields::Transaction {
            amount,
            description,
        }) => {
            assert_eq!(amount, None);
            assert_eq!(description, "Lunch");
        }
        other => panic!("expected transaction fields, got {:?}", other),
    }
}

#[test]
fn test_transaction_description_defaults_to_empty() {
    let result = Classifier::new().classify("tizim://transaction?amount=100");
    match result.fields {
        Some(ScanFields::Transaction {
            amount,
            description,
        }) => {
            assert_eq!(amount, Some(100.0));
            assert_eq!(description, "");
        }
        other => panic!("expected transaction fields, got {:?}", other),
    }
}

#[test]
fn test_custom_scheme_is_honored() {
    let classifier = Classifier::with_scheme("payapp");
    let result = classifier.classify("payapp://transaction?amount=42");
    assert_eq!(result.kind(), ScanKind::Transaction);

    // The default scheme no longer matches
    let result = classifier.classify("tizim://transaction?amount=42");
    assert_eq!(result.kind(), ScanKind::PlainText);
}

#[test]
fn test_empty_string_is_plain_text() {
    let result = Classifier::new().classify("");
    assert_eq!(result.kind(), ScanKind::PlainText);
    assert_eq!(result.raw, "");
    assert!(result.fields.is_none());
}

#[test]
fn test_random_text_is_preserved_verbatim() {
    let result = Classifier::new().classify("just some random text");
    assert_eq!(result.kind(), ScanKind::PlainText);
    assert_eq!(result.raw, "just some random text");
}

#[test]
fn test_input_is_trimmed_before_classification() {
    let result = Classifier::new().classify("  https://example.com  ");
    assert_eq!(result.kind(), ScanKind::Url);
    assert_eq!(result.raw, "https://example.com");
}
