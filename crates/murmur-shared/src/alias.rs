//! Canonical form of a claimed alias.
//!
//! Aliases are chosen by users, so they are NFC-normalized and then reduced to
//! ASCII the same way a domain name is: any label that carries non-ASCII text
//! is punycode-encoded behind an `xn--` prefix. The result always starts with
//! the handle sigil.

use unicode_normalization::UnicodeNormalization;

use crate::constants::{ACE_PREFIX, HANDLE_SIGIL, LABEL_SEPARATORS};

/// Normalize a raw alias into a sigil-prefixed ASCII handle.
pub fn normalize_alias(raw: &str) -> String {
    let composed: String = raw.nfc().collect();
    let ascii = to_ascii(&composed);
    if ascii.starts_with(HANDLE_SIGIL) {
        ascii
    } else {
        format!("{HANDLE_SIGIL}{ascii}")
    }
}

/// Everything up to and including the first `@` is kept verbatim; the rest is
/// treated as a dotted name and encoded label by label.
fn to_ascii(input: &str) -> String {
    let (local, domain) = match input.split_once('@') {
        Some((local, domain)) => (Some(local), domain),
        None => (None, input),
    };

    let encoded = domain
        .split(|c| LABEL_SEPARATORS.contains(&c))
        .map(encode_label)
        .collect::<Vec<_>>()
        .join(".");

    match local {
        Some(local) => format!("{local}@{encoded}"),
        None => encoded,
    }
}

fn encode_label(label: &str) -> String {
    if label.is_ascii() {
        return label.to_string();
    }
    match idna::punycode::encode_str(label) {
        Some(encoded) => format!("{ACE_PREFIX}{encoded}"),
        // Only fails on overflow for absurdly long labels.
        None => label.chars().filter(char::is_ascii).collect(),
    }
}
