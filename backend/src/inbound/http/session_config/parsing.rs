//! Value grammar for the session toggles.

use actix_web::cookie::SameSite;

pub(super) const FLAG_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
pub(super) const SAME_SITE_EXPECTED: &str = "Strict|Lax|None";

/// Parse a boolean toggle, ignoring case.
pub(super) fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

/// Parse a `SameSite` policy name, ignoring case.
pub(super) fn parse_same_site(raw: &str) -> Option<SameSite> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "strict" => Some(SameSite::Strict),
        "lax" => Some(SameSite::Lax),
        "none" => Some(SameSite::None),
        _ => None,
    }
}
