//! Cache-control policies for HTTP handlers.

/// The taxonomy and synonym table are compiled in and change only on deploy.
pub const PUBLIC_CATALOGUE: &str = "public, max-age=3600";

/// Responses that depend on the session or on live inventory.
pub const PRIVATE_NO_CACHE_MUST_REVALIDATE: &str = "private, no-cache, must-revalidate";

/// Header tuple for static catalogue responses.
pub const fn public_catalogue_header() -> (&'static str, &'static str) {
    ("Cache-Control", PUBLIC_CATALOGUE)
}

/// Header tuple for per-user or inventory responses.
pub const fn private_no_cache_header() -> (&'static str, &'static str) {
    ("Cache-Control", PRIVATE_NO_CACHE_MUST_REVALIDATE)
}
