//! Unit tests for session configuration parsing.

use std::collections::HashMap;
use std::io::Write;

use mockable::MockEnv;
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

use super::*;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create key file");
    file.write_all(&vec![b'k'; len]).expect("write key bytes");
    file
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

/// A complete, valid release configuration pointing at a full-length key.
struct ReleaseEnv {
    key: NamedTempFile,
    vars: HashMap<&'static str, String>,
}

impl ReleaseEnv {
    fn set(mut self, name: &'static str, value: &str) -> Self {
        self.vars.insert(name, value.to_owned());
        self
    }

    fn unset(mut self, name: &'static str) -> Self {
        self.vars.remove(name);
        self
    }

    fn resolve(&self, mode: BuildMode) -> Result<SessionSettings, SessionConfigError> {
        session_settings_from_env(&mock_env(self.vars.clone()), mode)
    }
}

#[fixture]
fn release_env() -> ReleaseEnv {
    let key = key_file(SESSION_KEY_MIN_LEN);
    let vars = HashMap::from([
        (KEY_FILE_ENV, key.path().to_string_lossy().into_owned()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ]);
    ReleaseEnv { key, vars }
}

#[rstest]
fn release_accepts_a_complete_configuration(release_env: ReleaseEnv) {
    let settings = release_env
        .resolve(BuildMode::Release)
        .expect("valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
    assert!(release_env.key.path().exists());
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_rejects_missing_toggles(release_env: ReleaseEnv, #[case] name: &'static str) {
    let err = release_env
        .unset(name)
        .resolve(BuildMode::Release)
        .err()
        .expect("missing toggle is fatal");
    assert!(matches!(err, SessionConfigError::MissingEnv { name: missing } if missing == name));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(COOKIE_SECURE_ENV, "")]
#[case(SAMESITE_ENV, "sometimes")]
#[case(ALLOW_EPHEMERAL_ENV, "2")]
fn release_rejects_malformed_toggles(
    release_env: ReleaseEnv,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let err = release_env
        .set(name, value)
        .resolve(BuildMode::Release)
        .err()
        .expect("malformed toggle is fatal");
    assert!(matches!(err, SessionConfigError::InvalidEnv { name: bad, .. } if bad == name));
}

#[rstest]
fn release_rejects_ephemeral_keys(release_env: ReleaseEnv) {
    let err = release_env
        .set(ALLOW_EPHEMERAL_ENV, "yes")
        .resolve(BuildMode::Release)
        .err()
        .expect("ephemeral keys are debug only");
    assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_rejects_short_keys(release_env: ReleaseEnv) {
    let short = key_file(SESSION_KEY_MIN_LEN / 2);
    let err = release_env
        .set(KEY_FILE_ENV, &short.path().to_string_lossy())
        .resolve(BuildMode::Release)
        .err()
        .expect("short key is fatal");
    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort { length, min_len, .. }
            if length == SESSION_KEY_MIN_LEN / 2 && min_len == SESSION_KEY_MIN_LEN
    ));
}

#[rstest]
fn release_rejects_unreadable_keys(release_env: ReleaseEnv) {
    let missing = std::env::temp_dir().join("storefront-no-such-session-key");
    let err = release_env
        .set(KEY_FILE_ENV, &missing.to_string_lossy())
        .resolve(BuildMode::Release)
        .err()
        .expect("unreadable key is fatal");
    assert!(matches!(err, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn release_rejects_same_site_none_without_secure_cookies(release_env: ReleaseEnv) {
    let err = release_env
        .set(COOKIE_SECURE_ENV, "0")
        .set(SAMESITE_ENV, "None")
        .resolve(BuildMode::Release)
        .err()
        .expect("insecure SameSite=None is fatal");
    assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
}

#[rstest]
fn debug_defaults_to_secure_lax_cookies_with_a_temporary_key() {
    let settings = session_settings_from_env(&mock_env(HashMap::new()), BuildMode::Debug)
        .expect("debug defaults succeed");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
#[case("unexpected", SameSite::Lax)]
#[case("STRICT", SameSite::Strict)]
#[case("none", SameSite::None)]
fn debug_same_site_parsing(release_env: ReleaseEnv, #[case] raw: &str, #[case] expected: SameSite) {
    let settings = release_env
        .set(COOKIE_SECURE_ENV, "0")
        .set(SAMESITE_ENV, raw)
        .resolve(BuildMode::Debug)
        .expect("debug tolerates odd values");
    assert_eq!(settings.same_site, expected);
    assert!(!settings.cookie_secure);
}

#[rstest]
fn debug_replaces_short_keys_with_a_temporary_one(release_env: ReleaseEnv) {
    let short = key_file(8);
    let settings = release_env
        .set(KEY_FILE_ENV, &short.path().to_string_lossy())
        .resolve(BuildMode::Debug)
        .expect("debug tolerates short keys");
    assert_eq!(settings.same_site, SameSite::Strict);
}
