//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `BOOKSWAP_*` environment variables or a
//! config file. Boolean toggles are read from the environment or the file
//! only: a clap `SetTrue` flag always reports `false` when absent, which
//! would mask both the environment and the `true` defaults.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::ApprovalPolicy;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Runtime configuration for the HTTP server and the exchange workflow.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BOOKSWAP")]
pub struct AppSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// Mark the session cookie `Secure`.
    #[ortho_config(default = true, skip_cli)]
    pub cookie_secure: bool,
    /// File holding the session signing key material.
    pub session_key_file: Option<PathBuf>,
    /// Fall back to a generated session key when the key file is unreadable.
    #[ortho_config(default = false, skip_cli)]
    pub allow_ephemeral_session_key: bool,
    /// Withdraw a listing when one of its requests is approved.
    #[ortho_config(default = true, skip_cli)]
    pub close_listing_on_approval: bool,
    /// Reject competing pending requests when one is approved.
    #[ortho_config(default = true, skip_cli)]
    pub reject_competing_requests: bool,
}

impl AppSettings {
    /// Interface to bind, defaulting to all interfaces.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Port to bind, defaulting to 8080.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Session key file path.
    #[must_use]
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    /// Approval side effects. Both default to on.
    #[must_use]
    pub fn approval_policy(&self) -> ApprovalPolicy {
        ApprovalPolicy {
            close_listing: self.close_listing_on_approval,
            reject_competing: self.reject_competing_requests,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    const VARS: [&str; 7] = [
        "BOOKSWAP_HOST",
        "BOOKSWAP_PORT",
        "BOOKSWAP_COOKIE_SECURE",
        "BOOKSWAP_SESSION_KEY_FILE",
        "BOOKSWAP_ALLOW_EPHEMERAL_SESSION_KEY",
        "BOOKSWAP_CLOSE_LISTING_ON_APPROVAL",
        "BOOKSWAP_REJECT_COMPETING_REQUESTS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("bookswap")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.host(), DEFAULT_HOST);
        assert_eq!(settings.port(), DEFAULT_PORT);
        assert!(settings.cookie_secure);
        assert!(!settings.allow_ephemeral_session_key);
        assert_eq!(
            settings.session_key_file(),
            PathBuf::from(DEFAULT_SESSION_KEY_FILE)
        );
        assert_eq!(settings.approval_policy(), ApprovalPolicy::default());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("BOOKSWAP_HOST", Some("127.0.0.1".to_owned())),
            ("BOOKSWAP_PORT", Some("9090".to_owned())),
            ("BOOKSWAP_COOKIE_SECURE", Some("false".to_owned())),
            ("BOOKSWAP_SESSION_KEY_FILE", Some("/tmp/key".to_owned())),
            ("BOOKSWAP_ALLOW_EPHEMERAL_SESSION_KEY", Some("true".to_owned())),
            ("BOOKSWAP_CLOSE_LISTING_ON_APPROVAL", Some("false".to_owned())),
            ("BOOKSWAP_REJECT_COMPETING_REQUESTS", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.host(), "127.0.0.1");
        assert_eq!(settings.port(), 9090);
        assert!(!settings.cookie_secure);
        assert!(settings.allow_ephemeral_session_key);
        assert_eq!(settings.session_key_file(), PathBuf::from("/tmp/key"));
        assert_eq!(settings.approval_policy(), ApprovalPolicy::request_only());
    }

    #[rstest]
    #[case("BOOKSWAP_CLOSE_LISTING_ON_APPROVAL", ApprovalPolicy { close_listing: true, reject_competing: false })]
    #[case("BOOKSWAP_REJECT_COMPETING_REQUESTS", ApprovalPolicy { close_listing: false, reject_competing: true })]
    fn each_approval_toggle_is_read_independently(
        #[case] enabled: &str,
        #[case] expected: ApprovalPolicy,
    ) {
        let _guard = lock_env(VARS.map(|name| {
            let value = match name {
                "BOOKSWAP_CLOSE_LISTING_ON_APPROVAL" | "BOOKSWAP_REJECT_COMPETING_REQUESTS" => {
                    Some(if name == enabled { "true" } else { "false" }.to_owned())
                }
                "BOOKSWAP_COOKIE_SECURE" => Some("true".to_owned()),
                _ => None,
            };
            (name, value)
        }));

        let settings = load_from_empty_args();
        assert!(settings.cookie_secure);
        assert_eq!(settings.approval_policy(), expected);
    }
}
