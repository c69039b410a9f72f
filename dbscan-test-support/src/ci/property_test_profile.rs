//! Property-test run profile parsing for CI and local overrides.
//!
//! Every proptest suite reads its case count and fork mode through
//! [`ProptestRunProfile::load`], so one pair of environment variables tunes
//! the whole workspace.

use std::env;

/// Environment variable controlling proptest case counts.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable controlling proptest process forking.
pub const DBSCAN_PBT_FORK_ENV_KEY: &str = "DBSCAN_PBT_FORK";

/// Runtime profile for property-test execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Load a profile from the environment, falling back to the supplied
    /// defaults for unset or malformed variables.
    ///
    /// # Examples
    ///
    /// ```
    /// use dbscan_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(PROGTEST_CASES_ENV_KEY, default_cases, parse_cases),
            fork: override_or(DBSCAN_PBT_FORK_ENV_KEY, default_fork, parse_bool),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub const fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether to run proptest cases in forked subprocesses.
    #[must_use]
    pub const fn fork(&self) -> bool {
        self.fork
    }
}

fn override_or<T: Copy>(key: &'static str, default: T, parse: fn(&str) -> Option<T>) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|| {
        tracing::warn!(env = key, raw = %raw, "ignoring invalid property-test override");
        default
    })
}

fn parse_cases(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|cases| *cases > 0)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Restores a variable's previous value on drop.
    struct EnvGuard {
        key: &'static str,
        original: Option<String>,
    }

    impl EnvGuard {
        fn new(key: &'static str, value: Option<&str>) -> Self {
            let original = env::var(key).ok();
            apply(key, value);
            Self { key, original }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            apply(self.key, self.original.as_deref());
        }
    }

    fn apply(key: &str, value: Option<&str>) {
        // SAFETY: tests serialise environment access with ENV_LOCK.
        unsafe {
            match value {
                Some(value) => env::set_var(key, value),
                None => env::remove_var(key),
            }
        }
    }

    fn load_with(cases: Option<&str>, fork: Option<&str>, default_fork: bool) -> ProptestRunProfile {
        let _lock = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let _cases = EnvGuard::new(PROGTEST_CASES_ENV_KEY, cases);
        let _fork = EnvGuard::new(DBSCAN_PBT_FORK_ENV_KEY, fork);
        ProptestRunProfile::load(64, default_fork)
    }

    #[test]
    fn load_defaults_when_no_overrides_exist() {
        let profile = load_with(None, None, false);
        assert_eq!(profile.cases(), 64);
        assert!(!profile.fork());
    }

    #[rstest]
    #[case("1", 1)]
    #[case(" 250 ", 250)]
    #[case("25000", 25_000)]
    fn load_accepts_valid_case_overrides(#[case] raw: &str, #[case] expected: u32) {
        assert_eq!(load_with(Some(raw), None, false).cases(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-1")]
    #[case("abc")]
    fn load_ignores_invalid_case_overrides(#[case] raw: &str) {
        assert_eq!(load_with(Some(raw), None, false).cases(), 64);
    }

    #[rstest]
    #[case("true", true)]
    #[case("YES", true)]
    #[case("1", true)]
    #[case("on", true)]
    #[case("false", false)]
    #[case("No", false)]
    #[case("0", false)]
    #[case("off", false)]
    fn load_accepts_valid_fork_overrides(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(load_with(None, Some(raw), !expected).fork(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("maybe")]
    #[case("2")]
    fn load_ignores_invalid_fork_overrides(#[case] raw: &str) {
        assert!(load_with(None, Some(raw), true).fork());
    }
}
