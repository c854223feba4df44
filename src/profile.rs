//! Environment profile and the process-wide mocking flag.
//!
//! The profile is read from `MOCKGATE_ENV`. Mocking is active only for the
//! `development` and `test` profiles.

use once_cell::sync::Lazy;

/// Environment variable naming the active profile.
pub const PROFILE_ENV_VAR: &str = "MOCKGATE_ENV";

/// Deployment profile the process is running under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Profile {
    Development,
    Test,
    Production,
    /// Any other profile name; treated like production.
    Other(String),
}

impl Profile {
    /// Parse a profile name. Matching is exact, like the environment check it mirrors.
    pub fn parse(name: &str) -> Self {
        match name {
            "development" => Profile::Development,
            "test" => Profile::Test,
            "production" => Profile::Production,
            other => Profile::Other(other.to_string()),
        }
    }

    /// Resolve the profile from the environment, falling back to `fallback`
    /// and then to production.
    pub fn from_env_or(fallback: Option<&str>) -> Self {
        let from_env = std::env::var(PROFILE_ENV_VAR).ok();
        Profile::resolve(from_env.as_deref(), fallback)
    }

    /// Pick the profile from an environment value, else `fallback`, else
    /// production.
    pub fn resolve(from_env: Option<&str>, fallback: Option<&str>) -> Self {
        from_env
            .or(fallback)
            .map(Profile::parse)
            .unwrap_or(Profile::Production)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Profile::Development => "development",
            Profile::Test => "test",
            Profile::Production => "production",
            Profile::Other(name) => name,
        }
    }

    /// Whether the mock interception layer should be active under this profile.
    pub fn mocking_enabled(&self) -> bool {
        matches!(self, Profile::Development | Profile::Test)
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static PROCESS_PROFILE: Lazy<Profile> = Lazy::new(|| Profile::from_env_or(None));

/// Process-wide mocking flag. Read once; later changes to the environment
/// are not observed.
pub fn mocking_enabled() -> bool {
    PROCESS_PROFILE.mocking_enabled()
}
