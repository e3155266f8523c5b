//! GitHub access token resolution.

/// Environment variables consulted for the token, in priority order.
pub const TOKEN_ENV_VARS: &[&str] = &["METASCOOP_GITHUB_TOKEN", "GITHUB_TOKEN"];

/// Where the GitHub token came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// Passed on the command line.
    CommandLine,
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the settings file.
    ConfigFile,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CommandLine => write!(f, "command line"),
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Resolve the GitHub token from the process environment.
///
/// Priority: command line > env vars > settings file.
pub fn resolve_token(
    cli: Option<&str>,
    from_settings: Option<&str>,
) -> (Option<String>, TokenSource) {
    resolve_token_with(cli, from_settings, |var| std::env::var(var).ok())
}

/// Same as [`resolve_token`] with an injectable environment lookup.
pub fn resolve_token_with(
    cli: Option<&str>,
    from_settings: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> (Option<String>, TokenSource) {
    if let Some(token) = non_empty(cli) {
        return (Some(token), TokenSource::CommandLine);
    }
    for &var in TOKEN_ENV_VARS {
        if let Some(token) = non_empty(env(var).as_deref()) {
            return (Some(token), TokenSource::EnvVar(var));
        }
    }
    if let Some(token) = non_empty(from_settings) {
        return (Some(token), TokenSource::ConfigFile);
    }
    (None, TokenSource::Missing)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
