use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_SUPABASE_URL: &str = "supabase-url";
pub const ARG_SUPABASE_ANON_KEY: &str = "supabase-anon-key";

#[derive(Debug, Clone)]
pub struct Options {
    pub url: String,
    pub anon_key: SecretString,
}

impl Options {
    /// Parse identity provider arguments from matches.
    ///
    /// # Errors
    /// Returns an error if a required argument is missing or blank.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        // clap passes through env vars that are set to ""
        let get_non_empty = |id: &str| {
            matches
                .get_one::<String>(id)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let Some(url) = get_non_empty(ARG_SUPABASE_URL) else {
            anyhow::bail!("missing required argument: --{ARG_SUPABASE_URL}");
        };
        let Some(anon_key) = get_non_empty(ARG_SUPABASE_ANON_KEY) else {
            anyhow::bail!("missing required argument: --{ARG_SUPABASE_ANON_KEY}");
        };

        Ok(Self {
            url,
            anon_key: SecretString::from(anon_key),
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_SUPABASE_URL)
                .long(ARG_SUPABASE_URL)
                .help("Supabase project URL")
                .long_help(
                    "Supabase project URL, e.g. https://<project>.supabase.co. Sign-ups are sent to its /auth/v1/signup endpoint.",
                )
                .env("KUAUTH_SUPABASE_URL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_SUPABASE_ANON_KEY)
                .long(ARG_SUPABASE_ANON_KEY)
                .help("Supabase anonymous (public) API key")
                .env("KUAUTH_SUPABASE_ANON_KEY")
                .hide_env_values(true)
                .required(true),
        )
}
