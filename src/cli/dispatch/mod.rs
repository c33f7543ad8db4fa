//! Map validated CLI arguments to the action the binary runs.

use crate::cli::actions::{Action, server::Args};
use crate::cli::commands::{ARG_APP_URL, ARG_PORT, supabase};
use anyhow::{Context, Result};

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or blank.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let app_url = matches
        .get_one::<String>(ARG_APP_URL)
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .context("missing required argument: --app-url")?;

    let supabase_opts = supabase::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        app_url,
        supabase_url: supabase_opts.url,
        supabase_anon_key: supabase_opts.anon_key,
    }))
}
