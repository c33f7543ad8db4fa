use crate::{
    api,
    cli::telemetry,
    provider::SupabaseProvider,
    registration::{RegistrationConfig, RegistrationService},
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub app_url: String,
    pub supabase_url: String,
    pub supabase_anon_key: SecretString,
}

/// Execute the server action.
/// # Errors
/// Returns an error if a URL is invalid or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    info!(
        port = args.port,
        app_url = %args.app_url,
        supabase_url = %args.supabase_url,
        "starting kuauth"
    );

    let config = RegistrationConfig::new(&args.app_url).context("invalid --app-url")?;
    let provider = SupabaseProvider::new(&args.supabase_url, args.supabase_anon_key)
        .context("invalid --supabase-url")?;
    let service = RegistrationService::new(config, Arc::new(provider));

    let result = api::new(args.port, service).await;

    telemetry::shutdown_tracer();

    result
}
