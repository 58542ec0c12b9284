use anyhow::Result;
use calgrid_core::config::GlobalConfig;
use calgrid_core::remote::fetch_profile;
use calgrid_core::session::Session;
use calgrid_core::CalGridError;
use owo_colors::OwoColorize;

use super::create_spinner;

/// Sign in: the service handles the OAuth dance in the browser and shows an
/// access token to paste back here. We store the token plus the profile it
/// resolves to; refreshing tokens is the service's problem.
pub async fn run() -> Result<()> {
    let config = GlobalConfig::load()?;
    let signin_url = format!("{}/auth/signin", config.server_url.trim_end_matches('/'));

    if open::that(&signin_url).is_ok() {
        println!("Opened {} in your browser", signin_url);
    } else {
        println!("Open this URL to sign in:\n  {}", signin_url);
    }

    let token = rpassword::prompt_password("Paste your access token: ")?;
    let token = token.trim().to_string();
    if token.is_empty() {
        anyhow::bail!("No token given");
    }

    let spinner = create_spinner("Checking session".to_string());
    let profile = fetch_profile(&config.server_url, &token).await;
    spinner.finish_and_clear();

    let profile = profile.map_err(|err| match err {
        CalGridError::SignInRequired => anyhow::anyhow!("The service rejected that token"),
        other => other.into(),
    })?;

    let session = Session::new(token, profile.clone());
    session.save()?;

    println!(
        "{}",
        format!("Signed in as {} <{}>", profile.name, profile.email).green()
    );
    Ok(())
}
