//! Session commands: sign in and inspect the remembered session.

use std::sync::Arc;

use tracing::info;
use velora_feed::stores::UserStore;
use velora_storefront::StorefrontConfig;
use velora_storefront::prefs::FileStore;
use velora_storefront::session::SessionStore;

fn sessions(config: &StorefrontConfig) -> SessionStore {
    let (feed, ns) = super::open(config);
    let users = UserStore::new(Arc::clone(&feed) as _, ns);
    let local = Arc::new(FileStore::new(&config.prefs_path));
    SessionStore::new(users, local, config.admin_name.clone())
        .with_platform_auth(Arc::new(super::AnonymousPlatformAuth::new(config, feed)))
}

/// Resolve `name`/`password` into a session and remember it.
///
/// # Errors
///
/// Returns an error on a wrong credential or a feed failure.
pub async fn login(
    config: &StorefrontConfig,
    name: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = sessions(config).resolve(name, password).await?;
    info!(
        user = %outcome.profile.name,
        role = %outcome.profile.role,
        created = outcome.created,
        "Signed in"
    );
    Ok(())
}

/// Print the remembered session, if any.
///
/// # Errors
///
/// Returns an error if the local slot or the feed cannot be read.
#[allow(clippy::print_stdout)]
pub async fn whoami(config: &StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    match sessions(config).reattach().await? {
        Some(profile) => println!("{} ({})", profile.name, profile.role),
        None => println!("no remembered session"),
    }
    Ok(())
}
