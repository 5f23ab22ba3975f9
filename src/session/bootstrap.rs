//! Client bootstrap from the persisted session or a password login

use log::{debug, info, warn};

use crate::cf::{CfClient, ClientOptions, TransportConfig};
use crate::error::{CfError, Result};
use crate::ui;

use super::models::Session;
use super::store::SessionStore;

/// Settings shared by every bootstrap path
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Never prompt; missing input is an error
    pub batch: bool,
    pub proxy: Option<String>,
}

/// Login input; anything missing is prompted for
#[derive(Debug, Clone, Default)]
pub struct LoginRequest {
    pub target: Option<String>,
    pub skip_ssl_verification: bool,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// A connected client together with where its tokens are persisted
pub struct ActiveSession {
    client: CfClient,
    skip_ssl_verification: bool,
    store: SessionStore,
}

impl ActiveSession {
    pub fn client(&self) -> &CfClient {
        &self.client
    }

    /// Write the current token pair back to the session file
    pub async fn persist(&self) -> Result<()> {
        let tokens = self.client.credentials().tokens().await?;
        let session = Session {
            target_endpoint: self.client.target().to_string(),
            skip_ssl_verification: self.skip_ssl_verification,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        };
        self.store.save(&session)?;
        debug!("Session saved to {}", self.store.path().display());
        Ok(())
    }
}

pub fn is_valid_target(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://")
}

/// Restore the persisted session, or log in when there is none
///
/// A session that cannot be restored for any reason other than
/// connectivity is deleted and the login runs once.
pub async fn open(store: &SessionStore, options: &SessionOptions) -> Result<ActiveSession> {
    match restore(store, options).await {
        Ok(Some(session)) => Ok(session),
        Ok(None) => {
            info!("No session at {}", store.path().display());
            bootstrap(store, options).await
        }
        Err(e) if e.is_connectivity() => Err(e),
        Err(e) => {
            warn!(
                "Could not restore session from {}: {}. Starting over",
                store.path().display(),
                e
            );
            store.remove()?;
            bootstrap(store, options).await
        }
    }
}

/// Password login; the resulting session is saved before returning
pub async fn login(
    store: &SessionStore,
    request: &LoginRequest,
    options: &SessionOptions,
) -> Result<ActiveSession> {
    let (target, skip_ssl_verification) = match &request.target {
        Some(target) => (target.clone(), request.skip_ssl_verification),
        None => {
            require_interactive(options, "--target")?;
            let target = ui::prompt_target()?;
            let skip = ui::prompt_skip_ssl_verification(request.skip_ssl_verification)?;
            (target, skip)
        }
    };
    if !is_valid_target(&target) {
        return Err(CfError::Config(format!(
            "Target '{}' must start with http:// or https://",
            target
        )));
    }

    let username = match &request.username {
        Some(username) => username.clone(),
        None => {
            require_interactive(options, "--username")?;
            ui::prompt_username()?
        }
    };
    let password = match &request.password {
        Some(password) => password.clone(),
        None => {
            require_interactive(options, "--password")?;
            ui::prompt_password()?
        }
    };

    let client = connect(&target, skip_ssl_verification, options).await?;
    client.init_with_password(&username, &password).await?;
    info!("Logged in to {} as {}", client.target(), username);

    let session = ActiveSession {
        client,
        skip_ssl_verification,
        store: store.clone(),
    };
    session.persist().await?;
    Ok(session)
}

async fn restore(store: &SessionStore, options: &SessionOptions) -> Result<Option<ActiveSession>> {
    let Some(session) = store.load()? else {
        return Ok(None);
    };
    debug!("Restoring session for {}", session.target_endpoint);

    let client = connect(
        &session.target_endpoint,
        session.skip_ssl_verification,
        options,
    )
    .await?;
    client
        .init_with_tokens(session.access_token, session.refresh_token)
        .await?;

    Ok(Some(ActiveSession {
        client,
        skip_ssl_verification: session.skip_ssl_verification,
        store: store.clone(),
    }))
}

async fn bootstrap(store: &SessionStore, options: &SessionOptions) -> Result<ActiveSession> {
    if options.batch {
        return Err(CfError::Session(format!(
            "No usable session at {}; run 'cfctl login' first",
            store.path().display()
        )));
    }
    login(store, &LoginRequest::default(), options).await
}

async fn connect(
    target: &str,
    skip_ssl_verification: bool,
    options: &SessionOptions,
) -> Result<CfClient> {
    let client_options = ClientOptions {
        transport: TransportConfig::default()
            .with_proxy(options.proxy.clone())
            .with_skip_ssl_verification(skip_ssl_verification),
        ..Default::default()
    };
    CfClient::connect(target, client_options).await
}

fn require_interactive(options: &SessionOptions, flag: &str) -> Result<()> {
    if options.batch {
        return Err(CfError::Session(format!(
            "{} is required in batch mode",
            flag
        )));
    }
    Ok(())
}
