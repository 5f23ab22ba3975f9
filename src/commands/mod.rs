//! Command dispatch
//!
//! Every command except `login` and `logout` runs against a restored (or
//! freshly bootstrapped) session, and the token pair is written back
//! afterwards so a refresh during the command survives the process.

mod apps;
mod resources;

use log::{debug, warn};

use crate::cf::CfClient;
use crate::cli::{Cli, Command, LoginArgs};
use crate::session::{self, LoginRequest, SessionOptions, SessionStore};

pub use apps::run_app_command;
pub use resources::{
    parse_payload, run_create_command, run_delete_command, run_get_command, run_list_command,
};

/// Run the command selected on the command line
pub async fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = SessionStore::from_option(cli.session_file.clone());
    let options = SessionOptions {
        batch: cli.batch,
        proxy: cli.proxy.clone(),
    };
    debug!("Using session file: {}", store.path().display());

    match &cli.command {
        Command::Login(args) => run_login_command(args, &store, &options).await,
        Command::Logout => run_logout_command(&store),
        _ => {
            let active = session::open(&store, &options).await?;
            let result = dispatch(active.client(), cli).await;
            if let Err(e) = active.persist().await {
                warn!("Failed to save session: {}", e);
            }
            result
        }
    }
}

async fn dispatch(client: &CfClient, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Command::List(args) => run_list_command(client, cli, args).await,
        Command::Get(args) => run_get_command(client, cli, args).await,
        Command::Create(args) => run_create_command(client, cli, args).await,
        Command::Delete(args) => run_delete_command(client, cli, args).await,
        Command::App(args) => run_app_command(client, cli, args).await,
        // Handled in `run` without a session
        Command::Login(_) | Command::Logout => Ok(()),
    }
}

async fn run_login_command(
    args: &LoginArgs,
    store: &SessionStore,
    options: &SessionOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = LoginRequest {
        target: args.target.clone(),
        skip_ssl_verification: args.skip_ssl_validation,
        username: args.username.clone(),
        password: args.password.clone(),
    };
    let active = session::login(store, &request, options).await?;
    println!("✓ Logged in to {}", active.client().target());
    Ok(())
}

fn run_logout_command(store: &SessionStore) -> Result<(), Box<dyn std::error::Error>> {
    if store.remove()? {
        println!("✓ Logged out");
    } else {
        println!("No saved session at {}", store.path().display());
    }
    Ok(())
}
