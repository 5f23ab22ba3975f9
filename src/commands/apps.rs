//! Application commands

use futures::TryStreamExt;
use serde_json::Value;

use crate::cf::{CfClient, Domain, Entity};
use crate::cli::{AppAction, AppArgs, Cli};
use crate::error::CfError;
use crate::output::{output_entities, output_raw};
use crate::ui::{create_spinner, finish_spinner};

/// Route field shown in route tables
const ROUTE_NAME_FIELD: &str = "host";

enum AppOutput {
    Raw(Value),
    Routes(Vec<Entity>),
    State(Entity),
}

/// Run an application operation
pub async fn run_app_command(
    client: &CfClient,
    cli: &Cli,
    args: &AppArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let guid = client
        .manager(Domain::Application)
        .resolve_guid(&args.id)
        .await?;

    let spinner = create_spinner(&spinner_message(args.action, &args.id), cli.batch);
    let result: Result<AppOutput, CfError> = match args.action {
        AppAction::Env => client.app_env(&guid).await.map(AppOutput::Raw),
        AppAction::Instances => client.app_instances(&guid).await.map(AppOutput::Raw),
        AppAction::Stats => client.app_stats(&guid).await.map(AppOutput::Raw),
        AppAction::Routes => client
            .app_routes(&guid)
            .try_collect()
            .await
            .map(AppOutput::Routes),
        AppAction::Start => client.start_app(&guid).await.map(AppOutput::State),
        AppAction::Stop => client.stop_app(&guid).await.map(AppOutput::State),
    };
    finish_spinner(spinner);

    match result? {
        AppOutput::Raw(raw) => output_raw(&raw, args.output, cli.no_header)?,
        AppOutput::Routes(routes) => {
            output_entities(&routes, Some(ROUTE_NAME_FIELD), args.output, cli.no_header)?
        }
        AppOutput::State(app) => println!(
            "✓ Application '{}' is {}",
            args.id,
            app.field("state").unwrap_or("updated")
        ),
    }
    Ok(())
}

fn spinner_message(action: AppAction, app: &str) -> String {
    match action {
        AppAction::Start => format!("Starting application '{}'...", app),
        AppAction::Stop => format!("Stopping application '{}'...", app),
        AppAction::Env => format!("Fetching environment of '{}'...", app),
        AppAction::Routes => format!("Fetching routes of '{}'...", app),
        AppAction::Instances => format!("Fetching instances of '{}'...", app),
        AppAction::Stats => format!("Fetching stats of '{}'...", app),
    }
}
