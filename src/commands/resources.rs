//! list / get / create / delete commands

use futures::TryStreamExt;
use log::debug;
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::cf::{CfClient, Entity, Filter};
use crate::cli::{Cli, CreateArgs, DeleteArgs, GetArgs, ListArgs};
use crate::error::CfError;
use crate::output::{output_entities, output_entity};
use crate::ui::{confirm_action, create_spinner, finish_spinner};

/// Run the list command
pub async fn run_list_command(
    client: &CfClient,
    cli: &Cli,
    args: &ListArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let manager = client.manager(args.domain);
    let filters: Filter = args.filters.iter().cloned().collect();
    debug!("Listing {} with filters {:?}", args.domain, filters);

    let spinner = create_spinner(&format!("Fetching {} entities...", args.domain), cli.batch);
    let entities: Result<Vec<Entity>, CfError> = match manager.list(&filters) {
        Ok(stream) => stream.try_collect().await,
        Err(e) => Err(e),
    };
    finish_spinner(spinner);
    let entities = entities?;

    debug!("Fetched {} {} entities", entities.len(), args.domain);
    output_entities(
        &entities,
        manager.config().name_field,
        args.output,
        cli.no_header,
    )?;
    Ok(())
}

/// Run the get command
pub async fn run_get_command(
    client: &CfClient,
    cli: &Cli,
    args: &GetArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let manager = client.manager(args.domain);

    let spinner = create_spinner(&format!("Fetching {} '{}'...", args.domain, args.id), cli.batch);
    let entity = manager.find(&args.id).await;
    finish_spinner(spinner);

    let entity = entity?.ok_or_else(|| manager.name_not_found(&args.id))?;
    output_entity(&entity, args.output, cli.no_header)?;
    Ok(())
}

/// Run the create command
pub async fn run_create_command(
    client: &CfClient,
    cli: &Cli,
    args: &CreateArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let manager = client.manager(args.domain);
    manager.ensure_can_create()?;
    let payload = parse_payload(&args.data)?;

    let spinner = create_spinner(&format!("Creating {}...", args.domain), cli.batch);
    let entity = manager.create(&payload).await;
    finish_spinner(spinner);

    output_entity(&entity?, args.output, cli.no_header)?;
    Ok(())
}

/// Run the delete command
pub async fn run_delete_command(
    client: &CfClient,
    cli: &Cli,
    args: &DeleteArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let manager = client.manager(args.domain);
    manager.ensure_can_delete()?;

    let guid = manager.resolve_guid(&args.id).await?;
    let description = if guid == args.id {
        format!("{} {}", args.domain, guid)
    } else {
        format!("{} '{}' ({})", args.domain, args.id, guid)
    };

    if !confirm_action(&format!("Delete {}?", description), args.yes, cli.batch)? {
        println!("Cancelled");
        return Ok(());
    }

    let spinner = create_spinner(&format!("Deleting {}...", description), cli.batch);
    let result = manager.delete(&guid).await;
    finish_spinner(spinner);
    result?;

    println!("✓ Deleted {}", description);
    Ok(())
}

/// Read a create payload from a JSON file path or inline JSON
///
/// The error names which of the two was attempted.
pub fn parse_payload(input: &str) -> Result<Value, CfError> {
    let path = Path::new(input);
    let (source, content) = if path.is_file() {
        let content = fs::read_to_string(path).map_err(|e| {
            CfError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        (format!("file {}", path.display()), content)
    } else {
        ("inline argument".to_string(), input.to_string())
    };

    let value: Value = serde_json::from_str(&content)
        .map_err(|e| CfError::Json(format!("Invalid JSON in {}: {}", source, e)))?;
    if !value.is_object() {
        return Err(CfError::Json(format!(
            "Payload from {} must be a JSON object",
            source
        )));
    }
    Ok(value)
}
