//! Entity output formatter

use comfy_table::{presets::NOTHING, Table};

use super::common::{display_value, field_table, render_structured};
use crate::cf::Entity;
use crate::cli::OutputFormat;
use crate::error::Result;

/// Output a list of entities
///
/// Tables show the guid and `name_field`; without a name field the table
/// is guid-only.
pub fn output_entities(
    entities: &[Entity],
    name_field: Option<&str>,
    format: OutputFormat,
    no_header: bool,
) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", entity_table(entities, name_field, no_header)),
        OutputFormat::Json | OutputFormat::Yaml => {
            println!("{}", render_structured(entities, format)?.trim_end())
        }
    }
    Ok(())
}

/// Output a single entity
pub fn output_entity(entity: &Entity, format: OutputFormat, no_header: bool) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", field_table(&entity_rows(entity), no_header)),
        OutputFormat::Json | OutputFormat::Yaml => {
            println!("{}", render_structured(entity, format)?.trim_end())
        }
    }
    Ok(())
}

fn entity_table(entities: &[Entity], name_field: Option<&str>, no_header: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING);

    match name_field {
        Some(name_field) => {
            if !no_header {
                table.set_header(vec!["GUID", "Name"]);
            }
            for entity in entities {
                table.add_row(vec![entity.guid(), entity.field(name_field).unwrap_or("")]);
            }
        }
        None => {
            if !no_header {
                table.set_header(vec!["GUID"]);
            }
            for entity in entities {
                table.add_row(vec![entity.guid()]);
            }
        }
    }
    table
}

/// Guid first, then the entity fields
fn entity_rows(entity: &Entity) -> Vec<(String, String)> {
    std::iter::once(("guid".to_string(), entity.guid().to_string()))
        .chain(
            entity
                .entity
                .iter()
                .map(|(k, v)| (k.clone(), display_value(v))),
        )
        .collect()
}
