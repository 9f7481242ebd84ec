//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::services::{HierarchyService, KgResponse};
use crate::cli::args::{Cli, Commands, ConfigCommands, FilterArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::Filters;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    let container = ServiceContainer::new(settings);

    match &cli.command {
        Some(Commands::Tree {
            input,
            filters,
            sorted,
        }) => cmd_tree(&container, input.as_deref(), filters, *sorted),
        Some(Commands::Json {
            input,
            filters,
            sorted,
            pretty,
        }) => cmd_json(&container, input.as_deref(), filters, *sorted, *pretty),
        Some(Commands::Entry { id, input }) => cmd_entry(&container, input.as_deref(), id),
        Some(Commands::Config { command }) => cmd_config(&container, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see `lexitree --help`".to_string(),
        )),
    }
}

/// Command-line input wins over the `input` setting.
fn resolve_input(input: Option<&Path>, settings: &Settings) -> CliResult<PathBuf> {
    input
        .map(Path::to_path_buf)
        .or_else(|| settings.input.clone())
        .ok_or_else(|| {
            CliError::Usage(
                "no results file: pass INPUT or set `input` in the config".to_string(),
            )
        })
}

fn service(container: &ServiceContainer, input: Option<&Path>) -> CliResult<HierarchyService> {
    let path = resolve_input(input, &container.settings)?;
    debug!(path = %path.display(), "using results file");
    Ok(container.hierarchy_service(&path))
}

fn sort_if(response: KgResponse, sorted: bool) -> KgResponse {
    match response {
        KgResponse::Positive(mut positive) if sorted => {
            positive.data = positive.data.sorted();
            KgResponse::Positive(positive)
        }
        other => other,
    }
}

#[instrument(skip(container))]
fn cmd_tree(
    container: &ServiceContainer,
    input: Option<&Path>,
    filters: &FilterArgs,
    sorted: bool,
) -> CliResult<()> {
    let filters = Filters::from(filters);
    let response = service(container, input)?.query(&filters)?;
    let response = sort_if(response, sorted || container.settings.sorted);

    match response {
        KgResponse::Positive(positive) => {
            output::info(&positive.data.to_tree_string());
            Ok(())
        }
        KgResponse::Negative(negative) => Err(CliError::NoData(negative.reason)),
    }
}

#[instrument(skip(container))]
fn cmd_json(
    container: &ServiceContainer,
    input: Option<&Path>,
    filters: &FilterArgs,
    sorted: bool,
    pretty: bool,
) -> CliResult<()> {
    let filters = Filters::from(filters);
    let response = service(container, input)?.query(&filters)?;
    let response = sort_if(response, sorted || container.settings.sorted);
    print_json(&response, pretty)
}

#[instrument(skip(container))]
fn cmd_entry(container: &ServiceContainer, input: Option<&Path>, id: &str) -> CliResult<()> {
    let response = service(container, input)?.entry_detail(id)?;
    print_json(&response, true)
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::header("Effective settings");
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no config directory available on this platform"),
        },
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> CliResult<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(InfraError::from)?;
    output::info(&json);
    Ok(())
}
