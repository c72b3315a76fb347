use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::AnyWriter;
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::infrastructure::writer_from_settings;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Tree) => _tree(cli),
        Some(Commands::Codes) => _codes(cli),
        Some(Commands::Hints) => _hints(cli),
        Some(Commands::Type { input }) => _type(cli, input),
        Some(Commands::Config) => _config(cli),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Cli::command()
            .print_help()
            .map_err(|e| CliError::Usage(e.to_string())),
    }
}

/// Settings from config layers, then command line overrides.
pub fn resolve_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(directions) = cli.directions {
        settings.directions = directions;
    }
    if let Some(layout) = &cli.layout {
        settings.layout = Some(layout.clone());
    }
    settings.validate()?;
    debug!("settings: {:?}", settings);
    Ok(settings)
}

fn writer(cli: &Cli) -> CliResult<AnyWriter> {
    let settings = resolve_settings(cli)?;
    Ok(writer_from_settings(&settings)?)
}

#[instrument(skip(cli))]
fn _tree(cli: &Cli) -> CliResult<()> {
    let writer = writer(cli)?;
    output::info(&writer.to_tree_string());
    Ok(())
}

#[instrument(skip(cli))]
fn _codes(cli: &Cli) -> CliResult<()> {
    let writer = writer(cli)?;
    let codes = writer.codes();
    if codes.is_empty() {
        output::warning("tree has no keys");
    }
    for (content, path) in &codes {
        output::code(path, content);
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _hints(cli: &Cli) -> CliResult<()> {
    let writer = writer(cli)?;
    for (symbol, contents) in writer.hints() {
        output::action(&symbol.to_string(), &contents);
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _type(cli: &Cli, input: &str) -> CliResult<()> {
    if input.trim().is_empty() {
        return Err(CliError::InvalidArgs("no direction symbols given".to_string()));
    }
    let mut writer = writer(cli)?;
    let emitted = writer.type_symbols(input)?;

    output::action("emitted", &emitted.escape_debug());
    output::action("line", &format!("{:?}", writer.line()));
    if writer.is_mid_entry() {
        output::warning("input ends in the middle of an entry");
    }
    if writer.is_caps() || writer.is_shift() {
        output::detail(&format!(
            "caps: {}, shift: {}",
            writer.is_caps(),
            writer.is_shift()
        ));
    }
    let history = writer.history_list();
    if !history.is_empty() {
        output::header("history");
        for line in history {
            output::detail(&format!("{:?}", line));
        }
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _config(cli: &Cli) -> CliResult<()> {
    let settings = resolve_settings(cli)?;
    output::info(&settings.to_toml()?);
    Ok(())
}
