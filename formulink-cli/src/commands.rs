//! Subcommand implementations
//!
//! Every command runs an import first; the registry lives only for the
//! duration of the process.

use crate::cli::Command;
use formulink::{BridgeConfig, ConfigError, ImportReport, Importer, Verbosity};
use formulink_core::Value;
use formulink_formulary::Formulary;
use serde_json::json;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no registered function named '{0}'")]
    UnknownFunction(String),

    #[error("{0}")]
    CallFailed(String),

    #[error("cannot render output: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_config(path: Option<&Path>) -> Result<BridgeConfig, CliError> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading config");
            Ok(BridgeConfig::from_path(path)?)
        }
        None => Ok(BridgeConfig::default()),
    }
}

pub fn run(command: Command, config: BridgeConfig, verbosity: Verbosity) -> Result<(), CliError> {
    let formulary = Formulary::standard();
    let importer = Importer::new(&formulary).with_config(config).with_verbosity(verbosity);

    match command {
        Command::Import { names, json } => {
            let report = if names.is_empty() {
                importer.import_all(None)
            } else {
                importer.import_list(&names, None)
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&report_json(&report))?);
            } else {
                print_report(&report);
            }
        }
        Command::List => {
            let report = importer.import_all(None);
            println!("{}", serde_json::to_string_pretty(&report.registry.list())?);
        }
        Command::Describe { name } => {
            let report = importer.import_all(None);
            let described = report
                .registry
                .describe(&name)
                .ok_or(CliError::UnknownFunction(name))?;
            println!("{}", serde_json::to_string_pretty(&described)?);
        }
        Command::Call { name, args } => {
            let report = importer.import_all(None);
            let args: Vec<Value> = args.iter().map(|a| parse_value(a)).collect();
            match report.registry.call(&name, &args) {
                Value::Error(err) => return Err(CliError::CallFailed(err.to_string())),
                value => println!("{}", render_value(&value)),
            }
        }
    }
    Ok(())
}

/// Interpret a command-line argument
pub fn parse_value(arg: &str) -> Value {
    match arg {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => match arg.parse::<f64>() {
            Ok(n) if n.is_finite() => Value::Number(n),
            _ => Value::Text(arg.to_string()),
        },
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Number(n) => n.to_string(),
        Value::Quantity(q) => q.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Text(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::List(items) => {
            let parts: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Error(err) => err.to_string(),
    }
}

fn report_json(report: &ImportReport) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = report
        .imported
        .iter()
        .filter_map(|key| {
            let entry = report.registry.get(key)?;
            Some(json!({
                "name": key,
                "units": entry.meta().units,
                "args": entry.meta().arg_units,
            }))
        })
        .collect();
    json!({
        "imported": entries,
        "skipped": report.skipped(),
        "diagnostics": report.diagnostics,
    })
}

fn print_report(report: &ImportReport) {
    for key in &report.imported {
        if let Some(entry) = report.registry.get(key) {
            println!("{:<14} [{}]", key, entry.meta().units);
        }
    }
    if !report.diagnostics.is_empty() {
        println!();
        for d in &report.diagnostics {
            println!("{:?}: {}", d.kind, d.message);
        }
    }
    println!();
    println!("{} imported, {} skipped", report.imported.len(), report.skipped());
}
