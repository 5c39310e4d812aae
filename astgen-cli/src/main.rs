//! Command-line interface for astgen
//! Generates AST node types and visitor interfaces from compact grammar files.
//!
//! Usage:
//!   astgen generate `<config>` [--target `<target>`] [--out-dir `<dir>`] [--check | --dry-run]
//!   astgen inspect `<grammar>` --base `<Base>` [--format json|yaml]
//!   astgen list-targets
//!   astgen completions `<shell>`

use astgen::astgen::{
    compile, ArtifactWriter, AstGroupSpec, GeneratedDocument, GroupDefinition, TargetRegistry,
    WriteMode,
};
use astgen_config::Loader;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use clap_complete::Shell;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

fn build_cli() -> Command {
    Command::new("astgen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate AST node types and visitor interfaces from grammar files")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase logging verbosity (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count)
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Only log errors")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .global(true),
        )
        .subcommand(
            Command::new("generate")
                .about("Generate the files of every group in a configuration file")
                .arg(
                    Arg::new("config")
                        .help("Path to the astgen TOML configuration")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .index(1),
                )
                .arg(
                    Arg::new("target")
                        .long("target")
                        .short('t')
                        .help("Output target, overriding output.target (see list-targets)"),
                )
                .arg(
                    Arg::new("out-dir")
                        .long("out-dir")
                        .short('o')
                        .help("Output directory, overriding output.directory")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("check")
                        .long("check")
                        .help("Fail if any generated file is missing or out of date")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help("Print the files that would be written without writing them")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("check"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the resolved node specifications of a grammar file")
                .arg(
                    Arg::new("grammar")
                        .help("Path to the grammar file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .index(1),
                )
                .arg(
                    Arg::new("base")
                        .long("base")
                        .short('b')
                        .help("Base type name substituted for $base$")
                        .required(true),
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .help("Group name (default: the base type name followed by 's')"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["json", "yaml"])
                        .default_value("json"),
                ),
        )
        .subcommand(Command::new("list-targets").about("List the available output targets"))
        .subcommand(
            Command::new("completions")
                .about("Print a shell completion script")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(value_parser!(Shell))
                        .index(1),
                ),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    setup_logging(matches.get_count("verbose"), matches.get_flag("quiet"));

    match matches.subcommand() {
        Some(("generate", sub)) => handle_generate_command(sub),
        Some(("inspect", sub)) => handle_inspect_command(sub),
        Some(("list-targets", _)) => handle_list_targets_command(),
        Some(("completions", sub)) => handle_completions_command(sub),
        _ => unreachable!("a subcommand is required"),
    }
}

/// Logs go to stderr so generated output on stdout stays clean
fn setup_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_with(context: &str, err: impl Display) -> ! {
    eprintln!("{}: {}", context, err);
    std::process::exit(1);
}

/// Handle the generate command
fn handle_generate_command(matches: &ArgMatches) {
    let config_path = matches
        .get_one::<PathBuf>("config")
        .expect("config is required");

    let mut loader = Loader::new().with_file(config_path);
    if let Some(target) = matches.get_one::<String>("target") {
        loader = loader
            .set_override("output.target", target.as_str())
            .unwrap_or_else(|e| exit_with("Invalid target", e));
    }
    let config = loader
        .build()
        .unwrap_or_else(|e| exit_with("Configuration error", e));

    let base_dir = config_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let definitions = config
        .group_definitions(base_dir)
        .unwrap_or_else(|e| exit_with("Configuration error", e));

    let registry = TargetRegistry::with_defaults();
    let target = registry.get(&config.output.target).unwrap_or_else(|e| {
        eprintln!("Generation error: {}", e);
        eprintln!("\nAvailable targets:");
        for name in registry.list_targets() {
            eprintln!("  {}", name);
        }
        std::process::exit(1);
    });
    tracing::debug!(
        config = %config_path.display(),
        groups = definitions.len(),
        target = target.name(),
        "loaded configuration"
    );

    let mut documents: Vec<GeneratedDocument> = Vec::new();
    for definition in &definitions {
        let output =
            compile(definition, target).unwrap_or_else(|e| exit_with("Generation error", e));
        documents.extend(output.into_documents());
    }

    let root = matches
        .get_one::<PathBuf>("out-dir")
        .cloned()
        .unwrap_or_else(|| config.output_directory(base_dir));
    let mode = if matches.get_flag("check") {
        WriteMode::Check
    } else if matches.get_flag("dry-run") {
        WriteMode::DryRun
    } else {
        WriteMode::Write
    };

    let report = ArtifactWriter::new(root)
        .mode(mode)
        .write(&documents)
        .unwrap_or_else(|e| exit_with("Write error", e));

    if mode == WriteMode::DryRun {
        for path in &report.written {
            println!("{}", path.display());
        }
    }
}

/// Handle the inspect command
fn handle_inspect_command(matches: &ArgMatches) {
    let path = matches
        .get_one::<PathBuf>("grammar")
        .expect("grammar is required");
    let base = matches.get_one::<String>("base").expect("base is required");
    let name = matches
        .get_one::<String>("name")
        .cloned()
        .unwrap_or_else(|| format!("{}s", base));
    let format = matches
        .get_one::<String>("format")
        .expect("format has a default");

    let grammar = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with(&format!("Cannot read {}", path.display()), e));
    let group = AstGroupSpec::from_definition(&GroupDefinition::new(name, base, grammar))
        .unwrap_or_else(|e| exit_with("Generation error", e));

    let formatted = match format.as_str() {
        "yaml" => serde_yaml::to_string(&group)
            .unwrap_or_else(|e| exit_with("Error formatting group", e)),
        _ => serde_json::to_string_pretty(&group)
            .unwrap_or_else(|e| exit_with("Error formatting group", e)),
    };
    println!("{}", formatted.trim_end());
}

/// Handle the list-targets command
fn handle_list_targets_command() {
    let registry = TargetRegistry::with_defaults();
    println!("Available targets:\n");

    for name in registry.list_targets() {
        let target = registry.get(&name).unwrap_or_else(|e| exit_with("Registry error", e));
        println!("  {}", name);
        println!("    {}", target.description());
        println!();
    }
}

/// Handle the completions command
fn handle_completions_command(matches: &ArgMatches) {
    let shell = *matches.get_one::<Shell>("shell").expect("shell is required");
    let mut cmd = build_cli();
    clap_complete::generate(shell, &mut cmd, "astgen", &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        build_cli().debug_assert();
    }
}
