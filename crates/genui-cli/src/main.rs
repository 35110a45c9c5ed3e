//! `genui` - generate and refine dashboards from the command line

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use genui_core::{
    templates, GenUiConfig, Generation, OpenAiCompatibleBackend, Orchestrator, Outcome,
};
use genui_schema::{output_schema, UiNode};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const ENV_LOG: &str = "GENUI_LOG";
const ENV_LOG_JSON: &str = "GENUI_LOG_JSON";

fn cli() -> Command {
    let report = Arg::new("report")
        .long("report")
        .action(ArgAction::SetTrue)
        .help("Print how the tree was obtained to stderr");

    Command::new("genui")
        .version(genui_core::VERSION)
        .about("Generate typed dashboard trees from natural language")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file (environment overrides still apply)"),
        )
        .subcommand(
            Command::new("generate")
                .about("Generate a dashboard from a prompt")
                .arg(Arg::new("prompt").required(true).help("What the dashboard should show"))
                .arg(report.clone()),
        )
        .subcommand(
            Command::new("refine")
                .about("Modify an existing dashboard")
                .arg(
                    Arg::new("tree")
                        .long("tree")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON file holding the current tree, or - for stdin"),
                )
                .arg(Arg::new("instruction").required(true).help("Requested change"))
                .arg(report.clone()),
        )
        .subcommand(
            Command::new("template")
                .about("Generate a dashboard from a built-in template")
                .arg(Arg::new("id").required(true).help("Template id, see `genui templates`"))
                .arg(report),
        )
        .subcommand(Command::new("templates").about("List built-in templates"))
        .subcommand(
            Command::new("validate")
                .about("Check a JSON tree against the component catalog")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON file, or - for stdin"),
                ),
        )
        .subcommand(Command::new("schema").about("Print the JSON Schema of the output tree"))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var(ENV_LOG_JSON)
        .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn load_config(matches: &ArgMatches) -> Result<GenUiConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => GenUiConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => GenUiConfig::from_env().context("reading config from environment"),
    }
}

fn orchestrator(matches: &ArgMatches) -> Result<Orchestrator> {
    let config = load_config(matches)?;
    let backend = OpenAiCompatibleBackend::from_config(config.backend.clone());
    Ok(Orchestrator::new(Arc::new(backend), config.orchestrator))
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn print_tree(tree: &UiNode) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(tree)?);
    Ok(())
}

fn report(generation: &Generation) {
    match &generation.outcome {
        Outcome::Generated { attempts } => {
            eprintln!("generated on attempt {attempts} ({} nodes)", generation.tree.node_count());
        }
        Outcome::Refined => eprintln!("refined ({} nodes)", generation.tree.node_count()),
        Outcome::Fallback { failures } => {
            eprintln!("fallback dashboard after {} failed attempt(s):", failures.len());
            for failure in failures {
                eprintln!("  {failure}");
            }
        }
        Outcome::RolledBack { failure } => {
            eprintln!("refinement rolled back: {failure}");
        }
    }
}

fn emit(generation: &Generation, with_report: bool) -> Result<()> {
    if with_report {
        report(generation);
    }
    print_tree(&generation.tree)
}

async fn run(matches: &ArgMatches) -> Result<i32> {
    match matches.subcommand() {
        Some(("generate", args)) => {
            let prompt = args.get_one::<String>("prompt").map_or("", String::as_str);
            let generation = orchestrator(args)?.generate_detailed(prompt).await;
            emit(&generation, args.get_flag("report"))?;
        }
        Some(("refine", args)) => {
            let Some(path) = args.get_one::<PathBuf>("tree") else {
                bail!("--tree is required");
            };
            let current = genui_schema::parse_str(&read_input(path)?)
                .with_context(|| format!("{} is not a valid dashboard", path.display()))?;
            let instruction = args.get_one::<String>("instruction").map_or("", String::as_str);
            let generation = orchestrator(args)?
                .refine_detailed(current, instruction)
                .await;
            emit(&generation, args.get_flag("report"))?;
        }
        Some(("template", args)) => {
            let id = args.get_one::<String>("id").map_or("", String::as_str);
            let Some(template) = templates::find(id) else {
                bail!("unknown template '{id}' (see `genui templates`)");
            };
            tracing::info!(template = template.id, "using template");
            let generation = orchestrator(args)?.generate_detailed(template.prompt).await;
            emit(&generation, args.get_flag("report"))?;
        }
        Some(("templates", _)) => {
            for template in &templates::TEMPLATES {
                println!("{:<10} {:<22} {}", template.id, template.name, template.description);
            }
        }
        Some(("validate", args)) => {
            let Some(path) = args.get_one::<PathBuf>("file") else {
                bail!("a file is required");
            };
            match genui_schema::parse_str(&read_input(path)?) {
                Ok(tree) => {
                    println!(
                        "valid: {} nodes, depth {}",
                        tree.node_count(),
                        tree.depth()
                    );
                }
                Err(e) => {
                    println!("invalid: {e}");
                    return Ok(1);
                }
            }
        }
        Some(("schema", _)) => {
            println!("{}", serde_json::to_string_pretty(&*output_schema())?);
        }
        _ => bail!("no command given"),
    }
    Ok(0)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let matches = cli().get_matches();
    let code = run(&matches).await?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
