use clap::Parser;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use lunora_core::{
    install_standard_library, stdlib_registry, InterpreterState, ModuleKind, PRELOAD_KEY,
};

/// Lunora - inspect the standard-library configuration of this build
#[derive(Parser, Debug)]
#[command(name = "lunora")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// List the modules compiled into this build
    #[arg(long)]
    list: bool,

    /// Emit the module report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ModuleReport {
    name: &'static str,
    kind: ModuleKind,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with_writer(std::io::stderr)
        .init();

    let registry = stdlib_registry();
    debug!(modules = registry.len(), "loaded build registry");

    if cli.json {
        let report: Vec<ModuleReport> = registry
            .iter()
            .map(|m| ModuleReport {
                name: m.display_name(),
                kind: m.kind,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if cli.list {
        for module in registry.iter() {
            let kind = match module.kind {
                ModuleKind::Eager => "eager",
                ModuleKind::Lazy => "lazy",
            };
            println!("{:<10} {}", module.display_name(), kind);
        }
        return Ok(());
    }

    // Default mode: install into a fresh state and report what resulted.
    let mut state = InterpreterState::new();
    install_standard_library(&mut state)
        .map_err(|e| anyhow::anyhow!("interpreter failed to initialize: {e}"))?;

    let globals = state.globals().clone();
    let mut names: Vec<String> = globals.borrow().keys().map(str::to_string).collect();
    names.sort();
    println!("globals ({}):", names.len());
    for name in names {
        let value = state.global(&name);
        println!("  {:<12} {}", name, value.type_name());
    }

    let preload = state.registry_get(PRELOAD_KEY);
    if let Some(preload) = preload.as_table() {
        let pending: Vec<String> = preload.borrow().keys().map(str::to_string).collect();
        println!("preload ({}):", pending.len());
        for name in pending {
            println!("  {name}");
        }
    }

    Ok(())
}
