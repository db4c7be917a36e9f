mod cli;

use mediafacts::{config, Inspector};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "mediafacts=debug,mf_av=debug,mf_core=debug,mf_digest=debug,mf_fusion=debug"
                .to_string()
        } else {
            "mediafacts=info,mf_av=info,mf_core=info,mf_digest=info,mf_fusion=info".to_string()
        }
    });

    // stdout carries only the record
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Some(Commands::CheckTools) => check_tools(cli.config.as_deref()),
        None => inspect_file(&cli),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}: {:#}", stage_of(&e), e);
            ExitCode::FAILURE
        }
    }
}

/// Pipeline stage named by the first [`mf_core::Error`] in the chain.
fn stage_of(err: &anyhow::Error) -> &'static str {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<mf_core::Error>())
        .map(mf_core::Error::stage)
        .unwrap_or("internal")
}

fn load_config(path: Option<&Path>) -> mf_core::Result<config::Config> {
    config::load_config_or_default(path).map_err(|e| match e.downcast::<mf_core::Error>() {
        Ok(inner) => inner,
        Err(e) => mf_core::Error::Config(format!("{e:#}")),
    })
}

fn inspect_file(cli: &Cli) -> Result<()> {
    let file = cli.file.as_deref().ok_or(mf_core::Error::MissingArgument)?;

    let mut config = load_config(cli.config.as_deref())?;
    if !cli.algorithms.is_empty() {
        config.digest.algorithms = cli.algorithms.clone();
    }
    config.output.pretty |= cli.pretty;

    let inspector = Inspector::from_config(&config)?;

    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(inspector.inspect(file));
    // Abandon any blocking work a failed run left behind.
    rt.shutdown_background();
    let record = result?;

    println!("{}", record.to_json(config.output.pretty)?);
    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;

    println!("Checking external tools...\n");

    let registry = mf_av::ToolRegistry::discover(&config.tools);
    let mut all_ok = true;

    for tool in registry.check_all() {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install them to inspect media files.");
    }

    Ok(())
}
