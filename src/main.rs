use anyhow::Result;
use clap::Parser;
use npm_bridge::bridge::{services, DEFAULT_SENTINEL};
use npm_bridge::project::ProjectSnapshot;
use std::path::PathBuf;

/// npm-bridge - npm lifecycle bridge for package managers
///
/// Runs npm for the root project and for vendor packages that opted into
/// bridging, after the host package manager finishes an install or update.
///
/// The host hands over its resolved dependency graph as a JSON snapshot,
/// either via --graph or the NPM_BRIDGE_GRAPH environment variable.
///
/// Examples:
///   npm-bridge install --graph graph.json
///   npm-bridge update --graph graph.json
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Dependency name that marks a package as bridged
    #[arg(
        long = "sentinel",
        env = "NPM_BRIDGE_SENTINEL",
        value_name = "NAME",
        default_value = DEFAULT_SENTINEL,
        global = true
    )]
    pub sentinel: String,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run npm installs after a host install event
    Install(InstallArgs),

    /// Run npm update for the root, then installs, after a host update event
    Update(UpdateArgs),
}

#[derive(clap::Args, Debug)]
pub struct InstallArgs {
    /// Path to the dependency graph snapshot
    #[arg(long = "graph", short = 'g', env = "NPM_BRIDGE_GRAPH", value_name = "PATH")]
    pub graph: PathBuf,

    /// Skip dev dependencies for the root project
    #[arg(long = "no-dev")]
    pub no_dev: bool,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Path to the dependency graph snapshot
    #[arg(long = "graph", short = 'g', env = "NPM_BRIDGE_GRAPH", value_name = "PATH")]
    pub graph: PathBuf,
}

fn bridging_disabled() -> bool {
    std::env::var_os("NPM_BRIDGE_DISABLE").is_some_and(|v| !v.is_empty())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if bridging_disabled() {
        log::info!("NPM_BRIDGE_DISABLE is set, skipping npm bridging");
        return Ok(());
    }

    let bridge = services::build_bridge(&cli.sentinel);

    match cli.command {
        Commands::Install(args) => {
            let snapshot = ProjectSnapshot::load(&args.graph)?;
            bridge.install(&snapshot, !args.no_dev).await?
        }
        Commands::Update(args) => {
            let snapshot = ProjectSnapshot::load(&args.graph)?;
            bridge.update(&snapshot).await?
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_install_parsing() {
        let cli = Cli::try_parse_from(["npm-bridge", "install", "--graph", "graph.json"]).unwrap();
        match cli.command {
            Commands::Install(args) => {
                assert_eq!(args.graph, PathBuf::from("graph.json"));
                assert!(!args.no_dev);
            }
            _ => panic!("Expected Install command"),
        }
        assert_eq!(cli.sentinel, DEFAULT_SENTINEL);
    }

    #[test]
    fn test_cli_install_no_dev_parsing() {
        let cli =
            Cli::try_parse_from(["npm-bridge", "install", "-g", "graph.json", "--no-dev"]).unwrap();
        match cli.command {
            Commands::Install(args) => assert!(args.no_dev),
            _ => panic!("Expected Install command"),
        }
    }

    #[test]
    fn test_cli_update_parsing() {
        let cli = Cli::try_parse_from(["npm-bridge", "update", "--graph", "graph.json"]).unwrap();
        match cli.command {
            Commands::Update(args) => {
                assert_eq!(args.graph, PathBuf::from("graph.json"));
            }
            _ => panic!("Expected Update command"),
        }
    }

    #[test]
    fn test_cli_global_sentinel_parsing() {
        let cli = Cli::try_parse_from([
            "npm-bridge",
            "--sentinel",
            "acme/js-bridge",
            "update",
            "--graph",
            "graph.json",
        ])
        .unwrap();
        assert_eq!(cli.sentinel, "acme/js-bridge");
    }

    #[test]
    fn test_cli_no_subcommand_fails() {
        let result = Cli::try_parse_from(["npm-bridge", "--graph", "graph.json"]);
        assert!(result.is_err());
    }
}
