use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use checkind::{config::Config, import, store::Store};

#[derive(Parser, Debug)]
#[command(name = "checkind", version, about = "Student check-in service")]
struct Cli {
    /// Directory holding checkin.sqlite3 (overrides CHECKIN_WORKSPACE).
    #[arg(short, long, global = true)]
    workspace: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// Bind address (overrides CHECKIN_LISTEN).
        #[arg(short, long)]
        listen: Option<String>,
    },
    /// Upsert students from a JSON roster and print a summary line.
    Import {
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the import summary; logs go to stderr.
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::load()?;
    if let Some(workspace) = cli.workspace {
        config.workspace = workspace;
    }

    match cli.command.unwrap_or(Command::Serve { listen: None }) {
        Command::Serve { listen } => {
            if let Some(listen) = listen {
                config.listen = listen;
            }
            checkind::start_server(config).await
        }
        Command::Import { file } => {
            let summary = tokio::task::spawn_blocking(move || {
                let store = Store::open(&config.workspace, config.busy_timeout)?;
                import::import_file(&store, &file)
            })
            .await??;
            println!("{}", serde_json::to_string(&summary)?);
            Ok(())
        }
    }
}
