use std::net::IpAddr;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use folio_testing::contact::{self, FakeContactBackendSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            host,
            port,
            disabled,
            rate_limit,
            required,
            categories,
        } => {
            let defaults = FakeContactBackendSettings::default();
            let settings = FakeContactBackendSettings {
                enabled: !disabled,
                rate_limit,
                required_fields: required.unwrap_or(defaults.required_fields),
                categories: categories.unwrap_or(defaults.categories),
                ..defaults
            };
            contact::start_server(host, port, settings).await?
        }
        Command::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                env!("CARGO_BIN_NAME"),
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the fake contact backend
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
        #[arg(long, default_value = "8000")]
        port: u16,
        /// Reject all submissions with FORM_DISABLED
        #[arg(long)]
        disabled: bool,
        /// Number of accepted submissions after which RATE_LIMITED is returned
        #[arg(long)]
        rate_limit: Option<usize>,
        /// Fields reported as required (comma separated)
        #[arg(long, value_delimiter = ',')]
        required: Option<Vec<String>>,
        /// Selectable categories (comma separated)
        #[arg(long, value_delimiter = ',')]
        categories: Option<Vec<String>>,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}
