use clap::{Parser, Subcommand};
use lobby_sdk::LobbyClient;

#[derive(Parser)]
#[command(name = "lobby-cli")]
#[command(about = "Command-line client for the lobby server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Wait for an opponent and print each status record
    Match {
        /// Host header to present instead of the URL's
        #[arg(long)]
        host: Option<String>,
    },
    /// Check lobby health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = LobbyClient::new(&cli.url);

    match cli.command {
        Commands::Match { host } => {
            let client = match host {
                Some(host) => client.with_host(&host),
                None => client,
            };
            let mut session = client.find_match().await?;
            while let Some(record) = session.next_record().await? {
                println!("{}", serde_json::to_string(&record)?);
                if record.is_terminal() {
                    break;
                }
            }
        }
        Commands::Health => {
            let health = client.health().await?;
            println!("{}", serde_json::to_string_pretty(&health)?);
        }
    }

    Ok(())
}
