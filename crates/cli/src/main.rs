mod output;

use anyhow::{anyhow, Context};
use authors_client::{AuthorsController, HttpBackend};
use authors_kernel::settings::Settings;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "authors-cli", about = "Manage authors through the authors API")]
struct Cli {
    /// Base URL of the authors server (defaults to `client.base_url` from settings)
    #[arg(long, env = "AUTHORS_SERVER_URL")]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show every author
    List,
    /// Add a new author
    Create {
        #[arg(long)]
        first: String,
        #[arg(long)]
        last: String,
        #[arg(long)]
        email: String,
    },
    /// Edit an existing author; omitted fields keep their current value
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        first: Option<String>,
        #[arg(long)]
        last: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete an author by id
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load authors settings")?;
    authors_telemetry::init(&settings.telemetry);

    let base_url = cli.server.unwrap_or(settings.client.base_url);
    tracing::debug!(%base_url, command = ?cli.command, "authors-cli starting");

    let mut controller = AuthorsController::new(HttpBackend::new(base_url));
    if let Err(error) = controller.activate().await {
        eprintln!("warning: could not load authors: {}", error.user_message());
    }

    match cli.command {
        Command::List => {}
        Command::Create { first, last, email } => {
            fill(&mut controller, [("first", first), ("last", last), ("email", email)])?;
            submit(&mut controller).await?;
        }
        Command::Update {
            id,
            first,
            last,
            email,
        } => {
            if !controller.edit(id) {
                return Err(anyhow!("no author with id {}", id));
            }
            let changes = [("first", first), ("last", last), ("email", email)]
                .into_iter()
                .filter_map(|(name, value)| value.map(|value| (name, value)));
            fill(&mut controller, changes)?;
            submit(&mut controller).await?;
        }
        Command::Delete { id } => {
            if controller.delete(id).await {
                println!("deleted #{}", id);
            }
        }
    }

    println!("{}", output::authors_table(controller.authors()));
    Ok(())
}

fn fill(
    controller: &mut AuthorsController<HttpBackend>,
    fields: impl IntoIterator<Item = (&'static str, String)>,
) -> anyhow::Result<()> {
    for (name, value) in fields {
        controller.set_field(name, value)?;
    }
    Ok(())
}

async fn submit(controller: &mut AuthorsController<HttpBackend>) -> anyhow::Result<()> {
    match controller.submit().await {
        Ok(author) => {
            println!("saved #{} {} {} <{}>", author.id, author.first, author.last, author.email);
            Ok(())
        }
        Err(error) => Err(anyhow!(error.user_message())),
    }
}
