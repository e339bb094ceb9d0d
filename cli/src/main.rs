//! Operator command line for the Billun fleet backend.
//!
//! Every command goes through the same `fleet::ApiClient` as the web
//! front-end, so validation, the 401 session reset and refresh-after-write
//! behave identically. The bearer token persists in a JSON file between runs.

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

mod token_file;
mod transport;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use fleet::{
    ApiClient, ApiError, ClientConfig, ConfigError, DeleteOutcome, EntityForm, FormError, FreshnessPoller, Material,
    Resource, Session, Signal, User,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use token_file::FileStorage;
use transport::ReqwestTransport;

type Api = ApiClient<ReqwestTransport, FileStorage>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("not logged in; run `fleet login` first")]
    NotLoggedIn,
    #[error("no {noun} with id {id}")]
    NotFound { noun: &'static str, id: u32 },
    #[error("--data must be a JSON object")]
    InvalidPatch,
}

#[derive(Parser, Debug)]
#[command(name = "fleet", about = "Billun fleet administration CLI")]
struct Cli {
    /// Backend root; overrides `FLEET_API_URL`.
    #[arg(long)]
    base_url: Option<String>,

    /// Where the bearer token is kept between runs.
    #[arg(long, env = "FLEET_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Backend health check.
    Ping,
    /// Fleet totals.
    Stats,
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "FLEET_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    Users {
        #[command(subcommand)]
        command: EntityCommand,
    },
    Materiels {
        #[command(subcommand)]
        command: MaterielsCommand,
    },
    Anomalies {
        #[command(subcommand)]
        command: EntityCommand,
    },
    Apk {
        #[command(subcommand)]
        command: ApkCommand,
    },
}

#[derive(Subcommand, Debug)]
enum EntityCommand {
    List,
    Create {
        /// Draft fields as a JSON object.
        #[arg(long)]
        data: String,
    },
    /// Overlay the given fields onto the current record and save it.
    Update {
        id: u32,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: u32,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum MaterielsCommand {
    #[command(flatten)]
    Entity(EntityCommand),
    /// Print the materials list every time the backend reports a change.
    Watch(WatchArgs),
}

#[derive(Args, Debug)]
struct WatchArgs {
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    interval_ms: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum ApkCommand {
    /// Mail the APK download link to a driver.
    Send {
        #[arg(long)]
        email: String,
        /// Defaults to `FLEET_APK_LINK`.
        #[arg(long)]
        link: Option<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(cli.base_url.as_deref(), |key| std::env::var(key).ok())?;
    let storage = FileStorage::new(cli.token_file.clone().unwrap_or_else(FileStorage::default_path));

    if let Command::Logout = cli.command {
        Session::new(storage.clone()).clear();
        tracing::info!(path = %storage.path().display(), "token removed");
        return Ok(());
    }

    let api = ApiClient::new(ReqwestTransport::new()?, storage, &config.api_base_url)
        .with_unauthorized_hook(|| tracing::warn!("session rejected by the server; run `fleet login` again"));

    match cli.command {
        Command::Ping => print_json(&api.health().await?),
        Command::Login { email, password } => {
            api.login(email.trim(), &password).await?;
            println!("ok");
            Ok(())
        }
        Command::Logout => Ok(()),
        command => {
            require_session(&api)?;
            run_authenticated(&api, &config, command).await
        }
    }
}

/// Overlay `--base-url` onto the environment-driven config.
fn resolve_config(
    base_url: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientConfig, ConfigError> {
    ClientConfig::from_lookup(|key| match (key, base_url) {
        ("FLEET_API_URL", Some(url)) => Some(url.to_owned()),
        _ => env(key),
    })
}

fn require_session(api: &Api) -> Result<(), CliError> {
    if api.session().is_authenticated() { Ok(()) } else { Err(CliError::NotLoggedIn) }
}

async fn run_authenticated(api: &Api, config: &ClientConfig, command: Command) -> Result<(), CliError> {
    match command {
        Command::Stats => {
            let stats = api.stats().await?;
            let count = api.material_count().await?;
            print_json(&serde_json::json!({
                "materiels_total": stats.materiels_total,
                "anomalies_total": stats.anomalies_total,
                "materiels_count": count.count,
            }))
        }
        Command::Users { command } => run_entity::<User>(api, command).await,
        Command::Anomalies { command } => run_entity::<Signal>(api, command).await,
        Command::Materiels { command: MaterielsCommand::Entity(command) } => run_entity::<Material>(api, command).await,
        Command::Materiels { command: MaterielsCommand::Watch(args) } => {
            let interval = args.interval_ms.map_or(config.poll_interval, Duration::from_millis);
            run_watch(api, interval).await
        }
        Command::Apk { command: ApkCommand::Send { email, link } } => {
            let link = link.unwrap_or_else(|| config.apk_link.clone());
            api.send_apk_link(email.trim(), &link).await?;
            println!("Lien de téléchargement envoyé avec succès à {}", email.trim());
            Ok(())
        }
        Command::Ping | Command::Login { .. } | Command::Logout => Ok(()),
    }
}

async fn run_entity<R>(api: &Api, command: EntityCommand) -> Result<(), CliError>
where
    R: Resource + Serialize,
    R::Draft: DeserializeOwned,
{
    let mut form = EntityForm::<R>::new();
    match command {
        EntityCommand::List => {
            form.refresh(api).await?;
            print_json(form.records())
        }
        EntityCommand::Create { data } => {
            let draft: R::Draft = serde_json::from_str(&data)?;
            form.edit_draft(|current| *current = draft);
            form.submit(api).await?;
            print_json(form.records())
        }
        EntityCommand::Update { id, data } => {
            let patch: Value = serde_json::from_str(&data)?;
            form.refresh(api).await?;
            let record = form
                .records()
                .iter()
                .find(|record| record.id() == id)
                .cloned()
                .ok_or(CliError::NotFound { noun: R::NOUN, id })?;
            form.edit(&record);
            let merged = merge_draft(form.draft(), &patch)?;
            form.edit_draft(|current| *current = merged);
            form.submit(api).await?;
            print_json(form.records())
        }
        EntityCommand::Delete { id, yes } => {
            let confirm = |prompt: &str| yes || ask(prompt);
            match form.delete(api, id, &confirm).await? {
                DeleteOutcome::Deleted => print_json(form.records()),
                DeleteOutcome::Declined => {
                    println!("annulé");
                    Ok(())
                }
            }
        }
    }
}

async fn run_watch(api: &Api, interval: Duration) -> Result<(), CliError> {
    let mut poller = FreshnessPoller::new(interval);
    // Take the baseline before listing so a change in between is not lost.
    let _ = poller.tick(api).await;
    print_json(&api.list::<Material>().await?)?;

    let print = |materials: Vec<Material>| {
        if let Err(error) = print_json(&materials) {
            tracing::warn!(%error, "failed to print materials");
        }
    };
    tokio::select! {
        () = poller.run(api, tokio::time::sleep, || true, print) => Ok(()),
        signal = tokio::signal::ctrl_c() => {
            signal?;
            tracing::info!("watch interrupted");
            Ok(())
        }
    }
}

/// Overlay the keys of `patch` onto the serialized `draft`.
fn merge_draft<D: Serialize + DeserializeOwned>(draft: &D, patch: &Value) -> Result<D, CliError> {
    let Value::Object(fields) = patch else {
        return Err(CliError::InvalidPatch);
    };
    let mut merged = serde_json::to_value(draft)?;
    let Value::Object(target) = &mut merged else {
        return Err(CliError::InvalidPatch);
    };
    for (key, value) in fields {
        target.insert(key.clone(), value.clone());
    }
    Ok(serde_json::from_value(merged)?)
}

fn ask(prompt: &str) -> bool {
    print!("{prompt} [o/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => is_affirmative(&answer),
        Err(error) => {
            tracing::warn!(%error, "could not read confirmation");
            false
        }
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "o" | "oui" | "y" | "yes")
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
