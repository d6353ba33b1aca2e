//! PVO command-line front-end.
//!
//! Browses a PVO media library from the terminal using the same stores and
//! library views a graphical front-end would. Preferences and history are
//! kept in `$PVO_DATA_DIR/storage.json` (default: the platform data
//! directory).

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr, eyre};
use pvo::cli::{self, Outcome};
use pvo::config::ClientConfigBuilder;
use pvo::prelude::*;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "pvo", version, about = "Browse a PVO media library from the terminal")]
struct Cli {
    /// API base URL, e.g. http://localhost:8000/api
    #[arg(long, env = "PVO_API_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "PVO_API_TIMEOUT_SECS", global = true)]
    timeout: Option<u64>,

    /// Directory holding persisted preferences and history
    #[arg(long, env = "PVO_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List comics
    Comics(ListArgs),
    /// List image sets
    ImageSets(ListArgs),
    /// Counts, recent additions and history, like the home page
    Overview,
    /// Show or clear the browsing history
    History {
        #[arg(long, default_value_t = pvo::store::history::DEFAULT_HISTORY_LIMIT)]
        limit: usize,
        #[arg(long)]
        clear: bool,
    },
    /// Show or change R18 mode
    R18 { state: Option<Toggle> },
    /// Print the display settings
    Settings,
    /// Mark a comic as read and add it to the history
    Read { id: String },
}

#[derive(Args)]
struct ListArgs {
    /// Sort command: name, add_date, asc or desc (repeatable, persisted)
    #[arg(long)]
    sort: Vec<String>,

    /// Extra query parameter as key=value (repeatable)
    #[arg(long = "query", value_parser = parse_pair)]
    query: Vec<(String, String)>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

impl ListArgs {
    fn params(&self) -> ListParams {
        self.query.iter().cloned().collect()
    }
}

fn parse_pair(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got {:?}", raw))
}

struct App {
    cli: Cli,
    storage: Storage,
    r18: Arc<R18ModeStore>,
    history: HistoryStore,
}

impl App {
    fn new(cli: Cli) -> Result<Self> {
        let data_dir = match &cli.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .ok_or_else(|| eyre!("No data directory on this platform; set PVO_DATA_DIR"))?
                .join("pvo"),
        };
        let storage = Storage::file(data_dir.join("storage.json"));

        Ok(Self {
            r18: Arc::new(R18ModeStore::new(storage.clone())),
            history: HistoryStore::new(storage.clone()),
            storage,
            cli,
        })
    }

    fn client(&self) -> Result<ApiClient> {
        let base_url = self
            .cli
            .base_url
            .clone()
            .ok_or_else(|| eyre!("Set PVO_API_BASE_URL or pass --base-url"))?;

        let mut builder = ClientConfigBuilder::default();
        builder.base_url(base_url);
        if let Some(secs) = self.cli.timeout {
            builder.timeout(Duration::from_secs(secs));
        }
        let config = builder.build().wrap_err("Invalid client configuration")?;

        let notifier: Arc<dyn Notifier> = Arc::new(|notice: Notice| match notice.kind {
            NoticeKind::Success => eprintln!("✔ {}", notice.message),
            NoticeKind::Error => eprintln!("✘ {}", notice.message),
        });
        Ok(ApiClient::new(config)?.with_notifier(notifier))
    }

    fn comics(&self) -> Result<ComicLibrary> {
        Ok(Library::new(
            ComicsApi::new(self.client()?),
            self.r18.clone(),
            self.storage.clone(),
        ))
    }

    fn image_sets(&self) -> Result<ImageSetLibrary> {
        Ok(Library::new(
            ImageSetsApi::new(self.client()?),
            self.r18.clone(),
            self.storage.clone(),
        ))
    }

    async fn run(&self) -> Result<Outcome> {
        let mut out = io::stdout().lock();

        let outcome = match &self.cli.command {
            Command::Comics(args) => {
                cli::list(&self.comics()?, &args.sort, &args.params(), &mut out).await?
            }
            Command::ImageSets(args) => {
                cli::list(&self.image_sets()?, &args.sort, &args.params(), &mut out).await?
            }
            Command::Overview => {
                let settings = SettingsStore::new(self.storage.clone()).snapshot();
                cli::overview(
                    &self.comics()?,
                    &self.image_sets()?,
                    &settings,
                    &self.history,
                    &mut out,
                )
                .await?
            }
            Command::History { limit, clear } => {
                if *clear {
                    self.history.clear();
                    writeln!(out, "History cleared")?;
                } else {
                    cli::write_history(&mut out, &self.history.get_history(*limit))?;
                }
                Outcome::Done
            }
            Command::R18 { state } => {
                if let Some(state) = state {
                    self.r18.change_r18_mode(matches!(state, Toggle::On));
                }
                writeln!(out, "R18 mode: {}", if self.r18.is_r18() { "on" } else { "off" })?;
                Outcome::Done
            }
            Command::Settings => {
                let settings = SettingsStore::new(self.storage.clone()).snapshot();
                writeln!(out, "{}", serde_json::to_string_pretty(&settings)?)?;
                Outcome::Done
            }
            Command::Read { id } => {
                let api = ComicsApi::new(self.client()?);
                cli::read(&api, &self.history, &ItemId::from(id.as_str()), &mut out).await?
            }
        };
        Ok(outcome)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let app = App::new(Cli::parse())?;
    // API failures were already printed by the notifier.
    Ok(match app.run().await? {
        Outcome::Done => ExitCode::SUCCESS,
        Outcome::Failed => ExitCode::FAILURE,
    })
}
