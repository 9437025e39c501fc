//! Subify command line
//!
//! Runs the caption translation core outside a browser: one-off
//! translations, the stored language preference, the install hook, and a
//! live preview of the hover flow on an in-memory page.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use subify::config::SubifyConfig;
use subify::config_file::{generate_default_config, ConfigFile};
use subify::error::Result;
use subify::language::{Availability, LanguageCatalog, LanguageCode};
use subify::lifecycle::{handle_installed, InstallReason, InstalledDetails};
use subify::page::{Point, Size, VirtualPage};
use subify::storage::{FileArea, PreferenceStore};
use subify::translate::{translate_or_fallback, MyMemoryClient};
use subify::{CaptionOverlay, HoverHandler};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
const APP_NAME: &str = "subify";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file
    #[arg(short, long, default_value = "subify.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Translate text into the stored target language
    Translate {
        /// Text to translate
        #[arg(required = true)]
        text: Vec<String>,

        /// Override the stored language for this request
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Read or change the target language preference
    Lang {
        #[command(subcommand)]
        action: LangAction,
    },

    /// Report whether preference storage is usable
    Status,

    /// Hover each caption on an in-memory page and print the tooltips
    Preview {
        /// Caption segments, one per argument
        #[arg(required = true)]
        captions: Vec<String>,
    },

    /// Handle an install/update notification
    Installed {
        #[arg(value_enum)]
        reason: ReasonArg,

        #[arg(long)]
        previous_version: Option<String>,
    },

    /// Write a default configuration file
    InitConfig {
        #[arg(default_value = "subify.toml")]
        path: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum LangAction {
    /// Print the stored language
    Get,
    /// Store a new language
    Set { code: String },
    /// Clear all stored preferences
    Clear,
    /// List known languages
    List,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ReasonArg {
    Install,
    Update,
    ChromeUpdate,
    SharedModuleUpdate,
}

impl From<ReasonArg> for InstallReason {
    fn from(reason: ReasonArg) -> Self {
        match reason {
            ReasonArg::Install => InstallReason::Install,
            ReasonArg::Update => InstallReason::Update,
            ReasonArg::ChromeUpdate => InstallReason::ChromeUpdate,
            ReasonArg::SharedModuleUpdate => InstallReason::SharedModuleUpdate,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (config, load_error) = load_config(&args.config);
    init_logging(&config);
    tracing::debug!("{} v{} starting", APP_NAME, VERSION);
    if let Some(e) = load_error {
        tracing::warn!(
            "Failed to load config file {}: {}. Using defaults.",
            args.config.display(),
            e
        );
    }

    let preferences = PreferenceStore::new(
        Arc::new(FileArea::new(&config.preferences.storage_path)),
        &config.preferences,
    );

    match args.command {
        Command::Translate { text, lang } => {
            let language = match lang {
                Some(code) => LanguageCode::parse(&code)?,
                None => preferences.language().await,
            };
            let client = MyMemoryClient::new(&config.translation)?;
            println!(
                "{}",
                translate_or_fallback(&client, &text.join(" "), &language).await
            );
        }
        Command::Lang { action } => run_lang(action, &config, &preferences).await?,
        Command::Status => {
            if preferences.is_available().await {
                println!("Extension Active");
            } else {
                println!("Extension Inactive");
            }
        }
        Command::Preview { captions } => run_preview(captions, &config, preferences).await?,
        Command::Installed {
            reason,
            previous_version,
        } => {
            let details = InstalledDetails {
                reason: reason.into(),
                previous_version,
            };
            println!("{}", handle_installed(&details));
        }
        Command::InitConfig { path } => {
            generate_default_config(&path)?;
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}

async fn run_lang(
    action: LangAction,
    config: &SubifyConfig,
    preferences: &PreferenceStore,
) -> Result<()> {
    let catalog = LanguageCatalog::new(config.preferences.enabled_languages.as_slice());

    match action {
        LangAction::Get => {
            let language = preferences.language().await;
            println!("{} ({})", language, language.name());
        }
        LangAction::Set { code } => {
            match preferences.select(&catalog, LanguageCode::parse(&code)?).await? {
                Availability::Enabled(language) => {
                    println!("Language preference saved: {}", language)
                }
                other => println!("{}", other.notice().unwrap_or_default()),
            }
        }
        LangAction::Clear => {
            if preferences.clear().await {
                println!("Preferences cleared");
            } else {
                println!("Could not clear preferences");
            }
        }
        LangAction::List => {
            for (code, name, enabled) in catalog.entries() {
                let marker = if enabled { "" } else { " (coming soon)" };
                println!("{:<6} {}{}", code, name, marker);
            }
        }
    }

    Ok(())
}

async fn run_preview(
    captions: Vec<String>,
    config: &SubifyConfig,
    preferences: PreferenceStore,
) -> Result<()> {
    let viewport = Size {
        width: 1280.0,
        height: 720.0,
    };
    let page = Arc::new(VirtualPage::new(viewport));
    let client = Arc::new(MyMemoryClient::new(&config.translation)?);
    let overlay = CaptionOverlay::new(
        page.clone(),
        HoverHandler::new(client, preferences),
        &config.captions,
        config.tooltip.clone(),
    );
    overlay.start()?;

    let cursor = Point {
        x: viewport.width / 2.0,
        y: viewport.height * 0.8,
    };
    let poll = Duration::from_millis(25);
    let budget = config.translation.timeout() + config.tooltip.lifetime() + config.tooltip.fade();

    for caption in captions {
        let element = page.insert_element(&config.captions.class_name, &caption);
        let shown_before = page.mounted_total();
        // Give the observer a chance to attach before hovering.
        tokio::time::sleep(poll).await;
        page.hover(element, cursor);

        let started = tokio::time::Instant::now();
        let mut printed = false;
        while started.elapsed() < budget + poll {
            tokio::time::sleep(poll).await;
            if !printed {
                if let Some(tip) = page.tooltips().last() {
                    println!("{} → {}", tip.original, tip.translated);
                    printed = true;
                }
            }
            if (printed && page.tooltips().is_empty())
                || (!overlay.has_active_hover() && page.mounted_total() == shown_before)
            {
                break;
            }
        }

        page.remove_element(element);
    }

    overlay.stop();
    Ok(())
}

/// Load the config file if it exists, falling back to defaults.
fn load_config(path: &Path) -> (SubifyConfig, Option<String>) {
    if !path.exists() {
        return (SubifyConfig::default(), None);
    }
    match ConfigFile::from_file(path) {
        Ok(cf) => (cf.into_config(), None),
        Err(e) => (SubifyConfig::default(), Some(e.to_string())),
    }
}

/// Initialize logging with tracing
fn init_logging(config: &SubifyConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("subify={}", config.log_level).into());
    let registry = tracing_subscriber::registry().with(filter);

    if config.log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
