//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod say;
pub mod services;
pub mod settings;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;

use crate::cli::say::run_say;
use crate::cli::services::{run_crop_recommend, run_disease_detect, run_weather, CropArgs};
use crate::cli::settings::{run_set, run_unset};
use crate::core::chat_exchange::HttpChatTransport;
use crate::core::config::Config;
use crate::core::constants::CHAT_URL_ENV;
use crate::core::farm_services::FarmServicesClient;
use crate::core::language::Language;
use crate::logging::{default_log_path, init_logging, LogTarget};
use crate::ui::chat_loop::run_chat;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ", rustc ",
    env!("VERGEN_RUSTC_SEMVER"),
    ")"
);

#[derive(Parser)]
#[command(name = "khet-chat")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "A terminal chat client for the Khet.ai agricultural assistant")]
#[command(
    long_about = "khet-chat is a full-screen terminal chat client for the Khet.ai agricultural \
assistant. It sends each question to the Khet.ai backend and shows the reply in a scrolling \
transcript.\n\n\
Environment Variables:\n\
  KHET_CHAT_URL     Full chat endpoint URL (overrides the configured base-url/chat-path)\n\
  KHET_LOG          Log filter directive (falls back to RUST_LOG)\n\n\
Controls:\n\
  Type              Enter your message in the input field\n\
  Enter             Send the message\n\
  Alt+Enter         Insert a new line\n\
  Tab / Ctrl+L      Switch language (clears the conversation)\n\
  Up/Down/PgUp/PgDn Scroll through the conversation\n\
  Esc / Ctrl+C      Quit the application"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Chat endpoint URL to use instead of the configured one
    #[arg(short = 'e', long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Conversation language (en, hi)
    #[arg(short = 'L', long, global = true, value_name = "LANG")]
    pub language: Option<Language>,

    /// Increase diagnostic logging (-v, -vv)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Write diagnostic logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub debug_log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Ask a single question and print the reply
    Say {
        /// Question to send
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// Show current weather for a city
    Weather {
        /// City name; the backend picks its default city when omitted
        #[arg(trailing_var_arg = true)]
        city: Vec<String>,
    },
    /// Recommend a crop from soil and climate readings
    CropRecommend(CropArgs),
    /// Identify plant disease from a leaf photo
    DiseaseDetect {
        /// Image file to upload
        image: PathBuf,
    },
    /// Set configuration values
    Set {
        /// Configuration key to set (base-url, chat-path, language)
        key: String,
        /// Value to set for the key; omit to print the current configuration
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Option<Vec<String>>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

/// Chat owns the terminal, so without `--debug-log` it falls back to
/// `default_chat_log`, and to no logging when there is none.
fn log_target(
    command: &Commands,
    debug_log: Option<PathBuf>,
    default_chat_log: Option<PathBuf>,
) -> LogTarget {
    match (command, debug_log) {
        (_, Some(path)) => LogTarget::File(path),
        (Commands::Chat, None) => default_chat_log.map_or(LogTarget::Disabled, LogTarget::File),
        (_, None) => LogTarget::Stderr,
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let command = args.command.unwrap_or(Commands::Chat);
    init_logging(
        log_target(&command, args.debug_log, default_log_path()),
        args.verbose,
    )?;

    match command {
        Commands::Set { key, value } => {
            match run_set(&key, value) {
                Ok(message) if !message.is_empty() => println!("{message}"),
                Ok(_) => {}
                Err(err) => {
                    err.print();
                    std::process::exit(err.exit_code());
                }
            }
            Ok(())
        }
        Commands::Unset { key } => {
            match run_unset(&key) {
                Ok(message) => println!("{message}"),
                Err(err) => {
                    err.print();
                    std::process::exit(err.exit_code());
                }
            }
            Ok(())
        }
        Commands::Say { prompt } => {
            let config = Config::load()?;
            let transport = build_transport(&config, args.endpoint.as_deref());
            run_say(prompt, config.resolve_language(args.language), &transport).await
        }
        Commands::Weather { city } => {
            let services = build_services(&Config::load()?);
            run_weather(&services, city).await
        }
        Commands::CropRecommend(readings) => {
            let services = build_services(&Config::load()?);
            run_crop_recommend(&services, readings).await
        }
        Commands::DiseaseDetect { image } => {
            let services = build_services(&Config::load()?);
            run_disease_detect(&services, &image).await
        }
        Commands::Chat => {
            let config = Config::load()?;
            let transport = build_transport(&config, args.endpoint.as_deref());
            run_chat(Arc::new(transport), config.resolve_language(args.language)).await
        }
    }
}

fn build_transport(config: &Config, endpoint_flag: Option<&str>) -> HttpChatTransport {
    let env_endpoint = std::env::var(CHAT_URL_ENV).ok();
    let endpoint = config.resolve_endpoint(endpoint_flag, env_endpoint.as_deref());
    debug!(endpoint = %endpoint, "resolved chat endpoint");
    HttpChatTransport::new(reqwest::Client::new(), endpoint)
}

/// The tools share the chat transport's HTTP client but talk to the
/// configured backend root; `--endpoint` only redirects chat.
fn build_services(config: &Config) -> FarmServicesClient {
    let transport = build_transport(config, None);
    FarmServicesClient::new(transport.client().clone(), config.backend_base_url())
}

#[cfg(test)]
mod tests;
