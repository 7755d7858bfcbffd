// Python Learnify Main Entry Point
// Copyright (c) 2026 Xing_The_Creator | Learnify

use learnify_core::agent::text_generation::TextGenerator;
use learnify_core::agent::voice::TTSEngine;
use learnify_core::config::LearnifyConfig;
use learnify_core::lesson::TOPIC_UNAVAILABLE_MESSAGE;
use learnify_core::resolver::TopicResolver;
use learnify_core::server;
use learnify_core::state::LearnifyState;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "learnify")]
#[command(about = "Python Learnify - visual lessons for Python beginners", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the lesson web page
    Serve {
        /// Port to run the server on
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory holding the lesson videos
        #[arg(long)]
        video_dir: Option<PathBuf>,
    },

    /// Resolve a topic to its lesson video
    Resolve {
        #[arg(short, long)]
        query: String,

        /// Directory holding the lesson videos
        #[arg(long)]
        video_dir: Option<PathBuf>,
    },

    /// Generate text with the hosted model
    Generate {
        #[arg(short, long)]
        prompt: String,
    },

    /// Convert text to an MP3 file
    Speak {
        #[arg(short, long)]
        text: String,

        /// Output path (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Language code, e.g. "en"
        #[arg(short, long)]
        lang: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt::init();

    // Global panic handler: log panics instead of crashing silently
    std::panic::set_hook(Box::new(|panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        tracing::error!("🚨 [LEARNIFY PANIC] at {}: {}", location, message);
    }));

    let mut config = LearnifyConfig::from_env();
    let args = Cli::parse();

    match args.command {
        Commands::Serve { port, video_dir } => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(dir) = video_dir {
                config.video_dir = dir;
            }

            if !config.video_dir.is_dir() {
                tracing::warn!(
                    "⚠️ Video directory {:?} not found. Every lesson will report a missing file.",
                    config.video_dir
                );
            }

            info!("🌐 Starting Python Learnify on port {}...", config.port);
            let state = Arc::new(LearnifyState::new(&config)?);
            server::start_server(config.port, state).await?;
        }
        Commands::Resolve { query, video_dir } => {
            let dir = video_dir.unwrap_or(config.video_dir);
            let resolver = TopicResolver::builtin(dir);
            match resolver.resolve(&query).asset() {
                Some(path) => println!("{}", path.display()),
                None => println!("{}", TOPIC_UNAVAILABLE_MESSAGE),
            }
        }
        Commands::Generate { prompt } => {
            let generator = TextGenerator::from_config(&config.text_gen)?;
            let text = generator.generate(&prompt).await?;
            println!("{}", text);
        }
        Commands::Speak { text, output, lang } => {
            if let Some(lang) = lang {
                config.speech.lang = lang;
            }
            let tts = TTSEngine::new(&config.speech)?;
            let path = tts.speak(&text, output.as_deref()).await?;
            println!("🔊 Audio saved: {}", path.display());
        }
    }

    Ok(())
}
