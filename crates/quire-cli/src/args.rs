//! CLI argument definitions using clap
//!
//! - quire chat "prompt"               # One completion
//! - quire chat --stream "prompt"      # Streamed completion
//! - quire speak "text" --out a.mp3    # Text to speech
//! - quire image "description"         # Image generation
//! - quire mood entries.json           # Mood analysis of diary entries
//! - quire summarize notes.json        # Note summary
//! - quire config                      # Show effective configuration

use clap::{Parser, Subcommand, ValueEnum};
use quire_core::ProviderKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quire")]
#[command(about = "Quire - rate-limited AI gateway for diary and notes")]
#[command(version)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Provider to use, overriding the file and QUIRE_PROVIDER
    #[arg(long, value_enum, global = true)]
    pub provider: Option<ProviderArg>,

    /// Give up on the request after this many seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub deadline: Option<u64>,

    /// Enable verbose (debug) logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send one prompt and print the answer
    Chat {
        /// Prompt text (at most 1000 characters)
        prompt: String,

        /// Ask for a JSON object answer and pretty-print it
        #[arg(long, conflicts_with = "stream")]
        json: bool,

        /// Print the answer as it is generated
        #[arg(long)]
        stream: bool,
    },

    /// Turn text into speech and save the audio
    Speak {
        /// Text to read
        text: String,

        /// Output audio file
        #[arg(long, short)]
        out: PathBuf,
    },

    /// Generate an image from a description
    Image {
        /// Image description
        description: String,

        /// Print the provider's JSON response
        #[arg(long)]
        raw: bool,
    },

    /// Analyze the mood of diary entries
    Mood {
        /// JSON file with an array of diary entries
        entries: PathBuf,
    },

    /// Summarize notes
    Summarize {
        /// JSON file with an array of notes
        notes: PathBuf,

        /// Print the summary as it is generated
        #[arg(long)]
        stream: bool,
    },

    /// Show the effective configuration
    Config,
}

/// Provider names accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    Openai,
    Stablelm,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Openai => ProviderKind::OpenAi,
            ProviderArg::Stablelm => ProviderKind::StableLm,
        }
    }
}
