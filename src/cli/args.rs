//! Command-line argument parsing for MediChain
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// MediChain - predict a likely condition from symptoms and look up precautions and drugs
#[derive(Parser, Debug)]
#[command(name = "medichain")]
#[command(version)]
#[command(about = "Symptom checker with precaution and drug lookup", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the three dataset CSV files
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (warnings and errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// List the symptoms the model was trained on
    Symptoms,

    /// Predict a condition and show precautions and drugs
    Predict {
        /// Selected symptom names (case and separators are ignored)
        #[arg(value_name = "SYMPTOM")]
        symptoms: Vec<String>,

        /// Raw symptom bits in training column order, e.g. 1,0,1
        #[arg(long, conflicts_with = "symptoms")]
        bits: Option<String>,

        /// Show full detail for one of the matching drugs
        #[arg(long)]
        drug: Option<String>,

        /// Use a saved model instead of training at startup
        #[arg(long)]
        model: Option<PathBuf>,

        /// Print the diagnosis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report accuracy on the held-out partition
    Evaluate,

    /// Train a model and save it as JSON
    Train {
        /// Output file
        #[arg(short, long, default_value = "model.json")]
        output: PathBuf,
    },

    /// Display current configuration
    Config {
        /// Write the default configuration file instead of printing
        #[arg(long)]
        init: bool,
    },
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Log filter for this level; Normal defers to the configured filter
    pub fn log_filter<'a>(&self, configured: &'a str) -> std::borrow::Cow<'a, str> {
        match self {
            Verbosity::Quiet => "medichain=warn".into(),
            Verbosity::Normal => configured.into(),
            Verbosity::Verbose => "medichain=debug".into(),
            Verbosity::VeryVerbose => "medichain=trace".into(),
        }
    }

    /// Check if should show class probabilities
    pub fn show_details(&self) -> bool {
        matches!(self, Verbosity::Verbose | Verbosity::VeryVerbose)
    }
}
