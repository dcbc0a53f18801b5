//! MediChain - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use medichain::{
    classifier::TrainedModel,
    cli::{Args, Commands, Config, Verbosity},
    dataset::{load_datasets, load_references},
    display,
    pipeline::MediChain,
    types::SymptomVector,
    MediError,
};

fn main() {
    let args = Args::parse();

    if let Err(err) = run(args) {
        display::show_error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let verbosity = args.verbosity();

    // --config names the file to create, so it is not loaded first
    if args.command == (Commands::Config { init: true }) {
        init_tracing(verbosity, &Config::default());
        let path = Config::init(args.config.clone()).context("Failed to write configuration")?;
        if verbosity != Verbosity::Quiet {
            println!("Configuration written to {}", path.display());
        }
        return Ok(());
    }

    let config = Config::load(args.config.clone()).context("Failed to load configuration")?;
    init_tracing(verbosity, &config);

    tracing::debug!(verbosity = verbosity.as_str(), "medichain starting");

    match &args.command {
        Commands::Config { .. } => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
        Commands::Symptoms => {
            let chain = build_chain(&args, &config)?;
            print!("{}", display::render_symptoms(chain.feature_names()));
            Ok(())
        }
        Commands::Evaluate => {
            let chain = build_chain(&args, &config)?;
            print!("{}", display::render_evaluation(&chain.model().evaluation));
            Ok(())
        }
        Commands::Train { output } => {
            let chain = build_chain(&args, &config)?;
            chain
                .model()
                .save(output)
                .with_context(|| format!("Failed to save model to {}", output.display()))?;
            if verbosity != Verbosity::Quiet {
                println!("Model {} saved to {}", chain.model().metadata.id, output.display());
            }
            Ok(())
        }
        Commands::Predict {
            symptoms,
            bits,
            drug,
            model,
            json,
        } => {
            let chain = match model {
                Some(path) => chain_from_model(&args, &config, path)?,
                None => build_chain(&args, &config)?,
            };

            let vector = match bits {
                Some(bits) => SymptomVector::parse_bits(bits)?,
                None => chain.predictor().vector_from_names(symptoms)?,
            };

            let diagnosis = match chain.diagnose(&vector) {
                Ok(diagnosis) => diagnosis,
                Err(MediError::NoSymptomsSelected) => {
                    display::show_warning("Please select at least one symptom to get a prediction.");
                    return Ok(());
                }
                Err(err) => return Err(err.into()),
            };

            if *json {
                println!("{}", serde_json::to_string_pretty(&diagnosis)?);
            } else {
                print!(
                    "{}",
                    display::render_diagnosis(&diagnosis, drug.as_deref(), verbosity.show_details())
                );
            }
            Ok(())
        }
    }
}

fn init_tracing(verbosity: Verbosity, config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter(&config.logging.filter)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_chain(args: &Args, config: &Config) -> Result<MediChain> {
    let paths = config.dataset_paths(args.data_dir.as_deref());
    let datasets = load_datasets(&paths, &config.data.label_column)
        .context("Failed to load datasets")?;
    let chain = MediChain::build(datasets, config.pipeline_settings())
        .context("Failed to train classifier")?;
    Ok(chain)
}

fn chain_from_model(args: &Args, config: &Config, model_path: &Path) -> Result<MediChain> {
    let model = TrainedModel::load(model_path)
        .with_context(|| format!("Failed to load model from {}", model_path.display()))?;
    let paths = config.dataset_paths(args.data_dir.as_deref());
    let references = load_references(&paths).context("Failed to load reference tables")?;
    let chain = MediChain::from_model(Arc::new(model), references, config.pipeline_settings())?;
    Ok(chain)
}
