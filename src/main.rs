mod api;
mod server;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use utility_filter::age::parse_relative_age;
use utility_filter::calibration::{CalibrationRunner, WeightTuner};
use utility_filter::config::ScoringConfig;
use utility_filter::explain::explain;
use utility_filter::scoring::UtilityScorer;
use utility_filter::votes::VoteClient;
use utility_filter::{format_float, format_number, format_percent, RawSignals};

#[derive(Parser)]
#[command(name = "utility-filter", about = "Video utility scorer")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Score(ScoreArgs),
    Serve(ServeArgs),
    Calibrate(CalibrateArgs),
}

#[derive(Args, Debug, Clone)]
struct ScoreArgs {
    #[arg(long)]
    video_id: Option<String>,
    #[arg(long, default_value_t = 0)]
    likes: i64,
    #[arg(long, default_value_t = 0)]
    dislikes: i64,
    #[arg(long, default_value_t = 0)]
    views: i64,
    #[arg(long)]
    subscribers: Option<i64>,
    #[arg(long, conflicts_with = "age")]
    days_old: Option<f64>,
    #[arg(long)]
    age: Option<String>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    details: bool,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
}

#[derive(Args, Debug, Clone)]
struct CalibrateArgs {
    #[arg(long)]
    samples: PathBuf,
    #[arg(long)]
    tune: bool,
    #[arg(long, requires = "tune")]
    write: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let (config, path) = ScoringConfig::load(cli.config)?;
    if let Some(path) = path.as_ref().filter(|path| path.exists()) {
        tracing::debug!(path = %path.display(), "loaded scoring config");
    }

    match cli.command {
        Command::Score(args) => run_score(args, &config).await,
        Command::Serve(args) => server::serve(args, config).await,
        Command::Calibrate(args) => run_calibrate(args, &config),
    }
}

async fn run_score(args: ScoreArgs, config: &ScoringConfig) -> Result<(), String> {
    let days_old = match args.age.as_deref() {
        Some(text) => Some(
            parse_relative_age(text).ok_or_else(|| format!("unrecognised age: {}", text))?,
        ),
        None => args.days_old,
    };

    let raw = match args.video_id.as_deref() {
        Some(video_id) => {
            let client = VoteClient::from_config(&config.votes).map_err(|err| err.to_string())?;
            let votes = client
                .fetch(video_id)
                .await
                .map_err(|err| format!("score unavailable: {}", err))?;
            votes.into_signals(args.subscribers, days_old, args.title.clone())
        }
        None => RawSignals {
            likes: Some(args.likes),
            dislikes: Some(args.dislikes),
            view_count: Some(args.views),
            subscribers: args.subscribers,
            days_old,
            title: args.title.clone(),
        },
    };

    let scorer = UtilityScorer::new(config);
    let result = scorer.score_raw(&raw);
    let breakdown = explain(&result, scorer.weights());

    if args.json {
        let payload = serde_json::json!({ "result": result, "breakdown": breakdown });
        let text = serde_json::to_string_pretty(&payload)
            .map_err(|err| format!("failed to serialize result: {}", err))?;
        println!("{}", text);
        return Ok(());
    }

    println!(
        "Utility score: {} ({})",
        format_float(result.score, 1),
        result.tier.label()
    );
    println!("Confidence: {}", result.confidence.as_str());
    println!(
        "Votes: {} | interaction density {}%",
        format_number(result.diagnostics.effective_votes as f64),
        format_float(result.interaction_density(), 2)
    );
    for warning in &breakdown.warnings {
        println!("Warning: {}", warning);
    }

    if args.details {
        let d = &result.diagnostics;
        println!("\nComponents:");
        println!(
            "  approval: {} (smoothed ratio {})",
            format_percent(d.approval),
            format_percent(d.smoothed_ratio)
        );
        println!(
            "  velocity: {} (V/S {} | recency {})",
            format_float(d.velocity, 3),
            format_float(d.view_subscriber_ratio, 2),
            format_percent(d.recency_multiplier)
        );
        println!("  integrity: {}", format_percent(d.integrity));
        println!("  volume: {}", format_percent(d.volume));
        println!("  clickbait: {}", format_percent(d.clickbait));
        println!("  decay: {}", format_percent(d.decay));
        println!(
            "  engagement velocity: {}",
            format_float(d.engagement_velocity * 100_000.0, 2)
        );
        if !breakdown.negative_factors.is_empty() {
            println!("  dragging down: {}", breakdown.negative_factors.join(", "));
        }
    }

    Ok(())
}

fn run_calibrate(args: CalibrateArgs, config: &ScoringConfig) -> Result<(), String> {
    let data = std::fs::read_to_string(&args.samples)
        .map_err(|err| format!("failed to read samples: {}", err))?;
    let runner = CalibrationRunner::from_json(&data)?;
    print_metrics("Current", &runner.compute_metrics(config));

    if !args.tune {
        return Ok(());
    }

    let tuner = WeightTuner::new(runner.samples.clone());
    let (weights, distance) = tuner.tune(config.weights.clone(), config);
    let mut tuned = config.clone();
    tuned.weights = weights;
    tuned.validate()?;

    println!(
        "\nTuned weights (mean tier distance {}): approval {} | velocity {} | integrity {} | volume {} | clickbait {}",
        format_float(distance, 3),
        format_float(tuned.weights.approval, 3),
        format_float(tuned.weights.velocity, 3),
        format_float(tuned.weights.integrity, 3),
        format_float(tuned.weights.volume, 3),
        format_float(tuned.weights.clickbait, 3)
    );
    print_metrics("Tuned", &runner.compute_metrics(&tuned));

    if let Some(path) = args.write {
        tuned.write(&path)?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn print_metrics(label: &str, metrics: &utility_filter::calibration::CalibrationMetrics) {
    println!(
        "{}: {} samples | tier accuracy {} | mean tier distance {} | ranking accuracy {} | mean score {} | slop flagged {}",
        label,
        metrics.sample_count,
        format_percent(metrics.tier_accuracy),
        format_float(metrics.mean_tier_distance, 3),
        format_percent(metrics.pairwise_ranking_accuracy),
        format_float(metrics.mean_score, 1),
        metrics.slop_flagged
    );
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("utility_filter=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
