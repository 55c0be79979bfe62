use clap::Parser;
use tracing_subscriber::EnvFilter;

use ghportfolio::render::{render, OutputFormat};
use ghportfolio::{AnalysisPipeline, Config, GitHubClient, PipelineConfig};

#[derive(Parser, Debug)]
#[command(name = "ghportfolio")]
#[command(version)]
#[command(about = "Score a GitHub portfolio the way a recruiter would")]
struct Args {
    /// GitHub profile URL or bare handle
    profile: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Maximum concurrent readme probes
    #[arg(long)]
    concurrency: Option<usize>,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the report can be piped
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("ghportfolio=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?;

    if config.github_token.is_none() {
        tracing::warn!("GITHUB_TOKEN not set, using unauthenticated rate limits");
    }

    let mut pipeline_config = PipelineConfig::from(&config);
    if let Some(limit) = args.concurrency {
        pipeline_config.concurrency_limit = limit.max(1);
    }
    pipeline_config.show_progress = !args.quiet;

    let github = GitHubClient::new(&config)?;
    let pipeline = AnalysisPipeline::new(github, pipeline_config);

    let analysis = pipeline.analyze(&args.profile).await?;
    let output = render(&analysis, args.format)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Report written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}
