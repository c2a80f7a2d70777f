use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use palm::{PalmAnalysis, annotate};
use palm_cli::RunConfig;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the palm lines in one image
    Analyze {
        /// Path to the palm photo
        #[arg(short, long)]
        image: PathBuf,
        /// Run configuration (.toml or .json)
        #[arg(short, long)]
        config: PathBuf,
        /// Directory for the annotated image and reports
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,
    },
    /// Print the JSON schema of the run configuration
    Schema,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Analyze { image, config, output_dir } => {
            analyze(image, config, output_dir)?;
        }
        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&RunConfig::schema())?);
        }
    }

    Ok(())
}

fn analyze(image_path: &Path, config_path: &Path, output_dir: &Path) -> Result<()> {
    let config = RunConfig::from_file(config_path)?;
    let pipeline = config.pipeline();

    info!("Analyzing {:?}", image_path);
    let Some(analysis) = pipeline.process_path(image_path)? else {
        println!("No hand detected in {}", image_path.display());
        return Ok(());
    };

    std::fs::create_dir_all(output_dir)?;
    let stem = image_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| eyre!("Image path has no file name: {:?}", image_path))?;

    let annotated_path = output_dir.join(format!("{stem}_result.png"));
    annotate(&analysis, &config.analysis.render).save(&annotated_path)?;
    let json_path = output_dir.join(format!("{stem}_analysis.json"));
    analysis.save_json(&json_path)?;
    let geojson_path = output_dir.join(format!("{stem}_lines.geojson"));
    analysis.save_geojson(&geojson_path)?;

    print_summary(&analysis);
    info!("Saved {:?}, {:?} and {:?}", annotated_path, json_path, geojson_path);
    Ok(())
}

fn print_summary(analysis: &PalmAnalysis) {
    println!("Rotation: {} degrees", analysis.rotation.degrees());
    println!("Mounts:");
    for (mount, point) in analysis.mounts.iter() {
        println!("  {:<14} ({:.0}, {:.0})", mount.to_string(), point.x, point.y);
    }
    println!("Palm width:  {:.1}px", analysis.mounts.palm_width);
    println!("Palm length: {:.1}px", analysis.mounts.palm_length);

    if analysis.lines.is_empty() {
        println!("No palm lines analyzed");
        return;
    }

    for line in &analysis.lines {
        println!(
            "{} line ({}): length {}, depth {}, {} break(s)",
            line.category, line.label, line.length_class, line.descriptor.depth, line.descriptor.breaks
        );
        if let Some(text) = &line.interpretation {
            println!("  {}", text);
        }
    }
}
