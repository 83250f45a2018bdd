use clap::Parser;
use genstudio::logger::{self, LogLevel, LoggerConfig};
use genstudio::models::{supported_models, GenerationOutcome};
use genstudio::studio::StatusMessage;
use genstudio::{GeminiClient, StudioConfig, StudioController};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

const DEFAULT_PROMPT: &str = "Editorial wildlife photograph: a sleek black panther standing regally on a reflective salt flat at dusk, wearing a dramatic, sculptural couture gown inspired by organic forms. The landscape is vast and otherworldly but grounded in reality, with subtle shimmering textures and a warm, golden-hour glow.";

/// Generate or edit images with Gemini and Imagen models.
#[derive(Debug, Parser)]
#[command(name = "genstudio", version, about)]
struct Args {
    /// Model id; the edit model switches to reference-image editing
    #[arg(long, env = "GENSTUDIO_MODEL")]
    model: Option<String>,

    /// Text prompt
    #[arg(long, default_value = DEFAULT_PROMPT)]
    prompt: String,

    /// Images per request (1-4, ignored by the ultra and edit models)
    #[arg(long, default_value_t = 1)]
    batch_size: u8,

    /// One of 1:1, 3:4, 4:3, 9:16, 16:9
    #[arg(long, default_value = "1:1")]
    aspect_ratio: String,

    /// Reference image for the edit model; repeat for up to five
    #[arg(long = "image")]
    images: Vec<PathBuf>,

    /// Where generated images are saved
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Print the available models and exit
    #[arg(long)]
    list_models: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Also append logs to this file
    #[arg(long)]
    log_file: Option<String>,

    /// Disable coloured log output
    #[arg(long)]
    no_color: bool,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    let args = Args::parse();

    let mut logger_config = if args.json_logs {
        LoggerConfig::production()
    } else if args.verbose {
        LoggerConfig::development()
    } else {
        LoggerConfig::default().with_level(LogLevel::Info)
    };
    if args.no_color {
        logger_config = logger_config.with_colors(false);
    }
    if let Some(path) = &args.log_file {
        logger_config = logger_config.with_file_output(path);
    }
    if let Err(e) = logger::init_with_config(logger_config) {
        eprintln!("{}", e);
    }
    if !dotenv_loaded {
        log::debug!("No .env file found, using system environment variables");
    }

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("❌ {}", e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> genstudio::Result<ExitCode> {
    let mut config = StudioConfig::from_env();
    if let Some(dir) = args.out_dir {
        config = config.with_output_dir(dir);
    }

    if args.list_models {
        for model in supported_models(&config.models) {
            println!("{:<36} {:<24} {:?}", model.id, model.name, model.mode);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut controller = StudioController::new(
        Arc::new(GeminiClient::new(&config)?),
        config.models.clone(),
    );

    logger::log_config_info(&config);

    if let Some(model) = &args.model {
        controller.select_model(model);
    }
    let mode = controller.selector().mode();
    log::info!("🎛️  Model: {} ({:?})", controller.selector().model_id(), mode);

    if !mode.is_ultra() && !mode.is_edit() {
        controller.set_batch_size(args.batch_size)?;
    }
    controller.set_aspect_ratio(&args.aspect_ratio)?;

    if !args.images.is_empty() {
        let report = controller.select_files(&args.images).await?;
        if let Some(warning) = report.warning {
            eprintln!("{}", warning);
        }
    }

    controller.set_prompt(args.prompt);

    match controller.generate().await? {
        GenerationOutcome::Images(images) if images.is_empty() => {
            println!("No images were returned.");
        }
        GenerationOutcome::Images(_) => {
            let saved = controller.gallery().save_all(&config.output_dir).await?;
            for path in saved {
                println!("{}", path.display());
            }
        }
        GenerationOutcome::NoImage { .. } => {
            if let Some(StatusMessage::Info(message)) = controller.gallery().status() {
                println!("{}", message);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
