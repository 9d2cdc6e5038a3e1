use argh::FromArgs;
use std::fs;
use std::path::{Path, PathBuf};
use viewgen::{
    logger::{self, LogLevel, LoggerConfig},
    AngleCatalog, BatchGenerator, Config, GeminiClient, SourceImage,
};

#[derive(FromArgs)]
/// Re-render a photograph from the right, left, behind and above.
struct Args {
    /// path to the source photograph
    #[argh(option, short = 'i')]
    image: PathBuf,

    /// media type of the photograph; guessed from the file extension when omitted
    #[argh(option, short = 'm')]
    media_type: Option<String>,

    /// maximum number of requests in flight
    #[argh(option)]
    max_concurrency: Option<usize>,

    /// enable debug logging
    #[argh(switch, short = 'v')]
    verbose: bool,
}

fn media_type_for(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = argh::from_env();

    let dotenv_loaded = dotenv::dotenv().is_ok();

    let level = if args.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    logger::init_with_config(LoggerConfig::new().with_level(level))?;

    if !dotenv_loaded {
        log::debug!("No .env file found, using system environment variables");
    }

    let mut config = Config::from_env();
    if let Some(max_concurrency) = args.max_concurrency {
        config.generator = config.generator.with_max_concurrency(max_concurrency);
    }
    logger::log_config_info(&config)?;

    let media_type = match args.media_type {
        Some(media_type) => media_type,
        None => media_type_for(&args.image)
            .ok_or_else(|| {
                format!(
                    "cannot tell the media type of {}, pass --media-type",
                    args.image.display()
                )
            })?
            .to_string(),
    };

    let bytes = fs::read(&args.image)
        .map_err(|e| format!("failed to read {}: {}", args.image.display(), e))?;
    if bytes.is_empty() {
        return Err(format!("{} is empty", args.image.display()).into());
    }
    let source = SourceImage::from_bytes(&bytes, media_type);

    let gemini_config = config.gemini.clone().unwrap_or_default();
    let client = GeminiClient::new(gemini_config)?;
    let generator = BatchGenerator::with_config(client.image(), config.generator.clone());
    let catalog = AngleCatalog::standard();

    let report = generator.settle(&source, &catalog).await;
    let labeled: Vec<(String, String, usize)> = report
        .labeled_images()
        .into_iter()
        .map(|(label, image)| {
            let size = image.decode().map(|bytes| bytes.len()).unwrap_or(0);
            (label.to_string(), image.media_type.clone(), size)
        })
        .collect();

    if let Err(e) = report.into_result() {
        log::error!("❌ No views generated: {}", e);
        return Err(e.into());
    }

    for (label, media_type, size) in labeled {
        println!("{:<16} {:<12} {} bytes", label, media_type, size);
    }

    Ok(())
}
