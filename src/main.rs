//! # Marquee CLI
//!
//! Command-line interface for image analysis, poster composition and
//! article image placement.
//!
//! ## Usage
//!
//! ```bash
//! # Analyse images (JSON to stdout)
//! marquee analyze storefront.jpg latte.png
//!
//! # Compose a poster from a request file and local photos
//! marquee poster --request poster.json --out poster.png latte.png cake.jpg
//!
//! # Plan where photos go in a store article
//! marquee plan --captions captions.json *.jpg
//!
//! # Run the HTTP service
//! marquee serve --listen 0.0.0.0:5001
//! ```

use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use marquee::{
    MarqueeError,
    analyze::{ImageAnalyzer, ImageInput},
    caption,
    config::{
        ComposeOptions, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_LISTEN_ADDR,
        DEFAULT_MAX_UPLOAD_BYTES, ServerConfig,
    },
    placement,
    poster::{OutputFormat, PosterRequest, request::build_spec},
    server,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Marquee - promotional poster and article image tool
#[derive(Parser, Debug)]
#[command(name = "marquee")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyse images and print their records as JSON
    Analyze {
        /// Image files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// JSON object mapping file paths to captions
        #[arg(long, value_name = "FILE")]
        captions: Option<PathBuf>,
    },

    /// Compose a poster
    Poster {
        /// Poster request JSON (defaults to an empty request)
        #[arg(long, value_name = "FILE")]
        request: Option<PathBuf>,

        /// Output file
        #[arg(long, short, value_name = "FILE")]
        out: PathBuf,

        /// Photo to cover the whole canvas with
        #[arg(long, value_name = "FILE")]
        background: Option<PathBuf>,

        /// TTF/OTF font file
        #[arg(long, env = "MARQUEE_FONT")]
        font: Option<PathBuf>,

        /// Output format: png, jpeg or jpeg:<quality>
        #[arg(long, env = "MARQUEE_FORMAT", default_value = "png")]
        format: OutputFormat,

        /// Photos to place, in order
        files: Vec<PathBuf>,
    },

    /// Plan image placement for a store article
    Plan {
        /// Image files
        files: Vec<PathBuf>,

        /// JSON object mapping file paths to captions
        #[arg(long, value_name = "FILE")]
        captions: Option<PathBuf>,
    },

    /// Run the HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, env = "MARQUEE_LISTEN", default_value = DEFAULT_LISTEN_ADDR)]
        listen: String,

        /// TTF/OTF font file
        #[arg(long, env = "MARQUEE_FONT")]
        font: Option<PathBuf>,

        /// Output format: png, jpeg or jpeg:<quality>
        #[arg(long, env = "MARQUEE_FORMAT", default_value = "png")]
        format: OutputFormat,

        /// Largest accepted upload, in bytes
        #[arg(long, env = "MARQUEE_MAX_UPLOAD", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
        max_upload: usize,

        /// Image download timeout, in seconds
        #[arg(long, env = "MARQUEE_FETCH_TIMEOUT", default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
        fetch_timeout: u64,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("marquee=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), MarqueeError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { files, captions } => {
            let inputs = read_inputs(&files, captions.as_deref())?;
            let outcomes = ImageAnalyzer::default().analyze_batch(&inputs);
            print_json(&outcomes)
        }

        Commands::Plan { files, captions } => {
            let inputs = read_inputs(&files, captions.as_deref())?;
            let records: Vec<_> = ImageAnalyzer::default()
                .analyze_batch(&inputs)
                .iter()
                .filter_map(|o| o.record().cloned())
                .collect();
            print_json(&placement::plan(&records))
        }

        Commands::Poster {
            request,
            out,
            background,
            font,
            format,
            files,
        } => {
            let request: PosterRequest = match request {
                Some(path) => serde_json::from_slice(&std::fs::read(&path)?).map_err(|e| {
                    MarqueeError::Config(format!("Invalid request {}: {}", path.display(), e))
                })?,
                None => PosterRequest::default(),
            };
            if !request.image_urls.is_empty() {
                tracing::warn!("imageUrls are only fetched by the server; use local files");
            }

            let inputs = read_inputs(&files, None)?;
            let images = ImageAnalyzer::default()
                .inspect_batch(&inputs)
                .into_iter()
                .filter_map(Result::ok)
                .collect();
            let background = match background {
                Some(path) => Some(marquee::analyze::decode(&std::fs::read(path)?)?.0),
                None => None,
            };

            let spec = build_spec(&request, images, background)?;
            let composer = ComposeOptions {
                font_path: font,
                format,
            }
            .composer();
            let poster = composer.compose(&spec)?;
            std::fs::write(&out, &poster.bytes)?;

            println!(
                "Wrote {} ({}x{}, {} elements, {} photos dropped)",
                out.display(),
                poster.layout.width,
                poster.layout.height,
                poster.layout.elements.len(),
                poster.layout.dropped_images
            );
            Ok(())
        }

        Commands::Serve {
            listen,
            font,
            format,
            max_upload,
            fetch_timeout,
        } => {
            let config = ServerConfig {
                listen_addr: listen,
                compose: ComposeOptions {
                    font_path: font,
                    format,
                },
                max_upload_bytes: max_upload,
                fetch_timeout: Duration::from_secs(fetch_timeout),
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config))
        }
    }
}

/// Read image files, attaching captions from an optional JSON map and
/// from file names.
fn read_inputs(files: &[PathBuf], captions: Option<&Path>) -> Result<Vec<ImageInput>, MarqueeError> {
    let supplied: HashMap<String, String> = match captions {
        Some(path) => serde_json::from_slice(&std::fs::read(path)?).map_err(|e| {
            MarqueeError::Config(format!("Invalid captions {}: {}", path.display(), e))
        })?,
        None => HashMap::new(),
    };

    let mut inputs = files
        .iter()
        .map(|path| Ok(ImageInput::new(path.display().to_string(), std::fs::read(path)?)))
        .collect::<Result<Vec<_>, MarqueeError>>()?;
    caption::attach_captions(&mut inputs, &caption::default_chain(supplied));
    Ok(inputs)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), MarqueeError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| MarqueeError::Config(format!("JSON error: {}", e)))?;
    println!("{}", json);
    Ok(())
}
