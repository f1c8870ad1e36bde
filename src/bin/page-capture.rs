//! page-capture command line tool
//!
//! Opens a page in Chrome and captures a region, the full page, or one element.
//! Bitmaps are written as PNG, elements as an HTML fragment.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use page_capture::{
    BrowserSession, CaptureArtifact, CaptureEngine, CaptureOptions, CapturePayload, CaptureRequest, LaunchOptions,
    LogicalRect, RasterOptions,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "page-capture")]
#[command(version)]
#[command(about = "Capture part of a web page as a PNG or an HTML fragment", long_about = None)]
struct Cli {
    /// Page to open
    url: String,

    #[command(subcommand)]
    mode: Mode,

    /// Output file (default: capture.png or capture.html)
    #[arg(long, short = 'o', value_name = "PATH")]
    out: Option<PathBuf>,

    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    executable_path: Option<PathBuf>,

    /// Give up on the viewport screenshot after this many milliseconds
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// TrueType font used to paint text in full-page captures
    #[arg(long, value_name = "PATH")]
    font: Option<PathBuf>,

    /// Write the upload payload as JSON instead of the raw artifact
    #[arg(long)]
    payload: bool,

    /// Description attached to the payload
    #[arg(long, default_value = "")]
    description: String,
}

#[derive(Subcommand)]
enum Mode {
    /// Crop a rectangle (CSS pixels) out of the visible viewport
    Region { x: f64, y: f64, width: f64, height: f64 },
    /// Paint the whole document
    FullPage,
    /// Serialize the first element matching a CSS selector
    Element { selector: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut launch = LaunchOptions::new().headless(!cli.headed);
    if let Some(ref path) = cli.executable_path {
        launch = launch.chrome_path(path);
    }

    let session = Arc::new(BrowserSession::launch(launch).context("Failed to launch browser")?);
    session.navigate(&cli.url)?;
    session.wait_for_navigation()?;
    log::info!("Loaded {}", cli.url);

    let mut raster = RasterOptions::new();
    if let Some(ref font) = cli.font {
        raster = raster.font_path(font);
    }
    let mut options = CaptureOptions::new().raster(raster);
    if let Some(ms) = cli.timeout_ms {
        options = options.capture_timeout(Duration::from_millis(ms));
    }

    let request = match cli.mode {
        Mode::Region { x, y, width, height } => CaptureRequest::Region {
            rect: LogicalRect::new(x, y, width, height),
        },
        Mode::FullPage => CaptureRequest::FullPage,
        Mode::Element { ref selector } => CaptureRequest::DomElement {
            element: session
                .extract_element(selector)
                .with_context(|| format!("No element for selector {}", selector))?,
        },
    };

    let engine = CaptureEngine::new(session.clone(), options);
    let artifact = engine.capture(request, &*session).await?;

    let (default_name, bytes) = if cli.payload {
        let payload = CapturePayload::new(artifact)
            .description(cli.description.as_str())
            .page_url(cli.url.as_str());
        ("capture.json", payload.to_json()?.into_bytes())
    } else {
        match artifact {
            CaptureArtifact::Bitmap { ref bitmap, .. } => ("capture.png", bitmap.png_bytes()?),
            CaptureArtifact::Markup { ref fragment } => ("capture.html", fragment.content.clone().into_bytes()),
        }
    };

    let out = cli.out.unwrap_or_else(|| PathBuf::from(default_name));
    std::fs::write(&out, bytes).with_context(|| format!("Failed to write {}", out.display()))?;
    eprintln!("Wrote {}", out.display());

    session.close()?;
    Ok(())
}
