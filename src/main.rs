//! gesture-replay - run recorded hand landmarks through the gesture classifier
//!
//! Each line of the input is one frame of landmarks as a hand pose estimator
//! would report it. Frames are classified, outlined, and optionally written out.

use anyhow::{anyhow, Context};
use clap::Parser;
use gesture_lib::core::annotation::overlay_lines;
use gesture_lib::core::session::GestureSession;
use gesture_lib::platform::capture::BlankFrameSource;
use gesture_lib::platform::landmarks::ReplayProvider;
use gesture_lib::{AnnotatedFrame, Config};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "gesture-replay", about = "Classify recorded hand landmarks frame by frame")]
struct Cli {
    /// JSON Lines landmark recording
    #[arg(long)]
    input: PathBuf,

    /// Frame width in pixels
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Frame height in pixels
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Settings file (default: ~/.gesture_data/config/settings.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write every annotated frame as a PNG into this directory
    #[arg(long)]
    render_dir: Option<PathBuf>,

    /// Do not mirror frames before detection
    #[arg(long)]
    no_mirror: bool,

    /// Print the full overlay text for each frame
    #[arg(long)]
    overlay: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gesture_lib=info,gesture_replay=info".into()),
        )
        .init();

    info!("gesture-replay v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .map_err(|e| anyhow!("failed to load configuration: {}", e))?;

    if cli.no_mirror {
        config.mirror_frames = false;
    }

    if let Some(dir) = &cli.render_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let show_instructions = config.show_instructions;
    let provider = ReplayProvider::open(&cli.input, &config)?;
    let mut source = BlankFrameSource::new(cli.width, cli.height, provider.len())
        .with_device_index(config.camera_index);
    info!(
        camera_index = config.camera_index,
        frames = provider.len(),
        "replaying recorded landmarks in place of the camera"
    );
    let mut session = GestureSession::new(provider, config)?;

    let mut frame_index = 0usize;
    let mut render_error = None;

    let stats = session.run(&mut source, |frame| {
        frame_index += 1;

        if cli.overlay {
            let lines = overlay_lines(frame.headline(), show_instructions);
            println!("frame {:>5}:", frame_index);
            for line in lines {
                println!("    {}", line);
            }
        } else {
            println!("frame {:>5}: {}", frame_index, frame.headline());
        }

        if let Some(dir) = &cli.render_dir {
            if let Err(e) = save_frame(frame, &dir.join(format!("frame_{:05}.png", frame_index))) {
                render_error = Some(e);
                return ControlFlow::Break(());
            }
        }

        ControlFlow::Continue(())
    })?;

    if let Some(e) = render_error {
        return Err(e);
    }

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

fn save_frame(frame: &AnnotatedFrame, path: &Path) -> anyhow::Result<()> {
    let raw = &frame.frame;
    let image = image::RgbaImage::from_raw(raw.width, raw.height, raw.data.clone())
        .ok_or_else(|| anyhow!("frame buffer does not match {}x{}", raw.width, raw.height))?;

    image
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
