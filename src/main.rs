use clap::Parser;
use player_vis::app;
use player_vis::config::PlayerConfig;
use player_vis::error::PlayerResult;
use player_vis::im::SourceIm;
use std::path::PathBuf;

/// Step through a trajectory with a feature tracker image alongside.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Start playing instead of stopped.
    #[arg(long)]
    play: bool,

    /// Image shown in the feature tracker panel.
    #[cfg(feature = "im-io")]
    #[arg(long, value_name = "PATH")]
    image: Option<PathBuf>,

    /// JSON viewer settings; missing fields keep their defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[cfg(feature = "im-io")]
fn feature_tracker_im(args: &Args) -> PlayerResult<SourceIm> {
    match &args.image {
        Some(path) => {
            let im = SourceIm::load(path)?;
            log::info!("loaded {} ({}x{})", path.display(), im.w, im.h);
            Ok(im)
        }
        None => Ok(SourceIm::empty()),
    }
}

#[cfg(not(feature = "im-io"))]
fn feature_tracker_im(_args: &Args) -> PlayerResult<SourceIm> {
    Ok(SourceIm::empty())
}

fn main() -> PlayerResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PlayerConfig::load(path)?,
        None => PlayerConfig::default(),
    };
    config.start_playing |= args.play;

    let im = feature_tracker_im(&args)?;
    app::run(config, im)
}
