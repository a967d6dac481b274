use clap::Parser;
use lrcsync::lyrics::{HttpFetcher, LoaderConfig, LyricLoader, Track};
use lrcsync::ui::DisplayMode;
use lrcsync::ui::pipe::{PipeOptions, display_lyrics_pipe};
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Play a track's synced lyrics to stdout on a simulated clock
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Config {
    /// Primary lyrics: a path or URL in remote mode, the LRC text itself in inline mode
    #[arg(long)]
    lrc: Option<String>,
    /// Translation lyrics, same form as --lrc
    #[arg(long)]
    tlrc: Option<String>,
    /// JSON file with the player's audio object (name, artist, lrc, tlrc).
    /// --lrc/--tlrc override its fields.
    #[arg(long)]
    track: Option<PathBuf>,
    /// Lyric source mode: 0 = none, 1 = inline, 3 = remote
    #[arg(long = "lrc-type", default_value_t = 3, allow_negative_numbers = true)]
    lrc_type: i64,
    /// Track duration in seconds (default: last line plus five seconds)
    #[arg(long)]
    duration: Option<f64>,
    /// Start position in seconds
    #[arg(long, default_value_t = 0.0)]
    start: f64,
    /// Use the expanded lyric panel geometry
    #[arg(long)]
    expanded: bool,
    /// Prefix each line with its scroll offset
    #[arg(long)]
    show_offset: bool,
    /// Clock resolution in milliseconds
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,
    /// Fetch timeout in milliseconds (default: none)
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// HTTP user agent. If empty, the LRCSYNC_USER_AGENT env var will be used as a fallback.
    #[arg(long)]
    user_agent: Option<String>,
    /// Enable debug logging to stderr
    #[arg(long)]
    debug_log: bool,
}

fn user_agent_from_env_if_empty(cli: &mut Config) {
    if cli.user_agent.is_none()
        && let Ok(s) = std::env::var("LRCSYNC_USER_AGENT")
        && !s.trim().is_empty()
    {
        cli.user_agent = Some(s.trim().to_string());
    }
}

fn init_tracing(debug_log: bool) {
    let filter = if debug_log {
        EnvFilter::new("lrcsync=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn build_track(cfg: &Config) -> Result<Track, Box<dyn Error + Send + Sync>> {
    let mut track = match &cfg.track {
        Some(path) => {
            let json = tokio::fs::read_to_string(path).await?;
            Track::from_json(&json)?
        }
        None => Track::default(),
    };
    if cfg.lrc.is_some() {
        track.lrc = cfg.lrc.clone();
    }
    if cfg.tlrc.is_some() {
        track.tlrc = cfg.tlrc.clone();
    }
    // Without an id the widget reports "no track loaded".
    if track.id.is_none() {
        track.id = Some(if track.name.is_empty() {
            track.lrc.clone().unwrap_or_else(|| "track".to_string())
        } else {
            track.name.clone()
        });
    }
    Ok(track)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut cfg = Config::parse();
    user_agent_from_env_if_empty(&mut cfg);
    init_tracing(cfg.debug_log);

    let mut loader_config = LoaderConfig {
        fetch_timeout_ms: cfg.timeout_ms,
        ..LoaderConfig::default()
    };
    if let Some(agent) = &cfg.user_agent {
        loader_config.user_agent = agent.clone();
    }
    let fetcher = HttpFetcher::with_config(&loader_config)?;
    let loader = LyricLoader::new(fetcher, &loader_config);
    let track = build_track(&cfg).await?;

    let opts = PipeOptions {
        mode: if cfg.expanded {
            DisplayMode::Expanded
        } else {
            DisplayMode::Compact
        },
        tick: Duration::from_millis(cfg.tick_ms.max(1)),
        start_ms: cfg.start * 1000.0,
        duration_ms: cfg.duration.map(|s| s * 1000.0),
        show_offset: cfg.show_offset,
    };

    let result = display_lyrics_pipe(&loader, &track, cfg.lrc_type, opts).await;
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        return Err(e);
    }
    Ok(())
}
