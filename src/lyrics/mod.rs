// lyrics/mod.rs - lyric parsing, resolution and loading
pub mod loader;
pub mod parse;
pub mod providers;
pub mod resolve;
pub mod types;

pub use loader::{
    LoadState, LoaderConfig, LoaderSnapshot, LyricLoader, LyricSourceMode, StalePolicy, Track,
};
pub use parse::{find_offset, parse_lrc, parse_with_offset};
pub use providers::{HttpFetcher, LyricFetcher};
pub use resolve::{ActiveLine, resolve};
pub use types::{LyricDocument, LyricLine, LyricsError};
