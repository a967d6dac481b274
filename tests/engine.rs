//! End-to-end tests: loader -> parser -> resolver -> scroll, through the public API.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use lrcsync::lyrics::LyricSourceMode;
use lrcsync::{
    DisplayMode, Geometry, LoadState, LoaderConfig, LyricFetcher, LyricLoader, LyricsError,
    Placeholder, PlaybackPosition, ReloadTrigger, Track, compose_frame, compute_offset, parse_lrc,
    resolve,
};

#[derive(Default)]
struct MapFetcher {
    files: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl MapFetcher {
    fn with(mut self, source: &str, text: &str) -> Self {
        self.files.insert(source.to_string(), text.to_string());
        self
    }
}

impl LyricFetcher for MapFetcher {
    fn fetch(&self, source: &str) -> impl Future<Output = Result<String, LyricsError>> + Send {
        self.calls.lock().unwrap().push(source.to_string());
        let found = self.files.get(source).cloned();
        let source = source.to_string();
        async move {
            found.ok_or(LyricsError::Http {
                status: 404,
                url: source,
            })
        }
    }
}

const SONG: &str = "[ti:Example]\n[offset:-500]\n[00:01.00]line one\n[00:02.00]line two\n\
                    [00:03.00][00:07.00]chorus\n[00:04.00]four\n[00:05.00]five\n[00:06.00]six";
const SONG_TRANS: &str = "[00:02.00]ligne deux\n[00:07.00]refrain";

fn track(id: &str, lrc: &str, tlrc: Option<&str>) -> Track {
    Track {
        id: Some(id.to_string()),
        name: id.to_string(),
        artist: "Artist".to_string(),
        lrc: Some(lrc.to_string()),
        tlrc: tlrc.map(str::to_string),
    }
}

#[test]
fn offset_scenario() {
    let parsed = parse_lrc("[offset:-500]\n[00:01.00]line one\n[00:02.00]line two");
    let pairs: Vec<_> = parsed.iter().map(|l| (l.time_ms, l.text.as_str())).collect();
    assert_eq!(pairs, vec![(500, "line one"), (1500, "line two")]);
}

#[test]
fn every_line_has_text_and_respects_offset() {
    let samples = [
        SONG,
        "[offset:250]\n[00:00.00]\n[00:00.00]start\n[00:01]x",
        "[offset:-1000]\\n[00:00.10]a\\n[00:00.20][00:00.30]b",
        "garbage\n[xx:yy.zz]nope\n[00:01.00]   ",
    ];
    for raw in samples {
        let offset = lrcsync::lyrics::find_offset(raw);
        for line in parse_lrc(raw) {
            assert!(!line.text.is_empty(), "{raw:?}");
            assert!(line.time_ms >= offset, "{raw:?}");
        }
    }
}

#[tokio::test]
async fn remote_load_drives_frames() {
    let fetcher = Arc::new(
        MapFetcher::default()
            .with("song.lrc", SONG)
            .with("song.tlrc", SONG_TRANS),
    );
    let loader = LyricLoader::new(Arc::clone(&fetcher), &LoaderConfig::default());
    let t = track("song", "song.lrc", Some("song.tlrc"));

    let mut trigger = ReloadTrigger::default();
    assert!(trigger.observe(&t, 3));
    let doc = loader.load(&t, LyricSourceMode::Remote).await.unwrap();
    assert!(!trigger.observe(&t, 3));

    // chorus appears twice; offset -500 applies to both files.
    assert_eq!(doc.len(), 7);
    assert_eq!(doc.offset_ms, -500);
    assert_eq!(doc.primary[6].text, "chorus");
    assert_eq!(doc.primary[6].time_ms, 6_500);

    let active = resolve(&doc, 1_600.0).unwrap();
    assert_eq!(active.line.text, "line two");
    assert_eq!(active.translation, Some("ligne deux"));

    let snapshot = loader.snapshot();
    assert_eq!(snapshot.state, LoadState::Loaded);
    let mode = DisplayMode::Expanded;
    let geometry = Geometry::for_mode(mode, t.tlrc.is_some());
    let frame = compose_frame(&snapshot, PlaybackPosition::new(0.5, 10_000.0), mode, &geometry);
    // 5000ms: lines at 500..4500 have passed, so "five" (index 4) is active.
    assert_eq!(frame.active_text.as_deref(), Some("five"));
    assert_eq!(frame.active_index, Some(4));
    // index 4 == 7 - 3 is the terminal position.
    assert_eq!(frame.scroll.translate_y_px, -60);
    assert_eq!(frame.placeholder, None);

    let end = compose_frame(&snapshot, PlaybackPosition::new(1.0, 10_000.0), mode, &geometry);
    assert_eq!(end.active_text.as_deref(), Some("chorus"));
    assert_eq!(end.translation.as_deref(), Some("refrain"));

    assert_eq!(
        *fetcher.calls.lock().unwrap(),
        vec!["song.lrc".to_string(), "song.tlrc".to_string()]
    );
}

#[tokio::test]
async fn missing_remote_file_surfaces_error_and_placeholder() {
    let loader = LyricLoader::new(MapFetcher::default(), &LoaderConfig::default());
    let t = track("lost", "missing.lrc", None);
    let err = loader.load(&t, LyricSourceMode::Remote).await.unwrap_err();
    assert!(matches!(err, LyricsError::Http { status: 404, .. }));

    let snapshot = loader.snapshot();
    assert_eq!(snapshot.state, LoadState::Error);
    let frame = compose_frame(
        &snapshot,
        PlaybackPosition::default(),
        DisplayMode::Compact,
        &Geometry::for_mode(DisplayMode::Compact, false),
    );
    assert!(!frame.loading);
    assert_eq!(frame.placeholder, Some(Placeholder::NoLyrics));
}

#[tokio::test]
async fn none_mode_never_fetches() {
    let fetcher = Arc::new(MapFetcher::default().with("song.lrc", SONG));
    let loader = LyricLoader::new(Arc::clone(&fetcher), &LoaderConfig::default());
    let doc = loader
        .load_code(&track("song", "song.lrc", None), 0)
        .await
        .unwrap();
    assert!(doc.is_empty());
    assert_eq!(loader.snapshot().state, LoadState::Loaded);
    assert!(!loader.is_loading());
    assert!(fetcher.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn reload_replaces_document() {
    let loader = LyricLoader::new(MapFetcher::default(), &LoaderConfig::default());
    let first = loader
        .load(&track("a", "[00:01.00]first song", None), LyricSourceMode::Inline)
        .await
        .unwrap();
    let second = loader
        .load(&track("b", "[00:01.00]second song", None), LyricSourceMode::Inline)
        .await
        .unwrap();
    // The earlier document is untouched; the loader now publishes the new one.
    assert_eq!(first.primary[0].text, "first song");
    assert_eq!(loader.snapshot().document, second);
    assert_eq!(loader.snapshot().track_id.as_deref(), Some("b"));
}

#[test]
fn expanded_scroll_properties() {
    let (h, m) = (20, 20);
    for index in 0..3 {
        assert_eq!(
            compute_offset(index, 10, h, m, DisplayMode::Expanded).translate_y_px,
            0
        );
    }
    assert_eq!(
        compute_offset(5, 10, h, m, DisplayMode::Expanded).translate_y_px,
        -3 * i64::from(h + m)
    );
}
