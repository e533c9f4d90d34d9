use super::*;
use crate::encode::sink::InMemorySink;
use crate::storyboard::demo::demo_props;

fn small_settings() -> CompositionSettings {
    CompositionSettings {
        width: 320,
        height: 240,
        fps: 10,
        duration_frames: None,
        title_secs: 0.5,
        segment_secs: 1.0,
        ..CompositionSettings::default()
    }
}

fn session(parallel: bool) -> RenderSession {
    RenderSession::with_fonts(
        demo_props(),
        small_settings(),
        RenderSessionOpts {
            parallel,
            chunk_size: 7,
            threads: parallel.then_some(2),
            channel_capacity: 2,
            enable_audio: false,
        },
        Arc::new(FontSet::empty()),
    )
    .unwrap()
}

#[test]
fn timeline_derives_duration_from_segments() {
    let s = session(false);
    assert_eq!(s.timeline().title_frames, 5);
    assert_eq!(s.timeline().segment_frames, 10);
    assert_eq!(s.timeline().duration, 35);
    assert_eq!(s.timeline().entries(&s.props.storyboard).len(), 4);
}

#[test]
fn render_frame_produces_canvas_sized_rgba() {
    let mut s = session(false);
    let intro = s.render_frame(FrameIndex(0)).unwrap();
    assert_eq!((intro.width, intro.height), (320, 240));
    assert_eq!(intro.data.len(), 320 * 240 * 4);

    let artifact = s.render_frame(FrameIndex(5)).unwrap();
    assert_ne!(intro.data, artifact.data);

    assert!(s.render_frame(FrameIndex(35)).is_err());
}

#[test]
fn render_range_is_ordered_and_chunked() {
    let mut s = session(false);
    let mut sink = InMemorySink::new();
    let range = FrameRange::new(FrameIndex(3), FrameIndex(20)).unwrap();
    let stats = s.render_range(range, &mut sink).unwrap();

    assert_eq!(stats.frames_total, 17);
    assert_eq!(stats.chunks, 3);
    assert!(sink.is_ended());
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, (3..20).collect::<Vec<_>>());

    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height), (320, 240));
    assert!(cfg.audio.is_none());
}

#[test]
fn render_range_parallel_matches_sequential_output() {
    let range = FrameRange::new(FrameIndex(0), FrameIndex(35)).unwrap();

    let mut seq = InMemorySink::new();
    session(false).render_range(range, &mut seq).unwrap();
    let mut par = InMemorySink::new();
    session(true).render_range(range, &mut par).unwrap();

    assert_eq!(seq.frames().len(), par.frames().len());
    for ((ia, a), (ib, b)) in seq.frames().iter().zip(par.frames()) {
        assert_eq!(ia, ib);
        assert_eq!(a.data, b.data);
    }
}

#[test]
fn render_range_rejects_bad_ranges() {
    let mut s = session(false);
    let mut sink = InMemorySink::new();
    let empty = FrameRange::new(FrameIndex(4), FrameIndex(4)).unwrap();
    assert!(s.render_range(empty, &mut sink).is_err());
    let past = FrameRange::new(FrameIndex(0), FrameIndex(36)).unwrap();
    assert!(s.render_range(past, &mut sink).is_err());
}

#[test]
fn zero_threads_is_rejected() {
    assert!(build_thread_pool(Some(0)).is_err());
}

struct FailingSink;

impl FrameSink for FailingSink {
    fn begin(&mut self, _cfg: SinkConfig) -> StoryreelResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, _frame: &FrameRGBA) -> StoryreelResult<()> {
        if idx.0 == 2 {
            return Err(StoryreelError::encode("disk full"));
        }
        Ok(())
    }

    fn end(&mut self) -> StoryreelResult<()> {
        Ok(())
    }
}

#[test]
fn sink_errors_are_reported() {
    let mut s = session(false);
    let range = FrameRange::new(FrameIndex(0), FrameIndex(35)).unwrap();
    let err = s.render_range(range, &mut FailingSink).unwrap_err();
    assert!(matches!(err, StoryreelError::Encode(ref m) if m == "disk full"));
}

#[test]
fn audio_is_resolved_against_public_dir() {
    let dir = std::env::temp_dir().join(format!("storyreel_audio_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("narration.mp3"), b"not really mp3").unwrap();

    let settings = CompositionSettings {
        public_dir: dir.clone(),
        ..small_settings()
    };
    let s = RenderSession::with_fonts(
        demo_props(),
        settings,
        RenderSessionOpts::default(),
        Arc::new(FontSet::empty()),
    )
    .unwrap();
    let range = FrameRange::new(FrameIndex(0), FrameIndex(20)).unwrap();
    let audio = s.audio_input(range).unwrap().unwrap();
    assert_eq!(audio.path, dir.join("narration.mp3"));
    assert!((audio.duration_secs - 2.0).abs() < 1e-9);

    let mut missing = demo_props();
    missing.audio_src = Some("/nope.mp3".to_string());
    let s = RenderSession::with_fonts(
        missing,
        small_settings(),
        RenderSessionOpts::default(),
        Arc::new(FontSet::empty()),
    )
    .unwrap();
    assert!(s.audio_input(range).unwrap().is_none());

    let _ = std::fs::remove_dir_all(&dir);
}
