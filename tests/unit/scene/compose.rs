use super::*;
use crate::composition::settings::CompositionSettings;
use crate::scene::test_ctx;
use crate::storyboard::demo::demo_props;

fn setup() -> (Storyboard, Timeline) {
    let props = demo_props();
    let timeline =
        Timeline::new(&CompositionSettings::default(), props.storyboard.segments.len()).unwrap();
    (props.storyboard, timeline)
}

#[test]
fn overlay_is_on_every_frame() {
    let (sb, tl) = setup();
    let ctx = test_ctx();
    for f in [0, 59, 60, 300, 599] {
        let list = compose_frame(&ctx, &sb, &tl, FrameIndex(f)).unwrap();
        let overlay = list.find_text("1920×1080 · 30fps").unwrap();
        assert_eq!(overlay.anchor, Anchor::BottomRight);
        assert_eq!(overlay.pos, Point::new(1840.0, 1020.0));
        assert_eq!(list.background, ctx.palette.bg);
    }
}

#[test]
fn intro_shows_storyboard_title_and_subtitle() {
    let (sb, tl) = setup();
    let ctx = test_ctx();
    let list = compose_frame(&ctx, &sb, &tl, FrameIndex(30)).unwrap();
    assert!(list.find_text(&sb.title).is_some());
    assert!(list.find_text("A systems view").is_some());
    assert!(list.texts().all(|t| !t.text.starts_with("SEGMENT")));
}

#[test]
fn segments_follow_the_intro() {
    let (sb, tl) = setup();
    let ctx = test_ctx();
    let first = compose_frame(&ctx, &sb, &tl, FrameIndex(60)).unwrap();
    assert!(first.find_text("SEGMENT 1/3").is_some());
    assert!(first.find_text("Interface contract").is_some());
    assert!(first.find_text("contract.json (excerpt)").is_some());

    let second = compose_frame(&ctx, &sb, &tl, FrameIndex(240 + 40)).unwrap();
    assert!(second.find_text("SEGMENT 2/3").is_some());
    assert!(second.find_text("Orchestrator").is_some());

    let last = compose_frame(&ctx, &sb, &tl, FrameIndex(599)).unwrap();
    assert!(last.find_text("SEGMENT 3/3").is_some());
    assert!(last.find_text("run-summary.txt").is_some());
}

#[test]
fn tail_frames_only_keep_the_overlay() {
    let (mut sb, tl) = setup();
    sb.segments.truncate(1);
    let ctx = test_ctx();
    let tl = Timeline {
        segment_count: 1,
        ..tl
    };
    let list = compose_frame(&ctx, &sb, &tl, FrameIndex(400)).unwrap();
    assert_eq!(list.items.len(), 1);
}

#[test]
fn out_of_bounds_frame_is_an_error() {
    let (sb, tl) = setup();
    let ctx = test_ctx();
    assert!(matches!(
        compose_frame(&ctx, &sb, &tl, FrameIndex(600)),
        Err(StoryreelError::Evaluation(_))
    ));
}

#[test]
fn slot_without_segment_is_an_error() {
    let (mut sb, tl) = setup();
    sb.segments.clear();
    let ctx = test_ctx();
    assert!(compose_frame(&ctx, &sb, &tl, FrameIndex(100)).is_err());
}
