use super::*;
use crate::foundation::core::{FrameIndex, Rgba8};
use crate::scene::test_ctx;

#[test]
fn motion_starts_hidden_and_lowered() {
    let (o, y) = title_motion(0, 30.0);
    assert_eq!(o, 0.0);
    assert_eq!(y, 16.0);
}

#[test]
fn motion_settles_after_reveal() {
    // 0.6s at 30fps = 18 frames.
    for f in [18, 19, 500] {
        let (o, y) = title_motion(f, 30.0);
        assert_eq!(o, 1.0);
        assert_eq!(y, 0.0);
    }
    let (o, _) = title_motion(9, 30.0);
    assert_eq!(o, 0.875);
}

#[test]
fn subtitle_is_stacked_below_title() {
    let ctx = test_ctx();
    let mut list = DisplayList::new(FrameIndex(0), Rgba8::rgb(0, 0, 0));
    title_scene(&ctx, "Hello", Some("A systems view"), 18, &mut list);

    let title = list.find_text("Hello").unwrap();
    let sub = list.find_text("A systems view").unwrap();
    assert_eq!(title.anchor, Anchor::BottomCenter);
    assert_eq!(sub.anchor, Anchor::TopCenter);
    assert!(title.pos.y < sub.pos.y);
    assert_eq!(title.pos.x, 960.0);
    assert_eq!(title.max_width, Some(1400.0));
    assert_eq!(sub.opacity, 1.0);
}

#[test]
fn no_subtitle_centers_title_and_keeps_brand_line() {
    let ctx = test_ctx();
    let mut list = DisplayList::new(FrameIndex(0), Rgba8::rgb(0, 0, 0));
    title_scene(&ctx, "Hello", None, 18, &mut list);
    let title = list.find_text("Hello").unwrap();
    assert_eq!(title.anchor, Anchor::Center);
    assert_eq!(title.pos.y, 540.0);

    let brand = list.find_text(ctx.brand_line).unwrap();
    assert_eq!(brand.role, FontRole::Mono);
    assert_eq!(brand.opacity, 0.9);
    assert_eq!(brand.pos, Point::new(80.0, 1020.0));
    assert_eq!(list.texts().count(), 2);
}

#[test]
fn first_frame_only_shows_brand_line() {
    let ctx = test_ctx();
    let mut list = DisplayList::new(FrameIndex(0), Rgba8::rgb(0, 0, 0));
    title_scene(&ctx, "Hello", Some("sub"), 0, &mut list);
    assert_eq!(list.texts().count(), 1);
}

#[test]
fn empty_subtitle_is_treated_as_absent() {
    let ctx = test_ctx();
    let mut list = DisplayList::new(FrameIndex(0), Rgba8::rgb(0, 0, 0));
    title_scene(&ctx, "Hello", Some(""), 18, &mut list);
    let title = list.find_text("Hello").unwrap();
    assert_eq!(title.anchor, Anchor::Center);
    assert_eq!(title.pos.y, 540.0);
    assert!(list.find_text("").is_none());
    assert_eq!(list.texts().count(), 2);
}
