use super::*;
use crate::foundation::core::{FrameIndex, Rgba8};
use crate::scene::test_ctx;

fn render(heading: &str, body: &str) -> DisplayList {
    let ctx = test_ctx();
    let mut list = DisplayList::new(FrameIndex(0), Rgba8::rgb(0, 0, 0));
    artifact_scene(&ctx, heading, body, &mut list);
    list
}

#[test]
fn wrap_keeps_source_lines() {
    assert_eq!(wrap_preformatted("a\nb\n\nc", 10), vec!["a", "b", "", "c"]);
    assert_eq!(wrap_preformatted("x\r\ny", 10), vec!["x", "y"]);
}

#[test]
fn wrap_breaks_at_spaces_then_hard() {
    assert_eq!(
        wrap_preformatted("alpha beta gamma", 11),
        vec!["alpha beta", "gamma"]
    );
    assert_eq!(wrap_preformatted("abcdefgh", 3), vec!["abc", "def", "gh"]);
}

#[test]
fn wrap_counts_characters_not_bytes() {
    assert_eq!(wrap_preformatted("→→→→", 2), vec!["→→", "→→"]);
}

#[test]
fn panel_holds_heading_and_body_lines() {
    let list = render("contract.json (excerpt)", "{\n  \"a\": 1\n}");
    let panel = list.rects().next().unwrap();
    assert_eq!(panel.rect.x0, 90.0);
    assert_eq!(panel.rect.x1, 1830.0);
    // Below the segment title at top 90 (34 px).
    assert_eq!(panel.rect.y0, 160.0);
    assert_eq!(panel.radius, 16.0);
    assert!(panel.border.is_some());

    let heading = list.find_text("contract.json (excerpt)").unwrap();
    assert_eq!(heading.role, FontRole::Sans);
    assert_eq!(heading.pos, Point::new(122.0, panel.rect.y0 + 32.0));

    let body: Vec<_> = list.texts().filter(|t| t.role == FontRole::Mono).collect();
    assert_eq!(body.len(), 3);
    assert_eq!(body[1].text, "  \"a\": 1");
    assert!((body[1].pos.y - body[0].pos.y - 29.0).abs() < 1e-9);
}

#[test]
fn panel_height_fits_content() {
    let short = render("h", "one line");
    let long = render("h", "1\n2\n3\n4\n5\n6");
    let h = |l: &DisplayList| l.rects().next().unwrap().rect.height();
    assert!(h(&long) > h(&short));
    assert!((h(&long) - h(&short) - 5.0 * 29.0).abs() < 1e-9);
}

#[test]
fn overflowing_body_is_clipped_to_canvas() {
    let body = vec!["line"; 500].join("\n");
    let list = render("", &body);
    let panel = list.rects().next().unwrap();
    assert!(panel.rect.y1 <= 1080.0 - 90.0);
    for t in list.texts() {
        assert!(t.pos.y + 29.0 <= panel.rect.y1 - 32.0 + 0.5);
    }
}

#[test]
fn empty_heading_is_omitted() {
    let list = render("", "body");
    assert_eq!(list.texts().count(), 1);
}
