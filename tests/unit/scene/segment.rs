use super::*;
use crate::foundation::core::{FrameIndex, Rgba8};
use crate::scene::test_ctx;
use crate::storyboard::model::{DiagramNode, NodeKind};

fn seg(visual: Visual) -> Segment {
    Segment {
        title: "Control layer".to_string(),
        narration: "n".to_string(),
        visual,
    }
}

fn render(segment: &Segment, local: u64) -> DisplayList {
    let ctx = test_ctx();
    let at = SegmentPlacement {
        index: 1,
        count: 3,
        start: 240,
    };
    let mut list = DisplayList::new(FrameIndex(240 + local), Rgba8::rgb(0, 0, 0));
    render_segment(&ctx, segment, at, 240 + local, &mut list);
    list
}

#[test]
fn chrome_shows_one_based_counter_and_title() {
    let list = render(
        &seg(Visual::Artifact {
            heading: "h".to_string(),
            body: "b".to_string(),
        }),
        0,
    );
    let counter = list.find_text("SEGMENT 2/3").unwrap();
    assert_eq!(counter.role, FontRole::Mono);
    assert_eq!(counter.pos, Point::new(90.0, 60.0));
    let title = list.find_text("Control layer").unwrap();
    assert_eq!(title.size_px, 34.0);
}

#[test]
fn title_visual_uses_segment_title_and_local_time() {
    let list = render(
        &seg(Visual::Title {
            subtitle: Some("why it matters".to_string()),
        }),
        18,
    );
    // Chrome title plus the centered card title.
    let titles: Vec<_> = list
        .texts()
        .filter(|t| t.text == "Control layer")
        .collect();
    assert_eq!(titles.len(), 2);
    assert_eq!(list.find_text("why it matters").unwrap().opacity, 1.0);
}

#[test]
fn diagram_visual_is_timed_from_segment_start() {
    let visual = Visual::Diagram {
        nodes: vec![DiagramNode {
            id: "a".to_string(),
            label: "Orchestrator".to_string(),
            kind: Some(NodeKind::System),
            x: 0.5,
            y: 0.5,
        }],
        edges: vec![],
    };
    let at_start = render(&seg(visual.clone()), 0);
    assert!(at_start.find_text("Orchestrator").is_none());

    let settled = render(&seg(visual), 30);
    assert_eq!(settled.find_text("Orchestrator").unwrap().opacity, 1.0);
}
