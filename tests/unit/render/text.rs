use super::*;

const WHITE: Rgba8 = Rgba8::rgb(255, 255, 255);

#[test]
fn empty_font_set_shapes_nothing() {
    let mut engine = TextEngine::new(&FontSet::empty()).unwrap();
    let shaped = engine
        .shape("hello", FontRole::Sans, 16.0, WHITE, None)
        .unwrap();
    assert!(shaped.is_none());
}

#[test]
fn invalid_size_is_rejected() {
    let mut engine = TextEngine::new(&FontSet::empty()).unwrap();
    assert!(engine.shape("x", FontRole::Mono, 0.0, WHITE, None).is_err());
    assert!(
        engine
            .shape("x", FontRole::Mono, f32::NAN, WHITE, None)
            .is_err()
    );
}

#[test]
fn system_fonts_shape_and_cache_layouts() {
    let fonts = FontSet::discover(None);
    if fonts.is_empty() {
        return;
    }
    let mut engine = TextEngine::new(&fonts).unwrap();
    let a = engine
        .shape("Production layer", FontRole::SansBold, 32.0, WHITE, None)
        .unwrap()
        .unwrap();
    let (w, h) = a.size();
    assert!(w > 0.0 && h > 0.0);

    let b = engine
        .shape("Production layer", FontRole::SansBold, 32.0, WHITE, None)
        .unwrap()
        .unwrap();
    assert!(Arc::ptr_eq(&a.layout, &b.layout));

    let wrapped = engine
        .shape(
            "Production layer Production layer Production layer",
            FontRole::SansBold,
            32.0,
            WHITE,
            Some(w + 1.0),
        )
        .unwrap()
        .unwrap();
    assert!(wrapped.size().1 > h);
}

fn run_fonts(shaped: &ShapedText) -> Vec<parley::FontData> {
    let mut out = Vec::new();
    for line in shaped.layout.lines() {
        for item in line.items() {
            if let parley::layout::PositionedLayoutItem::GlyphRun(run) = item {
                out.push(run.run().font().clone());
            }
        }
    }
    out
}

#[test]
fn glyph_runs_use_the_role_face() {
    let fonts = FontSet::discover(None);
    if fonts.is_empty() {
        return;
    }
    let mut engine = TextEngine::new(&fonts).unwrap();

    for role in [FontRole::Sans, FontRole::SansBold, FontRole::Mono] {
        let face = fonts.face_for(role).unwrap();
        let shaped = engine
            .shape("Orchestrator", role, 24.0, WHITE, None)
            .unwrap()
            .unwrap();
        let runs = run_fonts(&shaped);
        assert!(!runs.is_empty());
        for font in runs {
            assert!(
                font.data.data() == face.bytes.as_slice(),
                "{role:?} laid out with a face other than {}",
                face.family
            );
            assert_eq!(font.index, face.index);
        }
    }
}

#[test]
fn bold_and_regular_layouts_differ() {
    let fonts = FontSet::discover(None);
    let (Some(regular), Some(bold)) = (fonts.sans.as_ref(), fonts.sans_bold.as_ref()) else {
        return;
    };
    if regular.bytes == bold.bytes {
        return;
    }
    let mut engine = TextEngine::new(&fonts).unwrap();
    let a = engine
        .shape("Orchestrator", FontRole::Sans, 32.0, WHITE, None)
        .unwrap()
        .unwrap();
    let b = engine
        .shape("Orchestrator", FontRole::SansBold, 32.0, WHITE, None)
        .unwrap()
        .unwrap();
    assert_ne!(a.size().0, b.size().0);
}
