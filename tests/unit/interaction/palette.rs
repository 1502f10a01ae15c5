use super::*;
use crate::foundation::config::default_templates;
use crate::layout::measure::FixedAdvance;

fn engine() -> LayoutEngine {
    LayoutEngine::new(Default::default(), Box::new(FixedAdvance::default()))
}

#[test]
fn default_palette_has_fifteen_flagged_templates() {
    let palette = Palette::build(&default_templates(), &mut engine()).unwrap();
    assert_eq!(palette.len(), 15);
    for t in palette.templates() {
        assert!(t.iter().all(|b| b.flags.is_template));
        assert_eq!(t.origin().x, 34.0);
    }
    assert_eq!(palette.get(0).unwrap().expression(), "(NaN+NaN)");
    assert_eq!(palette.get(14).unwrap().expression(), "equalText(\"\", \"\")");
}

#[test]
fn templates_do_not_overlap() {
    let palette = Palette::build(&default_templates(), &mut engine()).unwrap();
    for pair in palette.templates().windows(2) {
        assert!(pair[0].bounds().y1 <= pair[1].bounds().y0);
    }
}

#[test]
fn hit_test_picks_template_under_glyph() {
    let palette = Palette::build(&default_templates(), &mut engine()).unwrap();
    let t = palette.get(2).unwrap();
    let glyph = t.root().branch_shape().unwrap().label_center;
    assert_eq!(
        palette.hit_test(t.origin() + glyph.to_vec2()),
        Some((2, t.root_id()))
    );
    assert_eq!(palette.hit_test(Point::new(5.0, 5.0)), None);
}

#[test]
fn bad_template_fails_the_palette() {
    let specs = [TemplateSpec {
        expression: "a ^ b".to_owned(),
        origin: Point::new(0.0, 0.0),
    }];
    assert!(Palette::build(&specs, &mut engine()).is_err());
}
