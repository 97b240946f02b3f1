//! Host configuration loaded from JSON.

#![cfg(feature = "serde")]

use zencover::stretch::ElementPosition;
use zencover::*;

#[test]
fn settings_from_partial_json() {
    let s: StretchSettings = serde_json::from_str(
        r#"{ "offset": { "x": 120.0, "y": -40.0 }, "speed": "fast" }"#,
    )
    .unwrap();
    assert_eq!(s.offset, Offset::new(120.0, -40.0));
    assert_eq!(s.speed, FadeSpeed::Fast);
    assert_eq!(s.el_position, ElementPosition::Relative);
}

#[test]
fn options_use_camel_case() {
    let o: StretchOptions =
        serde_json::from_str(r#"{ "offsetX": 5.0, "elPosition": "sticky", "speed": { "millis": 750 } }"#)
            .unwrap();
    assert_eq!(o.offset_x, Some(5.0));
    assert_eq!(o.offset_y, None);
    assert_eq!(o.el_position, Some(ElementPosition::Sticky));
    assert_eq!(o.speed, Some(FadeSpeed::Millis(750)));
}

#[test]
fn layout_serializes_css_style_names() {
    let l = CoverFit::new(Size::new(1920.0, 1080.0), Size::new(1200.0, 800.0))
        .compute()
        .unwrap();
    let json = serde_json::to_value(l).unwrap();
    assert_eq!(json["width"], 1920.0);
    assert_eq!(json["offsetY"], -100.0);
    assert!(json.get("offset_y").is_none());
}

#[test]
fn target_round_trips() {
    let json = serde_json::to_string(&Target::Element).unwrap();
    assert_eq!(json, r#""element""#);
    let back: Target = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Target::Element);
}
