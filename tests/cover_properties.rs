//! Property sweep over viewports, image sizes, and offsets.
//!
//! Every valid combination must cover the viewport, preserve aspect ratio,
//! leave no uncovered strip on either side, and move in the documented
//! direction. Failures are collected so one run reports every broken case.

use approx::relative_eq;
use zencover::*;

const VIEWPORTS: &[(f64, f64)] = &[
    (1920.0, 1080.0),
    (1080.0, 1920.0),
    (1366.0, 768.0),
    (375.0, 812.0),
    (1024.0, 1024.0),
    (1.0, 1.0),
    (3840.0, 1600.0),
];

const IMAGES: &[(f64, f64)] = &[
    (1200.0, 800.0),
    (800.0, 1200.0),
    (4000.0, 3000.0),
    (640.0, 480.0),
    (333.0, 777.0),
    (1.0, 1.0),
    (10_000.0, 50.0),
];

/// Offsets as fractions of the per-axis limit.
const OFFSET_FRACTIONS: &[(f64, f64)] = &[
    (0.0, 0.0),
    (0.25, 0.0),
    (0.0, -0.25),
    (0.5, 0.5),
    (-0.9, 0.3),
    (0.99, -0.99),
];

#[test]
fn sweep_cover_invariants() {
    let mut failures: Vec<String> = Vec::new();

    for &(vw, vh) in VIEWPORTS {
        for &(iw, ih) in IMAGES {
            let limit = Offset::limit_for(Size::new(iw, ih));
            for &(fx, fy) in OFFSET_FRACTIONS {
                let offset = Offset::new(limit.x * fx, limit.y * fy);
                let tag = format!("{vw}x{vh} <- {iw}x{ih} offset ({}, {})", offset.x, offset.y);

                let l = match compute_layout(offset, vw, vh, iw, ih) {
                    Ok(l) => l,
                    Err(e) => {
                        failures.push(format!("{tag}: unexpected error {e}"));
                        continue;
                    }
                };

                if l.width < vw || l.height < vh {
                    failures.push(format!(
                        "{tag}: {}x{} smaller than viewport",
                        l.width, l.height
                    ));
                }
                if !relative_eq!(l.width / l.height, iw / ih, max_relative = 1e-9) {
                    failures.push(format!(
                        "{tag}: aspect {} != {}",
                        l.width / l.height,
                        iw / ih
                    ));
                }
                if !l.covers(Size::new(vw, vh)) {
                    failures.push(format!("{tag}: uncovered strip in {l:?}"));
                }

                let center_x = (vw - l.width) / 2.0;
                let center_y = (vh - l.height) / 2.0;
                if offset.is_center() {
                    if l.offset_x != center_x || l.offset_y != center_y {
                        failures.push(format!("{tag}: not centered: {l:?}"));
                    }
                } else {
                    // x > 0 moves right, y > 0 moves up.
                    let dx = l.offset_x - center_x;
                    let dy = l.offset_y - center_y;
                    if offset.x != 0.0 && dx.signum() != offset.x.signum() {
                        failures.push(format!("{tag}: x moved the wrong way (dx = {dx})"));
                    }
                    if offset.y != 0.0 && dy.signum() != -offset.y.signum() {
                        failures.push(format!("{tag}: y moved the wrong way (dy = {dy})"));
                    }
                }
            }
        }
    }

    assert!(
        failures.is_empty(),
        "{} failures:\n{}",
        failures.len(),
        failures.join("\n")
    );
}

#[test]
fn viewport_centre_shows_biased_source_point() {
    let viewport = Size::new(1920.0, 1080.0);
    let image = Size::new(1200.0, 800.0);
    for offset in [
        Offset::new(100.0, 0.0),
        Offset::new(-250.0, 120.0),
        Offset::new(30.0, -399.0),
    ] {
        let l = CoverFit::new(viewport, image).offset(offset).compute().unwrap();
        let scale = l.width / image.width;
        let src_x = (viewport.width / 2.0 - l.offset_x) / scale;
        let src_y = (viewport.height / 2.0 - l.offset_y) / scale;
        assert!(
            relative_eq!(src_x, image.width / 2.0 - offset.x, max_relative = 1e-9),
            "{offset:?}: src_x {src_x}"
        );
        assert!(
            relative_eq!(src_y, image.height / 2.0 + offset.y, max_relative = 1e-9),
            "{offset:?}: src_y {src_y}"
        );
    }
}

#[test]
fn identical_inputs_identical_bits() {
    for &(vw, vh) in VIEWPORTS {
        for &(iw, ih) in IMAGES {
            let o = Offset::new(iw * 0.1, -ih * 0.2);
            let a = compute_layout(o, vw, vh, iw, ih).unwrap();
            let b = compute_layout(o, vw, vh, iw, ih).unwrap();
            assert_eq!(
                [a.width, a.height, a.offset_x, a.offset_y].map(f64::to_bits),
                [b.width, b.height, b.offset_x, b.offset_y].map(f64::to_bits)
            );
        }
    }
}

#[test]
fn offsets_at_or_past_the_limit_rejected() {
    let mut failures: Vec<String> = Vec::new();
    for &(iw, ih) in IMAGES {
        let limit = Offset::limit_for(Size::new(iw, ih));
        for offset in [
            Offset::new(limit.x, 0.0),
            Offset::new(-limit.x, 0.0),
            Offset::new(0.0, limit.y),
            Offset::new(0.0, -limit.y * 3.0),
            Offset::new(f64::INFINITY, 0.0),
        ] {
            match compute_layout(offset, 1920.0, 1080.0, iw, ih) {
                Err(CoverError::InvalidOffset { .. }) => {}
                other => failures.push(format!("{iw}x{ih} {offset:?}: got {other:?}")),
            }
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn growth_diverges_toward_the_limit() {
    let viewport = Size::new(1920.0, 1080.0);
    let image = Size::new(1200.0, 800.0);
    let mut last = 0.0;
    for gap in [300.0, 100.0, 10.0, 1.0, 0.01] {
        let l = CoverFit::new(viewport, image)
            .offset(Offset::new(600.0 - gap, 0.0))
            .compute()
            .unwrap();
        assert!(l.width > last, "width must grow as the offset nears 600");
        assert!(l.width.is_finite());
        last = l.width;
    }
}
