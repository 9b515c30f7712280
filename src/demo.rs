use patiox::{point, Design, Engine, ShadeConstraints, ShadeRect};

/// Build the sample layout: four posts under a cover that overhangs the
/// left-hand pair by four feet.
pub fn build_sample_design(engine: &Engine) -> Design {
    let mut design = engine.set_constraints(
        &Design::new(),
        ShadeConstraints {
            enabled: true,
            ..ShadeConstraints::default()
        },
    );

    for (x, y) in [(40.0, 40.0), (200.0, 40.0), (40.0, 180.0), (200.0, 180.0)] {
        design = engine.add_post(&design, point(x, y));
    }

    engine.set_shade_area(&design, Some(ShadeRect::new(80.0, 0.0, 280.0, 200.0)))
}
