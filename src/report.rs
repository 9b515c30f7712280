//! Plain-text summary of an evaluated design.

use std::fmt::Write;

use uom::si::length::meter;

use crate::design::Design;
use crate::engine::Evaluation;

/// How many violations are listed before the rest are counted.
const LISTED_VIOLATIONS: usize = 3;

/// Append one `label: $amount` line.
fn cost_line(output: &mut String, label: &str, amount: f64) {
    writeln!(output, "  {label:<20} ${amount:.2}").expect("writing to string cannot fail");
}

/// Render a textual summary of an evaluated design.
///
/// Optional charges (engineering, design revision, precision placement) are
/// only listed when they apply.
#[must_use]
pub fn render_summary(design: &Design, evaluation: &Evaluation) -> String {
    let mut output = String::new();
    let costs = &evaluation.costs;

    output.push_str("Cost breakdown\n");
    cost_line(&mut output, "Steel posts:", costs.posts);
    cost_line(&mut output, "Cover material:", costs.cover);
    cost_line(&mut output, "Hardware:", costs.hardware);
    cost_line(&mut output, "Installation:", costs.installation);
    if costs.engineering > 0.0 {
        cost_line(&mut output, "Engineering:", costs.engineering);
    }
    if costs.constraint_penalty > 0.0 {
        cost_line(&mut output, "Design revision:", costs.constraint_penalty);
    }
    if costs.precision > 0.0 {
        cost_line(&mut output, "Precision placement:", costs.precision);
    }
    cost_line(&mut output, "Total:", costs.total);

    output.push_str("\nSpecifications\n");
    writeln!(output, "  Posts: {}", design.posts().len()).expect("writing to string cannot fail");
    writeln!(
        output,
        "  Coverage area: {:.1} sq ft",
        evaluation.coverage_area_sq_ft
    )
    .expect("writing to string cannot fail");
    writeln!(output, "  Cover: {}", design.cover_type()).expect("writing to string cannot fail");
    writeln!(output, "  Cover angle: {}°", design.tilt().degrees())
        .expect("writing to string cannot fail");
    writeln!(
        output,
        "  Cantilever: {:.1} ft ({:.2} m)",
        evaluation.cantilever_span_ft,
        evaluation.cantilever_span().get::<meter>()
    )
    .expect("writing to string cannot fail");
    writeln!(
        output,
        "  Post size: {}",
        evaluation.classification.post_size
    )
    .expect("writing to string cannot fail");

    let constraints = design.constraints();
    if let (true, Some((width, height))) = (constraints.enabled, evaluation.shade_size_ft) {
        writeln!(output, "  Width: {width:.1} ft").expect("writing to string cannot fail");
        writeln!(output, "  Height: {height:.1} ft").expect("writing to string cannot fail");
    }

    if !evaluation.classification.safe && evaluation.cantilever_span_ft > 0.0 {
        output.push_str("\nWarning: span exceeds safe limits - additional posts recommended\n");
    }

    if !evaluation.violations.is_empty() {
        output.push_str("\nDesign constraint issues\n");
        for violation in evaluation.violations.iter().take(LISTED_VIOLATIONS) {
            writeln!(output, "  - {violation}").expect("writing to string cannot fail");
        }
        if evaluation.violations.len() > LISTED_VIOLATIONS {
            writeln!(
                output,
                "  ...and {} more",
                evaluation.violations.len() - LISTED_VIOLATIONS
            )
            .expect("writing to string cannot fail");
        }
    }

    if constraints.enabled {
        output.push_str("\nActive constraints\n");
        writeln!(
            output,
            "  Size: {}-{} x {}-{} ft",
            constraints.min_width,
            constraints.max_width,
            constraints.min_height,
            constraints.max_height
        )
        .expect("writing to string cannot fail");
        writeln!(
            output,
            "  Post spacing: {}-{} ft",
            constraints.min_post_spacing, constraints.max_post_spacing
        )
        .expect("writing to string cannot fail");
        if constraints.snap_to_grid {
            writeln!(output, "  Grid: {} ft", constraints.grid_size)
                .expect("writing to string cannot fail");
        }
    }

    output
}
