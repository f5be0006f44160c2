//! Plain-text result summary.

use chamfer_kernel::{ChamferResult, SolvedField};

/// Render the solved geometry and, when compensating, the corrected end point.
pub fn render(result: &ChamferResult) -> String {
    let spec = &result.spec;
    let solved = match spec.solved {
        SolvedField::D => format!("D = {:.3} mm", spec.d),
        SolvedField::D1 => format!("D1 = {:.3} mm", spec.d1),
        SolvedField::Angle => format!("angle = {:.1}°", spec.angle),
        SolvedField::L1 => format!("L1 = {:.3} mm", spec.l1),
    };

    let mut out = format!("Solved {}", solved);
    if spec.overconstrained {
        out.push_str(" (all four parameters given)");
    }
    out.push('\n');
    out.push_str(&format!(
        "D = {:.3} mm, D1 = {:.3} mm, angle = {:.1}° ({}), L1 = {:.3} mm\n",
        spec.d, spec.d1, spec.angle, spec.convention, spec.l1
    ));

    match (result.correction, result.tool_radius) {
        (Some(c), Some(r)) => {
            out.push_str(&format!(
                "Tool nose radius R = {} mm ({})\n",
                r, c.strategy
            ));
            out.push_str(&format!(
                "ΔX = {:.3} mm, ΔZ = {:.3} mm\n",
                c.delta_x, c.delta_z
            ));
            out.push_str(&format!(
                "Corrected D1 = {:.3} mm, L1 = {:.3} mm\n",
                result.programmed_d1(),
                result.programmed_l1()
            ));
        }
        _ => out.push_str("No tool nose radius compensation\n"),
    }

    out
}
