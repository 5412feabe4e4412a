//! Plain-text rendering of catalog listings, results and sweeps

use powerup_core::{CalculationResult, DesignVariant, Mode, SweepResult};

/// Print whole numbers without a fractional part
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.4}")
    }
}

/// One row per design in catalog order
pub fn format_designs(designs: &[DesignVariant]) -> String {
    let mut out = format!(
        "{:<5} {:<14} {:<9} {:<7} {}\n",
        "No.", "Design", "Category", "Target", "Parameters"
    );
    for design in designs {
        let parameters: Vec<&str> = design.parameters.iter().map(|p| p.key()).collect();
        out.push_str(&format!(
            "{:<5} {:<14} {:<9} {:<7} {}\n",
            design.number,
            design.id,
            design.category.as_str(),
            design.target.key(),
            parameters.join(", ")
        ));
    }
    out
}

pub fn format_result(result: &CalculationResult) -> String {
    let headline = match result.mode {
        Mode::Mdes => format!("MDES = {:.3}", result.value),
        Mode::Power => format!("Power = {:.3}", result.value),
        Mode::Mrss => match result.solved_for {
            Some(param) => format!("MRSS ({param}) = {}", format_number(result.value)),
            None => format!("MRSS = {}", format_number(result.value)),
        },
    };
    let lambda = result
        .noncentrality
        .map(|lambda| format!("  lambda = {lambda:.4}"))
        .unwrap_or_default();
    format!(
        "{}: {headline}\n  M = {:.4}  T1 = {:.4}  T2 = {:.4}  df = {}  SE = {:.5}{lambda}\n",
        result.design,
        result.multiplier,
        result.t1,
        result.t2,
        format_number(result.df),
        result.standard_error
    )
}

/// Two-column table of swept value and outcome
pub fn format_sweep(result: &SweepResult) -> String {
    let mut out = format!(
        "{}: {} by {}\n{:>12} {:>12}\n",
        result.design,
        result.mode,
        result.parameter,
        result.parameter.key(),
        result.mode.as_str()
    );
    for point in &result.points {
        let outcome = match result.mode {
            Mode::Mrss => format_number(point.outcome),
            Mode::Mdes | Mode::Power => format!("{:.4}", point.outcome),
        };
        out.push_str(&format!("{:>12} {:>12}\n", format_number(point.value), outcome));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use powerup_core::{Param, SweepPoint, list_designs};

    fn sample_result(mode: Mode, value: f64) -> CalculationResult {
        CalculationResult {
            design: "CRA2_2r",
            mode,
            value,
            solved_for: (mode == Mode::Mrss).then_some(Param::J),
            multiplier: 2.8,
            t1: 2.0,
            t2: 0.8,
            noncentrality: (mode == Mode::Power).then_some(2.8),
            df: 38.0,
            standard_error: 0.14,
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(40.0), "40");
        assert_eq!(format_number(0.15), "0.1500");
    }

    #[test]
    fn test_designs_listing() {
        let text = format_designs(list_designs());
        assert_eq!(text.lines().count(), 22);
        assert!(text.contains("CRA2_2r"));
        assert!(text.contains("ITS_wcompare"));
    }

    #[test]
    fn test_result_headlines() {
        let mdes = format_result(&sample_result(Mode::Mdes, 0.39897));
        assert!(mdes.starts_with("CRA2_2r: MDES = 0.399"));
        assert!(mdes.contains("M = 2.8000"));
        assert!(mdes.contains("df = 38"));
        assert!(!mdes.contains("lambda"));

        let mrss = format_result(&sample_result(Mode::Mrss, 70.0));
        assert!(mrss.contains("MRSS (J) = 70"));

        let power = format_result(&sample_result(Mode::Power, 0.8022));
        assert!(power.contains("Power = 0.802"));
        assert!(power.contains("M = 2.8000"));
        assert!(power.contains("lambda = 2.8000"));
    }

    #[test]
    fn test_sweep_table() {
        let result = SweepResult {
            design: "CRA2_2r",
            mode: Mode::Power,
            parameter: Param::J,
            points: vec![
                SweepPoint { value: 10.0, outcome: 0.125 },
                SweepPoint { value: 20.0, outcome: 0.301 },
            ],
        };
        let text = format_sweep(&result);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].trim_start().starts_with("10"));
        assert!(lines[3].ends_with("0.3010"));
    }
}
