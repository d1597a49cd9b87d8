//! Formatted terminal output.
//!
//! We keep formatting code in one place so the calculators stay free of
//! presentation concerns and output changes are localized.

use crate::io::Catalog;
use crate::models::{CalculationResult, total_area, total_cost};

/// Detailed block for one calculation.
pub fn format_result(result: &CalculationResult, currency: &str) -> String {
    let unit = result.material.kind.unit_label();
    let mut out = String::new();
    out.push_str(&format!("Material: {}\n", result.material));
    out.push_str(&format!("Area: {:.2} m²\n", result.area));
    out.push_str(&format!("Reserve: {}%\n", result.reserve_percent));
    out.push_str(&format!(
        "Units needed: {} {}{}\n",
        result.units_needed,
        unit,
        if result.units_needed == 1 { "" } else { "s" }
    ));
    out.push_str(&format!("Total cost: {:.2} {currency}\n", result.total_cost));
    out
}

/// One block per result, followed by totals when there are several.
pub fn format_results(results: &[CalculationResult], currency: &str) -> String {
    let mut out = String::new();
    for (idx, result) in results.iter().enumerate() {
        if results.len() > 1 {
            out.push_str(&format!("--- Calculation #{} ---\n", idx + 1));
        }
        out.push_str(&format_result(result, currency));
        out.push('\n');
    }
    if results.len() > 1 {
        out.push_str(&format_summary(results, currency));
    }
    out
}

pub fn format_summary(results: &[CalculationResult], currency: &str) -> String {
    format!(
        "Summary: {} calculations | area {:.2} m² | cost {:.2} {currency}\n",
        results.len(),
        total_area(results),
        total_cost(results)
    )
}

/// Ranked table of results (cheapest first), with the extra cost over the
/// cheapest option.
pub fn format_comparison(results: &[CalculationResult], currency: &str) -> String {
    let mut out = String::new();
    let Some(cheapest) = results.first() else {
        return out;
    };

    out.push_str(&format!(
        "Comparison for {:.2} m² (reserve {}%):\n",
        cheapest.area, cheapest.reserve_percent
    ));
    out.push_str(
        format!(
            "{:<4} {:<24} {:<10} {:>8} {:>14} {:>14}\n",
            "#", "material", "kind", "units", "cost", "vs cheapest"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<4} {:-<24} {:-<10} {:-<8} {:-<14} {:-<14}\n",
            "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for (idx, r) in results.iter().enumerate() {
        let delta = r.total_cost - cheapest.total_cost;
        out.push_str(
            format!(
                "{:<4} {:<24} {:<10} {:>8} {:>14} {:>14}\n",
                idx + 1,
                truncate(&r.material.name, 24),
                r.material.kind.display_name(),
                r.units_needed,
                format!("{:.2} {currency}", r.total_cost),
                format!("+{delta:.2}"),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Table of catalog materials.
pub fn format_catalog(catalog: &Catalog, currency: &str) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<24} {:<10} {:>12} {:>16}\n",
            "material", "kind", "price", "coverage/unit"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<24} {:-<10} {:-<12} {:-<16}\n", "", "", "", "").trim_end());
    out.push('\n');

    for m in catalog.materials() {
        out.push_str(
            format!(
                "{:<24} {:<10} {:>12} {:>16}\n",
                truncate(&m.name, 24),
                m.kind.display_name(),
                format!("{:.2} {currency}", m.price_per_unit),
                format!("{:.3} m²/{}", m.unit_coverage, m.kind.unit_label()),
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
