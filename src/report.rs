use std::fmt::Write;

use crate::Analysis;

/// Plain-text report: the summary block, then the chart data.
pub fn render_text(analysis: &Analysis, precision: usize) -> String {
    let p = precision;
    let mut out = analysis.summary.report(&analysis.label, p);

    let h = &analysis.histogram;
    let _ = writeln!(out, "Histogram ({} bins):", h.bin_count());
    for (i, count) in h.counts.iter().enumerate() {
        let close = if i + 1 == h.bin_count() { ']' } else { ')' };
        let _ = writeln!(
            out,
            "  [{:.p$}, {:.p$}{close}  {count}",
            h.edges[i],
            h.edges[i + 1]
        );
    }

    let b = &analysis.boxplot;
    let _ = writeln!(out, "Boxplot:");
    let _ = writeln!(
        out,
        "  Whiskers: {:.p$} .. {:.p$}\n  Q1: {:.p$}  Median: {:.p$}  Q3: {:.p$}  IQR: {:.p$}",
        b.whisker_low, b.whisker_high, b.q1, b.median, b.q3, b.iqr
    );
    if b.outliers.is_empty() {
        let _ = writeln!(out, "  Outliers: none");
    } else {
        let outliers: Vec<String> = b.outliers.iter().map(|o| format!("{o:.p$}")).collect();
        let _ = writeln!(out, "  Outliers: {}", outliers.join(", "));
    }
    out
}

pub fn render_json(analysis: &Analysis) -> serde_json::Result<String> {
    serde_json::to_string_pretty(analysis)
}

/// Listing for the `columns` command; an empty table gets a warning line.
pub fn render_columns(columns: &[String]) -> String {
    if columns.is_empty() {
        return "No numeric columns found.\n".to_string();
    }
    let mut out = String::new();
    for name in columns {
        let _ = writeln!(out, "{name}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{prepare_manual, Settings};

    #[test]
    fn text_report_lists_all_sections() {
        let analysis = prepare_manual("1, 2, 3, 4, 100", &Settings::default()).unwrap();
        let text = render_text(&analysis, 2);
        assert!(text.starts_with("Manual Input:\n"));
        assert!(text.contains("Mode: none (no unique mode)"));
        assert!(text.contains("Histogram ("));
        assert!(text.contains("Outliers: 100.00"));
    }

    #[test]
    fn json_report_tags_mode() {
        let analysis = prepare_manual("1, 1, 0", &Settings::default()).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&render_json(&analysis).unwrap()).unwrap();
        assert_eq!(json["summary"]["mode"]["kind"], "value");
        assert_eq!(json["summary"]["mode"]["value"], 1.0);
        assert_eq!(json["values"], serde_json::json!([1.0, 1.0, 0.0]));

        let analysis = prepare_manual("0, 1", &Settings::default()).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&render_json(&analysis).unwrap()).unwrap();
        assert_eq!(json["summary"]["mode"]["kind"], "no_unique_mode");
    }

    #[test]
    fn column_listing() {
        assert_eq!(render_columns(&[]), "No numeric columns found.\n");
        assert_eq!(render_columns(&["score".into(), "id".into()]), "score\nid\n");
    }
}
