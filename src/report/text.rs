use crate::report::{SummaryData, format_f64_6};

pub fn render_report_text(summary: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("Forecast Similarity Report\n");
    out.push_str("==========================\n\n");
    out.push_str(&format!(
        "Tool: {} {}\n",
        summary.tool_name, summary.tool_version
    ));
    out.push_str(&format!("Cases scored: {}\n\n", summary.n_cases));

    for (idx, case) in summary.cases.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", idx + 1, case.name));
        out.push_str(&format!("variable: {} [{}]\n", case.variable, case.unit));
        out.push_str(&format!("strategy: {}\n", case.strategy));
        out.push_str(&format!("horizon: {} day(s) ahead\n", case.horizon));
        out.push_str(&format!(
            "samples: {} raw / {} cleaned / {} scored\n",
            case.n_samples, case.n_clean, case.n_scored
        ));
        out.push_str(&format!(
            "measure: {} (0 is a perfect match)\n",
            format_f64_6(case.measure)
        ));
        out.push_str(&format!(
            "raw value: {} {}\n",
            format_f64_6(case.value),
            case.unit
        ));
        out.push_str(&format!(
            "|diff| median: {}, p90: {}, max: {}\n",
            format_f64_6(case.abs_diff_median),
            format_f64_6(case.abs_diff_p90),
            format_f64_6(case.abs_diff_max)
        ));
        out.push_str(&format!(
            "over threshold: {}\n\n",
            format_f64_6(case.over_threshold)
        ));
    }

    out
}
