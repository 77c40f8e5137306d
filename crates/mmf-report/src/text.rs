//! Plain-text report rendering.

use mmf_model::{IntegrationSummary, ModalityCatalog, display_name};

const RULE: &str = "============================================================";
const SUBRULE: &str = "----------------------------------------";

/// Integration method notes appended to the modality report.
pub const INTEGRATION_METHOD: [&str; 4] = [
    "All modalities normalized to [0, 1] range",
    "Missing values imputed with mean (numeric) or mode (categorical)",
    "Features aligned to same number of samples",
    "Concatenated horizontally (column-wise fusion)",
];

fn line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}

fn banner(out: &mut String, title: &str) {
    line(out, RULE);
    line(out, title);
    line(out, RULE);
    out.push('\n');
}

/// Renders `integration_summary.txt`.
pub fn render_summary_text(summary: &IntegrationSummary) -> String {
    let mut out = String::new();
    banner(&mut out, "MULTIMODAL INTEGRATION SUMMARY");

    let dtypes = summary
        .dtype_counts
        .iter()
        .map(|(dtype, count)| format!("{dtype}={count}"))
        .collect::<Vec<_>>()
        .join(", ");
    line(&mut out, &format!("Total Samples: {}", summary.total_samples));
    line(&mut out, &format!("Total Features: {}", summary.total_features));
    line(&mut out, &format!("Data Types: {dtypes}"));
    line(&mut out, &format!("Missing Values: {}", summary.missing_values));
    line(&mut out, &format!("Numeric Features: {}", summary.numeric_features));
    line(
        &mut out,
        &format!("Categorical Features: {}", summary.categorical_features),
    );
    out.push('\n');

    banner(&mut out, "FEATURE BREAKDOWN");
    for entry in &summary.modality_features {
        line(
            &mut out,
            &format!(
                "{} Features: {}",
                display_name(&entry.modality),
                entry.features
            ),
        );
    }
    out
}

/// Renders `modality_info.txt`.
pub fn render_modality_info(catalogs: &[ModalityCatalog]) -> String {
    let mut out = String::new();
    banner(&mut out, "MODALITY INFORMATION");

    for catalog in catalogs {
        line(
            &mut out,
            &format!("{} FEATURES:", catalog.modality.to_uppercase()),
        );
        line(&mut out, SUBRULE);
        line(&mut out, &format!("Total Features: {}", catalog.columns.len()));
        line(&mut out, &format!("Features: {}", catalog.columns.join(", ")));
        out.push('\n');
    }

    line(&mut out, "INTEGRATION METHOD:");
    line(&mut out, SUBRULE);
    for note in INTEGRATION_METHOD {
        line(&mut out, &format!("- {note}"));
    }
    out
}
