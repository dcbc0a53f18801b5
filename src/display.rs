//! Terminal rendering for diagnoses, symptom lists and evaluation reports

use colored::*;

use crate::classifier::EvaluationReport;
use crate::pipeline::Diagnosis;
use crate::types::DrugRecord;

const NOT_AVAILABLE: &str = "N/A";

/// `dry_cough` → `Dry Cough`
pub fn title_case(name: &str) -> String {
    name.replace('_', " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Numbered, title-cased symptom list
pub fn render_symptoms(feature_names: &[String]) -> String {
    let mut out = format!("{}\n", "Known symptoms".bold().cyan());
    for (i, name) in feature_names.iter().enumerate() {
        out.push_str(&format!(
            "  {:>3}. {} {}\n",
            i + 1,
            title_case(name),
            format!("({})", name).dimmed()
        ));
    }
    out
}

/// Full diagnosis, optionally expanding one drug
pub fn render_diagnosis(diagnosis: &Diagnosis, selected_drug: Option<&str>, show_details: bool) -> String {
    let prediction = &diagnosis.prediction;
    let mut out = format!(
        "\n{} {}\n",
        "Predicted Condition:".bold(),
        prediction.label.as_str().red().bold()
    );
    if show_details {
        for p in &prediction.probabilities {
            out.push_str(&format!("  {:<24} {:>5.1}%\n", p.label.as_str(), p.probability * 100.0));
        }
    }

    out.push_str(&format!("\n{}\n", "Suggested Precautions".bold().cyan()));
    if diagnosis.precautions.is_empty() {
        out.push_str(&format!(
            "  {}\n",
            "No specific precautions available for this condition.".yellow()
        ));
    } else {
        for precaution in &diagnosis.precautions {
            out.push_str(&format!("  {} {}\n", "✓".green(), precaution));
        }
    }

    out.push_str(&format!("\n{}\n", "Drug Recommendations".bold().cyan()));
    if diagnosis.drugs.is_empty() {
        out.push_str(&format!("  {}\n", "No drug information found for this condition.".yellow()));
        return out;
    }

    for name in diagnosis.drugs.names() {
        out.push_str(&format!("  - {}\n", name));
    }

    match selected_drug {
        Some(name) => match diagnosis.drugs.detail(name) {
            Some(drug) => out.push_str(&render_drug(drug)),
            None => out.push_str(&format!(
                "\n  {}\n",
                format!("'{}' is not among the matching drugs.", name).yellow()
            )),
        },
        None => out.push_str(&format!("\n  {}\n", "Use --drug <NAME> to see an overview.".dimmed())),
    }

    out
}

/// One drug's overview and extra attributes
pub fn render_drug(drug: &DrugRecord) -> String {
    let mut out = format!(
        "\n  {}\n    {} {}\n    {} {}\n    {} {}\n",
        drug.drug_name.green().bold(),
        "Condition:".bold(),
        drug.medical_condition,
        "Type:".bold(),
        drug.drug_type.as_deref().unwrap_or(NOT_AVAILABLE),
        "Common Side Effect:".bold(),
        drug.common_side_effect.as_deref().unwrap_or(NOT_AVAILABLE)
    );

    if !drug.extra.is_empty() {
        out.push_str(&format!("    {}\n", "More details".dimmed()));
        for attr in &drug.extra {
            out.push_str(&format!("    {}: {}\n", title_case(&attr.name).bold(), attr.value));
        }
    }
    out
}

/// Held-out accuracy with per-label breakdown
pub fn render_evaluation(report: &EvaluationReport) -> String {
    let mut out = format!(
        "{}\n─────────────────────────────────────\n",
        "Held-out evaluation".bold().cyan()
    );

    let Some(accuracy) = report.accuracy() else {
        out.push_str(&format!("{}\n", "No rows were held out.".yellow()));
        return out;
    };
    out.push_str(&format!(
        "Accuracy:   {:.1}% ({}/{})\n",
        accuracy * 100.0,
        report.correct,
        report.holdout_size
    ));

    for label in &report.per_label {
        out.push_str(&format!(
            "  {:<24} {:>5.1}% ({}/{})\n",
            label.label.as_str(),
            label.accuracy() * 100.0,
            label.correct,
            label.total
        ));
    }
    out
}

pub fn show_error(error: &str) {
    eprintln!("{} {}", "Error:".red().bold(), error.red());
}

pub fn show_warning(warning: &str) {
    println!("{} {}", "Warning:".yellow().bold(), warning.yellow());
}
