//! Shared fixtures: small on-disk versions of the three dataset tables

#![allow(dead_code)]

use medichain::dataset::DatasetPaths;
use std::fs;
use tempfile::TempDir;

pub const FEATURES: [&str; 7] = [
    "COUGH",
    "FEVER",
    "SNEEZING",
    "ITCHY_EYES",
    "LOSS_OF_TASTE",
    "SHORTNESS_OF_BREATH",
    "HEADACHE",
];

/// (symptom bits, raw label, copies); every pattern maps to a single display label
pub const PATTERNS: [(&str, &str, usize); 7] = [
    ("1,1,0,0,0,0,0", "FLU", 5),
    ("1,1,0,0,0,0,0", "COLD", 1),
    ("1,0,1,0,0,0,0", "COLD", 6),
    ("0,0,1,1,0,0,0", "ALLERGY", 6),
    ("1,1,0,0,1,1,0", "COVID", 6),
    ("0,1,0,0,1,0,0", "COVID", 6),
    ("0,0,0,0,0,0,1", "MIGRAINE", 6),
];

pub const PRECAUTIONS_CSV: &str = "\
Disease,Precaution_1,Precaution_2,Precaution_3,Precaution_4
Allergies,avoid allergens,use air filter,,take antihistamine
Covid 19,wear mask,isolate,monitor oxygen,consult doctor
Colds & Flu,rest,drink fluids,,
Covid 19 (severe),seek emergency care,,,
";

pub const DRUGS_CSV: &str = "\
drug_name,medical_condition,drug_type,common_side_effect,rating,rx_otc
Cetirizine,Allergies,antihistamine,drowsiness,8.2,OTC
Loratadine,Seasonal Allergies,antihistamine,headache,7.9,OTC
Paxlovid,Covid 19 Treatment,antiviral,altered taste,7.1,Rx
Oseltamivir,Colds & Flu,antiviral,nausea,6.8,Rx
Cetirizine,allergies (chronic),antihistamine,dry mouth,8.0,OTC
";

/// Symptom table built from `PATTERNS`, grouped by pattern
pub fn symptoms_csv() -> String {
    let mut csv = format!("{},TYPE\n", FEATURES.join(","));
    for (bits, label, copies) in PATTERNS {
        for _ in 0..copies {
            csv.push_str(&format!("{},{}\n", bits, label));
        }
    }
    csv
}

/// Write the three fixture tables into a fresh directory
pub fn dataset_dir() -> (TempDir, DatasetPaths) {
    write_dataset(&symptoms_csv(), PRECAUTIONS_CSV, DRUGS_CSV)
}

/// Write custom tables into a fresh directory
pub fn write_dataset(symptoms: &str, precautions: &str, drugs: &str) -> (TempDir, DatasetPaths) {
    let dir = tempfile::tempdir().expect("temp dir");
    let paths = DatasetPaths::in_dir(dir.path());
    fs::write(&paths.symptoms, symptoms).expect("write symptoms");
    fs::write(&paths.precautions, precautions).expect("write precautions");
    fs::write(&paths.drugs, drugs).expect("write drugs");
    (dir, paths)
}

pub fn feature_names() -> Vec<String> {
    FEATURES.iter().map(|s| s.to_string()).collect()
}
