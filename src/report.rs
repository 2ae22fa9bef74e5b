//! Plain-text report that joins each patient with the medicines stocked for
//! their disease.

use crate::store::RecordStore;

/// Heavy rule framing each patient header and closing the report.
pub const RULE: &str = "===============================================";
/// Light rule separating patient details from the medicine section.
pub const DIVIDER: &str = "-----------------------------------------------";
/// Fallback line for a patient with no matching medicine.
pub const NO_MEDICINES: &str = "No medicines available for this disease.";

/// Render the full report for the current store contents. Output depends only
/// on the store, so two calls without an intervening append are identical.
pub fn generate_report(store: &RecordStore) -> String {
    let mut report = String::new();

    for (index, patient) in store.patients().iter().enumerate() {
        push_line(&mut report, RULE);
        push_line(&mut report, &format!("Patient {} Details", index + 1));
        push_line(&mut report, RULE);
        push_line(&mut report, &format!("Name: {}", patient.name()));
        push_line(&mut report, &format!("Age: {}", patient.age()));
        push_line(&mut report, &format!("Disease: {}", patient.disease()));
        push_line(&mut report, &format!("Gender: {}", patient.gender()));
        push_line(&mut report, &format!("Doctor: {}", patient.doctor_name()));
        push_line(&mut report, DIVIDER);
        push_line(&mut report, "Medicines prescribed:");

        let mut found = false;
        for medicine in store.prescriptions_for(patient) {
            push_line(&mut report, &format!("- {medicine}"));
            found = true;
        }
        if !found {
            push_line(&mut report, NO_MEDICINES);
        }
        report.push('\n');
    }

    push_line(&mut report, RULE);
    report
}

fn push_line(report: &mut String, line: &str) {
    report.push_str(line);
    report.push('\n');
}
