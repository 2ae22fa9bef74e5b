use tracing::debug;

use crate::models::{CountInput, Gender, Medicine, Patient};

use super::RecordError;

/// Owner of every patient and medicine entered during a session. Both lists
/// are append-only and keep insertion order, which is also the order the list
/// views and the report use.
#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    patients: Vec<Patient>,
    medicines: Vec<Medicine>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a patient, echoing the stored record back so the
    /// caller does not have to look it up. On error the store is untouched.
    pub fn add_patient(
        &mut self,
        name: &str,
        age: impl CountInput,
        disease: &str,
        gender: Gender,
        doctor_name: &str,
    ) -> Result<Patient, RecordError> {
        let patient = Patient::new(name, age, disease, gender, doctor_name).inspect_err(|err| {
            debug!(record = name, error = %err, "patient rejected");
        })?;

        self.patients.push(patient.clone());
        debug!(record = name, total = self.patients.len(), "patient recorded");
        Ok(patient)
    }

    /// Validate and append a medicine, echoing the stored record back. On error
    /// the store is untouched.
    pub fn add_medicine(
        &mut self,
        name: &str,
        stock: impl CountInput,
        disease: &str,
    ) -> Result<Medicine, RecordError> {
        let medicine = Medicine::new(name, stock, disease).inspect_err(|err| {
            debug!(record = name, error = %err, "medicine rejected");
        })?;

        self.medicines.push(medicine.clone());
        debug!(record = name, total = self.medicines.len(), "medicine recorded");
        Ok(medicine)
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn medicines(&self) -> &[Medicine] {
        &self.medicines
    }

    /// Medicines whose disease matches the patient's, in insertion order. The
    /// join is recomputed on every call.
    pub fn prescriptions_for<'a>(
        &'a self,
        patient: &'a Patient,
    ) -> impl Iterator<Item = &'a Medicine> + 'a {
        self.medicines
            .iter()
            .filter(move |medicine| medicine.treats(patient.disease()))
    }

    /// True when neither list holds a record.
    pub fn is_empty(&self) -> bool {
        self.patients.is_empty() && self.medicines.is_empty()
    }
}
