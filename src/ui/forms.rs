use ratatui::text::Line;

use crate::models::Gender;

use super::helpers::field_line;

/// Internal representation of the "add patient" form fields. Age stays raw
/// text so the store decides whether it is a valid number.
#[derive(Default, Clone)]
pub(crate) struct PatientForm {
    pub(crate) name: String,
    pub(crate) age: String,
    pub(crate) disease: String,
    pub(crate) gender: Gender,
    pub(crate) doctor: String,
    pub(crate) active: PatientField,
    pub(crate) error: Option<String>,
}

/// Fields available within the patient form, in display order.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub(crate) enum PatientField {
    #[default]
    Name,
    Age,
    Disease,
    Gender,
    Doctor,
}

impl PatientField {
    pub(crate) const ALL: [PatientField; 5] = [
        PatientField::Name,
        PatientField::Age,
        PatientField::Disease,
        PatientField::Gender,
        PatientField::Doctor,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            PatientField::Name => "Name",
            PatientField::Age => "Age",
            PatientField::Disease => "Disease",
            PatientField::Gender => "Gender",
            PatientField::Doctor => "Doctor Name",
        }
    }

    /// Row of the field inside the form popup.
    pub(crate) fn row(self) -> usize {
        Self::ALL.iter().position(|field| *field == self).unwrap_or(0)
    }
}

impl PatientForm {
    /// Move focus to the next field, wrapping at the end.
    pub(crate) fn next_field(&mut self) {
        self.active = PatientField::ALL[(self.active.row() + 1) % PatientField::ALL.len()];
    }

    /// Move focus to the previous field, wrapping at the start.
    pub(crate) fn previous_field(&mut self) {
        let len = PatientField::ALL.len();
        self.active = PatientField::ALL[(self.active.row() + len - 1) % len];
    }

    /// Append a character to the active text field. The gender field only
    /// changes through [`PatientForm::cycle_gender`].
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            PatientField::Name => self.name.push(ch),
            PatientField::Age => self.age.push(ch),
            PatientField::Disease => self.disease.push(ch),
            PatientField::Doctor => self.doctor.push(ch),
            PatientField::Gender => return false,
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            PatientField::Name => {
                self.name.pop();
            }
            PatientField::Age => {
                self.age.pop();
            }
            PatientField::Disease => {
                self.disease.pop();
            }
            PatientField::Doctor => {
                self.doctor.pop();
            }
            PatientField::Gender => {}
        }
    }

    /// Step the gender selection when the gender field has focus.
    pub(crate) fn cycle_gender(&mut self, forward: bool) -> bool {
        if self.active != PatientField::Gender {
            return false;
        }
        self.gender = if forward {
            self.gender.next()
        } else {
            self.gender.previous()
        };
        true
    }

    fn value(&self, field: PatientField) -> &str {
        match field {
            PatientField::Name => &self.name,
            PatientField::Age => &self.age,
            PatientField::Disease => &self.disease,
            PatientField::Gender => self.gender.as_str(),
            PatientField::Doctor => &self.doctor,
        }
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: PatientField) -> Line<'static> {
        let is_active = self.active == field;
        if field == PatientField::Gender {
            let display = format!("◀ {} ▶", self.gender);
            return field_line(field.label(), &display, "", is_active);
        }
        field_line(field.label(), self.value(field), "<empty>", is_active)
    }

    /// Return the character count for the requested field.
    pub(crate) fn value_len(&self, field: PatientField) -> usize {
        self.value(field).chars().count()
    }
}

/// Form state for medicine entry. Field order mirrors the stock sheet:
/// disease first, then the medicine and its quantity.
#[derive(Default, Clone)]
pub(crate) struct MedicineForm {
    pub(crate) disease: String,
    pub(crate) name: String,
    pub(crate) stock: String,
    pub(crate) active: MedicineField,
    pub(crate) error: Option<String>,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub(crate) enum MedicineField {
    #[default]
    Disease,
    Name,
    Stock,
}

impl MedicineField {
    pub(crate) const ALL: [MedicineField; 3] =
        [MedicineField::Disease, MedicineField::Name, MedicineField::Stock];

    pub(crate) fn label(self) -> &'static str {
        match self {
            MedicineField::Disease => "Disease",
            MedicineField::Name => "Medicine Name",
            MedicineField::Stock => "Quantity",
        }
    }

    pub(crate) fn row(self) -> usize {
        Self::ALL.iter().position(|field| *field == self).unwrap_or(0)
    }
}

impl MedicineForm {
    /// Cycle focus forward across the three fields.
    pub(crate) fn next_field(&mut self) {
        self.active = match self.active {
            MedicineField::Disease => MedicineField::Name,
            MedicineField::Name => MedicineField::Stock,
            MedicineField::Stock => MedicineField::Disease,
        };
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = match self.active {
            MedicineField::Disease => MedicineField::Stock,
            MedicineField::Name => MedicineField::Disease,
            MedicineField::Stock => MedicineField::Name,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            MedicineField::Disease => self.disease.push(ch),
            MedicineField::Name => self.name.push(ch),
            MedicineField::Stock => self.stock.push(ch),
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        let value = match self.active {
            MedicineField::Disease => &mut self.disease,
            MedicineField::Name => &mut self.name,
            MedicineField::Stock => &mut self.stock,
        };
        value.pop();
    }

    fn value(&self, field: MedicineField) -> &str {
        match field {
            MedicineField::Disease => &self.disease,
            MedicineField::Name => &self.name,
            MedicineField::Stock => &self.stock,
        }
    }

    pub(crate) fn build_line(&self, field: MedicineField) -> Line<'static> {
        field_line(
            field.label(),
            self.value(field),
            "<empty>",
            self.active == field,
        )
    }

    pub(crate) fn value_len(&self, field: MedicineField) -> usize {
        self.value(field).chars().count()
    }
}

/// Modal acknowledgement shown after a record is saved.
pub(crate) struct Notice {
    pub(crate) title: &'static str,
    pub(crate) message: String,
}

impl Notice {
    pub(crate) fn success<S: Into<String>>(message: S) -> Self {
        Self {
            title: "Success",
            message: message.into(),
        }
    }
}
