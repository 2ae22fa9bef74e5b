use medicine_manager::report::{NO_MEDICINES, RULE};
use medicine_manager::{generate_report, Gender, Patient, RecordError, RecordStore};

/// Slice of the report belonging to the patient numbered `n`.
fn block_for(report: &str, n: usize) -> &str {
    let header = format!("Patient {n} Details\n");
    let start = report.find(&header).expect("patient block present");
    let rest = &report[start..];
    let next = format!("Patient {} Details\n", n + 1);
    let end = rest.find(&next).unwrap_or(rest.len());
    &rest[..end]
}

#[test]
fn alice_gets_matching_medicine() {
    let mut store = RecordStore::new();
    store
        .add_patient("Alice", 30, "Flu", Gender::Female, "Dr. Smith")
        .unwrap();
    store.add_medicine("Paracetamol", 10, "flu").unwrap();

    let report = generate_report(&store);
    let block = block_for(&report, 1);
    assert!(block.contains("Name: Alice\n"));
    assert!(block.contains("- Paracetamol | Quantity: 10\n"));
    assert!(!block.contains(NO_MEDICINES));
}

#[test]
fn bob_without_medicine_gets_fallback() {
    let mut store = RecordStore::new();
    store
        .add_patient("Bob", 40, "Cold", Gender::Male, "Dr. Lee")
        .unwrap();

    let report = generate_report(&store);
    let block = block_for(&report, 1);
    assert!(block.contains("Name: Bob\n"));
    assert!(block.contains(&format!("Medicines prescribed:\n{NO_MEDICINES}\n")));
}

#[test]
fn mixed_patients_each_get_their_own_medicines() {
    let mut store = RecordStore::new();
    store
        .add_patient("Alice", 30, "Flu", Gender::Female, "Dr. Smith")
        .unwrap();
    store
        .add_patient("Bob", 40, "Cold", Gender::Male, "Dr. Lee")
        .unwrap();
    store.add_medicine("Paracetamol", 10, "flu").unwrap();
    store.add_medicine("Tamiflu", 5, "FLU").unwrap();
    store.add_medicine("Lozenges", 0, "Sore Throat").unwrap();

    let report = generate_report(&store);
    let alice = block_for(&report, 1);
    let bob = block_for(&report, 2);

    let paracetamol = alice.find("- Paracetamol").unwrap();
    let tamiflu = alice.find("- Tamiflu").unwrap();
    assert!(paracetamol < tamiflu);
    assert!(!alice.contains("Lozenges"));
    assert!(bob.contains(NO_MEDICINES));
    assert!(report.ends_with(&format!("\n\n{RULE}\n")));
}

#[test]
fn empty_store_has_no_patient_blocks() {
    let report = generate_report(&RecordStore::new());
    assert_eq!(report, format!("{RULE}\n"));
    assert!(!report.contains("Details"));
}

#[test]
fn report_is_stable_until_the_store_changes() {
    let mut store = RecordStore::new();
    store
        .add_patient("Alice", 30, "Flu", Gender::Female, "Dr. Smith")
        .unwrap();
    let first = generate_report(&store);
    assert_eq!(first, generate_report(&store));

    // A rejected append must not change anything either.
    assert_eq!(
        store.add_medicine("Bad", "xyz", "Flu"),
        Err(RecordError::InvalidStock)
    );
    assert_eq!(first, generate_report(&store));

    store.add_medicine("Paracetamol", "7", "Flu").unwrap();
    assert_ne!(first, generate_report(&store));
}

#[test]
fn rejected_records_leave_lengths_unchanged() {
    let mut store = RecordStore::new();
    store
        .add_patient("Alice", 30, "Flu", Gender::Female, "Dr. Smith")
        .unwrap();

    for age in ["0", "-5", "abc", " 30"] {
        assert_eq!(
            store.add_patient("X", age, "Flu", Gender::Other, "Dr. X"),
            Err(RecordError::InvalidAge)
        );
    }
    assert_eq!(store.patients().len(), 1);

    assert_eq!(
        store.add_medicine("X", -1, "Flu"),
        Err(RecordError::InvalidStock)
    );
    assert!(store.medicines().is_empty());
    store.add_medicine("X", 0, "Flu").unwrap();
    assert_eq!(store.medicines().len(), 1);
}

#[test]
fn enumeration_preserves_insertion_order() {
    let mut store = RecordStore::new();
    let names = ["Zed", "Amy", "Kim", "Amy"];
    for (age, name) in (1..).zip(names) {
        store
            .add_patient(name, age, "Flu", Gender::Other, "Dr. X")
            .unwrap();
    }

    let listed: Vec<&str> = store.patients().iter().map(Patient::name).collect();
    assert_eq!(listed, names);
    let ages: Vec<u32> = store.patients().iter().map(Patient::age).collect();
    assert_eq!(ages, [1, 2, 3, 4]);
}

#[test]
fn gender_text_is_validated_at_the_boundary() {
    let gender: Gender = "Female".parse().unwrap();
    assert_eq!(gender.to_string(), "Female");
    assert!("Unknown".parse::<Gender>().is_err());
}
