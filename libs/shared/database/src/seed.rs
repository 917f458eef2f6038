//! Fixed sample data installed by the seed reset.

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPatient {
    pub name: &'static str,
    pub phone: &'static str,
    pub email: Option<&'static str>,
}

/// Sample roster, in insertion order.
pub const SEED_PATIENTS: [SeedPatient; 5] = [
    SeedPatient {
        name: "John Smith",
        phone: "+1-555-0101",
        email: Some("john.smith@example.com"),
    },
    SeedPatient {
        name: "Maria Garcia",
        phone: "+1-555-0102",
        email: Some("maria.garcia@example.com"),
    },
    SeedPatient {
        name: "Wei Chen",
        phone: "+1-555-0103",
        email: Some("wei.chen@example.com"),
    },
    SeedPatient {
        name: "Aisha Khan",
        phone: "+1-555-0104",
        email: None,
    },
    SeedPatient {
        name: "Liam O'Brien",
        phone: "+1-555-0105",
        email: Some("liam.obrien@example.com"),
    },
];

/// The two appointment times for the patient at `index` in the roster:
/// a morning visit `index` days out and an afternoon follow-up a week later.
pub fn seed_schedule(index: usize, now: DateTime<Utc>) -> [DateTime<Utc>; 2] {
    let offset = index as i64;
    [
        now + Duration::days(offset) + Duration::hours(9),
        now + Duration::days(offset + 7) + Duration::hours(14),
    ]
}
