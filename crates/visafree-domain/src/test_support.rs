use crate::model::{Policy, PolicyCatalog};

pub fn policy(id: &str, duration_hours: u32, countries: &[&str]) -> Policy {
    Policy::new(
        id,
        format!("Policy {id}"),
        duration_hours,
        countries.iter().copied(),
    )
    .expect("valid test policy")
}

/// Two policies: "1" admits United States, "2" does not. Both admit Japan.
pub fn sample_catalog() -> PolicyCatalog {
    PolicyCatalog::new(vec![
        Policy::new(
            "1",
            "240-Hour Transit Visa-Free",
            240,
            ["United States", "United Kingdom", "Japan", "France", "Germany"],
        )
        .expect("valid policy"),
        Policy::new(
            "2",
            "30-Day Unilateral Visa-Free Entry",
            720,
            ["France", "Germany", "Japan", "Malaysia"],
        )
        .expect("valid policy"),
    ])
    .expect("valid catalog")
}
