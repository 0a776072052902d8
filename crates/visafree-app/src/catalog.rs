//! Catalog listing use cases: policies and the country vocabulary.

use anyhow::Context;
use visafree_domain::{Policy, PolicyCatalog};

/// Policies to list: the whole catalog, or only those under which `country` is eligible.
pub fn run_policies<'c>(catalog: &'c PolicyCatalog, country: Option<&str>) -> Vec<&'c Policy> {
    match country {
        None => catalog.list_policies().iter().collect(),
        Some(country) => {
            let found = catalog.policies_for(country);
            tracing::debug!(country, matches = found.len(), "reverse policy lookup");
            found
        }
    }
}

/// One line per policy: id, duration, name, country count. Empty when there is nothing to list.
pub fn format_policy_table(policies: &[&Policy]) -> String {
    if policies.is_empty() {
        return String::new();
    }
    let id_width = policies
        .iter()
        .map(|p| p.id().as_str().len())
        .max()
        .unwrap_or(0)
        .max("ID".len());

    let mut out = String::new();
    out.push_str(&format!(
        "{:<id_width$}  {:>6}  NAME (COUNTRIES)\n",
        "ID", "HOURS"
    ));
    for p in policies {
        out.push_str(&format!(
            "{:<id_width$}  {:>6}  {} ({})\n",
            p.id().as_str(),
            p.duration_hours(),
            p.name(),
            p.eligible_countries().len()
        ));
    }
    out
}

pub fn policies_json(policies: &[&Policy]) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(policies).context("serialize policies")?;
    json.push('\n');
    Ok(json)
}

/// Countries a selector would offer: every catalog country, or one policy's.
pub fn run_countries<'c>(
    catalog: &'c PolicyCatalog,
    policy: Option<&str>,
) -> anyhow::Result<Vec<&'c str>> {
    match policy {
        None => Ok(catalog.known_countries()),
        Some(id) => {
            let policy: &Policy = catalog
                .get(id)
                .with_context(|| format!("unknown policy id: {id}"))?;
            Ok(policy
                .eligible_countries()
                .iter()
                .map(String::as_str)
                .collect())
        }
    }
}

pub fn format_countries(countries: &[&str]) -> String {
    let mut out = String::new();
    for c in countries {
        out.push_str(c);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> PolicyCatalog {
        PolicyCatalog::new(vec![
            Policy::new("1", "240-Hour Transit Visa-Free", 240, ["Japan", "France"])
                .expect("policy"),
            Policy::new("10", "30-Day Unilateral Visa-Free Entry", 720, ["Malaysia"])
                .expect("policy"),
        ])
        .expect("catalog")
    }

    #[test]
    fn policy_table_lists_every_policy_in_order() {
        let catalog = catalog();
        insta::assert_snapshot!(format_policy_table(&run_policies(&catalog, None)), @r"
        ID   HOURS  NAME (COUNTRIES)
        1      240  240-Hour Transit Visa-Free (2)
        10     720  30-Day Unilateral Visa-Free Entry (1)
        ");
    }

    #[test]
    fn policies_json_is_an_array_of_policies() {
        let catalog = catalog();
        let json = policies_json(&run_policies(&catalog, None)).expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
        let arr = value.as_array().expect("array");
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0]["id"], "1");
        assert_eq!(arr[0]["duration_hours"], 240);
        assert_eq!(arr[0]["eligible_countries"][0], "France");
    }

    #[test]
    fn policies_for_country_is_an_exact_reverse_lookup() {
        let catalog = catalog();
        let ids = |country: &str| -> Vec<String> {
            run_policies(&catalog, Some(country))
                .iter()
                .map(|p| p.id().to_string())
                .collect()
        };
        assert_eq!(ids("Japan"), vec!["1"]);
        assert_eq!(ids("Malaysia"), vec!["10"]);
        assert!(ids("japan").is_empty());
        assert_eq!(format_policy_table(&run_policies(&catalog, Some("japan"))), "");
        assert_eq!(
            policies_json(&run_policies(&catalog, Some("japan"))).expect("json"),
            "[]\n"
        );
    }

    #[test]
    fn countries_for_all_and_one_policy() {
        let catalog = catalog();
        assert_eq!(
            run_countries(&catalog, None).expect("all"),
            vec!["France", "Japan", "Malaysia"]
        );
        assert_eq!(
            run_countries(&catalog, Some("10")).expect("one"),
            vec!["Malaysia"]
        );
        let err = run_countries(&catalog, Some("99")).expect_err("unknown");
        assert!(err.to_string().contains("unknown policy id: 99"));
    }

    #[test]
    fn countries_format_one_per_line() {
        assert_eq!(format_countries(&["France", "Japan"]), "France\nJapan\n");
    }
}
