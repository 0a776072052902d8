//! Developer tasks (schema generation, contract checks, explain coverage).
//!
//! Kept apart from the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("Cannot determine current directory")?,
    };

    if manifest_dir.ends_with("xtask")
        && let Some(parent) = manifest_dir.parent()
    {
        return Ok(parent.to_path_buf());
    }
    Ok(manifest_dir)
}

fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

fn contracts_fixtures_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("contracts").join("fixtures"))
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(visafree_types::EligibilityReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(visafree_settings::VisafreeConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "visafree.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "visafree.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn compile_report_schema() -> anyhow::Result<jsonschema::Validator> {
    let value =
        serde_json::to_value(generate_report_schema()).context("Failed to convert schema")?;
    jsonschema::validator_for(&value).map_err(|e| anyhow::anyhow!("Failed to compile schema: {}", e))
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for entry in schema_specs() {
        let json = serialize_schema(&(entry.generate)())?;
        let path = dir.join(entry.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Check that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for entry in schema_specs() {
        let path = dir.join(entry.filename);
        if !path.exists() {
            missing.push(entry.filename);
            continue;
        }

        let expected = serialize_schema(&(entry.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(entry.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate contracts/fixtures/*.json against the report schema");
    eprintln!("  conform-full      Contract fixtures + visafree binary output validation");
    eprintln!("  explain-coverage  Validate all advisory codes have explanations");
}

/// Token pattern for advisory codes.
fn is_valid_token(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Report-level rules the JSON schema cannot express.
fn report_rule_errors(label: &str, value: &serde_json::Value) -> Vec<String> {
    let mut errors = Vec::new();
    let known = visafree_types::explain::all_codes();

    let codes: Vec<&str> = value
        .get("advisories")
        .and_then(|v| v.as_array())
        .map(|a| a.iter().filter_map(|x| x.get("code")?.as_str()).collect())
        .unwrap_or_default();

    for (i, code) in codes.iter().enumerate() {
        if !is_valid_token(code) {
            errors.push(format!("{label}: advisories[{i}].code '{code}' is not a valid token"));
        } else if !known.iter().any(|k| k == code) {
            errors.push(format!("{label}: advisories[{i}].code '{code}' is not a known code"));
        }
    }
    if codes.windows(2).any(|w| w[0] > w[1]) {
        errors.push(format!("{label}: advisories are not sorted by code"));
    }

    let status = value.get("status").and_then(|v| v.as_str());
    let has_policy = value.get("policy").is_some_and(|v| !v.is_null());
    let has_country = value.get("country").is_some_and(|v| !v.is_null());
    match status {
        Some("eligible") | Some("not_eligible") if !(has_policy && has_country) => {
            errors.push(format!(
                "{label}: status {:?} requires both policy and country",
                status.unwrap_or_default()
            ));
        }
        Some("not_eligible") if !codes.contains(&"country_not_listed") => {
            errors.push(format!("{label}: not_eligible without country_not_listed"));
        }
        _ => {}
    }

    errors
}

/// Errors from reading `text` the way report consumers do: typed DTO plus schema id check.
fn typed_report_errors(label: &str, text: &str) -> Vec<String> {
    match visafree_app::parse_report_json(text) {
        Ok(_) => Vec::new(),
        Err(err) => vec![format!("{label}: typed parse: {err:#}")],
    }
}

/// Validate contract fixtures.
///
/// This checks:
/// 1. Schema validation against the generated `visafree.report.v1` schema
/// 2. The fixture parses as a typed `visafree.report.v1` report
/// 3. Advisory codes are tokens from the explain registry, sorted
/// 4. Status agrees with the recorded selection
fn conform() -> anyhow::Result<()> {
    let compiled = compile_report_schema()?;
    println!("✓ visafree.report.v1 schema compiles");

    let fixtures_dir = contracts_fixtures_dir()?;
    if !fixtures_dir.exists() {
        bail!(
            "contracts/fixtures/ not found at {}\n\n\
            Create contract fixtures first.",
            fixtures_dir.display()
        );
    }

    let mut entries = fs::read_dir(&fixtures_dir)
        .context("Failed to read contracts/fixtures/")?
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|e| e.path());

    let mut fixture_count = 0;
    let mut errors = Vec::new();

    for entry in entries {
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }

        let filename = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let content =
            fs::read_to_string(&path).with_context(|| format!("Failed to read {}", filename))?;
        let value: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {} as JSON", filename))?;

        for err in compiled.iter_errors(&value) {
            errors.push(format!("{}: schema validation: {}", filename, err));
        }
        errors.extend(typed_report_errors(&filename, &content));
        errors.extend(report_rule_errors(&filename, &value));

        fixture_count += 1;
        println!("  ✓ {} checked", filename);
    }

    if fixture_count == 0 {
        bail!("No JSON fixtures found in {}", fixtures_dir.display());
    }

    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!(
        "\n✓ All {} contract fixtures pass conformance checks!",
        fixture_count
    );
    Ok(())
}

/// One binary run in `conform-full`.
struct BinaryCase {
    name: &'static str,
    args: &'static [&'static str],
    exit_code: i32,
    status: &'static str,
}

const BINARY_CASES: &[BinaryCase] = &[
    BinaryCase {
        name: "transit_listed",
        args: &["check", "--policy", "1", "--country", "United States"],
        exit_code: 0,
        status: "eligible",
    },
    BinaryCase {
        name: "transit_unlisted",
        args: &["check", "--policy", "1", "--country", "North Korea"],
        exit_code: 2,
        status: "not_eligible",
    },
    BinaryCase {
        name: "free_text_case_mismatch",
        args: &[
            "--input",
            "free-text",
            "check",
            "--policy",
            "1",
            "--country",
            "united states",
        ],
        exit_code: 2,
        status: "not_eligible",
    },
    BinaryCase {
        name: "no_policy",
        args: &["--default-policy", "none", "check", "--country", "Japan"],
        exit_code: 0,
        status: "undetermined",
    },
    BinaryCase {
        name: "unknown_policy",
        args: &["check", "--policy", "99", "--country", "Japan"],
        exit_code: 1,
        status: "undetermined",
    },
];

/// Full conformance: contract fixtures + visafree binary output validation.
///
/// Runs the built binary for a fixed set of selections and validates each report it writes.
fn conform_full() -> anyhow::Result<()> {
    conform()?;

    println!("\n--- Full conformance: visafree binary output ---\n");

    let compiled = compile_report_schema()?;

    let visafree_bin = project_root()?.join("target").join("debug").join("visafree");
    #[cfg(target_os = "windows")]
    let visafree_bin = visafree_bin.with_extension("exe");

    if !visafree_bin.exists() {
        bail!(
            "visafree binary not found at {}.\n\
            Run `cargo build -p visafree-cli` first.",
            visafree_bin.display()
        );
    }

    let mut errors = Vec::new();
    for case in BINARY_CASES {
        if let Err(err) = run_binary_case(&visafree_bin, case, &compiled, &mut errors) {
            errors.push(format!("case '{}': {:#}", case.name, err));
        }
    }

    if !errors.is_empty() {
        eprintln!("\nFull conformance errors:");
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!(
            "Full conformance validation failed with {} errors",
            errors.len()
        );
    }

    println!("\n✓ Full conformance checks passed!");
    Ok(())
}

fn run_binary_case(
    bin: &Path,
    case: &BinaryCase,
    compiled: &jsonschema::Validator,
    errors: &mut Vec<String>,
) -> anyhow::Result<()> {
    // Run in a scratch dir so no local visafree.toml is picked up.
    let temp_dir = tempfile::tempdir().context("Failed to create temp dir")?;
    let report_out = temp_dir.path().join("report.json");

    let output = std::process::Command::new(bin)
        .current_dir(temp_dir.path())
        .args(case.args)
        .arg("--report-out")
        .arg(&report_out)
        .output()
        .context("Failed to run visafree")?;

    let label = format!("case '{}'", case.name);
    if output.status.code() != Some(case.exit_code) {
        errors.push(format!(
            "{}: expected exit {} but got {:?}: {}",
            label,
            case.exit_code,
            output.status.code(),
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    let content = fs::read_to_string(&report_out).context("no report output generated")?;
    let value: serde_json::Value = serde_json::from_str(&content).context("parse report")?;

    for err in compiled.iter_errors(&value) {
        errors.push(format!("{}: schema validation: {}", label, err));
    }
    errors.extend(typed_report_errors(&label, &content));
    errors.extend(report_rule_errors(&label, &value));

    if value.get("status").and_then(|v| v.as_str()) != Some(case.status) {
        errors.push(format!("{}: expected status {}", label, case.status));
    } else {
        println!("  ✓ {} -> {}", case.name, case.status);
    }
    Ok(())
}

/// Validate that all advisory codes have explanations and every built-in policy can be explained.
fn explain_coverage() -> anyhow::Result<()> {
    let codes = visafree_types::explain::all_codes();
    let mut errors = Vec::new();

    for code in codes {
        match visafree_types::explain::lookup_explanation(code) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("Code '{}' has empty title", code));
                }
                if exp.description.is_empty() {
                    errors.push(format!("Code '{}' has empty description", code));
                }
                if exp.remediation.is_empty() {
                    errors.push(format!("Code '{}' has empty remediation", code));
                }
            }
            None => {
                errors.push(format!("Code '{}' has no explanation", code));
            }
        }
    }

    let catalog = visafree_catalog::builtin_catalog().context("build builtin catalog")?;
    for policy in catalog.list_policies() {
        if codes.iter().any(|c| *c == policy.id().as_str()) {
            errors.push(format!(
                "Policy id '{}' is shadowed by an advisory code in `explain`",
                policy.id()
            ));
        }
    }

    if errors.is_empty() {
        println!("✓ {} codes have explanations", codes.len());
        println!(
            "✓ {} built-in policies are explainable",
            catalog.list_policies().len()
        );
        println!("\n✓ All explain coverage checks passed!");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        )
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "conform-full" => conform_full(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for entry in schema_specs() {
                println!("{}", entry.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
