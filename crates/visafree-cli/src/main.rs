//! CLI entry point for visafree.
//!
//! This module stays thin: it handles argument parsing, I/O, logging setup, and exit codes.
//! The use cases live in the `visafree-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use std::io::Read;
use tracing_subscriber::EnvFilter;
use visafree_app::{
    format_countries, format_explanation, format_not_found, format_policy, format_policy_table,
    format_step, load_config, policies_json, run_check, run_countries, run_explain, run_policies,
    run_session, runtime_error_report, serialize_report, status_exit_code, CheckInput, ExplainOutput,
};
use visafree_settings::Overrides;
use visafree_types::EligibilityReport;

const LOG_ENV: &str = "VISAFREE_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "visafree",
    version,
    about = "Visa-free entry eligibility checks against a policy catalog"
)]
struct Cli {
    /// Path to visafree config TOML (a missing file means defaults).
    #[arg(long, default_value = "visafree.toml")]
    config: Utf8PathBuf,

    /// Override profile (site|lookup).
    #[arg(long)]
    profile: Option<String>,

    /// Override the initial policy selection (first|none|<policy id>).
    #[arg(long)]
    default_policy: Option<String>,

    /// Override country input mode (selector|free-text).
    #[arg(long)]
    input: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the policies in the catalog, or those a country is eligible under.
    Policies {
        /// Print the catalog as JSON.
        #[arg(long)]
        json: bool,

        /// Only the policies listing this country (exact, case-sensitive).
        #[arg(long)]
        country: Option<String>,
    },

    /// List selectable countries, for every policy or for one.
    Countries {
        /// Only the countries eligible under this policy id.
        #[arg(long)]
        policy: Option<String>,
    },

    /// Assess one policy/country pair.
    Check {
        /// Policy id to select (defaults to the configured initial selection).
        #[arg(long)]
        policy: Option<String>,

        /// Country of citizenship, matched exactly.
        #[arg(long)]
        country: Option<String>,

        /// Where to write the JSON report.
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,

        /// Print the JSON report to stdout instead of a summary.
        #[arg(long)]
        json: bool,
    },

    /// Explain an advisory code or a policy id.
    Explain {
        /// The advisory code (e.g. "near_match") or policy id (e.g. "1") to explain.
        identifier: String,
    },

    /// Replay selection events from a script (stdin when no path is given).
    Session {
        /// Path to the event script.
        #[arg(long)]
        script: Option<Utf8PathBuf>,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("visafree error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match cli.cmd {
        Commands::Policies { json, ref country } => cmd_policies(cli, json, country.as_deref()),
        Commands::Countries { ref policy } => cmd_countries(cli, policy.as_deref()),
        Commands::Check {
            ref policy,
            ref country,
            ref report_out,
            json,
        } => cmd_check(
            cli,
            policy.clone(),
            country.clone(),
            report_out.as_deref(),
            json,
        ),
        Commands::Explain { ref identifier } => cmd_explain(cli, identifier),
        Commands::Session { ref script } => cmd_session(cli, script.as_deref()),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn overrides(cli: &Cli) -> Overrides {
    Overrides {
        profile: cli.profile.clone(),
        default_policy: cli.default_policy.clone(),
        input: cli.input.clone(),
    }
}

/// Read the config file; a missing file yields empty text so defaults apply.
fn read_config_text(path: &Utf8Path) -> anyhow::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path, "no config file; using defaults");
            Ok(String::new())
        }
        Err(err) => Err(err).with_context(|| format!("read config: {}", path)),
    }
}

fn cmd_policies(cli: &Cli, json: bool, country: Option<&str>) -> anyhow::Result<()> {
    let cfg_text = read_config_text(&cli.config)?;
    let resolved = load_config(&cfg_text, overrides(cli))?;
    let policies = run_policies(&resolved.catalog, country);
    if json {
        print!("{}", policies_json(&policies)?);
    } else {
        print!("{}", format_policy_table(&policies));
    }
    Ok(())
}

fn cmd_countries(cli: &Cli, policy: Option<&str>) -> anyhow::Result<()> {
    let cfg_text = read_config_text(&cli.config)?;
    let resolved = load_config(&cfg_text, overrides(cli))?;
    let countries = run_countries(&resolved.catalog, policy)?;
    print!("{}", format_countries(&countries));
    Ok(())
}

fn cmd_check(
    cli: &Cli,
    policy: Option<String>,
    country: Option<String>,
    report_out: Option<&Utf8Path>,
    json: bool,
) -> anyhow::Result<()> {
    let mut resolved_options = None;
    let result = (|| -> anyhow::Result<i32> {
        let cfg_text = read_config_text(&cli.config)?;
        let resolved = load_config(&cfg_text, overrides(cli))?;
        resolved_options = Some(resolved.options.clone());

        let output = run_check(CheckInput {
            resolved,
            policy,
            country,
        })?;

        if let Some(path) = report_out {
            write_report_file(path, &output.report).context("write report json")?;
        }
        if json {
            let data = serialize_report(&output.report)?;
            print!("{}", String::from_utf8_lossy(&data));
        } else {
            print!("{}", format_summary(&output.report));
        }

        Ok(status_exit_code(output.report.status))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            if let Some(path) = report_out {
                let report = runtime_error_report(&format!("{err:#}"), resolved_options.as_ref());
                let _ = write_report_file(path, &report);
            }
            Err(err)
        }
    }
}

fn format_summary(report: &EligibilityReport) -> String {
    let mut out = String::new();
    match &report.policy {
        Some(p) => out.push_str(&format!("policy:  {} ({})\n", p.id, p.name)),
        None => out.push_str("policy:  -\n"),
    }
    match &report.country {
        Some(c) => out.push_str(&format!("country: {:?}\n", c)),
        None => out.push_str("country: -\n"),
    }
    out.push_str(&format!("status:  {}\n", report.status.as_str()));
    for a in &report.advisories {
        out.push_str(&format!("  [{}] {}\n", a.code, a.message));
    }
    out
}

fn write_report_file(path: &Utf8Path, report: &EligibilityReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn cmd_explain(cli: &Cli, identifier: &str) -> anyhow::Result<()> {
    let cfg_text = read_config_text(&cli.config)?;
    let resolved = load_config(&cfg_text, overrides(cli))?;

    match run_explain(identifier, &resolved.catalog) {
        ExplainOutput::Code(exp) => {
            print!("{}", format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::Policy { summary, countries } => {
            print!("{}", format_policy(&summary, &countries));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_codes,
            available_policy_ids,
        } => {
            eprint!(
                "{}",
                format_not_found(&identifier, available_codes, &available_policy_ids)
            );
            std::process::exit(1);
        }
    }
}

fn cmd_session(cli: &Cli, script: Option<&Utf8Path>) -> anyhow::Result<()> {
    let cfg_text = read_config_text(&cli.config)?;
    let resolved = load_config(&cfg_text, overrides(cli))?;

    let text = match script {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read script: {}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read script from stdin")?;
            buf
        }
    };

    let steps = run_session(&resolved, &text)?;
    for step in &steps {
        println!("{}", format_step(step));
    }
    tracing::info!(events = steps.len().saturating_sub(1), "session replayed");
    Ok(())
}
