//! Converge declared policies from a file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use dialoguer::Confirm;

use sanpol_engine::{Reconciler, RunOptions, RunRequest};
use sanpol_policy::PolicyRecord;

use crate::connect::ConnectArgs;
use crate::error::{CliError, CliResult};
use crate::output;

/// Converge declared policies (create missing, update drifted)
#[derive(Args, Debug)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,

    /// Path to the declared policy file (YAML or JSON)
    #[arg(short = 'f', long = "file")]
    pub file: PathBuf,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Execute the apply command
pub async fn execute(args: ApplyArgs) -> CliResult<()> {
    let desired = load_policies(&args.file)?;
    validate_policies(&desired)?;

    let gateway = args.connect.gateway()?;

    if !args.yes && !args.connect.check {
        if !atty::is(atty::Stream::Stdin) {
            return Err(CliError::Validation(
                "Cannot confirm in non-interactive mode. Use --yes to skip confirmation."
                    .to_string(),
            ));
        }

        let confirm = Confirm::new()
            .with_prompt(format!(
                "Apply {} declared polic{} to {}?",
                desired.len(),
                if desired.len() == 1 { "y" } else { "ies" },
                args.connect.switch
            ))
            .default(false)
            .interact()?;

        if !confirm {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let report = Reconciler::new(gateway)
        .run(
            RunRequest::Apply(desired),
            RunOptions {
                simulate: args.connect.check,
            },
        )
        .await?;

    output::render(&report, args.connect.json)?;

    if report.failed {
        return Err(CliError::RunFailed(
            report.message.unwrap_or_else(|| "run failed".to_string()),
        ));
    }
    Ok(())
}

/// Load and parse a declared policy file.
fn load_policies(path: &Path) -> CliResult<Vec<PolicyRecord>> {
    if !path.exists() {
        return Err(CliError::Validation(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("Failed to read file {}: {}", path.display(), e)))?;

    if path.extension().is_some_and(|ext| ext == "json") {
        return serde_json::from_str(&content)
            .map_err(|e| CliError::Validation(format!("Invalid JSON: {e}")));
    }

    serde_yaml::from_str(&content).map_err(|e| {
        let location = match e.location() {
            Some(loc) => format!(" at line {}, column {}", loc.line(), loc.column()),
            None => String::new(),
        };
        CliError::Validation(format!("Invalid YAML{location}: {e}"))
    })
}

/// Validate declared records before touching the switch.
fn validate_policies(policies: &[PolicyRecord]) -> CliResult<()> {
    if policies.is_empty() {
        return Err(CliError::Validation(
            "The policy file declares no policies.".to_string(),
        ));
    }
    for policy in policies {
        if policy.name.is_empty() {
            return Err(CliError::Validation(
                "A declared policy has an empty name.".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_yaml_policy_list() {
        let path = temp_file(
            "sanpol_apply_test.yaml",
            "- name: ipv4_hardening\n  ip_version: IPv4\n  is_policy_active: false\n",
        );

        let policies = load_policies(&path).unwrap();
        assert_eq!(policies.len(), 1);
        assert_eq!(policies[0].name, "ipv4_hardening");
        assert_eq!(policies[0].attributes.get_str("ip_version"), Some("IPv4"));

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_json_policy_list() {
        let path = temp_file(
            "sanpol_apply_test.json",
            r#"[{"name": "p1", "rule_list": [{"index": 1, "source_ip": "1.1.1.1"}]}]"#,
        );

        let policies = load_policies(&path).unwrap();
        assert_eq!(policies[0].name, "p1");

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file_is_a_validation_error() {
        let err = load_policies(Path::new("/nonexistent/policies.yaml")).unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
    }

    #[test]
    fn test_empty_declaration_rejected() {
        assert!(validate_policies(&[]).is_err());
        assert!(validate_policies(&[PolicyRecord::new("")]).is_err());
        assert!(validate_policies(&[PolicyRecord::new("ok")]).is_ok());
    }
}
