use crate::cli::{CheckArgs, RunArgs};
use crate::config::PartialRunConfig;
use crate::error::{CliError, Result};
use deuteron::core::physics::sum_rules::SumRules;
use deuteron::workflows::distribution::SUM_RULE_TOLERANCE;
use tracing::{info, warn};

/// Loads and validates a configuration without computing any distribution.
///
/// Fails if any model has invalid parameters; sum-rule violations are only reported.
pub fn run(args: CheckArgs) -> Result<()> {
    let partial_config = PartialRunConfig::from_file(&args.config)?;
    let run_args = RunArgs {
        config: args.config.clone(),
        ..Default::default()
    };
    let config = partial_config.merge_with_cli(&run_args)?;

    let grid = &config.run.grid;
    println!(
        "Configuration '{}': {} model(s), {} {} points on [{}, {}] fm^-1.",
        args.config.display(),
        config.models.len(),
        grid.points,
        grid.spacing,
        grid.lower,
        grid.upper
    );

    let mut invalid = 0usize;
    for model in &config.models {
        if let Err(e) = model.validate() {
            warn!("Model '{}' is invalid: {}", model.name, e);
            println!("  ✗ {}: {}", model.name, e);
            invalid += 1;
            continue;
        }

        let rules = SumRules::compute(model);
        let residual = rules.s_state.relative_zeroth();
        let note = if rules.s_state_satisfied(SUM_RULE_TOLERANCE) {
            String::new()
        } else {
            format!(" (Σc residual {:.2e} exceeds {:.0e})", residual, SUM_RULE_TOLERANCE)
        };
        println!(
            "  ✓ {}: {} S-state / {} D-state term(s){}",
            model.name,
            model.c.len(),
            model.d.len(),
            note
        );
    }

    if invalid > 0 {
        return Err(CliError::Config(format!(
            "{} of {} model(s) have invalid parameters.",
            invalid,
            config.models.len()
        )));
    }
    info!("Configuration check passed.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn check(content: &str) -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models.toml");
        fs::write(&path, content).unwrap();
        run(CheckArgs { config: path })
    }

    #[test]
    fn valid_configuration_passes() {
        let result = check(
            r#"
[[models]]
name = "yukawa"
alpha = 0.23
m_0 = 0.8
parameters = { c = [1.0, -1.0] }
"#,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn sum_rule_violation_is_only_reported() {
        let result = check(
            r#"
[[models]]
name = "unbalanced"
alpha = 0.23
m_0 = 0.8
parameters = { c = [1.0, 0.5] }
"#,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn invalid_model_fails_the_check() {
        let result = check(
            r#"
[[models]]
name = "good"
alpha = 0.23
m_0 = 0.8
parameters = { c = [1.0, -1.0] }

[[models]]
name = "bad"
alpha = -0.1
m_0 = 0.8
parameters = { c = [1.0, -1.0] }
"#,
        );
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("1 of 2")));
    }
}
