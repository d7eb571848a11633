//! Doctor command - verify configuration and data.

use crate::cli::Output;
use crate::config::Settings;
use crate::dataset::Dataset;
use console::style;

/// Check result for a single item.
#[derive(Debug)]
struct CheckResult {
    name: String,
    status: CheckStatus,
    message: String,
    hint: Option<String>,
}

#[derive(Debug, PartialEq)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Folio Doctor");
    println!();

    let mut checks = Vec::new();

    // Config file.
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        checks.push(CheckResult::ok(
            "config",
            &format!("found at {}", config_path.display()),
        ));
    } else {
        checks.push(CheckResult::warning(
            "config",
            "no config file (using defaults)",
            "Run 'folio init' to create one",
        ));
    }

    // Dataset.
    let dataset_path = settings.dataset_path();
    if dataset_path.exists() {
        let dataset = Dataset::load(&dataset_path);
        if dataset.is_empty() {
            checks.push(CheckResult::error(
                "dataset",
                &format!("{} exists but no records loaded", dataset_path.display()),
                "Check the file is valid JSON with a top-level \"stocks\" object",
            ));
        } else {
            checks.push(CheckResult::ok(
                "dataset",
                &format!("{} record(s) at {}", dataset.len(), dataset_path.display()),
            ));
        }
    } else {
        checks.push(CheckResult::error(
            "dataset",
            &format!("not found at {}", dataset_path.display()),
            "Run 'folio init' to create a starter dataset",
        ));
    }

    // API key (agent only).
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => {
            checks.push(CheckResult::ok("api key", "OPENAI_API_KEY is set"));
        }
        _ => {
            checks.push(CheckResult::warning(
                "api key",
                "OPENAI_API_KEY not set",
                "Only 'folio agent' needs it: export OPENAI_API_KEY='sk-...'",
            ));
        }
    }

    for check in &checks {
        check.print();
    }
    println!();

    let errors = checks
        .iter()
        .filter(|c| c.status == CheckStatus::Error)
        .count();
    if errors > 0 {
        Output::error(&format!("{} check(s) failed.", errors));
    } else {
        Output::success("All checks passed.");
    }

    Ok(())
}
