use clap::Parser;
use design_patterns::utils::{logger, validation::Validate};
use design_patterns::{Catalog, CliConfig, ConfigProvider, DemoSequence, DemoSettings};
use std::io::Write;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting design-patterns CLI");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.severity().exit_code());
    }

    let catalog = Catalog::standard();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if config.list {
        list_demos(&catalog, &mut out)?;
        return Ok(());
    }

    let selected = match catalog.select(config.patterns(), config.variants()) {
        Ok(selected) => selected,
        Err(e) => {
            tracing::error!("❌ {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code());
        }
    };

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let mut sequence = DemoSequence::new("cli", DemoSettings::from_provider(&config))
        .with_fail_fast(config.fail_fast())
        .with_monitoring(config.monitor);
    sequence.extend(selected);

    match sequence.execute(&mut out) {
        Ok(results) => {
            let summary = DemoSequence::get_execution_summary(&results);
            tracing::info!(
                "✅ Ran {} demos, {} failed, {} lines of narrative",
                summary["total_demos"],
                summary["failed_demos"],
                summary["total_lines"]
            );
            out.flush()?;

            if let Some(severity) = DemoSequence::worst_severity(&results) {
                tracing::warn!("Some demos failed (worst severity: {:?})", severity);
                let exit_code = severity.exit_code();
                if exit_code > 0 {
                    std::process::exit(exit_code);
                }
            }
        }
        Err(e) => {
            out.flush()?;
            tracing::error!(
                "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = e.severity().exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn list_demos(catalog: &Catalog, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "{:<26} {:<12} {:<13} TITLE", "PATTERN", "FAMILY", "VARIANT")?;
    for demo in catalog.iter() {
        writeln!(
            out,
            "{:<26} {:<12} {:<13} {}",
            demo.pattern().slug(),
            format!("{:?}", demo.pattern().family()),
            demo.variant().slug(),
            demo.title()
        )?;
    }
    Ok(())
}
