use clap::Parser;
use design_patterns::utils::{logger, validation::{validate_path, Validate}};
use design_patterns::{Catalog, CatalogConfig, ConfigProvider, Demo, DemoSequence, DemoSettings};

#[derive(Parser)]
#[command(name = "catalog-toml")]
#[command(about = "Runs the demos listed in a TOML catalogue file")]
struct Args {
    /// Path to the TOML catalogue file
    #[arg(short, long, default_value = "patterns.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the monitoring setting from the file
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the fail-fast setting from the file
    #[arg(long)]
    fail_fast: Option<bool>,

    /// Show what would run without running it
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Err(e) = validate_path("config", &args.config) {
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.severity().exit_code());
    }

    let mut config = match CatalogConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load catalogue file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML");
            std::process::exit(1);
        }
    };

    let level = if args.verbose { "debug" } else { config.log_level() };
    logger::init_with_level(level, false);

    tracing::info!("🚀 Loaded catalogue from: {}", args.config);

    if let Some(fail_fast) = args.fail_fast {
        config.run.fail_fast = fail_fast;
        tracing::info!("🔧 fail_fast overridden to: {}", fail_fast);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.severity().exit_code());
    }

    let catalog = Catalog::standard();
    let selected = match catalog.select(config.patterns(), config.variants()) {
        Ok(selected) => selected,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code());
        }
    };

    display_config_summary(&config, &args, selected.len());

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no demo will run");
        perform_dry_run(&selected);
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let mut sequence = DemoSequence::new(config.name(), DemoSettings::from_provider(&config))
        .with_fail_fast(config.fail_fast())
        .with_monitoring(monitor_enabled);
    sequence.extend(selected);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match sequence.execute(&mut out) {
        Ok(results) => {
            let summary = DemoSequence::get_execution_summary(&results);
            println!("📋 Execution Summary:");
            println!("  Demos run: {}", summary["total_demos"]);
            println!("  Failed: {}", summary["failed_demos"]);
            println!("  Narrative lines: {}", summary["total_lines"]);
            println!("  Total time: {} ms", summary["total_duration_ms"]);
            if let Some(failures) = summary["failures"].as_array() {
                for failure in failures {
                    println!(
                        "  ❌ {}: {}",
                        failure["demo"].as_str().unwrap_or_default(),
                        failure["error"].as_str().unwrap_or_default()
                    );
                }
            }

            if let Some(severity) = DemoSequence::worst_severity(&results) {
                let exit_code = severity.exit_code();
                if exit_code > 0 {
                    std::process::exit(exit_code);
                }
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Catalogue run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.severity().exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &CatalogConfig, args: &Args, selected: usize) {
    println!("📋 Catalogue Summary:");
    println!(
        "  Catalogue: {} v{}",
        config.name(),
        config.version().unwrap_or("0")
    );
    if let Some(description) = config.description() {
        println!("  Description: {}", description);
    }
    println!("  Demos selected: {}", selected);
    println!("  Work delay: {} ms", config.work_delay_ms());
    println!("  Proxy retries: {}", config.proxy_max_retries());
    match config.seed() {
        Some(seed) => println!("  Seed: {}", seed),
        None => println!("  Seed: random"),
    }
    println!("  Fail fast: {}", config.fail_fast());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(selected: &[&dyn Demo]) {
    println!("🔍 Dry Run Plan:");
    for (i, demo) in selected.iter().enumerate() {
        println!(
            "  {:>2}. {} ({}): {}",
            i + 1,
            demo.pattern(),
            demo.variant(),
            demo.title()
        );
    }
    println!();
    println!("✅ Dry run complete. Drop --dry-run to execute.");
}
