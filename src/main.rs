use anyhow::Context;
use blackbelt_pricing::utils::{logger, validation::Validate};
use blackbelt_pricing::{handle, render, CliConfig, PricingConfig, ViewState};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse_args();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI arguments: {:?}", cli);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            PricingConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path.display()))?
        }
        None => PricingConfig::new(),
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let request = cli.request();
    let view = ViewState::new(request.page())
        .with_format(cli.format)
        .with_color(!cli.no_color);
    let today = chrono::Local::now().date_naive();

    match handle(&request, &config, today).and_then(|panel| render(&view, &panel)) {
        Ok(output) => {
            print!("{}", output);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
                view.page.heading(),
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.severity().exit_code());
        }
    }
}
