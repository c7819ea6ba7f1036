use anyhow::Context;
use clap::Parser;
use ecoscan::{cli, config, error, logging, scan, scanner, transport};
use cli::{Cli, Commands};
use config::Config;
use ecoscan_common::{ClassificationClient, Controller, ReferenceData, GENERIC_TIP};
use scan::{EntryStatus, ScanReport};
use transport::ReqwestTransport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load().context("failed to load config")?;

    match cli.command {
        Commands::Scan { path, weight, recursive, json, output, interactive } => {
            let reference = reference_data(&cli.prices, &cli.tips, &config)?;
            let api_url = config.resolve_api_url(cli.api_url.as_deref())?;
            let client = ClassificationClient::new(ReqwestTransport::new(config.timeout_seconds)?, api_url.clone());

            let images = scanner::collect_targets(&path, recursive)?;
            tracing::info!(count = images.len(), %api_url, "scanning");
            if !json {
                println!("🔍 ecoscan - {} image(s) via {}\n", images.len(), api_url);
            }

            let mut controller = Controller::new();
            controller.set_weight(&weight);
            let entries = scan::scan_all(&mut controller, &client, &reference, &images, !json).await?;

            let report = ScanReport::new(&api_url, controller.weight().kilograms(), entries);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for entry in &report.entries {
                    scan::print_entry(entry);
                }
                println!(
                    "\n✅ classified: {}  failed: {}  skipped: {}",
                    report.count(EntryStatus::Classified),
                    report.count(EntryStatus::Failed),
                    report.count(EntryStatus::Rejected),
                );
            }

            if let Some(output) = output {
                std::fs::write(&output, serde_json::to_string_pretty(&report)?)
                    .with_context(|| format!("failed to write {}", output.display()))?;
                if !json {
                    println!("✔ report saved: {}", output.display());
                }
            }

            if interactive {
                if images.len() == 1 {
                    scan::interactive_weights(&mut controller, &reference)?;
                } else {
                    println!("--interactive is only available when scanning a single image");
                }
            }
        }

        Commands::Materials => {
            let reference = reference_data(&cli.prices, &cli.tips, &config)?;
            println!("{:<14} {:>12}  tip", "material", "Birr/kg");
            for (label, price) in reference.prices.iter() {
                println!("{:<14} {:>12.2}  {}", label, price, reference.tip(label));
            }
            println!("{:<14} {:>12.2}  {}", "(other)", 0.0, GENERIC_TIP);
        }

        Commands::Classes => {
            let api_url = config.resolve_api_url(cli.api_url.as_deref())?;
            let client = ClassificationClient::new(ReqwestTransport::new(config.timeout_seconds)?, api_url);
            let classes = client.fetch_classes().await.map_err(error::EcoScanError::from)?;
            let reference = reference_data(&cli.prices, &cli.tips, &config)?;

            println!("{} classes:", classes.count);
            for class in &classes.classes {
                let priced = if reference.prices.lookup(class).is_some() { "" } else { "  (no price)" };
                println!("  - {}{}", class, priced);
            }
        }

        Commands::Ping => {
            let api_url = config.resolve_api_url(cli.api_url.as_deref())?;
            let client = ClassificationClient::new(ReqwestTransport::new(config.timeout_seconds)?, api_url.clone());
            let status = client.health().await.map_err(error::EcoScanError::from)?;
            println!("✔ {} [{}] {}", api_url, status.status, status.message);
        }

        Commands::Config { set_api_url, set_timeout, set_prices, set_tips, show } => {
            let mut config = config;
            let changed = set_api_url.is_some() || set_timeout.is_some() || set_prices.is_some() || set_tips.is_some();

            if let Some(url) = set_api_url {
                config.set_api_url(url)?;
            }
            if let Some(seconds) = set_timeout {
                config.set_timeout(seconds)?;
            }
            if let Some(path) = set_prices {
                config.prices_path = Some(path);
            }
            if let Some(path) = set_tips {
                config.tips_path = Some(path);
            }
            if changed {
                config.save()?;
                println!("✔ settings saved: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("Settings:");
                println!("  API URL:  {}", config.resolve_api_url(cli.api_url.as_deref())?);
                println!("  Timeout:  {}s", config.timeout_seconds);
                println!("  Prices:   {}", describe_path(config.prices_path.as_deref()));
                println!("  Tips:     {}", describe_path(config.tips_path.as_deref()));
            }
        }
    }

    Ok(())
}

/// フラグ > 設定ファイル の順で参照データを読み込む
fn reference_data(
    prices: &Option<std::path::PathBuf>,
    tips: &Option<std::path::PathBuf>,
    config: &Config,
) -> error::Result<ReferenceData> {
    let prices = prices.as_deref().or(config.prices_path.as_deref());
    let tips = tips.as_deref().or(config.tips_path.as_deref());
    config::load_reference(prices, tips)
}

fn describe_path(path: Option<&std::path::Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in".to_string())
}
