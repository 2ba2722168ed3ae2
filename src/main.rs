use anyhow::Context;
use clap::Parser;
use mvn_ivy_bridge::utils::{logger, validation::Validate};
use mvn_ivy_bridge::{Bridge, BridgeError, BridgeSettings, CliConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.log_level);
    tracing::debug!("CLI config: {:?}", config);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("❌ {:#}", e);

            let code = match e.downcast_ref::<BridgeError>() {
                Some(bridge_error) => {
                    eprintln!("💡 {}", bridge_error.recovery_suggestion());
                    bridge_error.exit_code()
                }
                None => 1,
            };
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(config: &CliConfig) -> anyhow::Result<()> {
    // Usage problems are reported before any resolution work starts.
    config.validate()?;

    let settings = match &config.config {
        Some(path) => BridgeSettings::from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => BridgeSettings::default(),
    };
    settings.validate()?;

    let request = config.to_request(&settings)?;
    let bridge = Bridge::new(settings.command_resolver(), settings.placer());
    let coordinate = format!("{}:{}", request.group, request.artifact);

    if config.dry_run {
        let placement = bridge
            .plan(&request)
            .with_context(|| format!("planning {coordinate}"))?;
        let entry = bridge.placer().preview(&placement)?;
        let xml = mvn_ivy_bridge::core::ivy::emit_descriptor(
            &placement.organisation,
            &placement.module,
            &placement.revision,
            &placement.status,
            &placement.metadata,
        )?;

        println!("🔍 Dry run, nothing written");
        println!("  Directory:  {}", entry.artifact_dir.display());
        println!("  Descriptor: {}", entry.descriptor_path.display());
        println!(
            "  Link:       {} -> {}",
            entry.link_path.display(),
            placement.binary_file.display()
        );
        println!();
        print!("{xml}");
        return Ok(());
    }

    let entry = bridge
        .run(&request)
        .with_context(|| format!("publishing {coordinate}"))?;

    println!("✅ Published {}", entry.artifact_dir.display());
    Ok(())
}
