use anyhow::Context;
use clap::Parser;
use mission_registry::utils::{logger, validation::Validate};
use mission_registry::{
    seed_registry, CliConfig, DumpTarget, EntityKind, InMemoryStore, MissionRegistry,
    RegistryConfig,
};

fn run(cli: &CliConfig, config: &RegistryConfig) -> mission_registry::Result<serde_json::Value> {
    config.validate()?;

    let registry = MissionRegistry::with_policy(InMemoryStore::new(), config.policy());
    seed_registry(&registry, &config.seed)?;

    match cli.dump {
        DumpTarget::All => registry.serialize_all(),
        DumpTarget::Planets => registry.serialize_kind(EntityKind::Planet),
        DumpTarget::Scientists => registry.serialize_kind(EntityKind::Scientist),
        DumpTarget::Missions => registry.serialize_kind(EntityKind::Mission),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match &cli.config {
        Some(path) => RegistryConfig::from_file(path)
            .with_context(|| format!("failed to load registry config from {}", path))?,
        None => RegistryConfig::default(),
    };

    // 初始化日誌
    if cli.json_logs || config.json_logs() {
        logger::init_json_logger(cli.verbose, &config.logging.level);
    } else {
        logger::init_cli_logger(cli.verbose, &config.logging.level);
    }

    tracing::info!("Starting mission-registry");
    tracing::debug!("CLI config: {:?}", cli);

    match run(&cli, &config) {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Registry run failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    }
}
