use clap::Parser;
use group_spinner::adapters::ai::balance::{request_balance, DEFAULT_BALANCE_CRITERIA};
use group_spinner::adapters::ai::icebreakers::generate_icebreakers;
use group_spinner::adapters::ai::team_names::{generate_team_names, TeamNameRequest};
use group_spinner::adapters::storage::save_roster;
use group_spinner::core::shuffle;
use group_spinner::domain::ports::ListStore;
use group_spinner::utils::error::ErrorSeverity;
use group_spinner::utils::{logger, validation::Validate};
use group_spinner::{
    CachedTextService, CliConfig, FileListStore, GroupSpinner, SpinnerConfig,
    SpinnerError,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting group-spinner");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ group-spinner failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: CliConfig) -> group_spinner::Result<()> {
    cli.validate()?;

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            SpinnerConfig::from_file(path)?
        }
        None => SpinnerConfig::default(),
    };
    config.apply_cli(&cli);
    config.validate()?;

    let store = FileListStore::new(&config.storage.lists_path);

    if cli.list_saved {
        let lists = store.load_all()?;
        if lists.is_empty() {
            println!("No saved lists in {}", store.path().display());
        }
        for list in lists {
            println!(
                "{}  {}  ({} names, saved {})",
                list.id,
                list.name,
                list.names.len(),
                list.created_at.format("%Y-%m-%d %H:%M")
            );
        }
        return Ok(());
    }

    if let Some(id) = &cli.delete_list {
        if !store.delete(id)? {
            return Err(SpinnerError::ListNotFoundError { id: id.clone() });
        }
        println!("🗑️  Deleted saved list {}", id);
        return Ok(());
    }

    let mut names = Vec::new();
    if let Some(id) = &cli.load_list {
        let list = store
            .get(id)?
            .ok_or_else(|| SpinnerError::ListNotFoundError { id: id.clone() })?;
        tracing::info!("Loaded list \"{}\" with {} names", list.name, list.names.len());
        names.extend(list.names);
    }
    names.extend(cli.read_names()?);

    if names.is_empty() {
        return Err(SpinnerError::NoParticipantsError);
    }

    if let Some(list_name) = &cli.save_list {
        let list = save_roster(&store, list_name, names.clone())?;
        println!("💾 Saved \"{}\" as list {}", list.name, list.id);
    }

    let rng = match cli.seed {
        Some(seed) => shuffle::seeded(seed),
        None => shuffle::from_entropy(),
    };
    let mut spinner = GroupSpinner::new(config.spin_settings(), rng);

    let service = if cli.team_names || cli.icebreakers || cli.balance {
        Some(CachedTextService::new(
            config.build_text_service()?,
            config.cache_ttl(),
        ))
    } else {
        None
    };

    if let (Some(service), true) = (&service, cli.team_names) {
        let mut request = TeamNameRequest::new(config.split.expected_group_count(names.len()));
        request.theme = config.ai.theme.clone();
        request.context = config.ai.context.clone();
        match generate_team_names(service, &request).await {
            Ok(team_names) => spinner.settings_mut().namer.set_custom_names(team_names),
            Err(e) => tracing::warn!("AI team names unavailable, keeping default names: {}", e),
        }
    }

    let outcome = spinner.spin(&names)?;
    let mut groups = outcome.groups;

    if let (Some(service), true) = (&service, cli.balance) {
        let balanced = request_balance(service, &names, &groups, DEFAULT_BALANCE_CRITERIA)
            .await
            .and_then(|suggestion| spinner.rebalance(&names, suggestion));
        match balanced {
            Ok(balanced) => groups = balanced,
            Err(e) => tracing::warn!("Smart balance failed, keeping random groups: {}", e),
        }
    }

    println!("✅ Created {} groups from {} names\n", groups.len(), names.len());
    let rendered: Vec<String> = groups.iter().map(ToString::to_string).collect();
    println!("{}", rendered.join("\n\n"));

    if let (Some(service), true) = (&service, cli.icebreakers) {
        let icebreakers =
            generate_icebreakers(service, &groups, config.ai.context.as_deref()).await?;
        println!("\nIcebreakers:");
        for icebreaker in icebreakers {
            let group_name = groups
                .get(icebreaker.group_index)
                .map(|g| g.name.as_str())
                .unwrap_or("?");
            println!("  {}: {}", group_name, icebreaker.question);
        }
    }

    Ok(())
}
