use clap::Parser;
use group_spinner::adapters::ai::{test_connection, AiProvider};
use group_spinner::utils::logger;
use group_spinner::SpinnerConfig;

#[derive(Parser)]
#[command(name = "test-ai-connection")]
#[command(about = "Check that the configured AI provider answers")]
struct Args {
    /// Provider to test (defaults to AI_PROVIDER or gemini)
    #[arg(long, value_enum)]
    provider: Option<AiProvider>,

    /// Optional TOML configuration file with an [ai] section
    #[arg(short, long)]
    config: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let mut config = match &args.config {
        Some(path) => match SpinnerConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                std::process::exit(1);
            }
        },
        None => SpinnerConfig::default(),
    };
    if args.provider.is_some() {
        config.ai.provider = args.provider;
    }

    let service = match config.build_text_service() {
        Ok(service) => service,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    println!("🔌 Testing {} ({})...", service.provider(), service.model());
    let report = test_connection(&service).await;
    if report.success {
        println!("✅ {}", report.message);
    } else {
        println!("❌ {}", report.message);
        std::process::exit(2);
    }
}
