use clap::Parser;
use string_calc::utils::{logger, validation::Validate};
use string_calc::{Calculator, CliConfig, Result};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    match run(&cli).await {
        Ok(result) => println!("{}", result),
        Err(e) => {
            tracing::error!("❌ {} (exit code {})", e, e.exit_code());
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: &CliConfig) -> Result<i64> {
    let config = cli.load_config()?;
    config.validate()?;

    let calculator = Calculator::with_settings(config.settings());
    tracing::debug!("Upper bound: {}", calculator.settings().upper_bound);

    match cli.command.calculation() {
        Some((operation, args)) => {
            let input = args.read()?;
            calculator.evaluate(operation, &input)
        }
        None => {
            let provider = config.build_provider()?;
            tracing::info!("Fetching numbers from the configured provider");
            calculator.add_from(provider.as_ref()).await
        }
    }
}
