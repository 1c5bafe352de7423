use anyhow::Context;
use clap::Parser;
use fibidy_discover::utils::error::ErrorSeverity;
use fibidy_discover::utils::{logger, validation::Validate};
use fibidy_discover::{CliArgs, DiscoverConfig, DiscoverQuery, HttpDiscoverService, ShowcaseTenant};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    logger::init_cli_logger(args.verbose, args.log_json);

    tracing::info!("Starting fibidy-discover");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    let config = match DiscoverConfig::load(args.config.as_deref()) {
        Ok(mut config) => {
            args.apply_to(&mut config);
            config
        }
        Err(e) => fail(&e),
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(&e);
    }
    tracing::debug!("Resolved config: {:?}", config);

    let service = if args.no_persist {
        HttpDiscoverService::in_memory(&config)
    } else {
        HttpDiscoverService::from_config(&config, &config.session_dir)
    };
    let service = match service {
        Ok(service) => service,
        Err(e) => fail(&e),
    };

    if args.clear_cache {
        service.clear_caches();
    }

    let query = DiscoverQuery {
        category: args.category.clone(),
        sort: args.sort_option(),
        search: args.search.clone(),
        use_cache: !args.no_cache,
    };

    let tenants = match service.discover(&query).await {
        Ok(tenants) => tenants,
        Err(e) => {
            tracing::error!(
                "❌ Discover failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            fail(&e);
        }
    };

    tracing::info!("✅ {} tenants", tenants.len());

    if args.json {
        let json = serde_json::to_string_pretty(&tenants).context("serialising tenant listing")?;
        println!("{}", json);
    } else {
        print_table(&tenants);
    }

    Ok(())
}

fn print_table(tenants: &[ShowcaseTenant]) {
    if tenants.is_empty() {
        println!("No stores found.");
        return;
    }

    for tenant in tenants {
        println!(
            "{:<32} {:<14} {:>6}  {}",
            tenant.name(),
            tenant.category().unwrap_or("-"),
            tenant.product_count(),
            tenant.url
        );
    }
}

fn fail(e: &fibidy_discover::DiscoverError) -> ! {
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
