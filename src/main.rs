use clap::Parser;
use yard_ledger::config::cli::Command;
use yard_ledger::core::dashboards::{InventoryOverview, MovementHistory, RentalSummary, SalesSummary};
use yard_ledger::utils::error::ErrorSeverity;
use yard_ledger::utils::{logger, validation::Validate};
use yard_ledger::{
    CliConfig, Container, ConfiguredStore, ContainerStatus, InventoryError, InventoryService,
    MovementRequest, TomlConfig,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let config = match TomlConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    logger::init_cli_logger(cli.verbose, config.log_format().unwrap_or_default());
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(command: Command, config: &TomlConfig) -> Result<(), InventoryError> {
    let store = ConfiguredStore::from_config(&config.store)?;
    let service = InventoryService::new(store, config.pricing);

    match command {
        Command::Overview => print_overview(&service.overview().await?),
        Command::Sales => print_sales(&service.sales().await?),
        Command::Rental => print_rental(&service.rental().await?),
        Command::Movements => print_history(&service.movement_history().await?),
        Command::Move(args) => {
            let mut request = MovementRequest::new(args.container, args.to)
                .responsible(args.responsible)
                .note(args.note);
            request.expected_origin = args.expect_from;

            let movement = service.record_movement(request).await?;
            println!(
                "✅ Movement {} recorded: {} {} -> {}",
                movement.movement_id, movement.container_id, movement.origin, movement.destination
            );
        }
        Command::AddContainer(args) => {
            let created = service.create_container(args.into()).await?;
            println!("✅ Container {} created at {}", created.id, created.current_location);
        }
    }

    Ok(())
}

fn print_overview(overview: &InventoryOverview) {
    if overview.total == 0 {
        println!("⚠️ No containers registered.");
        return;
    }

    println!("Total containers: {}", overview.total);
    for status in ContainerStatus::ALL {
        println!("  {:<12} {}", status.label(), overview.status_count(*status));
    }
    println!("Nationalized: {:.1}%", overview.nationalization_rate);

    println!("By type:");
    for (container_type, count) in &overview.by_type {
        println!("  {:<12} {}", container_type.label(), count);
    }
    println!("By location:");
    for (location, count) in &overview.by_location {
        println!("  {:<12} {}", location.label(), count);
    }
}

fn print_containers(containers: &[Container]) {
    for c in containers {
        println!(
            "  {:<10} {:<24} {:<10} {:<8} {}",
            c.id,
            c.name,
            c.container_type.label(),
            c.current_location.label(),
            c.length_feet
                .as_ref()
                .map(|length| format!("{}ft", length))
                .unwrap_or_else(|| "-".to_string())
        );
    }
}

fn print_sales(sales: &SalesSummary) {
    println!("Stock available for sale: {}", sales.sellable.len());
    println!("Nationalized: {:.1}%", sales.nationalization_rate);
    println!("Potential revenue: ${:.0} USD", sales.potential_revenue);
    print_containers(&sales.sellable);
}

fn print_rental(rental: &RentalSummary) {
    println!("Occupancy: {:.1}%", rental.occupancy_rate);
    println!("Rented containers: {}", rental.rented.len());
    println!("Estimated monthly income: ${:.0} USD", rental.estimated_monthly_income);
    print_containers(&rental.rented);
}

fn print_history(history: &MovementHistory) {
    if history.movements.is_empty() {
        println!("⚠️ No movements recorded.");
        return;
    }

    for m in &history.movements {
        println!(
            "  #{:<4} {} {:<10} {:<8} -> {:<8} {} {}",
            m.movement_id,
            m.timestamp.format("%Y-%m-%d %H:%M"),
            m.container_id,
            m.origin.label(),
            m.destination.label(),
            m.responsible,
            m.note
        );
    }
    println!("Per month:");
    for (month, count) in &history.per_month {
        println!("  {} {}", month, count);
    }
    println!("Current locations:");
    for (location, count) in &history.by_location {
        println!("  {:<12} {}", location.label(), count);
    }
}
