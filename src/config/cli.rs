use crate::domain::model::{Location, NewContainer};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "yard-ledger")]
#[command(about = "Inventory and movement ledger for container units")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "yard-ledger.toml")]
    pub config: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Totals, status counts and nationalization rate
    Overview,
    /// Sellable stock and potential revenue
    Sales,
    /// Rented units and occupancy
    Rental,
    /// Movement history grouped by month
    Movements,
    /// Move a container and record the movement
    Move(MoveArgs),
    /// Register a new container
    AddContainer(AddContainerArgs),
}

#[derive(Debug, Clone, Args)]
pub struct MoveArgs {
    #[arg(long)]
    pub container: String,

    #[arg(long)]
    pub to: Location,

    #[arg(long, default_value = "")]
    pub responsible: String,

    #[arg(long, default_value = "")]
    pub note: String,

    /// Refuse the move unless the container is still at this location
    #[arg(long)]
    pub expect_from: Option<Location>,
}

#[derive(Debug, Clone, Args)]
pub struct AddContainerArgs {
    #[arg(long)]
    pub id: String,

    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long = "type")]
    pub container_type: String,

    #[arg(long, default_value = "Available")]
    pub status: String,

    #[arg(long)]
    pub location: String,

    #[arg(long, default_value = "0")]
    pub length_feet: f64,

    #[arg(long, default_value = "")]
    pub base_material: String,

    #[arg(long)]
    pub nationalized: bool,

    /// YYYY-MM-DD
    #[arg(long)]
    pub nationalization_date: Option<NaiveDate>,

    #[arg(long)]
    pub nationalization_doc: Option<String>,

    #[arg(long)]
    pub exterior_image: Option<String>,

    #[arg(long)]
    pub interior_image: Option<String>,

    #[arg(long, default_value = "")]
    pub notes: String,
}

impl From<AddContainerArgs> for NewContainer {
    fn from(args: AddContainerArgs) -> Self {
        NewContainer {
            id: args.id,
            name: args.name,
            container_type: args.container_type,
            status: args.status,
            location: args.location,
            length_feet: args.length_feet,
            base_material: args.base_material,
            nationalized: args.nationalized,
            nationalization_date: args.nationalization_date,
            nationalization_doc_link: args.nationalization_doc,
            exterior_image_link: args.exterior_image,
            interior_image_link: args.interior_image,
            notes: args.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move_command() {
        let cli = CliConfig::try_parse_from([
            "yard-ledger",
            "move",
            "--container",
            "C1",
            "--to",
            "Patio 2",
            "--expect-from",
            "Yard 1",
        ])
        .unwrap();

        match cli.command {
            Command::Move(args) => {
                assert_eq!(args.container, "C1");
                assert_eq!(args.to, Location::Yard2);
                assert_eq!(args.expect_from, Some(Location::Yard1));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.config, "yard-ledger.toml");
    }

    #[test]
    fn test_rejects_unknown_location() {
        let result = CliConfig::try_parse_from([
            "yard-ledger",
            "move",
            "--container",
            "C1",
            "--to",
            "Mars",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_add_container_args_convert() {
        let cli = CliConfig::try_parse_from([
            "yard-ledger",
            "--verbose",
            "add-container",
            "--id",
            "C7",
            "--type",
            "Bodega",
            "--location",
            "Farm",
            "--length-feet",
            "40",
            "--nationalized",
            "--nationalization-date",
            "2024-05-02",
        ])
        .unwrap();
        assert!(cli.verbose);

        let Command::AddContainer(args) = cli.command else {
            panic!("expected add-container");
        };
        let candidate = NewContainer::from(args);
        assert_eq!(candidate.id, "C7");
        assert_eq!(candidate.status, "Available");
        assert_eq!(candidate.length_feet, 40.0);
        assert!(candidate.nationalized);
        assert_eq!(candidate.nationalization_date, NaiveDate::from_ymd_opt(2024, 5, 2));
    }
}
