mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use vulcplan_core::{DomainError, DomainResult, VulcanizerId};
use vulcplan_events::InMemoryEventBus;
use vulcplan_infra::{JsonFileStore, Planner, PlannerConfig, PlannerMessage};
use vulcplan_planning::{
    Notice, PartField, PlanCommand, VulcanizerField, parse_count, parse_quantity,
};

#[derive(Parser)]
#[command(name = "vulcplan", about = "Vulcanizer cycle planning against bin stock")]
struct Cli {
    /// Data directory (overrides VULCPLAN_DATA_DIR env var)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Vulcanizer code to make active before running the command
    #[arg(long, short = 'v', global = true)]
    vulcanizer: Option<String>,

    /// Print the cycle-wise view as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the active vulcanizer's cycle-wise plan
    Show,
    /// Make a vulcanizer active
    Select {
        /// Vulcanizer code (e.g. V-2)
        vulc_no: String,
    },
    /// Add an empty vulcanizer
    AddVulcanizer,
    /// Add a part to the active vulcanizer
    AddPart,
    /// Swap odd and even demand for every part of the active vulcanizer
    Flip,
    /// Rename a vulcanizer
    SetVulcCode {
        /// Vulcanizer id
        id: String,
        code: String,
    },
    /// Change a vulcanizer's cycle count
    SetCycles {
        /// Vulcanizer id
        id: String,
        #[arg(allow_negative_numbers = true)]
        cycles: String,
    },
    /// Rename a part of the active vulcanizer
    SetPartCode {
        /// Part number (1-based)
        part: usize,
        code: String,
    },
    /// Set a part's planned quantity for odd cycles
    SetOdd {
        /// Part number (1-based)
        part: usize,
        #[arg(allow_negative_numbers = true)]
        quantity: String,
    },
    /// Set a part's planned quantity for even cycles
    SetEven {
        /// Part number (1-based)
        part: usize,
        #[arg(allow_negative_numbers = true)]
        quantity: String,
    },
    /// Overwrite a produced quantity, deducting any increase from stock
    EditCell {
        /// Part number (1-based)
        part: usize,
        /// Cycle number (1-based)
        cycle: usize,
        #[arg(allow_negative_numbers = true)]
        value: String,
    },
    /// Fill the next open cycle of every part from stock
    Fill,
    /// Set how many cycles stock should cover before a part is flagged
    SetMinCycles {
        #[arg(allow_negative_numbers = true)]
        cycles: String,
    },
    /// Save plan and cycles without changing anything
    Save,
}

impl Commands {
    /// The engine command this invocation maps to; `None` for read-only or save-only runs.
    fn to_plan_command(&self) -> DomainResult<Option<PlanCommand>> {
        let command = match self {
            Commands::Show | Commands::Save => return Ok(None),
            Commands::Select { vulc_no } => PlanCommand::SelectVulcanizer {
                vulc_no: vulc_no.clone(),
            },
            Commands::AddVulcanizer => PlanCommand::AddVulcanizer,
            Commands::AddPart => PlanCommand::AddPart,
            Commands::Flip => PlanCommand::FlipParity,
            Commands::SetVulcCode { id, code } => PlanCommand::EditVulcanizer {
                id: id.parse::<VulcanizerId>()?,
                field: VulcanizerField::Code(code.clone()),
            },
            Commands::SetCycles { id, cycles } => PlanCommand::EditVulcanizer {
                id: id.parse::<VulcanizerId>()?,
                field: VulcanizerField::Cycles(parse_count(cycles)?),
            },
            Commands::SetPartCode { part, code } => PlanCommand::EditPart {
                part_index: to_index("part", *part)?,
                field: PartField::Code(code.clone()),
            },
            Commands::SetOdd { part, quantity } => PlanCommand::EditPart {
                part_index: to_index("part", *part)?,
                field: PartField::Odd(parse_quantity(quantity)?),
            },
            Commands::SetEven { part, quantity } => PlanCommand::EditPart {
                part_index: to_index("part", *part)?,
                field: PartField::Even(parse_quantity(quantity)?),
            },
            Commands::EditCell { part, cycle, value } => PlanCommand::EditCell {
                part_index: to_index("part", *part)?,
                cycle_index: to_index("cycle", *cycle)?,
                value: parse_quantity(value)?,
            },
            Commands::Fill => PlanCommand::AutoFillNextCycle,
            Commands::SetMinCycles { cycles } => PlanCommand::SetMinCyclesRequired {
                cycles: parse_count(cycles)?,
            },
        };
        Ok(Some(command))
    }

    fn saves(&self) -> bool {
        !matches!(self, Commands::Show)
    }
}

fn to_index(what: &str, number: usize) -> DomainResult<usize> {
    number
        .checked_sub(1)
        .ok_or_else(|| DomainError::validation(format!("{what} numbers start at 1")))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = PlannerConfig::from_env().context("reading configuration")?;
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = dir;
    }
    if config.log_json {
        vulcplan_observability::init_json();
    } else {
        vulcplan_observability::init();
    }

    let store = JsonFileStore::new(&config.data_dir);
    let bus = Arc::new(InMemoryEventBus::<PlannerMessage>::new());
    let mut planner = Planner::load(store, bus, &config)
        .with_context(|| format!("loading plan from {}", config.data_dir.display()))?;
    let redraws = planner.subscribe();

    if let Some(vulc_no) = cli.vulcanizer.clone() {
        let mutation = planner.dispatch(PlanCommand::SelectVulcanizer { vulc_no })?;
        render::notices(&mutation.notices);
        if mutation.is_not_found() {
            return Ok(());
        }
    }

    let command = match cli.command.to_plan_command() {
        Ok(command) => command,
        Err(err) => {
            render::notices(&[Notice::Rejected(err)]);
            return Ok(());
        }
    };
    if let Some(command) = command {
        let mutation = planner.dispatch(command)?;
        render::notices(&mutation.notices);
    }

    // one-shot process: repaint once if anything asked for it, or when just showing
    let wants_redraw = redraws.drain().iter().any(PlannerMessage::wants_redraw);
    if wants_redraw || matches!(cli.command, Commands::Show) {
        render::view(planner.cyclewise_view().as_ref(), cli.json)?;
    }

    if cli.command.saves() {
        planner.save_plan().context("saving plan")?;
        planner.save_cycles().context("saving cycles")?;
        tracing::info!(dir = %config.data_dir.display(), "state saved");
    }

    Ok(())
}
