use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use formula_mix::logic::store::DEFAULT_SEPARATOR;
use formula_mix::{AddOutcome, MixStore, SortOrder};

use super::formula::print_formula;

#[derive(Args, Debug, Clone)]
pub struct MixCmd {
    /// JSON file holding the mix listing (created on first save)
    #[arg(short = 's', long = "store", value_name = "FILE", default_value = "mix.json")]
    pub store: PathBuf,

    #[command(subcommand)]
    pub action: MixAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum MixAction {
    /// Add a formula to the end of the mix
    Add {
        #[arg(value_name = "TEXT")]
        text: String,
    },
    /// Show every item with its index and selection mark
    List,
    /// Remove the item at INDEX
    Remove { index: usize },
    /// Move an item so it ends up at TO
    Move { from: usize, to: usize },
    /// Move an item one place towards the front
    Up { index: usize },
    /// Move an item one place towards the back
    Down { index: usize },
    /// Select or deselect one item
    Select {
        index: usize,
        #[arg(value_enum)]
        state: Switch,
    },
    /// Select all items, or deselect all when every item is selected
    ToggleAll,
    /// Sort by text length, longest first
    Sort {
        /// Shortest first instead
        #[arg(long = "asc")]
        asc: bool,
    },
    /// Remove every item
    Clear,
    /// Print the selected formulas joined into one query
    Join {
        #[arg(long = "sep", value_name = "S", default_value = DEFAULT_SEPARATOR)]
        sep: String,
    },
    /// Replace the mix with the formulas found in an output query
    Split {
        #[arg(value_name = "OUTPUT")]
        output: String,
    },
    /// Decode an item (default: the first selected one) back into form fields
    Edit { index: Option<usize> },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    On,
    Off,
}

fn open_store(path: &Path) -> Result<MixStore> {
    if !path.exists() {
        return Ok(MixStore::new());
    }
    MixStore::load(path).with_context(|| format!("failed to load mix '{}'", path.display()))
}

fn print_items(store: &MixStore) {
    if store.is_empty() {
        println!("(empty mix)");
        return;
    }
    for (i, item) in store.iter().enumerate() {
        let mark = if item.selected { "x" } else { " " };
        println!("{:>3} [{}] {}", i, mark, item.text);
    }
}

pub fn run(cmd: &MixCmd) -> Result<()> {
    let mut store = open_store(&cmd.store)?;

    let changed = match &cmd.action {
        MixAction::Add { text } => match store.add(text) {
            AddOutcome::Added { index } => {
                println!("added #{}", index);
                true
            }
            AddOutcome::Duplicate => {
                eprintln!("already in the mix: {}", text.trim());
                false
            }
            AddOutcome::Empty => {
                eprintln!("nothing to add");
                false
            }
        },
        MixAction::List => {
            print_items(&store);
            false
        }
        MixAction::Remove { index } => {
            let item = store.remove(*index)?;
            println!("removed {}", item.text);
            true
        }
        MixAction::Move { from, to } => {
            store.reorder(*from, *to)?;
            print_items(&store);
            true
        }
        MixAction::Up { index } => {
            store.move_up(*index)?;
            print_items(&store);
            true
        }
        MixAction::Down { index } => {
            store.move_down(*index)?;
            print_items(&store);
            true
        }
        MixAction::Select { index, state } => {
            store.set_selected(*index, *state == Switch::On)?;
            true
        }
        MixAction::ToggleAll => {
            match store.toggle_all() {
                Some(true) => println!("all selected"),
                Some(false) => println!("none selected"),
                None => println!("(empty mix)"),
            }
            true
        }
        MixAction::Sort { asc } => {
            let order = if *asc {
                SortOrder::Ascending
            } else {
                SortOrder::Descending
            };
            store.sort_by_length(order);
            print_items(&store);
            true
        }
        MixAction::Clear => {
            println!("removed {} item(s)", store.clear());
            true
        }
        MixAction::Join { sep } => {
            println!("{}", store.join_selected(sep)?);
            false
        }
        MixAction::Split { output } => {
            let report = store.replace_all(output)?;
            println!(
                "{} formula(s) in the mix, {} duplicate(s) dropped",
                report.added, report.duplicates
            );
            true
        }
        MixAction::Edit { index } => {
            let formula = match index {
                Some(i) => store.decode_item(*i)?,
                None => store.decode_first_selected()?,
            };
            print_formula(&formula);
            false
        }
    };

    if changed {
        store
            .save(&cmd.store)
            .with_context(|| format!("failed to save mix '{}'", cmd.store.display()))?;
    }
    Ok(())
}
