//! CLI command definitions for the `cookbook` binary.
//!
//! Uses clap derive macros for argument parsing. Recipes are addressed by
//! their position in `cookbook list` (starting at 0).

pub mod recipe;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Keep a collection of recipes.
#[derive(Parser)]
#[command(name = "cookbook", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new recipe.
    Add {
        /// Recipe name.
        #[arg(long)]
        name: String,

        /// Food category (e.g. Pasta, Soups, Vegan).
        #[arg(short, long)]
        category: Option<String>,

        /// Ingredient, in order. Repeat for each ingredient.
        #[arg(short = 'i', long = "ingredient")]
        ingredients: Vec<String>,

        /// Free-text instructions.
        #[arg(long)]
        instructions: Option<String>,

        /// Image file to attach.
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// List recipes with their positions.
    #[command(alias = "ls")]
    List,

    /// Show the ingredients and instructions of a recipe.
    Show {
        /// Position in `cookbook list`.
        position: usize,
    },

    /// Edit a recipe. Changes are applied to a copy and saved in one step.
    Edit {
        /// Position in `cookbook list`.
        position: usize,

        /// New recipe name.
        #[arg(long)]
        name: Option<String>,

        /// New food category.
        #[arg(short, long)]
        category: Option<String>,

        /// Replace an ingredient, as INDEX=TEXT.
        #[arg(long = "set-ingredient", value_name = "INDEX=TEXT")]
        set_ingredients: Vec<String>,

        /// Remove the ingredient at INDEX. Indices refer to the list before editing.
        #[arg(long = "remove-ingredient", value_name = "INDEX")]
        remove_ingredients: Vec<usize>,

        /// Remove every ingredient before adding new ones.
        #[arg(long)]
        clear_ingredients: bool,

        /// Append an ingredient. Repeat for each ingredient.
        #[arg(long = "add-ingredient")]
        add_ingredients: Vec<String>,

        /// Replace the instructions.
        #[arg(long)]
        instructions: Option<String>,

        /// Attach a new image file.
        #[arg(long, conflicts_with = "clear_image")]
        image: Option<PathBuf>,

        /// Remove the attached image.
        #[arg(long)]
        clear_image: bool,
    },

    /// Delete a recipe and its ingredients.
    #[command(alias = "rm")]
    Delete {
        /// Position in `cookbook list`.
        position: usize,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// List the available food categories.
    Categories,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
