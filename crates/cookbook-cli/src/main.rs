//! Cookbook CLI entry point.
//!
//! Binary name: `cookbook`
//!
//! Parses CLI arguments, loads configuration, wires the recipe manager to the
//! configured backend, then dispatches to the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::recipe::{NewRecipe, RecipeEdits};
use cli::{Cli, Commands};
use cookbook_core::repository::recipe::RecipeRepository;
use cookbook_infra::config::load_config;
use cookbook_infra::filesystem::resolve_data_dir;
use cookbook_observe::tracing_setup::{init_tracing, shutdown_tracing};
use cookbook_types::config::StorageBackend;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,cookbook=debug",
        _ => "trace",
    };
    init_tracing(filter, cli.otel).map_err(|e| anyhow::anyhow!("failed to init tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "cookbook", &mut std::io::stdout());
        return Ok(());
    }

    let data_dir = resolve_data_dir();
    tokio::fs::create_dir_all(&data_dir).await?;
    let config = load_config(&data_dir).await;
    tracing::debug!(storage = %config.storage, data_dir = %data_dir.display(), "loaded configuration");

    let result = match config.storage {
        StorageBackend::Memory => run(cli, AppState::in_memory(config)).await,
        StorageBackend::Sqlite => run(cli, AppState::sqlite(config, &data_dir).await?).await,
    };

    shutdown_tracing();
    result
}

async fn run<R: RecipeRepository>(cli: Cli, state: AppState<R>) -> anyhow::Result<()> {
    match cli.command {
        Commands::Add {
            name,
            category,
            ingredients,
            instructions,
            image,
        } => {
            let input = NewRecipe {
                name,
                category,
                ingredients,
                instructions,
                image,
            };
            cli::recipe::add_recipe(&state, input, cli.json).await?;
        }

        Commands::List => {
            cli::recipe::list_recipes(&state, cli.json).await?;
        }

        Commands::Show { position } => {
            cli::recipe::show_recipe(&state, position, cli.json).await?;
        }

        Commands::Edit {
            position,
            name,
            category,
            set_ingredients,
            remove_ingredients,
            clear_ingredients,
            add_ingredients,
            instructions,
            image,
            clear_image,
        } => {
            let edits = RecipeEdits {
                name,
                category,
                set_ingredients,
                remove_ingredients,
                clear_ingredients,
                add_ingredients,
                instructions,
                image_path: image,
                clear_image,
            };
            cli::recipe::edit_recipe(&state, position, edits, cli.json).await?;
        }

        Commands::Delete { position, force } => {
            cli::recipe::delete_recipe(&state, position, force, cli.json).await?;
        }

        Commands::Categories => {
            cli::recipe::list_categories(cli.json)?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
