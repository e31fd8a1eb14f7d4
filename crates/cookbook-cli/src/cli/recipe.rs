//! Recipe CLI commands: add, list, show, edit, delete, categories.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Confirm;

use cookbook_core::repository::recipe::RecipeRepository;
use cookbook_infra::filesystem::read_image;
use cookbook_types::recipe::{FoodCategory, Recipe};

use crate::state::AppState;

/// Field values for a new recipe, as given on the command line.
pub struct NewRecipe {
    pub name: String,
    pub category: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
    pub image: Option<PathBuf>,
}

/// Changes to apply to a copy of a stored recipe.
#[derive(Default)]
pub struct RecipeEdits {
    pub name: Option<String>,
    pub category: Option<String>,
    pub set_ingredients: Vec<String>,
    pub remove_ingredients: Vec<usize>,
    pub clear_ingredients: bool,
    pub add_ingredients: Vec<String>,
    pub instructions: Option<String>,
    pub image_path: Option<PathBuf>,
    pub clear_image: bool,
}

fn parse_category(value: &str) -> Result<FoodCategory> {
    value.parse::<FoodCategory>().map_err(|e| anyhow!(e))
}

/// Parse an `INDEX=TEXT` ingredient replacement.
fn parse_set_ingredient(value: &str) -> Result<(usize, &str)> {
    let (index, text) = value
        .split_once('=')
        .ok_or_else(|| anyhow!("expected INDEX=TEXT, got '{value}'"))?;
    let index = index
        .trim()
        .parse::<usize>()
        .with_context(|| format!("invalid ingredient index in '{value}'"))?;
    Ok((index, text))
}

fn append_ingredients(recipe: &mut Recipe, ingredients: &[String]) -> Result<()> {
    for ingredient in ingredients {
        if !recipe.add_ingredient(ingredient) {
            bail!(
                "cannot add ingredient '{ingredient}': it is blank or the limit of {} is reached",
                recipe.max_ingredients()
            );
        }
    }
    Ok(())
}

/// Build a draft recipe from command-line input.
pub fn build_recipe(input: &NewRecipe, max_ingredients: usize) -> Result<Recipe> {
    let mut recipe = Recipe::new(max_ingredients);
    recipe.set_name(&input.name)?;
    if let Some(category) = &input.category {
        recipe.set_category(parse_category(category)?);
    }
    append_ingredients(&mut recipe, &input.ingredients)?;
    if !recipe.has_ingredients() {
        bail!("a recipe needs at least one ingredient (use -i/--ingredient)");
    }
    recipe.set_instructions(input.instructions.as_deref());
    Ok(recipe)
}

/// Apply edits to `recipe` in a fixed order: replace, remove, clear, append.
///
/// Removal indices refer to the ingredient list as it was before any removal.
/// `image` holds the bytes already read from `edits.image_path`.
pub fn apply_edits(
    recipe: &mut Recipe,
    edits: RecipeEdits,
    image: Option<Vec<u8>>,
) -> Result<()> {
    if let Some(name) = &edits.name {
        recipe.set_name(name)?;
    }
    if let Some(category) = &edits.category {
        recipe.set_category(parse_category(category)?);
    }

    for replacement in &edits.set_ingredients {
        let (index, text) = parse_set_ingredient(replacement)?;
        if !recipe.update_ingredient(index, text) {
            bail!("cannot set ingredient {index}: no such ingredient or blank text");
        }
    }

    let mut removals = edits.remove_ingredients;
    removals.sort_unstable_by(|a, b| b.cmp(a));
    removals.dedup();
    for index in removals {
        if !recipe.remove_ingredient(index) {
            bail!("cannot remove ingredient {index}: no such ingredient");
        }
    }

    if edits.clear_ingredients {
        recipe.clear_ingredients();
    }
    append_ingredients(recipe, &edits.add_ingredients)?;

    if edits.instructions.is_some() {
        recipe.set_instructions(edits.instructions.as_deref());
    }
    if edits.clear_image {
        recipe.set_image_data(None);
    } else if let Some(image) = image {
        recipe.set_image_data(Some(image));
    }

    Ok(())
}

/// Add a new recipe.
pub async fn add_recipe<R: RecipeRepository>(
    state: &AppState<R>,
    input: NewRecipe,
    json: bool,
) -> Result<()> {
    let mut recipe = build_recipe(&input, state.config.max_ingredients)?;
    if let Some(path) = &input.image {
        let bytes = read_image(path)
            .await
            .with_context(|| format!("failed to read image {}", path.display()))?;
        recipe.set_image_data(Some(bytes));
    }

    if !state.recipes.add(&recipe).await {
        bail!("could not store recipe: the collection is full or storage is unavailable");
    }

    let recipes = state.recipes.list().await;
    let count = recipes.len();

    if json {
        let stored = recipes.last().unwrap_or(&recipe);
        println!("{}", serde_json::to_string_pretty(stored)?);
        return Ok(());
    }

    println!();
    println!("  {} Recipe added!", style("✓").green().bold());
    println!();
    println!(
        "  {}  {}",
        style("Name:").bold(),
        style(recipe.name().unwrap_or_default()).cyan()
    );
    println!("  {}  {}", style("Category:").bold(), recipe.category());
    println!(
        "  {}  {}",
        style("Ingredients:").bold(),
        recipe.ingredient_count()
    );
    println!();
    println!("  {} recipes stored", style(count).bold());
    println!();

    Ok(())
}

/// List all recipes in a table.
pub async fn list_recipes<R: RecipeRepository>(state: &AppState<R>, json: bool) -> Result<()> {
    let recipes = state.recipes.list().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&recipes)?);
        return Ok(());
    }

    if recipes.is_empty() {
        println!();
        println!(
            "  {} No recipes yet. Add one with: {}",
            style("i").blue().bold(),
            style("cookbook add --name <NAME> -i <INGREDIENT>").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Pos").fg(Color::White),
        Cell::new("Id").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Category").fg(Color::White),
        Cell::new("Ingredients").fg(Color::White),
        Cell::new("Image").fg(Color::White),
    ]);

    for (position, recipe) in recipes.iter().enumerate() {
        let image_cell = match recipe.image_data() {
            Some(bytes) => Cell::new(format_bytes(bytes.len())).fg(Color::Green),
            None => Cell::new("-").fg(Color::DarkGrey),
        };
        table.add_row(vec![
            Cell::new(position),
            Cell::new(recipe.id()).fg(Color::DarkGrey),
            Cell::new(recipe.name().unwrap_or_default()).fg(Color::Cyan),
            Cell::new(recipe.category()),
            Cell::new(recipe.ingredient_count()),
            image_cell,
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!("  {} recipes", recipes.len());
    println!();

    Ok(())
}

/// Show a single recipe: ingredients followed by instructions.
pub async fn show_recipe<R: RecipeRepository>(
    state: &AppState<R>,
    position: usize,
    json: bool,
) -> Result<()> {
    let recipe = state
        .recipes
        .get(position)
        .await
        .ok_or_else(|| anyhow!("no recipe at position {position}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recipe)?);
        return Ok(());
    }

    println!();
    println!(
        "  {}  {}",
        style(recipe.name().unwrap_or_default()).cyan().bold(),
        style(format!("({})", recipe.category())).dim()
    );
    println!();
    for line in recipe.overview().lines() {
        println!("  {line}");
    }
    println!();

    Ok(())
}

/// Edit a copy of the recipe at `position`, then save it over the original.
pub async fn edit_recipe<R: RecipeRepository>(
    state: &AppState<R>,
    position: usize,
    edits: RecipeEdits,
    json: bool,
) -> Result<()> {
    let stored = state
        .recipes
        .get(position)
        .await
        .ok_or_else(|| anyhow!("no recipe at position {position}"))?;

    let image = match &edits.image_path {
        Some(path) => Some(
            read_image(path)
                .await
                .with_context(|| format!("failed to read image {}", path.display()))?,
        ),
        None => None,
    };

    let mut edited = stored.clone();
    apply_edits(&mut edited, edits, image)?;

    if edited == stored {
        tracing::info!(id = %stored.id(), "no changes to save");
    } else if !state.recipes.save(&edited).await {
        bail!("could not save recipe '{}'", stored.name().unwrap_or_default());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&edited)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Recipe '{}' saved.",
        style("✓").green().bold(),
        style(edited.name().unwrap_or_default()).cyan()
    );
    println!();

    Ok(())
}

/// Delete the recipe at `position` after confirmation.
pub async fn delete_recipe<R: RecipeRepository>(
    state: &AppState<R>,
    position: usize,
    force: bool,
    json: bool,
) -> Result<()> {
    let recipe = state
        .recipes
        .get(position)
        .await
        .ok_or_else(|| anyhow!("no recipe at position {position}"))?;
    let name = recipe.name().unwrap_or_default().to_string();

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete recipe '{name}'?"))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    // Positions shift on every delete; resolve to the stable identity first.
    if !state.recipes.remove(&recipe.id()).await {
        bail!("could not delete recipe '{name}'");
    }

    if json {
        let out = serde_json::json!({ "deleted": name, "id": recipe.id() });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Recipe '{}' deleted.",
        style("✓").green().bold(),
        style(&name).cyan()
    );
    println!();

    Ok(())
}

/// Print every food category.
pub fn list_categories(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&FoodCategory::ALL)?);
        return Ok(());
    }

    println!();
    for category in FoodCategory::ALL {
        println!("  {} {category}", style("•").dim());
    }
    println!();

    Ok(())
}

fn format_bytes(len: usize) -> String {
    const KIB: usize = 1024;
    const MIB: usize = KIB * 1024;
    if len >= MIB {
        format!("{:.1} MiB", len as f64 / MIB as f64)
    } else if len >= KIB {
        format!("{:.1} KiB", len as f64 / KIB as f64)
    } else {
        format!("{len} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(ingredients: &[&str]) -> Recipe {
        let input = NewRecipe {
            name: "Pho".to_string(),
            category: Some("soups".to_string()),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            instructions: Some("Simmer the broth.".to_string()),
            image: None,
        };
        build_recipe(&input, 5).unwrap()
    }

    #[test]
    fn test_build_recipe() {
        let recipe = stored(&["Noodles", "Beef"]);
        assert_eq!(recipe.name(), Some("Pho"));
        assert_eq!(recipe.category(), FoodCategory::Soups);
        assert_eq!(recipe.ingredients(), vec!["Noodles", "Beef"]);
        assert_eq!(recipe.instructions(), "Simmer the broth.");
        assert!(recipe.id().is_draft());
    }

    #[test]
    fn test_build_recipe_rejects_bad_input() {
        let mut input = NewRecipe {
            name: "  ".to_string(),
            category: None,
            ingredients: vec!["Rice".to_string()],
            instructions: None,
            image: None,
        };
        assert!(build_recipe(&input, 5).is_err());

        input.name = "Risotto".to_string();
        input.category = Some("Dessert".to_string());
        assert!(build_recipe(&input, 5).is_err());

        input.category = None;
        input.ingredients = vec!["Rice".to_string(), "Stock".to_string()];
        assert!(build_recipe(&input, 1).is_err());

        input.ingredients.clear();
        assert!(build_recipe(&input, 5).is_err());
    }

    #[test]
    fn test_apply_edits_order() {
        let mut recipe = stored(&["A", "B", "C", "D"]);
        apply_edits(
            &mut recipe,
            RecipeEdits {
                set_ingredients: vec!["0=Z".to_string()],
                remove_ingredients: vec![1, 3, 1],
                add_ingredients: vec!["E".to_string()],
                ..Default::default()
            },
            None,
        )
        .unwrap();
        assert_eq!(recipe.ingredients(), vec!["Z", "C", "E"]);
    }

    #[test]
    fn test_apply_edits_clear_then_add() {
        let mut recipe = stored(&["A", "B", "C"]);
        apply_edits(
            &mut recipe,
            RecipeEdits {
                name: Some("Bun bo".to_string()),
                clear_ingredients: true,
                add_ingredients: vec!["Lemongrass".to_string(), "Pork".to_string()],
                instructions: Some("Spicy.".to_string()),
                image_path: Some(PathBuf::from("bun-bo.jpg")),
                ..Default::default()
            },
            Some(vec![1, 2]),
        )
        .unwrap();
        assert_eq!(recipe.name(), Some("Bun bo"));
        assert_eq!(recipe.ingredients(), vec!["Lemongrass", "Pork"]);
        assert_eq!(recipe.instructions(), "Spicy.");
        assert_eq!(recipe.image_data(), Some(&[1u8, 2][..]));

        apply_edits(
            &mut recipe,
            RecipeEdits {
                clear_image: true,
                ..Default::default()
            },
            None,
        )
        .unwrap();
        assert!(recipe.image_data().is_none());
    }

    #[test]
    fn test_apply_edits_rejects_bad_indices() {
        let mut recipe = stored(&["A"]);
        let err = apply_edits(
            &mut recipe,
            RecipeEdits {
                remove_ingredients: vec![4],
                ..Default::default()
            },
            None,
        );
        assert!(err.is_err());

        let err = apply_edits(
            &mut recipe,
            RecipeEdits {
                set_ingredients: vec!["x=Salt".to_string()],
                ..Default::default()
            },
            None,
        );
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn test_edit_recipe_reads_image_path() {
        use cookbook_types::config::{CookbookConfig, StorageBackend};

        let config = CookbookConfig {
            storage: StorageBackend::Memory,
            ..CookbookConfig::default()
        };
        let state = AppState::in_memory(config);
        assert!(state.recipes.add(&stored(&["Noodles"])).await);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pho.png");
        tokio::fs::write(&path, [0x89, b'P', b'N', b'G']).await.unwrap();

        let edits = RecipeEdits {
            image_path: Some(path),
            ..Default::default()
        };
        edit_recipe(&state, 0, edits, true).await.unwrap();

        let saved = state.recipes.get(0).await.unwrap();
        assert_eq!(saved.image_data(), Some(&[0x89, b'P', b'N', b'G'][..]));
        assert_eq!(saved.ingredients(), vec!["Noodles"]);

        let missing = RecipeEdits {
            image_path: Some(dir.path().join("missing.png")),
            ..Default::default()
        };
        assert!(edit_recipe(&state, 0, missing, true).await.is_err());
    }

    #[test]
    fn test_parse_set_ingredient() {
        assert_eq!(parse_set_ingredient("2=Fresh basil").unwrap(), (2, "Fresh basil"));
        assert_eq!(parse_set_ingredient("0=a=b").unwrap(), (0, "a=b"));
        assert!(parse_set_ingredient("Basil").is_err());
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KiB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MiB");
    }
}
