use serde::{Serialize, Serializer};

use std::fmt;
use std::str::FromStr;

use crate::error::RecipeError;

/// Ingredient bound used when no configuration overrides it.
pub const DEFAULT_MAX_INGREDIENTS: usize = 50;

/// Recipe bound for the in-memory repository when no configuration overrides it.
pub const DEFAULT_MAX_RECIPES: usize = 200;

/// Stable identity of a stored recipe, assigned by the repository on first commit.
///
/// `RecipeId::DRAFT` (zero) marks a recipe that has never been stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct RecipeId(pub i64);

impl RecipeId {
    /// Identity of a recipe that has not been persisted yet.
    pub const DRAFT: RecipeId = RecipeId(0);

    /// True when the recipe has not been assigned an identity by a repository.
    pub fn is_draft(&self) -> bool {
        self.0 <= 0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecipeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Closed set of dish categories.
///
/// Persisted by symbolic name (`"Meat"`, `"Pasta"`, ...), never by ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum FoodCategory {
    #[default]
    Meat,
    Pasta,
    Pizza,
    Fish,
    Seafood,
    Soups,
    Stew,
    Vegan,
    Vegetarian,
    Other,
}

impl FoodCategory {
    /// Every category, in declaration order.
    pub const ALL: [FoodCategory; 10] = [
        FoodCategory::Meat,
        FoodCategory::Pasta,
        FoodCategory::Pizza,
        FoodCategory::Fish,
        FoodCategory::Seafood,
        FoodCategory::Soups,
        FoodCategory::Stew,
        FoodCategory::Vegan,
        FoodCategory::Vegetarian,
        FoodCategory::Other,
    ];

    /// Symbolic name used for display and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodCategory::Meat => "Meat",
            FoodCategory::Pasta => "Pasta",
            FoodCategory::Pizza => "Pizza",
            FoodCategory::Fish => "Fish",
            FoodCategory::Seafood => "Seafood",
            FoodCategory::Soups => "Soups",
            FoodCategory::Stew => "Stew",
            FoodCategory::Vegan => "Vegan",
            FoodCategory::Vegetarian => "Vegetarian",
            FoodCategory::Other => "Other",
        }
    }

    /// Exact, case-sensitive lookup by symbolic name, as stored.
    pub fn from_name(name: &str) -> Option<FoodCategory> {
        FoodCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == name)
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lenient parse for user input: surrounding whitespace and letter case are ignored.
/// Stored values go through [`FoodCategory::from_name`] instead.
impl FromStr for FoodCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FoodCategory::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("invalid food category: '{s}'"))
    }
}

/// A named, categorized dish with a bounded, ordered list of ingredients.
///
/// A recipe starts life as a draft: no name, no ingredients, and
/// `RecipeId::DRAFT` as its identity. Every mutation is validated, so a
/// stored ingredient is never blank and a name, once set, is never empty.
///
/// `Clone` produces a fully independent copy, including the ingredient list,
/// so edits on a copy never leak back into the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    id: RecipeId,
    name: Option<String>,
    category: FoodCategory,
    ingredients: Vec<String>,
    max_ingredients: usize,
    instructions: String,
    #[serde(rename = "has_image", serialize_with = "serialize_has_image")]
    image_data: Option<Vec<u8>>,
}

fn serialize_has_image<S: Serializer>(
    image: &Option<Vec<u8>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_bool(image.is_some())
}

impl Recipe {
    /// Create an empty draft that can hold up to `max_ingredients` ingredients.
    pub fn new(max_ingredients: usize) -> Self {
        Self {
            id: RecipeId::DRAFT,
            name: None,
            category: FoodCategory::default(),
            ingredients: Vec::with_capacity(max_ingredients),
            max_ingredients,
            instructions: String::new(),
            image_data: None,
        }
    }

    pub fn id(&self) -> RecipeId {
        self.id
    }

    /// Assign the storage identity. Called by repositories when committing.
    pub fn set_id(&mut self, id: RecipeId) {
        self.id = id;
    }

    /// The recipe name, or `None` while the recipe is still an unnamed draft.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the name, trimmed. Blank names are rejected and leave the recipe untouched.
    pub fn set_name(&mut self, value: &str) -> Result<(), RecipeError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(RecipeError::InvalidName(
                "recipe name cannot be empty".to_string(),
            ));
        }
        self.name = Some(trimmed.to_string());
        Ok(())
    }

    pub fn category(&self) -> FoodCategory {
        self.category
    }

    pub fn set_category(&mut self, value: FoodCategory) {
        self.category = value;
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Store the instructions; `None` resets them to the empty string.
    pub fn set_instructions(&mut self, value: Option<&str>) {
        self.instructions = value.unwrap_or_default().to_string();
    }

    pub fn image_data(&self) -> Option<&[u8]> {
        self.image_data.as_deref()
    }

    /// Attach or detach the opaque image blob. The bytes are not inspected.
    pub fn set_image_data(&mut self, value: Option<Vec<u8>>) {
        self.image_data = value;
    }

    pub fn max_ingredients(&self) -> usize {
        self.max_ingredients
    }

    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }

    pub fn has_ingredients(&self) -> bool {
        !self.ingredients.is_empty()
    }

    /// Append a trimmed ingredient.
    ///
    /// Returns `false` when the ingredient bound is reached or the text is blank.
    pub fn add_ingredient(&mut self, text: &str) -> bool {
        if self.ingredients.len() >= self.max_ingredients {
            return false;
        }
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.ingredients.push(trimmed.to_string());
        true
    }

    /// Snapshot of the current ingredients, in insertion order.
    pub fn ingredients(&self) -> Vec<String> {
        self.ingredients.clone()
    }

    /// Remove the ingredient at `index`, shifting later ingredients down by one.
    pub fn remove_ingredient(&mut self, index: usize) -> bool {
        if index >= self.ingredients.len() {
            return false;
        }
        self.ingredients.remove(index);
        true
    }

    /// Replace the ingredient at `index` in place.
    pub fn update_ingredient(&mut self, index: usize, text: &str) -> bool {
        let trimmed = text.trim();
        match self.ingredients.get_mut(index) {
            Some(slot) if !trimmed.is_empty() => {
                *slot = trimmed.to_string();
                true
            }
            _ => false,
        }
    }

    pub fn clear_ingredients(&mut self) {
        self.ingredients.clear();
    }

    /// True once the recipe carries everything a repository requires (a name).
    pub fn is_storable(&self) -> bool {
        self.name.is_some()
    }

    /// Text shown for a selected recipe: ingredients on one line, then instructions.
    pub fn overview(&self) -> String {
        format!(
            "INGREDIENTS\n{}\n\nINSTRUCTIONS\n{}",
            self.ingredients.join(", "),
            self.instructions
        )
    }
}

impl Default for Recipe {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_INGREDIENTS)
    }
}
