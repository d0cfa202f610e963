/*
 * Responsibility
 * - drinks request/response DTOs
 * - two representations: public summary (no ingredient names) vs. full detail
 */
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub color: String,
    pub parts: i64,
}

/// Public representation of one recipe part: proportions without names.
#[derive(Debug, Serialize)]
pub struct IngredientSummary {
    pub color: String,
    pub parts: i64,
}

impl From<Ingredient> for IngredientSummary {
    fn from(i: Ingredient) -> Self {
        Self {
            color: i.color,
            parts: i.parts,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DrinkSummary {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<IngredientSummary>,
}

#[derive(Debug, Serialize)]
pub struct DrinkDetail {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

#[derive(Debug, Serialize)]
pub struct DrinksResponse<T> {
    pub success: bool,
    pub drinks: Vec<T>,
}

impl<T> DrinksResponse<T> {
    pub fn of(drinks: Vec<T>) -> Self {
        Self {
            success: true,
            drinks,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub delete: i64,
}

fn validate_ingredients(recipe: &[Ingredient]) -> Result<(), &'static str> {
    for ingredient in recipe {
        if ingredient.name.trim().is_empty() {
            return Err("ingredient name is required");
        }
        if ingredient.color.trim().is_empty() {
            return Err("ingredient color is required");
        }
        if ingredient.parts < 1 {
            return Err("ingredient parts must be at least 1");
        }
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct CreateDrinkRequest {
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

impl CreateDrinkRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title is required");
        }
        validate_ingredients(&self.recipe)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateDrinkRequest {
    pub title: Option<String>,
    pub recipe: Option<Vec<Ingredient>>,
}

impl UpdateDrinkRequest {
    /// At least one field must be present, and a present field must carry a
    /// real value (an empty title/recipe is rejected rather than silently
    /// falling back to the stored one).
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.is_none() && self.recipe.is_none() {
            return Err("title or recipe is required");
        }
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err("title cannot be empty");
        }
        if let Some(recipe) = &self.recipe {
            if recipe.is_empty() {
                return Err("recipe cannot be empty");
            }
            validate_ingredients(recipe)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(name: &str, color: &str, parts: i64) -> Ingredient {
        Ingredient {
            name: name.into(),
            color: color.into(),
            parts,
        }
    }

    #[test]
    fn create_rejects_empty_title() {
        let req = CreateDrinkRequest {
            title: "  ".into(),
            recipe: vec![ingredient("milk", "white", 1)],
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_rejects_zero_parts() {
        let req = CreateDrinkRequest {
            title: "Flat White".into(),
            recipe: vec![ingredient("milk", "white", 0)],
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_accepts_well_formed_request() {
        let req = CreateDrinkRequest {
            title: "Flat White".into(),
            recipe: vec![
                ingredient("espresso", "brown", 1),
                ingredient("milk", "white", 3),
            ],
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn update_requires_at_least_one_field() {
        let req = UpdateDrinkRequest {
            title: None,
            recipe: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn update_rejects_present_but_empty_values() {
        let req = UpdateDrinkRequest {
            title: Some("".into()),
            recipe: None,
        };
        assert!(req.validate().is_err());

        let req = UpdateDrinkRequest {
            title: None,
            recipe: Some(vec![]),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn update_accepts_single_field() {
        let req = UpdateDrinkRequest {
            title: Some("Cortado".into()),
            recipe: None,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn summary_drops_ingredient_names() {
        let summary = IngredientSummary::from(ingredient("espresso", "brown", 2));
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "color": "brown", "parts": 2 })
        );
    }
}
