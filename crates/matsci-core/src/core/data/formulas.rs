use super::{DataError, LookupError};
use crate::core::models::formula::Formula;
use once_cell::sync::OnceCell;
use serde::Deserialize;

const TABLE_NAME: &str = "formulas.toml";
const FORMULAS_TOML: &str = include_str!("formulas.toml");

static FORMULAS: OnceCell<Vec<Formula>> = OnceCell::new();

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FormulaLibrary {
    formula: Vec<Formula>,
}

pub fn formula_library() -> Result<&'static [Formula], DataError> {
    FORMULAS
        .get_or_try_init(|| {
            toml::from_str::<FormulaLibrary>(FORMULAS_TOML)
                .map(|lib| lib.formula)
                .map_err(|source| DataError::Toml {
                    table: TABLE_NAME,
                    source,
                })
        })
        .map(Vec::as_slice)
}

/// Distinct categories in library order.
pub fn formula_categories(formulas: &[Formula]) -> Vec<&str> {
    let mut categories: Vec<&str> = Vec::new();
    for f in formulas {
        if !categories.contains(&f.category.as_str()) {
            categories.push(&f.category);
        }
    }
    categories
}

/// Filters by name/description substring and, when given, a category (both case-insensitive).
pub fn search_formulas<'a>(
    formulas: &'a [Formula],
    query: &str,
    category: Option<&str>,
) -> Vec<&'a Formula> {
    formulas
        .iter()
        .filter(|f| f.matches_query(query))
        .filter(|f| {
            category.is_none_or(|c| c.eq_ignore_ascii_case("all") || f.category.eq_ignore_ascii_case(c))
        })
        .collect()
}

pub fn find_formula<'a>(formulas: &'a [Formula], id: &str) -> Result<&'a Formula, LookupError> {
    formulas
        .iter()
        .find(|f| f.id == id)
        .ok_or_else(|| LookupError::FormulaNotFound(id.to_string()))
}
