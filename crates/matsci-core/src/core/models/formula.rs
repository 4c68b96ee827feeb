use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormulaVariable {
    pub symbol: String,
    pub name: String,
    pub unit: Option<String>,
}

/// A reference entry of the formula library.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Formula {
    pub id: String,
    pub name: String,
    pub latex: String,
    pub description: String,
    pub category: String,
    pub subcategory: String,
    #[serde(default)]
    pub variables: Vec<FormulaVariable>,
}

impl Formula {
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}
