use crate::core::models::material::{CategoryFilter, Material};

pub const EMPTY_TITLE: &str = "No materials found";
pub const EMPTY_HINT: &str = "Try adjusting your search or filters";

/// Records whose name or description contains `query` (case-insensitively) and whose
/// category passes `filter`, in catalogue order.
pub fn filter_materials<'a>(
    catalog: &'a [Material],
    query: &str,
    filter: CategoryFilter,
) -> Vec<&'a Material> {
    catalog
        .iter()
        .filter(|m| filter.matches(m.category) && m.matches_query(query))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Listing<'a> {
    Items(Vec<&'a Material>),
    Empty { title: &'static str, hint: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
pub enum MaterialsEvent {
    SetQuery(String),
    SetFilter(CategoryFilter),
    /// Select by material id. Ids are not checked against the catalogue here.
    Select(String),
    ToggleComparison,
    ClearSelection,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialsState {
    pub query: String,
    pub filter: CategoryFilter,
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub comparison_mode: bool,
}

impl MaterialsState {
    pub fn apply(mut self, event: MaterialsEvent) -> Self {
        match event {
            MaterialsEvent::SetQuery(query) => self.query = query,
            MaterialsEvent::SetFilter(filter) => self.filter = filter,
            MaterialsEvent::Select(id) => {
                if self.comparison_mode && self.primary.is_some() {
                    if self.primary.as_deref() != Some(id.as_str()) {
                        self.secondary = Some(id);
                    }
                } else {
                    self.primary = Some(id);
                }
            }
            MaterialsEvent::ToggleComparison => {
                self.comparison_mode = !self.comparison_mode;
                if !self.comparison_mode {
                    self.secondary = None;
                }
            }
            MaterialsEvent::ClearSelection => {
                self.primary = None;
                self.secondary = None;
            }
        }
        self
    }

    pub fn visible<'a>(&self, catalog: &'a [Material]) -> Vec<&'a Material> {
        filter_materials(catalog, &self.query, self.filter)
    }

    pub fn listing<'a>(&self, catalog: &'a [Material]) -> Listing<'a> {
        let items = self.visible(catalog);
        if items.is_empty() {
            Listing::Empty {
                title: EMPTY_TITLE,
                hint: EMPTY_HINT,
            }
        } else {
            Listing::Items(items)
        }
    }

    /// The pair to compare, once both slots are filled.
    pub fn comparison_pair<'a>(&self, catalog: &'a [Material]) -> Option<(&'a Material, &'a Material)> {
        let find = |id: &Option<String>| {
            id.as_deref()
                .and_then(|id| catalog.iter().find(|m| m.id == id))
        };
        find(&self.primary).zip(find(&self.secondary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::materials::materials;
    use crate::core::models::material::MaterialCategory;

    fn ids(found: &[&Material]) -> Vec<String> {
        found.iter().map(|m| m.id.clone()).collect()
    }

    #[test]
    fn filter_matches_exactly_the_expected_records_for_every_query_and_category() {
        let catalog = materials();
        let queries = ["", "alloy", "ALUMINUM", "carbon", "semiconductor", "zzz", "STEEL"];
        let filters = std::iter::once(CategoryFilter::All)
            .chain(MaterialCategory::ALL.into_iter().map(CategoryFilter::Only));
        for filter in filters {
            for query in queries {
                let expected: Vec<String> = catalog
                    .iter()
                    .filter(|m| {
                        let q = query.to_lowercase();
                        (m.name.to_lowercase().contains(&q)
                            || m.description.to_lowercase().contains(&q))
                            && (filter == CategoryFilter::All
                                || filter == CategoryFilter::Only(m.category))
                    })
                    .map(|m| m.id.clone())
                    .collect();
                assert_eq!(
                    ids(&filter_materials(catalog, query, filter)),
                    expected,
                    "query={query:?} filter={filter:?}"
                );
            }
        }
    }

    #[test]
    fn metal_filter_finds_the_three_metals() {
        let found = filter_materials(materials(), "", "metal".parse().unwrap());
        assert_eq!(ids(&found), vec!["2", "4", "5"]);
    }

    #[test]
    fn query_searches_description_too() {
        let found = filter_materials(materials(), "corrosion", CategoryFilter::All);
        assert_eq!(ids(&found), vec!["5"]);
    }

    #[test]
    fn empty_result_renders_explicit_message() {
        let state = MaterialsState::default()
            .apply(MaterialsEvent::SetFilter(CategoryFilter::Only(MaterialCategory::Polymer)));
        assert_eq!(
            state.listing(materials()),
            Listing::Empty {
                title: "No materials found",
                hint: "Try adjusting your search or filters"
            }
        );
    }

    #[test]
    fn selection_replaces_outside_comparison_mode() {
        let state = MaterialsState::default()
            .apply(MaterialsEvent::Select("1".into()))
            .apply(MaterialsEvent::Select("2".into()));
        assert_eq!(state.primary.as_deref(), Some("2"));
        assert_eq!(state.secondary, None);
    }

    #[test]
    fn comparison_mode_fills_second_slot() {
        let state = MaterialsState::default()
            .apply(MaterialsEvent::Select("1".into()))
            .apply(MaterialsEvent::ToggleComparison)
            .apply(MaterialsEvent::Select("1".into()))
            .apply(MaterialsEvent::Select("4".into()));
        assert_eq!(state.primary.as_deref(), Some("1"));
        assert_eq!(state.secondary.as_deref(), Some("4"));
        let (a, b) = state.comparison_pair(materials()).unwrap();
        assert_eq!((a.name.as_str(), b.name.as_str()), ("Silicon", "Aluminum 6061"));

        let state = state.apply(MaterialsEvent::Select("5".into()));
        assert_eq!(state.secondary.as_deref(), Some("5"));
    }

    #[test]
    fn first_selection_in_comparison_mode_goes_to_primary() {
        let state = MaterialsState::default()
            .apply(MaterialsEvent::ToggleComparison)
            .apply(MaterialsEvent::Select("3".into()));
        assert_eq!(state.primary.as_deref(), Some("3"));
        assert!(state.comparison_pair(materials()).is_none());
    }

    #[test]
    fn leaving_comparison_mode_drops_second_slot() {
        let state = MaterialsState::default()
            .apply(MaterialsEvent::ToggleComparison)
            .apply(MaterialsEvent::Select("1".into()))
            .apply(MaterialsEvent::Select("2".into()))
            .apply(MaterialsEvent::ToggleComparison);
        assert_eq!(state.primary.as_deref(), Some("1"));
        assert_eq!(state.secondary, None);
        let cleared = state.apply(MaterialsEvent::ClearSelection);
        assert_eq!(cleared.primary, None);
    }
}
