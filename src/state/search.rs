/// Search filter composition and result state
///
/// The UI edits a loose `FilterForm`; every request is built from it
/// through `SearchQuery::from_form`, which enforces the one rule the
/// workflow has: name search and attribute search are mutually
/// exclusive. A non-empty name drops every breed/zip/age filter, and
/// unset fields never reach the query string at all.

use crate::api::models::Dog;

/// Fixed page size for every search request
pub const PAGE_SIZE: u64 = 25;

/// Sort direction for the single supported sort key (breed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn as_param(self) -> &'static str {
        match self {
            SortDirection::Ascending => "breed:asc",
            SortDirection::Descending => "breed:desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortDirection::Ascending => "Ascending",
            SortDirection::Descending => "Descending",
        }
    }
}

/// The filter state as the user edits it.
///
/// Age fields hold the raw text-input contents; they are parsed when
/// the query is built. `breed` empty means "all breeds".
#[derive(Debug, Clone, Default)]
pub struct FilterForm {
    pub name: String,
    pub breed: String,
    pub zip_code: String,
    pub age_min: String,
    pub age_max: String,
    /// Zero-based page index
    pub page: u64,
    pub sort: SortDirection,
}

impl FilterForm {
    /// Set the minimum age, dragging the maximum up if the new
    /// minimum would cross it.
    pub fn set_age_min(&mut self, value: String) {
        if let (Ok(min), Ok(max)) = (
            value.trim().parse::<u32>(),
            self.age_max.trim().parse::<u32>(),
        ) {
            if min > max {
                self.age_max = value.clone();
            }
        }
        self.age_min = value;
    }

    /// Set the maximum age, dragging the minimum down if the new
    /// maximum would cross it.
    pub fn set_age_max(&mut self, value: String) {
        if let (Ok(max), Ok(min)) = (
            value.trim().parse::<u32>(),
            self.age_min.trim().parse::<u32>(),
        ) {
            if max < min {
                self.age_min = value.clone();
            }
        }
        self.age_max = value;
    }

    /// Clear every attribute filter, keeping name/page/sort.
    /// The UI does this when the user starts a name search.
    pub fn clear_attributes(&mut self) {
        self.breed.clear();
        self.zip_code.clear();
        self.age_min.clear();
        self.age_max.clear();
    }
}

/// A fully validated search request.
///
/// Construction goes through `from_form`; fields that are `None` or
/// empty never produce a query pair.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    name: Option<String>,
    breeds: Vec<String>,
    zip_codes: Vec<String>,
    age_min: Option<u32>,
    age_max: Option<u32>,
    size: u64,
    from: u64,
    sort: SortDirection,
}

impl SearchQuery {
    pub fn from_form(form: &FilterForm) -> Self {
        let name = form.name.trim();

        let mut query = SearchQuery {
            name: None,
            breeds: Vec::new(),
            zip_codes: Vec::new(),
            age_min: None,
            age_max: None,
            size: PAGE_SIZE,
            from: form.page * PAGE_SIZE,
            sort: form.sort,
        };

        if !name.is_empty() {
            // Name mode: every attribute filter is dropped, even if
            // the form still holds stale values.
            query.name = Some(name.to_lowercase());
            return query;
        }

        if !form.breed.trim().is_empty() {
            query.breeds.push(form.breed.trim().to_string());
        }
        if !form.zip_code.trim().is_empty() {
            query.zip_codes.push(form.zip_code.trim().to_string());
        }
        query.age_min = form.age_min.trim().parse().ok();
        query.age_max = form.age_max.trim().parse().ok();

        query
    }

    /// The exact key/value pairs to send. Repeated keys encode the
    /// array parameters (breeds, zipCodes).
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("size".to_string(), self.size.to_string()),
            ("from".to_string(), self.from.to_string()),
            ("sort".to_string(), self.sort.as_param().to_string()),
        ];

        if let Some(name) = &self.name {
            pairs.push(("name".to_string(), name.clone()));
        }
        for breed in &self.breeds {
            pairs.push(("breeds".to_string(), breed.clone()));
        }
        for zip in &self.zip_codes {
            pairs.push(("zipCodes".to_string(), zip.clone()));
        }
        if let Some(min) = self.age_min {
            pairs.push(("ageMin".to_string(), min.to_string()));
        }
        if let Some(max) = self.age_max {
            pairs.push(("ageMax".to_string(), max.to_string()));
        }

        pairs
    }
}

/// Display state of the result list. "Not yet searched", "loading",
/// "no results", and "results" are four distinct states the view
/// renders differently.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultsState {
    #[default]
    Idle,
    Loading,
    Empty,
    Loaded(Vec<Dog>),
}

/// Case-insensitive substring pass over fetched records.
///
/// The service already filters by name when asked; this second pass
/// just guards against lenient server matching. An empty needle keeps
/// everything.
pub fn filter_by_name(mut dogs: Vec<Dog>, name: &str) -> Vec<Dog> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return dogs;
    }
    dogs.retain(|dog| dog.name.to_lowercase().contains(&needle));
    dogs
}

/// Number of pages for a given total at the fixed page size.
pub fn page_count(total: u64) -> u64 {
    total.div_ceil(PAGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs_map(query: &SearchQuery) -> Vec<(String, String)> {
        query.query_pairs()
    }

    fn keys(query: &SearchQuery) -> Vec<String> {
        query.query_pairs().into_iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn test_name_mode_drops_attribute_filters() {
        let form = FilterForm {
            name: "Rex".to_string(),
            breed: "Poodle".to_string(),
            zip_code: "60601".to_string(),
            age_min: "2".to_string(),
            age_max: "7".to_string(),
            ..FilterForm::default()
        };

        let query = SearchQuery::from_form(&form);
        let pairs = pairs_map(&query);

        assert!(pairs.contains(&("name".to_string(), "rex".to_string())));
        for key in ["breeds", "zipCodes", "ageMin", "ageMax"] {
            assert!(!keys(&query).iter().any(|k| k == key), "unexpected {key}");
        }
        // Pagination and sort ride along in either mode.
        assert!(pairs.contains(&("size".to_string(), "25".to_string())));
        assert!(pairs.contains(&("from".to_string(), "0".to_string())));
        assert!(pairs.contains(&("sort".to_string(), "breed:asc".to_string())));
    }

    #[test]
    fn test_whitespace_name_is_not_name_mode() {
        let form = FilterForm {
            name: "   ".to_string(),
            breed: "Poodle".to_string(),
            ..FilterForm::default()
        };

        let query = SearchQuery::from_form(&form);

        assert!(!keys(&query).iter().any(|k| k == "name"));
        assert!(pairs_map(&query).contains(&("breeds".to_string(), "Poodle".to_string())));
    }

    #[test]
    fn test_unset_fields_are_omitted_entirely() {
        let query = SearchQuery::from_form(&FilterForm::default());
        assert_eq!(keys(&query), ["size", "from", "sort"]);
    }

    #[test]
    fn test_name_is_lowercased() {
        let form = FilterForm {
            name: "ReXy".to_string(),
            ..FilterForm::default()
        };
        let query = SearchQuery::from_form(&form);
        assert!(pairs_map(&query).contains(&("name".to_string(), "rexy".to_string())));
    }

    #[test]
    fn test_offset_follows_page_index() {
        let mut form = FilterForm::default();

        form.page = 0;
        assert!(pairs_map(&SearchQuery::from_form(&form))
            .contains(&("from".to_string(), "0".to_string())));

        form.page = 2;
        assert!(pairs_map(&SearchQuery::from_form(&form))
            .contains(&("from".to_string(), "50".to_string())));
    }

    #[test]
    fn test_sort_direction_toggles_and_encodes() {
        let mut form = FilterForm::default();
        form.sort = form.sort.toggled();
        let query = SearchQuery::from_form(&form);
        assert!(pairs_map(&query).contains(&("sort".to_string(), "breed:desc".to_string())));
        assert_eq!(form.sort.toggled(), SortDirection::Ascending);
    }

    #[test]
    fn test_age_min_drags_max_up() {
        let mut form = FilterForm::default();
        form.set_age_max("4".to_string());
        form.set_age_min("6".to_string());
        assert_eq!(form.age_max, "6");
        assert_eq!(form.age_min, "6");
    }

    #[test]
    fn test_age_max_drags_min_down() {
        let mut form = FilterForm::default();
        form.set_age_min("8".to_string());
        form.set_age_max("3".to_string());
        assert_eq!(form.age_min, "3");
        assert_eq!(form.age_max, "3");
    }

    #[test]
    fn test_non_numeric_age_is_ignored_in_query() {
        let form = FilterForm {
            age_min: "old".to_string(),
            age_max: "".to_string(),
            ..FilterForm::default()
        };
        let query = SearchQuery::from_form(&form);
        assert_eq!(keys(&query), ["size", "from", "sort"]);
    }

    fn dog(id: &str, name: &str) -> Dog {
        Dog {
            id: id.to_string(),
            img: String::new(),
            name: name.to_string(),
            age: 1,
            zip_code: "00000".to_string(),
            breed: "Mixed".to_string(),
        }
    }

    #[test]
    fn test_filter_by_name_is_case_insensitive_substring() {
        let dogs = vec![dog("1", "Rexford"), dog("2", "Bella"), dog("3", "TREX")];
        let kept = filter_by_name(dogs, "rex");
        let names: Vec<_> = kept.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Rexford", "TREX"]);
    }

    #[test]
    fn test_filter_by_name_blank_keeps_all() {
        let dogs = vec![dog("1", "Rex"), dog("2", "Bella")];
        assert_eq!(filter_by_name(dogs.clone(), "  "), dogs);
    }

    #[test]
    fn test_page_count_rounds_up() {
        assert_eq!(page_count(0), 0);
        assert_eq!(page_count(25), 1);
        assert_eq!(page_count(26), 2);
        assert_eq!(page_count(120), 5);
    }
}
