//! Search and category filtering of the truck catalog.
//!
//! The filter is a pure function of the catalog and the current
//! [`FilterState`]. It never reorders: the output is always a subsequence of
//! the catalog in catalog order.

use super::truck::{Cuisine, TruckRecord};

/// User-controlled filter inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Free text matched case-insensitively against truck names. Not trimmed.
    pub search_text: String,
    /// Selected cuisine chip, `None` for all cuisines.
    pub category: Option<Cuisine>,
}

impl FilterState {
    #[must_use]
    pub fn new(search_text: impl Into<String>, category: Option<Cuisine>) -> Self {
        Self {
            search_text: search_text.into(),
            category,
        }
    }

    /// Whether a single record passes both predicates.
    #[must_use]
    pub fn matches(&self, truck: &TruckRecord) -> bool {
        let matches_category = self.category.map_or(true, |c| truck.cuisine == c);
        matches_category && contains_ignore_case(&truck.name, &self.search_text)
    }

    /// Returns a copy with the chip toggled: selecting the active chip clears it.
    #[must_use]
    pub fn toggle_category(&self, cuisine: Cuisine) -> Self {
        let category = if self.category == Some(cuisine) {
            None
        } else {
            Some(cuisine)
        };
        Self {
            search_text: self.search_text.clone(),
            category,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search_text.is_empty() && self.category.is_none()
    }
}

/// Filters a catalog slice, preserving relative order.
///
/// # Example
///
/// ```
/// use truckmap::catalog::builtin_catalog;
/// use truckmap::domain::{filter, Cuisine, FilterState};
///
/// let catalog = builtin_catalog();
/// let tacos = filter(catalog.trucks(), &FilterState::new("", Some(Cuisine::Tacos)));
/// assert_eq!(tacos.len(), 1);
/// assert_eq!(tacos[0].name, "Taco Town");
/// ```
#[must_use]
pub fn filter(trucks: &[TruckRecord], state: &FilterState) -> Vec<TruckRecord> {
    trucks.iter().filter(|t| state.matches(t)).cloned().collect()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || match_range(haystack, needle).is_some()
}

/// Character range `(start, end)` of the first case-insensitive occurrence of
/// `needle` in `haystack`, for match highlighting.
///
/// Both strings are lowercased character by character and compared as
/// strings, the same comparison [`filter`] uses, so every truck that passes
/// the search gets a highlight. The range is in `haystack` characters, which
/// keeps highlighted slices on UTF-8 boundaries even when lowercasing changes
/// a character's length. Returns `None` for an empty needle or no match.
///
/// ```
/// use truckmap::domain::match_range;
///
/// assert_eq!(match_range("Vegan Vibes", "VIB"), Some((6, 9)));
/// assert_eq!(match_range("Taco Town", ""), None);
/// ```
#[must_use]
pub fn match_range(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return None;
    }
    let needle: String = needle.chars().flat_map(char::to_lowercase).collect();

    let mut folded = String::with_capacity(haystack.len());
    let mut char_ends = Vec::with_capacity(haystack.len());
    for c in haystack.chars() {
        folded.extend(c.to_lowercase());
        char_ends.push(folded.len());
    }

    let start_byte = folded.find(&needle)?;
    let end_byte = start_byte + needle.len();
    let start = char_ends.iter().position(|&end| end > start_byte)?;
    let end = char_ends.iter().position(|&end| end >= end_byte)? + 1;
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_catalog;
    use crate::domain::{Coordinate, TruckId};

    fn names(trucks: &[TruckRecord]) -> Vec<&str> {
        trucks.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn category_and_search_scenarios() {
        let catalog = builtin_catalog();

        let tacos = filter(catalog.trucks(), &FilterState::new("", Some(Cuisine::Tacos)));
        assert_eq!(names(&tacos), vec!["Taco Town"]);

        let veg = filter(catalog.trucks(), &FilterState::new("veg", None));
        assert_eq!(names(&veg), vec!["Vegan Vibes"]);
    }

    #[test]
    fn empty_state_keeps_everything_in_order() {
        let catalog = builtin_catalog();
        let all = filter(catalog.trucks(), &FilterState::default());
        assert_eq!(all, catalog.trucks().to_vec());
    }

    #[test]
    fn output_is_an_ordered_subsequence_and_idempotent() {
        let catalog = builtin_catalog();
        let states = [
            FilterState::new("o", None),
            FilterState::new("B", Some(Cuisine::Burgers)),
            FilterState::new("zzz", None),
            FilterState::new("", Some(Cuisine::Vegan)),
            FilterState::new(" ", None),
        ];

        for state in &states {
            let out = filter(catalog.trucks(), state);

            let mut cursor = catalog.trucks().iter();
            for truck in &out {
                assert!(cursor.any(|c| c == truck), "{state:?} reordered or invented {}", truck.name);
            }

            assert_eq!(filter(&out, state), out);
        }
    }

    #[test]
    fn whitespace_is_compared_literally() {
        let catalog = builtin_catalog();
        let spaced = filter(catalog.trucks(), &FilterState::new(" ", None));
        assert_eq!(spaced.len(), 3);
        let padded = filter(catalog.trucks(), &FilterState::new(" taco", None));
        assert!(padded.is_empty());
    }

    #[test]
    fn empty_catalog_yields_empty_result() {
        assert!(filter(&[], &FilterState::new("taco", Some(Cuisine::Tacos))).is_empty());
    }

    #[test]
    fn toggling_the_active_chip_clears_it() {
        let state = FilterState::new("b", Some(Cuisine::Burgers));
        assert_eq!(state.toggle_category(Cuisine::Burgers).category, None);
        assert_eq!(state.toggle_category(Cuisine::Vegan).category, Some(Cuisine::Vegan));
        assert_eq!(state.toggle_category(Cuisine::Vegan).search_text, "b");
    }

    #[test]
    fn match_range_is_character_based() {
        let truck = TruckRecord {
            id: TruckId(9),
            name: "Crème Brûlée".to_string(),
            description: None,
            cuisine: Cuisine::Vegan,
            rating: 4.0,
            popularity: 1,
            coordinate: Coordinate::new(0.0, 0.0),
            logo: None,
        };
        assert_eq!(match_range(&truck.name, "brû"), Some((6, 9)));
        assert_eq!(match_range("abc", "abcd"), None);
    }

    #[test]
    fn every_search_hit_gets_a_highlight() {
        let truck = TruckRecord {
            id: TruckId(7),
            name: "İzmir Grill".to_string(),
            description: None,
            cuisine: Cuisine::Burgers,
            rating: 4.0,
            popularity: 1,
            coordinate: Coordinate::new(0.0, 0.0),
            logo: None,
        };

        for needle in ["i", "İz", "ZMIR", "r g"] {
            let hits = filter(std::slice::from_ref(&truck), &FilterState::new(needle, None));
            assert_eq!(hits.len(), 1, "{needle:?} should match");
            assert!(match_range(&truck.name, needle).is_some(), "{needle:?} has no highlight");
        }

        assert_eq!(match_range(&truck.name, "i"), Some((0, 1)));
        assert_eq!(match_range(&truck.name, "İz"), Some((0, 2)));
        assert_eq!(match_range(&truck.name, "zmir"), Some((1, 5)));
        assert_eq!(match_range(&truck.name, "grill"), Some((6, 11)));
    }
}
