//! Filter resolver: narrows a listing set by category, brand, model and text.

use super::criteria::{SearchQuery, SearchScope};
use crate::domain::Listing;

/// Free-text match applied on the search surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatch {
    pub query: SearchQuery,
    pub scope: SearchScope,
}

impl TextMatch {
    /// Whether `listing` matches the query.
    ///
    /// The title (and on the full scope the description) must contain the
    /// query ignoring case. A tag matches when it equals or contains the
    /// query ignoring case, so `Ryzen` finds a listing tagged `Ryzen 5`.
    pub fn matches(&self, listing: &Listing) -> bool {
        let needle = self.query.as_str().to_lowercase();
        let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

        contains(listing.title())
            || listing.tags().iter().any(|tag| contains(tag))
            || (self.scope == SearchScope::Full && contains(listing.description()))
    }
}

/// Conjunction of the optional filter rules.
///
/// Unset rules accept every listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub text: Option<TextMatch>,
}

/// Substring rule shared by brand and model selection: some tag contains the
/// selection, or the dedicated field equals it exactly.
fn tag_or_field_matches(listing: &Listing, selection: &str, field: Option<&str>) -> bool {
    listing.tags().iter().any(|tag| tag.contains(selection)) || field == Some(selection)
}

/// Whether `listing` satisfies every rule of `filter`.
pub fn matches(listing: &Listing, filter: &ListingFilter) -> bool {
    if let Some(category) = filter.category.as_deref() {
        if listing.category() != category {
            return false;
        }
    }
    if let Some(brand) = filter.brand.as_deref() {
        if !tag_or_field_matches(listing, brand, listing.brand()) {
            return false;
        }
        // A model only narrows a brand selection; on its own it is ignored.
        if let Some(model) = filter.model.as_deref() {
            if !tag_or_field_matches(listing, model, listing.model()) {
                return false;
            }
        }
    }
    filter.text.as_ref().is_none_or(|text| text.matches(listing))
}

/// Keep the listings satisfying `filter`, preserving their relative order.
///
/// # Examples
/// ```
/// use storefront::domain::search::{ListingFilter, resolve};
///
/// let filter = ListingFilter {
///     category: Some("CPU".into()),
///     ..ListingFilter::default()
/// };
/// assert!(resolve(Vec::new(), &filter).is_empty());
/// ```
pub fn resolve(mut listings: Vec<Listing>, filter: &ListingFilter) -> Vec<Listing> {
    listings.retain(|listing| matches(listing, filter));
    listings
}

#[cfg(test)]
mod tests {
    //! Matching rules and their precedence.

    use rstest::{fixture, rstest};
    use rstest_bdd_macros::{given, then, when};

    use super::*;
    use crate::domain::listing::fixtures::ListingBuilder;

    fn text(query: &str, scope: SearchScope) -> Option<TextMatch> {
        Some(TextMatch {
            query: SearchQuery::new(query).expect("query is not blank"),
            scope,
        })
    }

    fn category(name: &str) -> ListingFilter {
        ListingFilter {
            category: Some(name.to_owned()),
            ..ListingFilter::default()
        }
    }

    fn titles(listings: &[Listing]) -> Vec<&str> {
        listings.iter().map(Listing::title).collect()
    }

    #[fixture]
    fn shelf() -> Vec<Listing> {
        vec![
            ListingBuilder::new("Ryzen 7 5800X")
                .category("CPU")
                .brand("AMD")
                .tags(&["Ryzen 7", "Socket AM4"])
                .build(),
            ListingBuilder::new("Core i7-13700K")
                .category("CPU")
                .brand("インテル")
                .model("Core i7")
                .build(),
            ListingBuilder::new("Radeon RX 7900 XT")
                .category("GPU")
                .tags(&["AMD", "RX 7900 XT"])
                .build(),
            ListingBuilder::new("Athlon 3000G")
                .category("CPU")
                .tags(&["AMD Athlon"])
                .build(),
        ]
    }

    #[given("three listings in categories CPU, GPU and CPU")]
    fn three_listings_in_categories_cpu_gpu_and_cpu() -> Vec<Listing> {
        vec![
            ListingBuilder::new("first").category("CPU").build(),
            ListingBuilder::new("second").category("GPU").build(),
            ListingBuilder::new("third").category("CPU").build(),
        ]
    }

    #[when("the shopper filters by category CPU")]
    fn the_shopper_filters_by_category_cpu(listings: Vec<Listing>) -> Vec<Listing> {
        resolve(listings, &category("CPU"))
    }

    #[then("the two CPU listings remain in their original order")]
    fn the_two_cpu_listings_remain_in_their_original_order(result: Vec<Listing>) {
        assert_eq!(titles(&result), vec!["first", "third"]);
    }

    #[rstest]
    fn category_filter_keeps_relative_order() {
        let listings = three_listings_in_categories_cpu_gpu_and_cpu();
        let result = the_shopper_filters_by_category_cpu(listings);
        the_two_cpu_listings_remain_in_their_original_order(result);
    }

    #[rstest]
    #[case("CPU", vec!["Ryzen 7 5800X", "Core i7-13700K", "Athlon 3000G"])]
    #[case("GPU", vec!["Radeon RX 7900 XT"])]
    #[case("cpu", vec![])]
    #[case("CP", vec![])]
    fn category_match_is_exact_and_case_sensitive(
        shelf: Vec<Listing>,
        #[case] name: &str,
        #[case] expected: Vec<&str>,
    ) {
        let result = resolve(shelf, &category(name));
        assert!(result.iter().all(|listing| listing.category() == name));
        assert_eq!(titles(&result), expected);
    }

    #[rstest]
    fn brand_matches_tag_substring_or_brand_field(shelf: Vec<Listing>) {
        let filter = ListingFilter {
            brand: Some("AMD".to_owned()),
            ..category("CPU")
        };
        let result = resolve(shelf, &filter);
        // field equality for the Ryzen, tag substring for "AMD Athlon"
        assert_eq!(titles(&result), vec!["Ryzen 7 5800X", "Athlon 3000G"]);
        for listing in &result {
            assert!(
                listing.brand() == Some("AMD") || listing.tags().iter().any(|tag| tag.contains("AMD"))
            );
        }
    }

    #[rstest]
    fn brand_filter_does_not_expand_synonyms(shelf: Vec<Listing>) {
        let filter = ListingFilter {
            brand: Some("Intel".to_owned()),
            ..category("CPU")
        };
        assert!(resolve(shelf, &filter).is_empty());
    }

    #[rstest]
    fn model_matches_tag_substring_or_model_field(shelf: Vec<Listing>) {
        let by_field = ListingFilter {
            brand: Some("インテル".to_owned()),
            model: Some("Core i7".to_owned()),
            ..category("CPU")
        };
        assert_eq!(titles(&resolve(shelf.clone(), &by_field)), vec!["Core i7-13700K"]);

        let by_tag = ListingFilter {
            brand: Some("AMD".to_owned()),
            model: Some("Ryzen".to_owned()),
            ..category("CPU")
        };
        assert_eq!(titles(&resolve(shelf, &by_tag)), vec!["Ryzen 7 5800X"]);
    }

    #[rstest]
    #[case::model_field("Core i7")]
    #[case::model_tag("Ryzen")]
    #[case::unknown_model("Pentium")]
    fn model_without_brand_keeps_the_whole_category(shelf: Vec<Listing>, #[case] model: &str) {
        let filter = ListingFilter {
            model: Some(model.to_owned()),
            ..category("CPU")
        };
        assert_eq!(
            titles(&resolve(shelf, &filter)),
            vec!["Ryzen 7 5800X", "Core i7-13700K", "Athlon 3000G"]
        );
    }

    #[rstest]
    fn query_matches_title_or_tag() {
        let listings = vec![
            ListingBuilder::new("AMD Ryzen 7 5800X").build(),
            ListingBuilder::new("Budget gaming CPU").tags(&["Ryzen 5"]).build(),
            ListingBuilder::new("Core i5-12400").build(),
        ];
        let filter = ListingFilter {
            text: text("Ryzen", SearchScope::Quick),
            ..ListingFilter::default()
        };
        assert_eq!(
            titles(&resolve(listings, &filter)),
            vec!["AMD Ryzen 7 5800X", "Budget gaming CPU"]
        );
    }

    #[rstest]
    #[case(SearchScope::Full, true)]
    #[case(SearchScope::Quick, false)]
    fn description_matches_only_on_full_scope(#[case] scope: SearchScope, #[case] expected: bool) {
        let listing = ListingBuilder::new("Graphics card")
            .description("Includes the original RTX box")
            .build();
        let filter = ListingFilter {
            text: text("rtx", scope),
            ..ListingFilter::default()
        };
        assert_eq!(matches(&listing, &filter), expected);
    }

    #[rstest]
    fn title_match_ignores_case() {
        let listing = ListingBuilder::new("GeForce RTX 4070").build();
        let filter = ListingFilter {
            text: text("geforce", SearchScope::Quick),
            ..ListingFilter::default()
        };
        assert!(matches(&listing, &filter));
    }

    #[rstest]
    fn empty_filter_keeps_everything(shelf: Vec<Listing>) {
        let count = shelf.len();
        assert_eq!(resolve(shelf, &ListingFilter::default()).len(), count);
    }

    #[rstest]
    fn empty_input_is_empty_output() {
        assert!(resolve(Vec::new(), &category("CPU")).is_empty());
    }
}
