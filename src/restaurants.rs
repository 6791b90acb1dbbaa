//! Restaurant search pipeline
//!
//! Queries the Overpass interpreter for restaurants around the configured
//! coordinates and normalizes the raw elements into display-ready cards,
//! filtered by a cuisine category. There is no fallback list here; a failed
//! query surfaces as an empty result.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{LocationConfig, RestaurantsConfig};

/// Placeholder shown when a restaurant has no phone tag
pub const PHONE_PLACEHOLDER: &str = "Please refer to the website for a phone number.";
/// Placeholder shown when a restaurant has no website tag
pub const WEBSITE_PLACEHOLDER: &str = "There is no website available for this restaurant";

/// Cuisine categories offered by the search dropdown.
///
/// Each category maps to a set of lowercase keyword synonyms matched against
/// the semicolon-delimited `cuisine` tag. `Other` carries no keywords and
/// passes everything through unfiltered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cuisine {
    American,
    Asian,
    Bbq,
    Indian,
    ItalianPizza,
    Seafood,
    Other,
}

impl Cuisine {
    pub const ALL: [Cuisine; 7] = [
        Cuisine::American,
        Cuisine::Asian,
        Cuisine::Bbq,
        Cuisine::Indian,
        Cuisine::ItalianPizza,
        Cuisine::Seafood,
        Cuisine::Other,
    ];

    /// Keyword synonyms matched against an element's cuisine list
    #[must_use]
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Cuisine::American => &["american"],
            Cuisine::Asian => &["asian", "chinese", "japanese"],
            Cuisine::Bbq => &["bbq", "barbecue"],
            Cuisine::Indian => &["indian"],
            Cuisine::ItalianPizza => &["italian", "pizza"],
            Cuisine::Seafood => &["seafood"],
            Cuisine::Other => &[],
        }
    }

    /// Human-readable label for the dropdown
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Cuisine::American => "American",
            Cuisine::Asian => "Asian",
            Cuisine::Bbq => "BBQ/Barbeque",
            Cuisine::Indian => "Indian",
            Cuisine::ItalianPizza => "Italian/Pizza",
            Cuisine::Seafood => "Seafood",
            Cuisine::Other => "Other",
        }
    }

    /// Form value used in the query string
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Cuisine::American => "american",
            Cuisine::Asian => "asian",
            Cuisine::Bbq => "bbq",
            Cuisine::Indian => "indian",
            Cuisine::ItalianPizza => "italian-pizza",
            Cuisine::Seafood => "seafood",
            Cuisine::Other => "other",
        }
    }

    /// Hero image for the category under the assets directory
    #[must_use]
    pub fn image(self) -> &'static str {
        match self {
            Cuisine::American => "american.jpg",
            Cuisine::Asian => "asian.jpg",
            Cuisine::Bbq => "bbq.jpg",
            Cuisine::Indian => "indian.jpg",
            Cuisine::ItalianPizza => "italian.jpg",
            Cuisine::Seafood => "seafood.jpg",
            Cuisine::Other => "other.jpg",
        }
    }
}

impl Default for Cuisine {
    fn default() -> Self {
        Cuisine::American
    }
}

/// One normalized restaurant, ready for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restaurant {
    pub name: String,
    pub phone: String,
    pub website: String,
}

/// Raw Overpass response: a JSON object with an `elements` list
#[derive(Debug, Deserialize)]
struct OverpassResponse {
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(default)]
    tags: HashMap<String, String>,
}

/// Build the Overpass QL payload for restaurants around the location
fn build_query(location: &LocationConfig, config: &RestaurantsConfig) -> String {
    let (radius, lat, lon) = (config.radius_m, location.latitude, location.longitude);
    format!(
        "[out:json][timeout:{timeout}];\n\
         (\n\
           node[\"amenity\"=\"restaurant\"](around:{radius},{lat},{lon});\n\
           way[\"amenity\"=\"restaurant\"](around:{radius},{lat},{lon});\n\
           relation[\"amenity\"=\"restaurant\"](around:{radius},{lat},{lon});\n\
         );\n\
         out center 50;",
        timeout = config.timeout_seconds,
    )
}

/// Search for restaurants matching the cuisine filter.
///
/// One request, one bounded timeout, no retries. Any network, HTTP-status, or
/// parse failure collapses to an empty list here.
pub async fn fetch_restaurants(
    client: &Client,
    location: &LocationConfig,
    config: &RestaurantsConfig,
    cuisine: Cuisine,
) -> Vec<Restaurant> {
    match fetch_restaurants_call(client, location, config).await {
        Ok(elements) => {
            debug!("Overpass returned {} raw elements", elements.len());
            normalize_restaurants(elements, cuisine, config.max_results)
        }
        Err(e) => {
            warn!("Restaurant query failed, returning no results: {e:#}");
            Vec::new()
        }
    }
}

async fn fetch_restaurants_call(
    client: &Client,
    location: &LocationConfig,
    config: &RestaurantsConfig,
) -> Result<Vec<OverpassElement>> {
    let query = build_query(location, config);
    let url = format!("{}?data={}", config.api_url, urlencoding::encode(&query));

    let response = client
        .get(url)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .send()
        .await?
        .error_for_status()?;

    let overpass: OverpassResponse = response
        .json()
        .await
        .with_context(|| "Failed to parse Overpass response")?;

    Ok(overpass.elements)
}

/// Keep elements whose cuisine list intersects the filter's keyword set and
/// truncate to the result cap, preserving source order
fn normalize_restaurants(
    elements: Vec<OverpassElement>,
    cuisine: Cuisine,
    max_results: usize,
) -> Vec<Restaurant> {
    let keywords = cuisine.keywords();

    elements
        .into_iter()
        .filter_map(|element| {
            let tags = &element.tags;
            let cuisines: Vec<String> = tags
                .get("cuisine")
                .map(|c| c.to_lowercase())
                .unwrap_or_default()
                .split(';')
                .map(str::to_string)
                .collect();

            if !keywords.is_empty() && !keywords.iter().any(|k| cuisines.iter().any(|c| c == k)) {
                return None;
            }

            Some(Restaurant {
                name: tags.get("name").cloned().unwrap_or_else(|| "Unnamed".to_string()),
                phone: tags
                    .get("phone")
                    .cloned()
                    .unwrap_or_else(|| PHONE_PLACEHOLDER.to_string()),
                website: tags
                    .get("website")
                    .cloned()
                    .unwrap_or_else(|| WEBSITE_PLACEHOLDER.to_string()),
            })
        })
        .take(max_results)
        .collect()
}
