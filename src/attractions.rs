//! Attraction picker pipeline
//!
//! Scrapes the Visit Williamsburg attraction listing and picks one entry at
//! random. When the page, the network, or the parser fails, or the parsed
//! list is empty, a fixed in-memory list of ten attractions stands in so the
//! page always has something to show.

use std::time::Duration;

use anyhow::{Context, Result};
use rand::RngExt;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::config::AttractionsConfig;

/// One attraction, either scraped live or taken from the fallback list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attraction {
    pub name: String,
    /// Visitor rating on a 0-100 scale; live-scraped entries carry no rating
    pub rating: u8,
}

impl Attraction {
    fn new(name: &str, rating: u8) -> Self {
        Self {
            name: name.to_string(),
            rating,
        }
    }
}

/// The attraction chosen for one interaction, ready for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttractionPick {
    pub name: String,
    pub rating: u8,
    /// Asset filename, resolved by exact-name lookup
    pub image: Option<&'static str>,
}

/// Hand-authored stand-in used whenever the live scrape yields nothing
#[must_use]
pub fn fallback_attractions() -> Vec<Attraction> {
    vec![
        Attraction::new(
            "Colonial Williamsburg (Governor's Palace, trades, reenactments)",
            89,
        ),
        Attraction::new("DeWitt Wallace Decorative Arts Museum", 80),
        Attraction::new("Abby Aldrich Rockefeller Folk Art Museum", 90),
        Attraction::new("Muscarelle Museum of Art", 90),
        Attraction::new("Busch Gardens Williamsburg", 94),
        Attraction::new("Water Country USA", 94),
        Attraction::new("Jamestown Settlement", 91),
        Attraction::new("American Revolution Museum at Yorktown", 50),
        Attraction::new("Kimball Theatre", 92),
        Attraction::new("Merchants Square", 88),
    ]
}

/// Exact-name lookup of attraction images under the assets directory
#[must_use]
pub fn image_for(name: &str) -> Option<&'static str> {
    match name {
        "Colonial Williamsburg (Governor's Palace, trades, reenactments)" => {
            Some("colonials williamsburg.jpg")
        }
        "DeWitt Wallace Decorative Arts Museum" => Some("dewitt.jpg"),
        "Abby Aldrich Rockefeller Folk Art Museum" => Some("folkart.jpg"),
        "Muscarelle Museum of Art" => Some("muscarelle.jpg"),
        "Busch Gardens Williamsburg" => Some("buschgardens.jpg"),
        "Water Country USA" => Some("water country.jpg"),
        "Jamestown Settlement" => Some("jamestown settelment.jpg"),
        "American Revolution Museum at Yorktown" => Some("american revolution (1).jpg"),
        "Kimball Theatre" => Some("kimball.jpg"),
        "Merchants Square" => Some("merchants square.jpg"),
        _ => None,
    }
}

/// Fetch the attraction pool, substituting the fallback list on any failure.
///
/// One request, one bounded timeout, no retries. Errors never escape this
/// boundary.
pub async fn fetch_attractions(client: &Client, config: &AttractionsConfig) -> Vec<Attraction> {
    match fetch_attractions_call(client, config).await {
        Ok(attractions) if !attractions.is_empty() => {
            debug!("Scraped {} attractions from listing", attractions.len());
            attractions
        }
        Ok(_) => {
            warn!("Attraction listing parsed to an empty list, using fallback");
            fallback_attractions()
        }
        Err(e) => {
            warn!("Attraction scrape failed, using fallback: {e:#}");
            fallback_attractions()
        }
    }
}

async fn fetch_attractions_call(
    client: &Client,
    config: &AttractionsConfig,
) -> Result<Vec<Attraction>> {
    let response = client
        .get(&config.listing_url)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .send()
        .await?
        .error_for_status()?;

    let body = response
        .text()
        .await
        .with_context(|| "Failed to read attraction listing body")?;

    Ok(extract_attraction_names(&body)
        .into_iter()
        .map(|name| Attraction { name, rating: 0 })
        .collect())
}

/// Pull attraction names out of the listing markup
fn extract_attraction_names(body: &str) -> Vec<String> {
    let document = Html::parse_document(body);
    let selector = Selector::parse("div.attraction-item").expect("static selector is valid");

    document
        .select(&selector)
        .map(|block| {
            block
                .text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|text| !text.is_empty())
        .collect()
}

/// Pick one attraction uniformly at random and resolve its image
pub fn pick_attraction(rng: &mut impl RngExt, pool: &[Attraction]) -> Option<AttractionPick> {
    if pool.is_empty() {
        return None;
    }
    let chosen = &pool[rng.random_range(0..pool.len())];
    Some(AttractionPick {
        name: chosen.name.clone(),
        rating: chosen.rating,
        image: image_for(&chosen.name),
    })
}
