// Destination lookup backing the search-box autocomplete
// Serves a fixed in-memory table; real deployments would swap in a remote
// lookup behind the same trait.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Upper bound on matches returned by a lookup
pub const MAX_MATCHES: usize = 8;

const DEFAULT_LOOKUP_DELAY: Duration = Duration::from_millis(200);
const POPULAR_DESTINATIONS_DELAY: Duration = Duration::from_millis(500);

// One row of the autocomplete table, unique by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub country: String,
    pub full_name: String,
}

// Card data for the "popular destinations" strip on the landing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularDestination {
    pub id: String,
    pub city: String,
    pub country: String,
    pub image: String,
    pub average_price: f64,
    pub currency: String,
    pub hotel_count: u32,
}

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("destination lookup failed: {0}")]
    Failed(String),
}

// Seam for the autocomplete engine; implementations decide latency and
// failure behavior
#[async_trait]
pub trait DestinationLookup: Send + Sync + 'static {
    // Returns at most MAX_MATCHES destinations matching the query
    async fn search(&self, query: &str) -> Result<Vec<Destination>, LookupError>;
}

// Lookup over the static destination table with simulated API latency
pub struct StaticDestinationLookup {
    destinations: Vec<Destination>,
    delay: Duration,
}

impl StaticDestinationLookup {
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_LOOKUP_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            destinations: all_destinations(),
            delay,
        }
    }
}

impl Default for StaticDestinationLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DestinationLookup for StaticDestinationLookup {
    async fn search(&self, query: &str) -> Result<Vec<Destination>, LookupError> {
        tokio::time::sleep(self.delay).await;

        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .destinations
            .iter()
            .filter(|dest| {
                dest.name.to_lowercase().contains(&query)
                    || dest.country.to_lowercase().contains(&query)
                    || dest.full_name.to_lowercase().contains(&query)
            })
            .take(MAX_MATCHES)
            .cloned()
            .collect())
    }
}

fn destination(id: &str, name: &str, country: &str, full_name: &str) -> Destination {
    Destination {
        id: id.to_string(),
        name: name.to_string(),
        country: country.to_string(),
        full_name: full_name.to_string(),
    }
}

// The full autocomplete table
pub fn all_destinations() -> Vec<Destination> {
    vec![
        destination("1", "London", "United Kingdom", "London, United Kingdom"),
        destination("2", "Paris", "France", "Paris, France"),
        destination("3", "New York", "United States", "New York, United States"),
        destination("4", "Tokyo", "Japan", "Tokyo, Japan"),
        destination("5", "Berlin", "Germany", "Berlin, Germany"),
        destination("6", "Dubai", "UAE", "Dubai, UAE"),
        destination("7", "Barcelona", "Spain", "Barcelona, Spain"),
        destination("8", "Rome", "Italy", "Rome, Italy"),
        destination("9", "Amsterdam", "Netherlands", "Amsterdam, Netherlands"),
        destination("10", "Sydney", "Australia", "Sydney, Australia"),
        destination("11", "Bangkok", "Thailand", "Bangkok, Thailand"),
        destination("12", "Singapore", "Singapore", "Singapore"),
        destination("13", "Los Angeles", "United States", "Los Angeles, United States"),
        destination("14", "Miami", "United States", "Miami, United States"),
        destination("15", "Istanbul", "Turkey", "Istanbul, Turkey"),
    ]
}

// Featured cards shown before the first search
pub async fn popular_destinations() -> Vec<PopularDestination> {
    tokio::time::sleep(POPULAR_DESTINATIONS_DELAY).await;

    vec![
        PopularDestination {
            id: "1".to_string(),
            city: "London".to_string(),
            country: "United Kingdom".to_string(),
            image: "https://images.unsplash.com/photo-1513635269975-59663e0ac1ad?w=300&h=200&fit=crop"
                .to_string(),
            average_price: 150.0,
            currency: "£".to_string(),
            hotel_count: 1247,
        },
        PopularDestination {
            id: "2".to_string(),
            city: "Paris".to_string(),
            country: "France".to_string(),
            image: "https://images.unsplash.com/photo-1502602898536-47ad22581b52?w=300&h=200&fit=crop"
                .to_string(),
            average_price: 180.0,
            currency: "€".to_string(),
            hotel_count: 987,
        },
        PopularDestination {
            id: "3".to_string(),
            city: "New York".to_string(),
            country: "United States".to_string(),
            image: "https://images.unsplash.com/photo-1496442226666-8d4d0e62e6e9?w=300&h=200&fit=crop"
                .to_string(),
            average_price: 200.0,
            currency: "$".to_string(),
            hotel_count: 1567,
        },
        PopularDestination {
            id: "4".to_string(),
            city: "Tokyo".to_string(),
            country: "Japan".to_string(),
            image: "https://images.unsplash.com/photo-1540959733332-eab4deabeeaf?w=300&h=200&fit=crop"
                .to_string(),
            average_price: 120.0,
            currency: "$".to_string(),
            hotel_count: 834,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use test_case::test_case;

    fn lookup() -> StaticDestinationLookup {
        StaticDestinationLookup::with_delay(Duration::ZERO)
    }

    #[test_case("london", vec!["London"]; "#1 match by name")]
    #[test_case("japan", vec!["Tokyo"]; "#2 match by country")]
    #[test_case("london, united", vec!["London"]; "#3 match by full name")]
    #[test_case("united states", vec!["New York", "Los Angeles", "Miami"]; "#4 shared country")]
    #[test_case("LONDON", vec!["London"]; "#5 case insensitive")]
    #[test_case("  rome  ", vec!["Rome"]; "#6 surrounding whitespace trimmed")]
    #[tokio::test]
    async fn test_query_matching(query: &str, expected_names: Vec<&str>) {
        let results = lookup().search(query).await.unwrap();
        let names: Vec<&str> = results.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, expected_names);
    }

    #[tokio::test]
    async fn test_blank_query_returns_nothing() {
        assert!(lookup().search("").await.unwrap().is_empty());
        assert!(lookup().search("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_results_capped_at_max_matches() {
        // "a" matches most of the table; the cap keeps the dropdown short
        let results = lookup().search("a").await.unwrap();
        assert_eq!(results.len(), MAX_MATCHES);
        // Table order is preserved up to the cap
        assert_eq!(results[0].name, "Paris");
    }

    #[tokio::test]
    async fn test_destination_ids_are_unique() {
        let table = all_destinations();
        let mut ids: Vec<&str> = table.iter().map(|d| d.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), table.len());
    }

    #[tokio::test]
    async fn test_popular_destinations_fixture() {
        let cards = popular_destinations().await;
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].city, "London");
        assert!(cards.iter().all(|c| c.hotel_count > 0));
    }

    #[test]
    fn test_destination_serializes_camel_case() {
        let dest = destination("1", "London", "United Kingdom", "London, United Kingdom");
        let json = serde_json::to_value(&dest).unwrap();
        assert_eq!(json["fullName"], "London, United Kingdom");
    }
}
