// Hotel catalog and search filters
// The catalog stands in for the hotel-search backend; the storefront feeds
// the committed destination string into `SearchFilters` and renders the
// returned records.

use std::cmp::Ordering;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub location: String,
    pub city: String,
    pub country: String,
    pub rating: f64,
    pub review_count: u32,
    pub price: f64,
    pub currency: String,
    pub image: String,
    pub amenities: Vec<String>,
    pub description: String,
    pub coordinates: Coordinates,
    pub availability: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Price,
    Rating,
    Distance,
    Popularity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    pub destination: String,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: u32,
    pub rooms: u32,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub rating: Option<f64>,
    pub amenities: Vec<String>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            destination: String::new(),
            check_in: None,
            check_out: None,
            guests: 2,
            rooms: 1,
            min_price: None,
            max_price: None,
            rating: None,
            amenities: Vec::new(),
            sort_by: SortBy::Popularity,
            sort_order: SortOrder::Desc,
        }
    }
}

// In-memory catalog with simulated backend latency
pub struct HotelCatalog {
    hotels: Vec<Hotel>,
    search_delay: Duration,
}

impl HotelCatalog {
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_SEARCH_DELAY)
    }

    pub fn with_delay(search_delay: Duration) -> Self {
        Self {
            hotels: fixture_hotels(),
            search_delay,
        }
    }

    pub async fn search(&self, filters: &SearchFilters) -> Vec<Hotel> {
        tokio::time::sleep(self.search_delay).await;

        let mut results = self.hotels.clone();

        let term = filters.destination.trim().to_lowercase();
        if !term.is_empty() {
            // Bidirectional match: "London" finds London hotels, and a
            // committed "Piccadilly, London" still finds the city
            results.retain(|hotel| {
                let city = hotel.city.to_lowercase();
                let country = hotel.country.to_lowercase();
                city.contains(&term)
                    || country.contains(&term)
                    || hotel.location.to_lowercase().contains(&term)
                    || term.contains(&city)
                    || term.contains(&country)
            });
        }

        if let Some(min) = filters.min_price {
            results.retain(|hotel| hotel.price >= min);
        }
        if let Some(max) = filters.max_price {
            results.retain(|hotel| hotel.price <= max);
        }
        if let Some(rating) = filters.rating {
            results.retain(|hotel| hotel.rating >= rating);
        }
        if !filters.amenities.is_empty() {
            results.retain(|hotel| {
                filters
                    .amenities
                    .iter()
                    .any(|amenity| hotel.amenities.contains(amenity))
            });
        }

        results.sort_by(|a, b| {
            let ordering = match filters.sort_by {
                SortBy::Price => a.price.total_cmp(&b.price),
                SortBy::Rating => a.rating.total_cmp(&b.rating),
                SortBy::Popularity => a.review_count.cmp(&b.review_count),
                // Distance needs a reference point the storefront never
                // supplies; kept stable until it does
                SortBy::Distance => Ordering::Equal,
            };
            match filters.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        results
    }
}

impl Default for HotelCatalog {
    fn default() -> Self {
        Self::new()
    }
}

struct HotelSeed {
    id: &'static str,
    name: &'static str,
    location: &'static str,
    city: &'static str,
    country: &'static str,
    rating: f64,
    review_count: u32,
    price: f64,
    currency: &'static str,
    image: &'static str,
    amenities: &'static [&'static str],
    description: &'static str,
    lat: f64,
    lng: f64,
}

const HOTEL_SEEDS: &[HotelSeed] = &[
    HotelSeed {
        id: "1",
        name: "The Ritz London",
        location: "Piccadilly, London",
        city: "London",
        country: "United Kingdom",
        rating: 4.8,
        review_count: 2847,
        price: 450.0,
        currency: "£",
        image: "https://images.unsplash.com/photo-1566073771259-6a8506099945?w=400&h=250&fit=crop",
        amenities: &["Free WiFi", "Spa", "Restaurant", "Concierge", "Room Service"],
        description: "Luxury hotel in the heart of London with world-class service.",
        lat: 51.5074,
        lng: -0.1278,
    },
    HotelSeed {
        id: "2",
        name: "The Savoy",
        location: "Covent Garden, London",
        city: "London",
        country: "United Kingdom",
        rating: 4.7,
        review_count: 1923,
        price: 380.0,
        currency: "£",
        image: "https://images.unsplash.com/photo-1551882547-ff40c63fe5fa?w=400&h=250&fit=crop",
        amenities: &["Free WiFi", "Pool", "Spa", "Restaurant", "Bar"],
        description: "Historic luxury hotel overlooking the Thames.",
        lat: 51.5101,
        lng: -0.1197,
    },
    HotelSeed {
        id: "3",
        name: "Claridge's",
        location: "Mayfair, London",
        city: "London",
        country: "United Kingdom",
        rating: 4.9,
        review_count: 3456,
        price: 520.0,
        currency: "£",
        image: "https://images.unsplash.com/photo-1520250497591-112f2f40a3f4?w=400&h=250&fit=crop",
        amenities: &["Free WiFi", "Spa", "Restaurant", "Concierge", "Butler Service"],
        description: "Art Deco masterpiece in the heart of Mayfair.",
        lat: 51.5129,
        lng: -0.1441,
    },
    HotelSeed {
        id: "4",
        name: "Hotel Plaza Athénée",
        location: "8th arr., Paris",
        city: "Paris",
        country: "France",
        rating: 4.9,
        review_count: 1923,
        price: 520.0,
        currency: "€",
        image: "https://images.unsplash.com/photo-1631049307264-da0ec9d70304?w=400&h=250&fit=crop",
        amenities: &["Free WiFi", "Pool", "Gym", "Spa", "Restaurant"],
        description: "Elegant Parisian hotel with stunning city views.",
        lat: 48.8566,
        lng: 2.3522,
    },
    HotelSeed {
        id: "5",
        name: "The Plaza Hotel",
        location: "Midtown, New York",
        city: "New York",
        country: "United States",
        rating: 4.7,
        review_count: 3456,
        price: 380.0,
        currency: "$",
        image: "https://images.unsplash.com/photo-1618773928121-c32242e63f39?w=400&h=250&fit=crop",
        amenities: &["Free WiFi", "Concierge", "Business Center", "Fitness Center"],
        description: "Iconic New York hotel in the heart of Manhattan.",
        lat: 40.7589,
        lng: -73.9741,
    },
];

pub fn fixture_hotels() -> Vec<Hotel> {
    HOTEL_SEEDS
        .iter()
        .map(|seed| Hotel {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            location: seed.location.to_string(),
            city: seed.city.to_string(),
            country: seed.country.to_string(),
            rating: seed.rating,
            review_count: seed.review_count,
            price: seed.price,
            currency: seed.currency.to_string(),
            image: seed.image.to_string(),
            amenities: seed.amenities.iter().map(|a| a.to_string()).collect(),
            description: seed.description.to_string(),
            coordinates: Coordinates {
                lat: seed.lat,
                lng: seed.lng,
            },
            availability: true,
        })
        .collect()
}
