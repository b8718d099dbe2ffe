// AI media generation service with a process-lifetime cache
// Generation is simulated: fixed per-category URL catalogs plus prompt and
// description templates, behind a configurable pipeline delay. Each
// (hotel, location) pair is generated at most once; concurrent requests for
// the same pair share a single generation pass.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::future::{FutureExt, Shared};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::oneshot;

const DEFAULT_CATEGORY_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Image => f.write_str("image"),
            MediaKind::Video => f.write_str("video"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaStatus {
    Generating,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    Exterior,
    Rooms,
    Amenities,
    Dining,
    Facilities,
}

impl MediaCategory {
    // Fixed generation order
    pub const ALL: [MediaCategory; 5] = [
        MediaCategory::Exterior,
        MediaCategory::Rooms,
        MediaCategory::Amenities,
        MediaCategory::Dining,
        MediaCategory::Facilities,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaCategory::Exterior => "exterior",
            MediaCategory::Rooms => "rooms",
            MediaCategory::Amenities => "amenities",
            MediaCategory::Dining => "dining",
            MediaCategory::Facilities => "facilities",
        }
    }
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// One generated image or video record; immutable once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
    pub thumbnail_url: String,
    pub title: String,
    pub description: String,
    pub category: MediaCategory,
    pub prompt: String,
    pub status: MediaStatus,
}

// Five-bucket categorized view of a hotel's generated media
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotelGallery {
    pub exterior: Vec<MediaItem>,
    pub rooms: Vec<MediaItem>,
    pub amenities: Vec<MediaItem>,
    pub dining: Vec<MediaItem>,
    pub facilities: Vec<MediaItem>,
}

impl HotelGallery {
    pub fn len(&self) -> usize {
        self.exterior.len()
            + self.rooms.len()
            + self.amenities.len()
            + self.dining.len()
            + self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Partitions a flattened item sequence into the five category buckets.
// Every item lands in exactly one bucket, so bucket sizes sum to the input
// length.
pub fn organize_by_category(items: &[MediaItem]) -> HotelGallery {
    let mut gallery = HotelGallery::default();
    for item in items {
        let bucket = match item.category {
            MediaCategory::Exterior => &mut gallery.exterior,
            MediaCategory::Rooms => &mut gallery.rooms,
            MediaCategory::Amenities => &mut gallery.amenities,
            MediaCategory::Dining => &mut gallery.dining,
            MediaCategory::Facilities => &mut gallery.facilities,
        };
        bucket.push(item.clone());
    }
    gallery
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MediaError {
    #[error("media generation failed for {hotel}: {reason}")]
    GenerationFailed { hotel: String, reason: String },

    #[error("generation pass dropped before completing")]
    Interrupted,
}

// Cache key: the full (hotel, location) pair. A separator-less joined
// string would let ("Grand AB", "C") and ("Grand A", "BC") collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MediaKey {
    hotel: String,
    location: String,
}

impl MediaKey {
    fn new(hotel: &str, location: &str) -> Self {
        Self {
            hotel: hotel.to_string(),
            location: location.to_string(),
        }
    }
}

type GenerationResult = Result<Arc<Vec<MediaItem>>, MediaError>;

#[derive(Debug, Default)]
struct MediaCacheStats {
    generations: AtomicUsize,
    hits: AtomicUsize,
    coalesced: AtomicUsize,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MediaCacheStatsReport {
    pub generations: usize,
    pub hits: usize,
    pub coalesced: usize,
}

// Explicit cache handed to the service at construction: completed entries,
// in-flight generation passes, and counters
#[derive(Default)]
pub struct MediaCache {
    entries: DashMap<MediaKey, Arc<Vec<MediaItem>>>,
    inflight: DashMap<MediaKey, Shared<oneshot::Receiver<GenerationResult>>>,
    stats: MediaCacheStats,
}

impl MediaCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn report(&self) -> MediaCacheStatsReport {
        MediaCacheStatsReport {
            generations: self.stats.generations.load(Ordering::SeqCst),
            hits: self.stats.hits.load(Ordering::SeqCst),
            coalesced: self.stats.coalesced.load(Ordering::SeqCst),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MediaServiceConfig {
    // Simulated pipeline latency incurred once per category on a cache miss
    pub category_delay: Duration,
}

impl Default for MediaServiceConfig {
    fn default() -> Self {
        Self {
            category_delay: DEFAULT_CATEGORY_DELAY,
        }
    }
}

pub struct MediaService {
    config: MediaServiceConfig,
    cache: MediaCache,
}

impl MediaService {
    pub fn new(cache: MediaCache) -> Self {
        Self::with_config(MediaServiceConfig::default(), cache)
    }

    pub fn with_config(config: MediaServiceConfig, cache: MediaCache) -> Self {
        Self { config, cache }
    }

    // Returns the categorized media set for a hotel, generating it on first
    // request. Concurrent requests for the same (hotel, location) pair
    // converge on one generation pass; later requests are served from the
    // cache without delay.
    pub async fn generate_hotel_media(
        &self,
        hotel_name: &str,
        location: &str,
    ) -> Result<HotelGallery, MediaError> {
        let key = MediaKey::new(hotel_name, location);

        if let Some(cached) = self.cache.entries.get(&key) {
            self.cache.stats.hits.fetch_add(1, Ordering::SeqCst);
            return Ok(organize_by_category(&cached));
        }

        let shared = match self.cache.inflight.entry(key.clone()) {
            Entry::Occupied(entry) => {
                let shared = entry.get().clone();
                drop(entry);
                self.cache.stats.coalesced.fetch_add(1, Ordering::SeqCst);
                shared
            }
            Entry::Vacant(slot) => {
                // A generation pass may have finished between the cache
                // check above and taking this slot
                if let Some(cached) = self.cache.entries.get(&key) {
                    self.cache.stats.hits.fetch_add(1, Ordering::SeqCst);
                    return Ok(organize_by_category(&cached));
                }

                let (tx, rx) = oneshot::channel();
                slot.insert(rx.shared());
                self.cache.stats.generations.fetch_add(1, Ordering::SeqCst);
                tracing::debug!(hotel = hotel_name, location, "generating media set");

                let result = self
                    .generate_all_categories(hotel_name, location)
                    .await
                    .map(Arc::new);
                if let Ok(items) = &result {
                    self.cache.entries.insert(key.clone(), Arc::clone(items));
                }
                self.cache.inflight.remove(&key);
                let _ = tx.send(result.clone());

                return result.map(|items| organize_by_category(&items));
            }
        };

        match shared.await {
            Ok(result) => result.map(|items| organize_by_category(&items)),
            Err(_) => Err(MediaError::Interrupted),
        }
    }

    // True while a generation pass for this pair is in flight
    pub fn is_generating(&self, hotel_name: &str, location: &str) -> bool {
        self.cache
            .inflight
            .contains_key(&MediaKey::new(hotel_name, location))
    }

    pub fn cache_stats(&self) -> MediaCacheStatsReport {
        self.cache.report()
    }

    async fn generate_all_categories(
        &self,
        hotel_name: &str,
        location: &str,
    ) -> Result<Vec<MediaItem>, MediaError> {
        let mut items = Vec::new();
        for category in MediaCategory::ALL {
            let batch = self
                .generate_category(hotel_name, location, category)
                .await?;
            items.extend(batch);
        }
        Ok(items)
    }

    async fn generate_category(
        &self,
        hotel_name: &str,
        location: &str,
        category: MediaCategory,
    ) -> Result<Vec<MediaItem>, MediaError> {
        // Simulated per-category pipeline latency
        tokio::time::sleep(self.config.category_delay).await;

        let catalog = category_catalog(category);
        let mut media = Vec::with_capacity(catalog.images.len() + catalog.videos.len());

        for (index, url) in catalog.images.iter().enumerate() {
            media.push(MediaItem {
                id: format!("{category}-img-{index}"),
                kind: MediaKind::Image,
                url: url.to_string(),
                thumbnail_url: url.to_string(),
                title: title_for(category, MediaKind::Image, index),
                description: description_for(category, MediaKind::Image, hotel_name),
                category,
                prompt: prompt_for(category, MediaKind::Image, hotel_name, location),
                status: MediaStatus::Completed,
            });
        }

        for (index, url) in catalog.videos.iter().enumerate() {
            media.push(MediaItem {
                id: format!("{category}-vid-{index}"),
                kind: MediaKind::Video,
                url: url.to_string(),
                thumbnail_url: format!(
                    "/placeholder.svg?height=300&width=400&text={category}+Video"
                ),
                title: title_for(category, MediaKind::Video, index),
                description: description_for(category, MediaKind::Video, hotel_name),
                category,
                prompt: prompt_for(category, MediaKind::Video, hotel_name, location),
                status: MediaStatus::Completed,
            });
        }

        Ok(media)
    }
}

struct CategoryCatalog {
    images: &'static [&'static str],
    videos: &'static [&'static str],
    titles: &'static [&'static str],
}

static EXTERIOR_CATALOG: CategoryCatalog = CategoryCatalog {
    images: &[
        "/placeholder.svg?height=400&width=600&text=Hotel+Exterior",
        "/placeholder.svg?height=400&width=600&text=Hotel+Entrance",
        "/placeholder.svg?height=400&width=600&text=Hotel+Facade",
    ],
    videos: &[
        "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4",
        "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ElephantsDream.mp4",
    ],
    titles: &["Hotel Exterior", "Grand Entrance", "Architectural View", "Night Facade"],
};

static ROOMS_CATALOG: CategoryCatalog = CategoryCatalog {
    images: &[
        "/placeholder.svg?height=400&width=600&text=Luxury+Suite",
        "/placeholder.svg?height=400&width=600&text=Standard+Room",
        "/placeholder.svg?height=400&width=600&text=Bathroom",
        "/placeholder.svg?height=400&width=600&text=Room+View",
    ],
    videos: &[
        "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4",
        "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerEscapes.mp4",
    ],
    titles: &["Luxury Suite", "Standard Room", "Premium Bathroom", "City View Room"],
};

static AMENITIES_CATALOG: CategoryCatalog = CategoryCatalog {
    images: &[
        "/placeholder.svg?height=400&width=600&text=Swimming+Pool",
        "/placeholder.svg?height=400&width=600&text=Fitness+Center",
        "/placeholder.svg?height=400&width=600&text=Spa+Area",
        "/placeholder.svg?height=400&width=600&text=Business+Center",
    ],
    videos: &[
        "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerFun.mp4",
        "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerJoyrides.mp4",
    ],
    titles: &["Swimming Pool", "Fitness Center", "Spa & Wellness", "Business Lounge"],
};

static DINING_CATALOG: CategoryCatalog = CategoryCatalog {
    images: &[
        "/placeholder.svg?height=400&width=600&text=Restaurant",
        "/placeholder.svg?height=400&width=600&text=Bar+Lounge",
        "/placeholder.svg?height=400&width=600&text=Room+Service",
    ],
    videos: &[
        "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerMeltdowns.mp4",
    ],
    titles: &["Fine Dining Restaurant", "Cocktail Bar", "Room Service", "Breakfast Area"],
};

static FACILITIES_CATALOG: CategoryCatalog = CategoryCatalog {
    images: &[
        "/placeholder.svg?height=400&width=600&text=Lobby",
        "/placeholder.svg?height=400&width=600&text=Conference+Room",
        "/placeholder.svg?height=400&width=600&text=Concierge",
    ],
    videos: &[
        "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/Sintel.mp4",
    ],
    titles: &["Grand Lobby", "Conference Center", "Concierge Desk", "Reception Area"],
};

fn category_catalog(category: MediaCategory) -> &'static CategoryCatalog {
    match category {
        MediaCategory::Exterior => &EXTERIOR_CATALOG,
        MediaCategory::Rooms => &ROOMS_CATALOG,
        MediaCategory::Amenities => &AMENITIES_CATALOG,
        MediaCategory::Dining => &DINING_CATALOG,
        MediaCategory::Facilities => &FACILITIES_CATALOG,
    }
}

fn title_for(category: MediaCategory, kind: MediaKind, index: usize) -> String {
    category_catalog(category)
        .titles
        .get(index)
        .map(|title| title.to_string())
        .unwrap_or_else(|| format!("{category} {kind} {}", index + 1))
}

fn description_for(category: MediaCategory, kind: MediaKind, hotel_name: &str) -> String {
    match category {
        MediaCategory::Exterior => format!(
            "Stunning {kind} showcasing the architectural beauty of {hotel_name}"
        ),
        MediaCategory::Rooms => {
            format!("Elegant and comfortable accommodations at {hotel_name}")
        }
        MediaCategory::Amenities => {
            format!("World-class facilities and amenities available at {hotel_name}")
        }
        MediaCategory::Dining => {
            format!("Exceptional dining experiences offered at {hotel_name}")
        }
        MediaCategory::Facilities => {
            format!("Premium facilities and services at {hotel_name}")
        }
    }
}

fn prompt_for(
    category: MediaCategory,
    kind: MediaKind,
    hotel_name: &str,
    location: &str,
) -> String {
    match category {
        MediaCategory::Exterior => format!(
            "Professional {kind} of {hotel_name} exterior in {location}, architectural photography, golden hour lighting, luxury hotel facade"
        ),
        MediaCategory::Rooms => format!(
            "Interior {kind} of luxury hotel room at {hotel_name}, elegant furnishing, natural lighting, premium hospitality design"
        ),
        MediaCategory::Amenities => format!(
            "{kind} of hotel amenities at {hotel_name}, modern facilities, professional hospitality photography, inviting atmosphere"
        ),
        MediaCategory::Dining => format!(
            "{kind} of restaurant and dining areas at {hotel_name}, fine dining ambiance, professional food photography, elegant interior"
        ),
        MediaCategory::Facilities => format!(
            "{kind} of hotel facilities at {hotel_name}, modern lobby and common areas, professional architectural photography"
        ),
    }
}
