// Main library file for the hotel search storefront core

// Export modules for each part of the storefront
pub mod autocomplete;
pub mod destinations;
pub mod hotels;
pub mod media;
pub mod video;

// Re-export key types for convenience
pub use autocomplete::{AutocompleteConfig, AutocompleteState, DestinationAutocomplete};
pub use destinations::{
    Destination, DestinationLookup, LookupError, PopularDestination, StaticDestinationLookup,
    MAX_MATCHES,
};
pub use hotels::{Coordinates, Hotel, HotelCatalog, SearchFilters, SortBy, SortOrder};
pub use media::{
    organize_by_category, HotelGallery, MediaCache, MediaCacheStatsReport, MediaCategory,
    MediaError, MediaItem, MediaKind, MediaService, MediaServiceConfig, MediaStatus,
};
pub use video::{GeneratedVideo, VideoService, VideoServiceConfig};
