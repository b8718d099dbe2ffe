// Promo video generation for hotel cards
// Simulated like the media pipeline: a fixed URL pool, one of several
// cinematic prompt templates, and a configurable generation delay. Results
// are memoized per (hotel, location) pair for the process lifetime.

use std::time::Duration;

use dashmap::DashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::media::MediaStatus;

const DEFAULT_GENERATION_DELAY: Duration = Duration::from_millis(2000);
const VIDEO_DURATION_SECONDS: u32 = 15;

const MOCK_VIDEO_URLS: &[&str] = &[
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ElephantsDream.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerEscapes.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerFun.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerJoyrides.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerMeltdowns.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/Sintel.mp4",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedVideo {
    pub id: String,
    pub url: String,
    pub thumbnail_url: String,
    pub prompt: String,
    pub status: MediaStatus,
    pub duration: u32,
}

#[derive(Debug, Clone)]
pub struct VideoServiceConfig {
    pub generation_delay: Duration,
}

impl Default for VideoServiceConfig {
    fn default() -> Self {
        Self {
            generation_delay: DEFAULT_GENERATION_DELAY,
        }
    }
}

pub struct VideoService {
    config: VideoServiceConfig,
    cache: DashMap<(String, String), GeneratedVideo>,
}

impl VideoService {
    pub fn new() -> Self {
        Self::with_config(VideoServiceConfig::default())
    }

    pub fn with_config(config: VideoServiceConfig) -> Self {
        Self {
            config,
            cache: DashMap::new(),
        }
    }

    // Returns the promo video for a hotel, generating it on first request
    pub async fn generate_hotel_video(
        &self,
        hotel_name: &str,
        location: &str,
    ) -> GeneratedVideo {
        let key = (hotel_name.to_string(), location.to_string());
        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }

        let prompt = video_prompt(hotel_name, location);
        let video = self.mock_generate(hotel_name, location, prompt).await;
        self.cache.insert(key, video.clone());
        video
    }

    async fn mock_generate(
        &self,
        hotel_name: &str,
        location: &str,
        prompt: String,
    ) -> GeneratedVideo {
        tokio::time::sleep(self.config.generation_delay).await;

        let url = {
            let mut rng = rand::thread_rng();
            MOCK_VIDEO_URLS[rng.gen_range(0..MOCK_VIDEO_URLS.len())]
        };

        GeneratedVideo {
            id: format!("{hotel_name}-{location}"),
            url: url.to_string(),
            thumbnail_url: "/placeholder.svg?height=250&width=400&text=Video%20Thumbnail"
                .to_string(),
            prompt,
            status: MediaStatus::Completed,
            duration: VIDEO_DURATION_SECONDS,
        }
    }
}

impl Default for VideoService {
    fn default() -> Self {
        Self::new()
    }
}

fn video_prompt(hotel_name: &str, location: &str) -> String {
    let prompts = [
        format!(
            "Cinematic establishing shot of {hotel_name} in {location}, luxury hotel exterior with elegant architecture, golden hour lighting, smooth camera movement"
        ),
        format!(
            "Interior walkthrough of {hotel_name}, elegant lobby with marble floors, crystal chandeliers, guests walking through, warm ambient lighting"
        ),
        format!(
            "Hotel room showcase at {hotel_name}, modern luxury suite with city views, soft natural lighting, camera slowly panning across the room"
        ),
        format!(
            "Rooftop view from {hotel_name} overlooking {location}, panoramic cityscape, sunset colors, gentle breeze effect"
        ),
        format!(
            "Spa and wellness area at {hotel_name}, serene pool area, soft lighting, water reflections, peaceful atmosphere"
        ),
    ];

    let mut rng = rand::thread_rng();
    prompts[rng.gen_range(0..prompts.len())].clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> VideoService {
        VideoService::with_config(VideoServiceConfig {
            generation_delay: Duration::from_millis(1),
        })
    }

    #[tokio::test]
    async fn test_generated_video_shape() {
        let video = service()
            .generate_hotel_video("The Ritz London", "Piccadilly, London")
            .await;

        assert_eq!(video.id, "The Ritz London-Piccadilly, London");
        assert!(MOCK_VIDEO_URLS.contains(&video.url.as_str()));
        assert_eq!(video.status, MediaStatus::Completed);
        assert_eq!(video.duration, VIDEO_DURATION_SECONDS);
        assert!(video.prompt.contains("The Ritz London"));
    }

    #[tokio::test]
    async fn test_repeat_requests_are_memoized() {
        let service = service();
        let first = service
            .generate_hotel_video("The Savoy", "Covent Garden, London")
            .await;
        // Prompt and URL are chosen at random, so only a cached result can
        // match the first one exactly
        let second = service
            .generate_hotel_video("The Savoy", "Covent Garden, London")
            .await;
        assert_eq!(first, second);
    }

    #[test]
    fn test_prompt_mentions_the_hotel() {
        tokio_test::block_on(async {
            let video = service().generate_hotel_video("Claridge's", "Mayfair").await;
            assert!(video.prompt.contains("Claridge's"));
        });
    }
}
