/// Walking-distance radius used for the nearby restaurant search.
///
/// The upstream category search accepts any radius in metres; the front end
/// only offers these three, roughly 5, 10 and 15 minutes on foot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchRadius {
    #[default]
    FiveMinutes,
    TenMinutes,
    FifteenMinutes,
}

impl SearchRadius {
    #[must_use]
    pub fn meters(self) -> u32 {
        match self {
            SearchRadius::FiveMinutes => 400,
            SearchRadius::TenMinutes => 800,
            SearchRadius::FifteenMinutes => 1200,
        }
    }

    /// Maps a metre value back to one of the offered radii.
    #[must_use]
    pub fn from_meters(meters: u32) -> Option<Self> {
        match meters {
            400 => Some(SearchRadius::FiveMinutes),
            800 => Some(SearchRadius::TenMinutes),
            1200 => Some(SearchRadius::FifteenMinutes),
            _ => None,
        }
    }
}

impl std::fmt::Display for SearchRadius {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}m", self.meters())
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Kakao REST API key. `None` means the place source is unavailable and
    /// every search falls back to synthetic data.
    pub kakao_api_key: Option<String>,
    pub kakao_base_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub search_radius: SearchRadius,
    pub max_candidates: usize,
    pub min_pool: usize,
    pub spin_duration_ms: u64,
    pub spin_min_turns: u32,
    pub spin_max_turns: u32,
    pub frame_interval_ms: u64,
    pub excluded_category: String,
    pub restaurant_category: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "kakao_api_key",
                &self.kakao_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("kakao_base_url", &self.kakao_base_url)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("search_radius", &self.search_radius)
            .field("max_candidates", &self.max_candidates)
            .field("min_pool", &self.min_pool)
            .field("spin_duration_ms", &self.spin_duration_ms)
            .field("spin_min_turns", &self.spin_min_turns)
            .field("spin_max_turns", &self.spin_max_turns)
            .field("frame_interval_ms", &self.frame_interval_ms)
            .field("excluded_category", &self.excluded_category)
            .field("restaurant_category", &self.restaurant_category)
            .finish()
    }
}
