use std::env;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-image-preview";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    /// Upper bound on requests in flight. `None` dispatches the whole catalog at once.
    pub max_concurrency: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub gemini: Option<GeminiConfig>,
    pub generator: GeneratorConfig,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            model: None,
            base_url: None,
            timeout_secs: None,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("GOOGLE_API_KEY"))
            .ok();
        let model = env::var("GEMINI_MODEL").ok();
        let base_url = env::var("GEMINI_BASE_URL").ok();
        let timeout_secs = env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok());

        GeminiConfig {
            api_key,
            model,
            base_url,
            timeout_secs,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    pub fn model_or_default(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_GEMINI_MODEL)
    }

    pub fn base_url_or_default(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_GEMINI_BASE_URL)
            .trim_end_matches('/')
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let max_concurrency = env::var("VIEWGEN_MAX_CONCURRENCY")
            .ok()
            .and_then(|s| s.parse().ok());

        GeneratorConfig { max_concurrency }
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = Some(max_concurrency);
        self
    }

    /// Effective cap; zero means uncapped.
    pub fn concurrency_limit(&self) -> Option<usize> {
        self.max_concurrency.filter(|limit| *limit > 0)
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Config {
            gemini: Some(GeminiConfig::from_env()),
            generator: GeneratorConfig::from_env(),
        }
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = Some(config);
        self
    }

    pub fn with_generator(mut self, config: GeneratorConfig) -> Self {
        self.generator = config;
        self
    }
}
