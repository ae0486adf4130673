use anyhow::Context;
use sk_types::FilterMode;
use url::Url;

pub static DEFAULT_API_URL: &str = "http://127.0.0.1:5000/";
pub static DEFAULT_IMAGE: &str = "/static/Images/default.jpg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL the `api/...` endpoints are resolved against. Always ends with `/`.
    pub api_url: Url,
    /// Cards shown by the home page's automatic load.
    pub home_product_limit: usize,
    pub ingredient_preview_tokens: usize,
    /// Viewport width (px) from which the filter sidebar stays closed.
    pub mobile_breakpoint: u32,
    pub default_image: String,
    pub filter_mode: FilterMode,
}

impl Default for Config {
    #[allow(clippy::unwrap_used)]
    fn default() -> Self {
        Self {
            api_url: base_url(DEFAULT_API_URL).unwrap(),
            home_product_limit: 6,
            ingredient_preview_tokens: 4,
            mobile_breakpoint: 768,
            default_image: DEFAULT_IMAGE.to_string(),
            filter_mode: FilterMode::Multi,
        }
    }
}

impl Config {
    /// Reads the `.env` file (created when missing) and then the process environment.
    pub fn load(dotenv: &str) -> Result<Self, anyhow::Error> {
        match std::fs::File::open(dotenv) {
            Ok(_) => envmnt::load_file(dotenv)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                std::fs::File::create(dotenv)?;
                envmnt::load_file(dotenv)?;
            }
            Err(err) => {
                return Err(anyhow::anyhow!("Unable to open {dotenv} file: {err}"));
            }
        }
        Self::from_env()
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let defaults = Self::default();
        let api_url = envmnt::get_or("SKINALYZE_API_URL", DEFAULT_API_URL);
        Ok(Self {
            api_url: base_url(&api_url)
                .with_context(|| format!("Invalid SKINALYZE_API_URL {api_url}"))?,
            home_product_limit: envmnt::get_parse("HOME_PRODUCT_LIMIT")
                .unwrap_or(defaults.home_product_limit),
            ingredient_preview_tokens: envmnt::get_parse("INGREDIENT_PREVIEW_TOKENS")
                .unwrap_or(defaults.ingredient_preview_tokens),
            mobile_breakpoint: envmnt::get_parse("MOBILE_BREAKPOINT")
                .unwrap_or(defaults.mobile_breakpoint),
            default_image: envmnt::get_or("DEFAULT_IMAGE", DEFAULT_IMAGE),
            filter_mode: envmnt::get_or("FILTER_MODE", "multi")
                .parse()
                .map_err(anyhow::Error::msg)
                .context("Invalid FILTER_MODE")?,
        })
    }
}

/// Parses `s` and appends a trailing `/` so relative joins keep the path prefix.
pub fn base_url(s: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(s.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
