use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use url::Url;

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub supabase: SupabaseSettings,
    pub comic: ComicSettings,
    #[serde(default)]
    pub realtime: RealtimeSettings,
}

#[derive(Deserialize, Debug, PartialEq, Eq)]
pub struct SupabaseSettings {
    pub url: Url,
    pub anon_key: String,
    #[serde(default = "default_media_bucket")]
    pub media_bucket: String,
    #[serde(default = "default_retries")]
    pub retries: u32,
}

#[derive(Deserialize, Debug, PartialEq, Eq)]
pub struct ComicSettings {
    pub asset_directory: String,
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,
}

#[derive(Deserialize, Debug, PartialEq, Eq)]
pub struct RealtimeSettings {
    pub poll_interval_secs: u64,
}

impl Default for RealtimeSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: 5,
        }
    }
}

fn default_media_bucket() -> String {
    "gauta-media".into()
}

fn default_retries() -> u32 {
    3
}

fn default_url_prefix() -> String {
    "/comicpages".into()
}

impl Settings {
    /// Reads `config_file`, then applies `TRIBUTE_*` environment overrides
    /// (`TRIBUTE_SUPABASE__ANON_KEY` sets `supabase.anon_key`).
    pub fn new(config_file: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(config::File::with_name(config_file))
            .add_source(
                Environment::with_prefix("TRIBUTE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;
        builder.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_config() {
        let c = Settings::new("tribute.test.json").unwrap();

        assert_eq!(
            c.supabase,
            SupabaseSettings {
                url: Url::parse("https://example.supabase.co").unwrap(),
                anon_key: "test-anon-key".into(),
                media_bucket: "gauta-media".into(),
                retries: 3,
            }
        );
        assert_eq!(
            c.comic,
            ComicSettings {
                asset_directory: "./public/comicpages".into(),
                url_prefix: "/comicpages".into(),
            }
        );
        assert_eq!(c.realtime.poll_interval_secs, 2);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Settings::new("does-not-exist.json").is_err());
    }
}
