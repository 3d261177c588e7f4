pub mod catalog;
pub mod domain;
pub mod engine;
pub mod storage;

pub mod config {
    use anyhow::Context;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub database_url: Option<String>,
        pub sentry_dsn: Option<String>,
        pub catalog_path: Option<String>,
        pub catalog_url: Option<String>,
        pub catalog_api_key: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                database_url: non_empty_var("DATABASE_URL"),
                sentry_dsn: non_empty_var("SENTRY_DSN"),
                catalog_path: non_empty_var("CATALOG_PATH"),
                catalog_url: non_empty_var("CATALOG_URL"),
                catalog_api_key: non_empty_var("CATALOG_API_KEY"),
            })
        }

        pub fn require_database_url(&self) -> anyhow::Result<&str> {
            self.database_url
                .as_deref()
                .context("DATABASE_URL is required")
        }

        pub fn require_catalog_url(&self) -> anyhow::Result<&str> {
            self.catalog_url
                .as_deref()
                .context("CATALOG_URL is required")
        }
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}
