//! Public Site Config

use clap::Args;

/// Public-facing site settings, used when emitting absolute URLs in the
/// sitemap and JSON-LD payloads.
#[derive(Debug, Clone, Args)]
pub struct SiteConfig {
    /// Canonical site origin
    #[arg(long, env = "SITE_URL", default_value = "https://boltpromo.ru")]
    pub site_url: String,

    /// Site name used in structured data
    #[arg(long, env = "SITE_NAME", default_value = "BoltPromo")]
    pub site_name: String,
}

impl SiteConfig {
    /// Absolute URL for a site-relative `path` (which must start with `/`).
    #[must_use]
    pub fn absolute(&self, path: &str) -> String {
        format!("{}{path}", self.site_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_joins_without_double_slashes() {
        let site = SiteConfig {
            site_url: "https://boltpromo.ru/".to_owned(),
            site_name: "BoltPromo".to_owned(),
        };

        assert_eq!(site.absolute("/stores"), "https://boltpromo.ru/stores");
    }
}
