use dotenv::dotenv;
use std::env;
use std::path::{Path, PathBuf};

const DEFAULT_SITE_DIR: &str = ".";
const DEFAULT_IMAGES_MANIFEST: &str = "public/img/images.js";

/// Where the previewer reads the site from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub site_dir: PathBuf,
    pub images_manifest: PathBuf,
    pub debug: bool,
}

impl SiteConfig {
    /// Loads `.env`, then reads `SITE_DIR`, `MEMORY_IMAGES` and `DEBUG`.
    pub fn load() -> Self {
        dotenv().ok();
        Self::from_values(
            env::var("SITE_DIR").ok(),
            env::var("MEMORY_IMAGES").ok(),
            env::var("DEBUG").ok(),
        )
    }

    /// A relative manifest path is taken from the site directory.
    pub fn from_values(
        site_dir: Option<String>,
        images: Option<String>,
        debug: Option<String>,
    ) -> Self {
        let site_dir = PathBuf::from(
            site_dir
                .filter(|dir| !dir.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SITE_DIR.to_string()),
        );
        let images = images
            .filter(|path| !path.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGES_MANIFEST.to_string());
        let images_manifest = resolve(&site_dir, Path::new(&images));

        Self {
            site_dir,
            images_manifest,
            debug: debug.is_some_and(|value| is_truthy(&value)),
        }
    }

    pub fn resource_path(&self, file_name: &str) -> PathBuf {
        self.site_dir.join(file_name)
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::SiteConfig;
    use std::path::PathBuf;

    #[test]
    fn defaults_to_current_directory() {
        let config = SiteConfig::from_values(None, None, None);
        assert_eq!(config.site_dir, PathBuf::from("."));
        assert_eq!(config.images_manifest, PathBuf::from("./public/img/images.js"));
        assert!(!config.debug);
    }

    #[test]
    fn manifest_is_relative_to_site_dir() {
        let config = SiteConfig::from_values(
            Some("site".to_string()),
            Some("img/manifest.json".to_string()),
            Some("1".to_string()),
        );
        assert_eq!(config.images_manifest, PathBuf::from("site/img/manifest.json"));
        assert_eq!(config.resource_path("signs.json"), PathBuf::from("site/signs.json"));
        assert!(config.debug);
    }

    #[test]
    fn absolute_manifest_is_kept() {
        let config = SiteConfig::from_values(
            Some("site".to_string()),
            Some("/srv/images.js".to_string()),
            Some("0".to_string()),
        );
        assert_eq!(config.images_manifest, PathBuf::from("/srv/images.js"));
        assert!(!config.debug);
    }
}
