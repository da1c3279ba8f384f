use clap::{CommandFactory, Parser};

#[derive(Debug, Parser)]
#[command(name = "world-archive", version, about = "World archive site previewer")]
pub struct CliArgs {
    /// Print a site report and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Directory holding versions.json, signs.json and history.json
    #[arg(long = "site-dir", value_name = "PATH")]
    pub site_dir: Option<String>,

    /// Override the MEMORY_IMAGES manifest path
    #[arg(long, value_name = "PATH")]
    pub images: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(dir) = &self.site_dir {
            std::env::set_var("SITE_DIR", dir);
        }
        if let Some(path) = &self.images {
            std::env::set_var("MEMORY_IMAGES", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::CliArgs;
    use clap::Parser;

    #[test]
    fn parses_site_flags() {
        let args = CliArgs::parse_from([
            "world-archive",
            "--site-dir",
            "dist",
            "--images",
            "img/list.js",
            "--headless",
            "--json",
        ]);
        assert_eq!(args.site_dir.as_deref(), Some("dist"));
        assert_eq!(args.images.as_deref(), Some("img/list.js"));
        assert!(args.headless && args.json && !args.debug);
    }

    #[test]
    fn help_lists_flags() {
        let help = CliArgs::help_text();
        assert!(help.contains("--site-dir"));
        assert!(help.contains("--headless"));
    }
}
