use serde::Deserialize;
use std::env;
use std::path::Path;

use crate::rules::SearchRules;
use crate::CoreResult;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub search_rules: SearchRules,
}

impl Config {
    pub fn load() -> CoreResult<Self> {
        Self::load_from(Path::new("config"), env::vars().collect())
    }

    /// Layers `dir/default`, `dir/{RUN_MODE}` and `dir/local` (all optional),
    /// then `SKYGATE__*` entries of `vars`.
    pub fn load_from(dir: &Path, vars: config::Map<String, String>) -> CoreResult<Self> {
        let run_mode = vars
            .get("RUN_MODE")
            .cloned()
            .unwrap_or_else(|| "development".into());
        let file = |name: &str| {
            config::File::with_name(&dir.join(name).to_string_lossy()).required(false)
        };

        let s = config::Config::builder()
            .add_source(file("default"))
            // Per-environment overrides, e.g. config/production.toml
            .add_source(file(&run_mode))
            // Local overrides, not checked in
            .add_source(file("local"))
            // Eg.. `SKYGATE__SEARCH_RULES__MAX_PASSENGERS=6`
            .add_source(
                config::Environment::with_prefix("SKYGATE")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars)),
            )
            .build()?;

        Self::from_settings(s)
    }

    pub fn from_toml(raw: &str) -> CoreResult<Self> {
        let s = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()?;

        Self::from_settings(s)
    }

    fn from_settings(settings: config::Config) -> CoreResult<Self> {
        let config: Config = settings.try_deserialize()?;
        config.search_rules.check()?;
        Ok(config)
    }
}
