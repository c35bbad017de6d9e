//! Layered configuration: defaults, then a TOML file named by `FIFTY_CONFIG`,
//! then `FIFTY_*` environment variables, then command-line flags.

use fifty_ai::is_known_selector;
use fifty_engine::rules::{MAX_BOTS, MIN_BOTS};
use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_ENV: &str = "FIFTY_CONFIG";
pub const BOTS_ENV: &str = "FIFTY_BOTS";
pub const SEED_ENV: &str = "FIFTY_SEED";
pub const BOT_POLICY_ENV: &str = "FIFTY_BOT_POLICY";
pub const HUMAN_POLICY_ENV: &str = "FIFTY_HUMAN_POLICY";
pub const DELAY_ENV: &str = "FIFTY_DELAY_MS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub bots: usize,
    pub seed: Option<u64>,
    /// Selection policy for automated seats
    pub bot_policy: String,
    /// Selection policy for the human seat when a game runs unattended (`sim`)
    pub human_policy: String,
    /// Pause before each automated turn in interactive play
    pub delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bots: 1,
            seed: None,
            bot_policy: "baseline".into(),
            human_policy: "baseline".into(),
            delay_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Cli,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub bots: ValueSource,
    pub seed: ValueSource,
    pub bot_policy: ValueSource,
    pub human_policy: ValueSource,
    pub delay_ms: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            bots: ValueSource::Default,
            seed: ValueSource::Default,
            bot_policy: ValueSource::Default,
            human_policy: ValueSource::Default,
            delay_ms: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

/// Values given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bots: Option<usize>,
    pub seed: Option<u64>,
    pub bot_policy: Option<String>,
    pub human_policy: Option<String>,
    pub delay_ms: Option<u64>,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.bots {
            cfg.bots = v;
            sources.bots = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.bot_policy {
            cfg.bot_policy = v;
            sources.bot_policy = ValueSource::File;
        }
        if let Some(v) = f.human_policy {
            cfg.human_policy = v;
            sources.human_policy = ValueSource::File;
        }
        if let Some(v) = f.delay_ms {
            cfg.delay_ms = v;
            sources.delay_ms = ValueSource::File;
        }
    }

    if let Ok(bots) = std::env::var(BOTS_ENV)
        && !bots.is_empty()
    {
        cfg.bots = bots
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", BOTS_ENV, bots)))?;
        sources.bots = ValueSource::Env;
    }
    if let Ok(seed) = std::env::var(SEED_ENV)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", SEED_ENV, seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(policy) = std::env::var(BOT_POLICY_ENV)
        && !policy.is_empty()
    {
        cfg.bot_policy = policy;
        sources.bot_policy = ValueSource::Env;
    }
    if let Ok(policy) = std::env::var(HUMAN_POLICY_ENV)
        && !policy.is_empty()
    {
        cfg.human_policy = policy;
        sources.human_policy = ValueSource::Env;
    }
    if let Ok(delay) = std::env::var(DELAY_ENV)
        && !delay.is_empty()
    {
        cfg.delay_ms = delay
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", DELAY_ENV, delay)))?;
        sources.delay_ms = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

/// Loads the file and environment layers, then applies command-line flags on top.
pub fn resolve(overrides: &Overrides) -> Result<ConfigResolved, ConfigError> {
    let ConfigResolved {
        mut config,
        mut sources,
    } = load_with_sources()?;

    if let Some(v) = overrides.bots {
        config.bots = v;
        sources.bots = ValueSource::Cli;
    }
    if let Some(v) = overrides.seed {
        config.seed = Some(v);
        sources.seed = ValueSource::Cli;
    }
    if let Some(v) = &overrides.bot_policy {
        config.bot_policy = v.clone();
        sources.bot_policy = ValueSource::Cli;
    }
    if let Some(v) = &overrides.human_policy {
        config.human_policy = v.clone();
        sources.human_policy = ValueSource::Cli;
    }
    if let Some(v) = overrides.delay_ms {
        config.delay_ms = v;
        sources.delay_ms = ValueSource::Cli;
    }

    validate(&config)?;
    Ok(ConfigResolved { config, sources })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    bots: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    bot_policy: Option<String>,
    #[serde(default)]
    human_policy: Option<String>,
    #[serde(default)]
    delay_ms: Option<u64>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !(MIN_BOTS..=MAX_BOTS).contains(&cfg.bots) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: bots must be between {} and {} (got {})",
            MIN_BOTS, MAX_BOTS, cfg.bots
        )));
    }
    for (key, policy) in [
        ("bot_policy", &cfg.bot_policy),
        ("human_policy", &cfg.human_policy),
    ] {
        if !is_known_selector(policy) {
            return Err(ConfigError::Invalid(format!(
                "Invalid configuration: unknown {} '{}'",
                key, policy
            )));
        }
    }
    Ok(())
}
