use crate::client::{HttpClient, ResourceClient};
use crate::config::{api_key_from, load_config, save_config, Config};
use crate::error::{OrgError, OrgResult};
use crate::formatting::RenderConfig;
use std::sync::Arc;

/// Central context for CLI operations, managing configuration and client instances
pub struct CliContext {
    config: Config,
    api_key: Option<String>,
    client: Option<Arc<dyn ResourceClient>>,
    org: Option<String>,
    no_color: bool,
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new()
    }
}

impl CliContext {
    /// Create an empty context that has read nothing from disk
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            api_key: None,
            client: None,
            org: None,
            no_color: false,
        }
    }

    /// Load context from saved configuration
    pub fn load() -> OrgResult<Self> {
        let config = load_config();
        let api_key = api_key_from(&config).ok();

        Ok(Self {
            config,
            api_key,
            client: None,
            org: None,
            no_color: false,
        })
    }

    pub fn with_no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }

    /// Get or create a client (requires API key)
    pub fn verified_client(&mut self) -> OrgResult<Arc<dyn ResourceClient>> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }

        let api_key = self.api_key()?.clone();
        let client: Arc<dyn ResourceClient> =
            Arc::new(HttpClient::new(&api_key, &self.config.api_url())?);
        self.client = Some(client.clone());
        Ok(client)
    }

    /// Get the API key, loading from config if necessary
    pub fn api_key(&mut self) -> OrgResult<&String> {
        if self.api_key.is_none() {
            self.api_key = Some(api_key_from(&self.config)?);
        }

        self.api_key.as_ref().ok_or(OrgError::ApiKeyNotFound)
    }

    /// Set and save a new API key
    pub fn set_api_key(&mut self, api_key: String) -> OrgResult<()> {
        let mut config = load_config();
        config.api_key = Some(api_key.clone());
        save_config(&config)?;
        self.config = config;
        self.api_key = Some(api_key);
        self.client = None;
        Ok(())
    }

    /// Check if context has a valid API key
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some() || api_key_from(&self.config).is_ok()
    }

    /// Org to operate on: `--org` first, then the configured default.
    pub fn org_name(&self) -> Option<String> {
        self.org.clone().or_else(|| self.config.default_org())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::detect(self.config.enable_colors && !self.no_color)
    }
}

/// Builder pattern for creating CLI contexts with specific configurations
#[derive(Default)]
pub struct CliContextBuilder {
    api_key: Option<String>,
    config: Option<Config>,
    client: Option<Arc<dyn ResourceClient>>,
    org: Option<String>,
}

impl CliContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Use an already built client instead of an HTTP one.
    pub fn with_client(mut self, client: Arc<dyn ResourceClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn with_org(mut self, org: &str) -> Self {
        self.org = Some(org.to_string());
        self
    }

    pub fn build(self) -> OrgResult<CliContext> {
        let mut context = match self.config {
            Some(config) => CliContext {
                api_key: None,
                config,
                ..CliContext::new()
            },
            None => CliContext::load()?,
        };

        if let Some(api_key) = self.api_key {
            context.api_key = Some(api_key);
        }
        context.client = self.client;
        context.org = self.org;
        Ok(context)
    }
}
