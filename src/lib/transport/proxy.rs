use serde::Deserialize;

/// Proxy settings as they appear in the configuration file.
#[derive(Deserialize, PartialEq, Debug, Clone)]
pub struct ProxyConfig {
    host: String,
    port: u16,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

impl ProxyConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            username: None,
            password: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyCredentials {
    username: String,
    password: String,
}

impl ProxyCredentials {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Reduced proxy routing decision carried by the transport configuration.
///
/// Exists only when the configured host is non-empty and the port is
/// positive; credentials are attached only when both parts are supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRoute {
    host: String,
    port: u16,
    credentials: Option<ProxyCredentials>,
}

impl ProxyRoute {
    pub fn from_config(config: &ProxyConfig) -> Option<Self> {
        if config.host.is_empty() || config.port == 0 {
            return None;
        }

        let credentials = match (&config.username, &config.password) {
            (Some(username), Some(password)) => Some(ProxyCredentials {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        };

        Some(Self {
            host: config.host.clone(),
            port: config.port,
            credentials,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn credentials(&self) -> Option<&ProxyCredentials> {
        self.credentials.as_ref()
    }
}
