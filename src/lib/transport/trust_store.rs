use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Location and password of the PKCS#12 bundle supplying TLS key material.
#[derive(Deserialize, PartialEq, Debug, Clone)]
pub struct TrustStoreConfig {
    location: PathBuf,
    password: String,
}

impl TrustStoreConfig {
    pub fn new(location: impl Into<PathBuf>, password: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            password: password.into(),
        }
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_from_configuration_table() {
        let config: TrustStoreConfig = toml::from_str(
            r#"
            location = "/etc/twin/trust-store.p12"
            password = "secret"
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            TrustStoreConfig::new("/etc/twin/trust-store.p12", "secret")
        );
    }
}
