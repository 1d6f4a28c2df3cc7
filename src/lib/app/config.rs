use crate::transport::{ProxyConfig, TrustStoreConfig};

use serde::de::{Error, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt::Formatter;

/// WebSocket endpoint of the twin service.
#[derive(PartialEq, Debug, Clone)]
pub struct EndpointUrl(String);

impl EndpointUrl {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_secure(&self) -> bool {
        self.0.starts_with("wss://")
    }

    fn parse(value: &str) -> Result<Self, String> {
        if value.starts_with("ws://") || value.starts_with("wss://") {
            return Ok(Self(value.to_owned()));
        }

        Err(format!("endpoint {value:?} must use the ws or wss scheme"))
    }
}

#[derive(Deserialize, PartialEq, Debug, Clone)]
pub struct ClientConfig {
    endpoint: EndpointUrl,
    #[serde(default)]
    proxy: Option<ProxyConfig>,
    #[serde(default)]
    trust_store: Option<TrustStoreConfig>,
    #[serde(default)]
    namespaces: Vec<String>,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: EndpointUrl(endpoint.into()),
            proxy: None,
            trust_store: None,
            namespaces: Vec::new(),
        }
    }

    pub fn with_proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }

    pub fn with_trust_store(mut self, trust_store: TrustStoreConfig) -> Self {
        self.trust_store = Some(trust_store);
        self
    }

    pub fn with_namespaces(
        mut self,
        namespaces: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.namespaces
            .extend(namespaces.into_iter().map(Into::into));
        self
    }

    pub fn endpoint(&self) -> &EndpointUrl {
        &self.endpoint
    }

    pub fn proxy(&self) -> Option<&ProxyConfig> {
        self.proxy.as_ref()
    }

    pub fn trust_store(&self) -> Option<&TrustStoreConfig> {
        self.trust_store.as_ref()
    }

    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }
}

impl<'de> Deserialize<'de> for EndpointUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EndpointVisitor;

        enum EndpointKey {
            Host,
            Port,
            Secure,
            Path,
        }

        impl<'de> Deserialize<'de> for EndpointKey {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                struct EndpointKeyVisitor;
                impl<'de> Visitor<'de> for EndpointKeyVisitor {
                    type Value = EndpointKey;

                    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
                        formatter.write_str("expecting a valid string key for endpoint")
                    }

                    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
                    where
                        E: Error,
                    {
                        Ok(match value {
                            "host" => EndpointKey::Host,
                            "port" => EndpointKey::Port,
                            "secure" => EndpointKey::Secure,
                            "path" => EndpointKey::Path,
                            other => {
                                return Err(E::custom(format!("unknown endpoint key \"{other}\"")))
                            }
                        })
                    }
                }

                deserializer.deserialize_identifier(EndpointKeyVisitor)
            }
        }

        impl<'de> Visitor<'de> for EndpointVisitor {
            type Value = EndpointUrl;

            fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
                formatter.write_str("a ws(s) URL or endpoint options for the twin service")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                EndpointUrl::parse(v).map_err(E::custom)
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: Error,
            {
                EndpointUrl::parse(&v).map_err(E::custom)
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut host: Option<String> = None;
                let mut port: Option<u16> = None;
                let mut secure = true;
                let mut path = String::from("/ws");

                while let Some(key) = map.next_key::<EndpointKey>()? {
                    match key {
                        EndpointKey::Host => host = Some(map.next_value()?),
                        EndpointKey::Port => port = Some(map.next_value()?),
                        EndpointKey::Secure => secure = map.next_value()?,
                        EndpointKey::Path => path = map.next_value()?,
                    }
                }

                let host = host.ok_or_else(|| A::Error::custom("endpoint host is required"))?;
                let scheme = if secure { "wss" } else { "ws" };

                let url = match port {
                    Some(port) => format!("{scheme}://{host}:{port}{path}"),
                    None => format!("{scheme}://{host}{path}"),
                };

                Ok(EndpointUrl(url))
            }
        }

        deserializer.deserialize_any(EndpointVisitor)
    }
}
