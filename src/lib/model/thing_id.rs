use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Opaque identifier of a twin, `namespace:name` by convention.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThingId(Arc<str>);

impl ThingId {
    pub fn new(value: impl Into<Arc<str>>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn namespace(&self) -> &str {
        match self.0.find(':') {
            Some(position) => &self.0[..position],
            None => "",
        }
    }

    pub fn name(&self) -> &str {
        match self.0.find(':') {
            Some(position) => &self.0[position + 1..],
            None => &self.0,
        }
    }
}

impl Display for ThingId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<&str> for ThingId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ThingId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_namespace_from_name() {
        let thing_id = ThingId::new("org.example:sensor-1");

        assert_eq!(thing_id.namespace(), "org.example");
        assert_eq!(thing_id.name(), "sensor-1");
    }

    #[test]
    fn keeps_whole_identifier_as_name_without_namespace() {
        let thing_id = ThingId::new("sensor-1");

        assert_eq!(thing_id.namespace(), "");
        assert_eq!(thing_id.name(), "sensor-1");
    }

    #[test]
    fn splits_on_first_separator_only() {
        let thing_id = ThingId::new("org.example:sensor:left");

        assert_eq!(thing_id.namespace(), "org.example");
        assert_eq!(thing_id.name(), "sensor:left");
    }

    #[test]
    fn serializes_as_plain_string() {
        assert_eq!(
            serde_json::to_string(&ThingId::new("org.example:sensor-1")).unwrap(),
            r#""org.example:sensor-1""#
        );
    }
}
