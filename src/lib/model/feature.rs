use crate::error::Error;
use crate::DEFINITION_BUFFER_SIZE;
use serde_json::{Map, Value};
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Version of the wire representation a payload is serialized at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SchemaVersion {
    V1,
    V2,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureDefinition {
    identifiers: SmallVec<[Box<str>; DEFINITION_BUFFER_SIZE]>,
}

impl FeatureDefinition {
    pub fn new(identifiers: impl IntoIterator<Item = impl Into<Box<str>>>) -> Self {
        Self {
            identifiers: identifiers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.identifiers.iter().map(AsRef::as_ref)
    }

    pub fn to_json(&self) -> Value {
        Value::Array(
            self.identifiers
                .iter()
                .map(|identifier| Value::String(identifier.to_string()))
                .collect(),
        )
    }

    fn from_json(value: &Value) -> Result<Self, Error> {
        let items = value
            .as_array()
            .ok_or_else(|| Error::FeatureParse(value.to_string()))?;

        let mut identifiers = SmallVec::new();

        for item in items {
            match item.as_str() {
                Some(identifier) => identifiers.push(identifier.into()),
                None => return Err(Error::FeatureParse(value.to_string())),
            }
        }

        Ok(Self { identifiers })
    }
}

/// Named feature sub-resource of a twin.
///
/// The definition is only part of the wire representation starting with
/// [`SchemaVersion::V2`], so a feature that carries one reports `V2` as its
/// implemented version.
#[derive(Debug, Clone, PartialEq, Hash)]
pub struct Feature {
    name: Box<str>,
    definition: Option<FeatureDefinition>,
    properties: Option<Value>,
}

impl Feature {
    pub fn new(name: impl Into<Box<str>>) -> Self {
        Self {
            name: name.into(),
            definition: None,
            properties: None,
        }
    }

    pub fn with_definition(
        mut self,
        identifiers: impl IntoIterator<Item = impl Into<Box<str>>>,
    ) -> Self {
        self.definition = Some(FeatureDefinition::new(identifiers));
        self
    }

    pub fn with_properties(mut self, properties: Value) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn from_json(name: impl Into<Box<str>>, value: &Value) -> Result<Self, Error> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::FeatureParse(value.to_string()))?;

        let definition = match object.get("definition") {
            Some(definition) => Some(FeatureDefinition::from_json(definition)?),
            None => None,
        };

        let properties = match object.get("properties") {
            Some(properties) if properties.is_object() => Some(properties.clone()),
            Some(properties) => return Err(Error::FeatureParse(properties.to_string())),
            None => None,
        };

        Ok(Self {
            name: name.into(),
            definition,
            properties,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn definition(&self) -> Option<&FeatureDefinition> {
        self.definition.as_ref()
    }

    pub fn properties(&self) -> Option<&Value> {
        self.properties.as_ref()
    }

    pub fn schema_version(&self) -> SchemaVersion {
        match self.definition {
            Some(_) => SchemaVersion::V2,
            None => SchemaVersion::V1,
        }
    }

    pub fn to_json(&self, version: SchemaVersion) -> Value {
        let mut object = Map::new();

        if version >= SchemaVersion::V2 {
            if let Some(definition) = &self.definition {
                object.insert("definition".to_owned(), definition.to_json());
            }
        }

        if let Some(properties) = &self.properties {
            object.insert("properties".to_owned(), properties.clone());
        }

        Value::Object(object)
    }
}

/// Whole `/features` sub-tree of a twin, keyed by feature name.
#[derive(Debug, Clone, PartialEq, Hash, Default)]
pub struct Features {
    features: BTreeMap<Box<str>, Feature>,
}

impl Features {
    pub fn new(features: impl IntoIterator<Item = Feature>) -> Self {
        Self {
            features: features
                .into_iter()
                .map(|feature| (feature.name.clone(), feature))
                .collect(),
        }
    }

    pub fn from_json(value: &Value) -> Result<Self, Error> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::FeatureParse(value.to_string()))?;

        let mut features = BTreeMap::new();

        for (name, payload) in object {
            features.insert(
                name.as_str().into(),
                Feature::from_json(name.as_str(), payload)?,
            );
        }

        Ok(Self { features })
    }

    pub fn get(&self, name: impl AsRef<str>) -> Option<&Feature> {
        self.features.get(name.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.values()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn schema_version(&self) -> SchemaVersion {
        self.features
            .values()
            .map(Feature::schema_version)
            .max()
            .unwrap_or(SchemaVersion::V1)
    }

    pub fn to_json(&self, version: SchemaVersion) -> Value {
        Value::Object(
            self.features
                .iter()
                .map(|(name, feature)| (name.to_string(), feature.to_json(version)))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reports_first_version_without_definition() {
        let feature = Feature::new("lamp").with_properties(json!({"on": true}));

        assert_eq!(feature.schema_version(), SchemaVersion::V1);
    }

    #[test]
    fn reports_second_version_with_definition() {
        let feature = Feature::new("lamp").with_definition(["org.example:lamp:1.0.0"]);

        assert_eq!(feature.schema_version(), SchemaVersion::V2);
    }

    #[test]
    fn serializes_definition_only_at_second_version() {
        let feature = Feature::new("lamp")
            .with_definition(["org.example:lamp:1.0.0"])
            .with_properties(json!({"on": true}));

        assert_eq!(
            feature.to_json(SchemaVersion::V2),
            json!({
                "definition": ["org.example:lamp:1.0.0"],
                "properties": {"on": true}
            })
        );
        assert_eq!(
            feature.to_json(SchemaVersion::V1),
            json!({"properties": {"on": true}})
        );
    }

    #[test]
    fn parses_payload_with_definition_and_properties() {
        let feature = Feature::from_json(
            "lamp",
            &json!({
                "definition": ["org.example:lamp:1.0.0"],
                "properties": {"on": false}
            }),
        )
        .unwrap();

        assert_eq!(
            feature,
            Feature::new("lamp")
                .with_definition(["org.example:lamp:1.0.0"])
                .with_properties(json!({"on": false}))
        );
    }

    #[test]
    fn rejects_payload_that_is_not_an_object() {
        Feature::from_json("lamp", &json!(42)).unwrap_err();
    }

    #[test]
    fn rejects_definition_with_non_string_identifier() {
        Feature::from_json("lamp", &json!({"definition": [1]})).unwrap_err();
    }

    #[test]
    fn parses_feature_map() {
        let features = Features::from_json(&json!({
            "lamp": {"properties": {"on": true}},
            "door": {"definition": ["org.example:door:2.0.0"]}
        }))
        .unwrap();

        assert_eq!(features.len(), 2);
        assert_eq!(
            features.get("lamp").unwrap().properties(),
            Some(&json!({"on": true}))
        );
    }

    #[test]
    fn reports_highest_member_version() {
        let features = Features::new([
            Feature::new("lamp").with_properties(json!({})),
            Feature::new("door").with_definition(["org.example:door:2.0.0"]),
        ]);

        assert_eq!(features.schema_version(), SchemaVersion::V2);
        assert_eq!(Features::default().schema_version(), SchemaVersion::V1);
    }

    #[test]
    fn serializes_members_at_requested_version() {
        let features = Features::new([
            Feature::new("door")
                .with_definition(["org.example:door:2.0.0"])
                .with_properties(json!({"open": false})),
        ]);

        assert_eq!(
            features.to_json(SchemaVersion::V1),
            json!({"door": {"properties": {"open": false}}})
        );
    }
}
