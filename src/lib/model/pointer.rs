use crate::error::Error;
use crate::POINTER_BUFFER_SIZE;
use serde::de::Visitor;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Slash delimited path into a twin's state tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Pointer {
    segments: SmallVec<[Box<str>; POINTER_BUFFER_SIZE]>,
}

impl Pointer {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn parse(value: impl AsRef<str>) -> Result<Self, Error> {
        let value = value.as_ref();
        let trimmed = value.strip_prefix('/').unwrap_or(value);

        if trimmed.is_empty() {
            return Ok(Self::root());
        }

        let mut segments = SmallVec::new();

        for segment in trimmed.split('/') {
            if segment.is_empty() {
                return Err(Error::PointerParse(value.to_owned()));
            }

            segments.push(segment.into());
        }

        Ok(Self { segments })
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(AsRef::as_ref)
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(AsRef::as_ref)
    }

    pub fn starts_with(&self, prefix: &Pointer) -> bool {
        if prefix.segments.len() > self.segments.len() {
            return false;
        }

        self.segments
            .iter()
            .zip(prefix.segments.iter())
            .all(|(left, right)| left == right)
    }

    pub fn join(&self, segment: impl Into<Box<str>>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }
}

impl Display for Pointer {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if self.segments.is_empty() {
            return formatter.write_str("/");
        }

        for segment in &self.segments {
            write!(formatter, "/{segment}")?;
        }

        Ok(())
    }
}

impl FromStr for Pointer {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl Serialize for Pointer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Pointer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PointerVisitor;

        impl<'de> Visitor<'de> for PointerVisitor {
            type Value = Pointer;

            fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
                formatter.write_str("a slash delimited pointer")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Pointer::parse(value).map_err(|error| E::custom(error.to_string()))
            }
        }

        deserializer.deserialize_str(PointerVisitor)
    }
}
