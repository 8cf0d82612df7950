//! Slug sources for dynamic routes.
//!
//! A dynamic route (`/article/:title`) is expanded into concrete URLs by
//! substituting slugs into its parameters. Slugs come either as a literal
//! sequence in the configuration, or from a generator invoked at resolution
//! time (typically to pull identifiers from a database or a remote API).
//! [`Slugs::materialize`] collapses both shapes into a plain sequence so the
//! resolver has a single downstream code path.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::meta::MetaTags;

/// Boxed error returned by slug generators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A scalar slug value: the string or number bound to one route parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SlugValue {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for SlugValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text}"),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

impl From<&str> for SlugValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SlugValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for SlugValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

/// One entry of a slug sequence.
///
/// A bare scalar is implicitly bound to the route's single dynamic
/// parameter. A record binds every parameter by name and may carry override
/// meta tags alongside the parameter values.
#[derive(Debug, Clone, PartialEq)]
pub enum SlugEntry {
    Value(SlugValue),
    Record {
        values: BTreeMap<String, SlugValue>,
        tags: MetaTags,
    },
}

impl SlugEntry {
    pub fn value(value: impl Into<SlugValue>) -> Self {
        Self::Value(value.into())
    }
}

impl<'de> Deserialize<'de> for SlugEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntryVisitor;

        impl<'de> Visitor<'de> for EntryVisitor {
            type Value = SlugEntry;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, a number, or a parameter-value record")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(SlugEntry::Value(SlugValue::Text(v.to_string())))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(SlugEntry::Value(SlugValue::Number(v.into())))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(SlugEntry::Value(SlugValue::Number(v.into())))
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Self::Value, E> {
                let number = serde_json::Number::from_f64(v)
                    .ok_or_else(|| E::custom("slug numbers must be finite"))?;
                Ok(SlugEntry::Value(SlugValue::Number(number)))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut values = BTreeMap::new();
                let mut tags = MetaTags::default();

                // Reserved keys carry meta tags; everything else binds a
                // route parameter.
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "lastmod" => tags.lastmod = Some(map.next_value()?),
                        "changefreq" => tags.changefreq = Some(map.next_value()?),
                        "priority" => tags.priority = Some(map.next_value()?),
                        _ => {
                            values.insert(key, map.next_value()?);
                        }
                    }
                }

                Ok(SlugEntry::Record { values, tags })
            }
        }

        deserializer.deserialize_any(EntryVisitor)
    }
}

/// Capability producing the slug sequence of a dynamic route at resolution
/// time.
#[async_trait]
pub trait SlugGenerator: Send + Sync {
    async fn slugs(&self) -> Result<Vec<SlugEntry>, BoxError>;
}

/// Adapter turning an async closure into a [`SlugGenerator`].
pub struct FnGenerator<F>(F);

#[async_trait]
impl<F, Fut> SlugGenerator for FnGenerator<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<SlugEntry>, BoxError>> + Send + 'static,
{
    async fn slugs(&self) -> Result<Vec<SlugEntry>, BoxError> {
        (self.0)().await
    }
}

/// The slug source of a dynamic route: a literal sequence, or a generator
/// invoked once per resolution pass.
#[derive(Clone)]
pub enum Slugs {
    Literal(Vec<SlugEntry>),
    Generator(Arc<dyn SlugGenerator>),
}

impl Slugs {
    /// Wraps a [`SlugGenerator`] implementation.
    pub fn generator<G: SlugGenerator + 'static>(generator: G) -> Self {
        Self::Generator(Arc::new(generator))
    }

    /// Wraps an async closure as a generator source.
    pub fn from_fn<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<SlugEntry>, BoxError>> + Send + 'static,
    {
        Self::Generator(Arc::new(FnGenerator(f)))
    }

    /// Collapses both source shapes into a plain sequence, awaiting the
    /// generator when there is one.
    pub async fn materialize(&self) -> Result<Vec<SlugEntry>, BoxError> {
        match self {
            Self::Literal(entries) => Ok(entries.clone()),
            Self::Generator(generator) => generator.slugs().await,
        }
    }
}

impl fmt::Debug for Slugs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(entries) => f.debug_tuple("Literal").field(entries).finish(),
            Self::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

// Only literal sequences can come from configuration files; generators are
// attached programmatically.
impl<'de> Deserialize<'de> for Slugs {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self::Literal(Vec::<SlugEntry>::deserialize(deserializer)?))
    }
}
