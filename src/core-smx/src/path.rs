//! Route-path template parsing.
//!
//! Splits a path template into static and dynamic segments once, up front,
//! so slug substitution never re-parses the raw string. Dynamic segments
//! use the `:name` form, optionally constrained by an inline regex
//! (`:id(\d+)`) and optionally marked optional (`:title?`).

use std::collections::BTreeMap;

use regex::Regex;

use data_model_smx::slugs::SlugValue;

use crate::errors::{Result, SitemapError};

/// One `/`-separated piece of a route path.
#[derive(Debug, Clone)]
pub enum Segment {
    /// Literal text, copied through unchanged.
    Static(String),
    /// A dynamic parameter filled from a slug value.
    Param(Param),
    /// A catch-all segment; routes containing one never materialize.
    Wildcard,
}

/// A dynamic path parameter.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub constraint: Option<Constraint>,
    pub optional: bool,
}

/// Inline regex constraint of a parameter, compiled once at parse time and
/// anchored to match the whole substituted value.
#[derive(Debug, Clone)]
pub struct Constraint {
    pub raw: String,
    regex: Regex,
}

impl Constraint {
    pub fn matches(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

/// A parsed route path.
#[derive(Debug, Clone)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    pub fn parse(path: &str) -> Result<Self> {
        let segments = path
            .split('/')
            .map(|component| parse_component(component, path))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            raw: path.to_string(),
            segments,
        })
    }

    /// The unparsed path template, as written in the route.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn has_params(&self) -> bool {
        self.params().next().is_some()
    }

    pub fn has_wildcard(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, Segment::Wildcard))
    }

    pub fn params(&self) -> impl Iterator<Item = &Param> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(param) => Some(param),
            _ => None,
        })
    }

    /// The parameter a bare-scalar slug binds to.
    pub fn first_param(&self) -> Option<&Param> {
        self.params().next()
    }

    /// Substitutes slug values into the template, producing a concrete
    /// path. An optional parameter with no value, or an empty value,
    /// collapses its segment.
    pub fn fill(&self, values: &BTreeMap<String, SlugValue>) -> Result<String> {
        let mut parts: Vec<String> = Vec::with_capacity(self.segments.len());

        for segment in &self.segments {
            match segment {
                Segment::Static(text) => parts.push(text.clone()),
                Segment::Wildcard => parts.push("*".to_string()),
                Segment::Param(param) => {
                    let value = match values.get(&param.name) {
                        Some(value) => value.to_string(),
                        None if param.optional => continue,
                        None => {
                            return Err(SitemapError::MissingSlugValue {
                                param: param.name.clone(),
                                route: self.raw.clone(),
                            });
                        }
                    };

                    if value.is_empty() && param.optional {
                        continue;
                    }

                    if let Some(constraint) = &param.constraint
                        && !constraint.matches(&value)
                    {
                        return Err(SitemapError::SlugPatternMismatch {
                            param: param.name.clone(),
                            value,
                            pattern: constraint.raw.clone(),
                        });
                    }

                    parts.push(value);
                }
            }
        }

        Ok(parts.join("/"))
    }
}

fn parse_component(component: &str, route: &str) -> Result<Segment> {
    if component.contains('*') {
        return Ok(Segment::Wildcard);
    }

    let Some(body) = component.strip_prefix(':') else {
        return Ok(Segment::Static(component.to_string()));
    };

    let name_len = body
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .count();
    let (name, mut rest) = body.split_at(name_len);

    if name.is_empty() {
        return Ok(Segment::Static(component.to_string()));
    }

    let mut optional = false;
    if let Some(stripped) = rest.strip_suffix('?') {
        optional = true;
        rest = stripped;
    }

    let constraint = if rest.is_empty() {
        None
    } else if let Some(inner) = rest.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        let regex =
            Regex::new(&format!("^(?:{inner})$")).map_err(|source| SitemapError::InvalidParamPattern {
                param: name.to_string(),
                pattern: inner.to_string(),
                route: route.to_string(),
                source: Box::new(source),
            })?;
        Some(Constraint {
            raw: inner.to_string(),
            regex,
        })
    } else {
        // Trailing text that is not a constraint: not a parameter form we
        // recognize, keep the component as literal text.
        return Ok(Segment::Static(component.to_string()));
    };

    Ok(Segment::Param(Param {
        name: name.to_string(),
        constraint,
        optional,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, SlugValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), SlugValue::from(*v)))
            .collect()
    }

    #[test]
    fn test_parse_static_path() {
        let template = PathTemplate::parse("/blog/articles").unwrap();
        assert!(!template.has_params());
        assert!(!template.has_wildcard());
        assert_eq!(template.fill(&BTreeMap::new()).unwrap(), "/blog/articles");
    }

    #[test]
    fn test_parse_single_param() {
        let template = PathTemplate::parse("/article/:title").unwrap();
        assert!(template.has_params());
        assert_eq!(template.first_param().unwrap().name, "title");
        assert_eq!(
            template.fill(&values(&[("title", "my-first-article")])).unwrap(),
            "/article/my-first-article"
        );
    }

    #[test]
    fn test_parse_multiple_params() {
        let template = PathTemplate::parse("/article/:category/:id/:title").unwrap();
        let names: Vec<_> = template.params().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["category", "id", "title"]);
    }

    #[test]
    fn test_missing_value_for_required_param() {
        let template = PathTemplate::parse("/article/:title/:id").unwrap();
        let err = template.fill(&values(&[("id", "5")])).unwrap_err();
        match err {
            SitemapError::MissingSlugValue { param, route } => {
                assert_eq!(param, "title");
                assert_eq!(route, "/article/:title/:id");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_constraint_accepts_and_rejects() {
        let template = PathTemplate::parse(r"/article/:id(\d+)").unwrap();
        assert_eq!(template.fill(&values(&[("id", "14")])).unwrap(), "/article/14");

        let err = template.fill(&values(&[("id", "abc")])).unwrap_err();
        match err {
            SitemapError::SlugPatternMismatch { param, value, pattern } => {
                assert_eq!(param, "id");
                assert_eq!(value, "abc");
                assert_eq!(pattern, r"\d+");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_constraint_is_anchored() {
        let template = PathTemplate::parse(r"/article/:id(\d+)").unwrap();
        assert!(template.fill(&values(&[("id", "12a")])).is_err());
    }

    #[test]
    fn test_optional_param_collapses() {
        let template = PathTemplate::parse(r"/article/:category/:id(\d+)/:title?").unwrap();

        assert_eq!(
            template
                .fill(&values(&[("category", "blog"), ("id", "1"), ("title", "x")]))
                .unwrap(),
            "/article/blog/1/x"
        );
        // No value at all
        assert_eq!(
            template.fill(&values(&[("category", "misc"), ("id", "3")])).unwrap(),
            "/article/misc/3"
        );
        // Empty value
        assert_eq!(
            template
                .fill(&values(&[("category", "misc"), ("id", "3"), ("title", "")]))
                .unwrap(),
            "/article/misc/3"
        );
    }

    #[test]
    fn test_optional_param_with_constraint() {
        let template = PathTemplate::parse(r"/page/:num(\d+)?").unwrap();
        assert_eq!(template.fill(&BTreeMap::new()).unwrap(), "/page");
        assert_eq!(template.fill(&values(&[("num", "2")])).unwrap(), "/page/2");
        assert!(template.fill(&values(&[("num", "two")])).is_err());
    }

    #[test]
    fn test_wildcard_detection() {
        assert!(PathTemplate::parse("/glob/*").unwrap().has_wildcard());
        assert!(PathTemplate::parse("*").unwrap().has_wildcard());
        assert!(!PathTemplate::parse("/plain").unwrap().has_wildcard());
    }

    #[test]
    fn test_invalid_inline_pattern() {
        let err = PathTemplate::parse(r"/broken/:id((").unwrap_err();
        match err {
            SitemapError::InvalidParamPattern { param, pattern, route, .. } => {
                assert_eq!(param, "id");
                assert_eq!(pattern, "(");
                assert_eq!(route, r"/broken/:id((");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bare_colon_component_stays_literal() {
        let template = PathTemplate::parse("/time/:").unwrap();
        assert!(!template.has_params());
        assert_eq!(template.fill(&BTreeMap::new()).unwrap(), "/time/:");
    }
}
