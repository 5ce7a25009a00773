use core::fmt;

use ladle_dom::ElementData;

use crate::error::QueryError;

/// What [`Handle::find`](crate::Handle::find) and
/// [`Handle::find_all`](crate::Handle::find_all) look for.
///
/// A query always names a tag. It may also require one attribute with an
/// exact value:
///
/// ```
/// use ladle_query::Query;
///
/// let by_tag = Query::tag("p");
/// let by_attr = Query::with_attr("p", "class", "x");
/// assert_eq!(Query::from("p"), by_tag);
/// assert_eq!(Query::from(("p", "class", "x")), by_attr);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Query {
    /// Elements with this tag name.
    ByTag(String),
    /// Elements with this tag name carrying `key="value"`.
    ByTagAndAttribute {
        /// Tag name to match.
        tag: String,
        /// Attribute name.
        key: String,
        /// Exact attribute value.
        value: String,
    },
}

impl Query {
    /// Match elements by tag name only.
    #[must_use]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::ByTag(tag.into())
    }

    /// Match elements by tag name and one attribute value.
    #[must_use]
    pub fn with_attr(
        tag: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::ByTagAndAttribute {
            tag: tag.into(),
            key: key.into(),
            value: value.into(),
        }
    }

    /// Build a query from a loose argument list: `[tag]` or
    /// `[tag, key, value]`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MalformedQuery`] for any other number of
    /// arguments.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, QueryError> {
        match args {
            [tag] => Ok(Self::tag(tag.as_ref())),
            [tag, key, value] => Ok(Self::with_attr(tag.as_ref(), key.as_ref(), value.as_ref())),
            _ => Err(QueryError::MalformedQuery { arity: args.len() }),
        }
    }

    /// The tag name this query matches.
    #[must_use]
    pub fn tag_name(&self) -> &str {
        match self {
            Self::ByTag(tag) | Self::ByTagAndAttribute { tag, .. } => tag,
        }
    }

    /// The required attribute, if any.
    #[must_use]
    pub fn attribute(&self) -> Option<(&str, &str)> {
        match self {
            Self::ByTag(_) => None,
            Self::ByTagAndAttribute { key, value, .. } => Some((key, value)),
        }
    }

    /// Whether `element` satisfies this query.
    ///
    /// The tag name must be equal. With an attribute clause, any attribute
    /// with that exact name and value is enough, repeats included.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        element.tag_name == self.tag_name()
            && self
                .attribute()
                .is_none_or(|(key, value)| element.has_attribute_value(key, value))
    }
}

impl From<&str> for Query {
    fn from(tag: &str) -> Self {
        Self::tag(tag)
    }
}

impl From<String> for Query {
    fn from(tag: String) -> Self {
        Self::ByTag(tag)
    }
}

impl From<(&str, &str, &str)> for Query {
    fn from((tag, key, value): (&str, &str, &str)) -> Self {
        Self::with_attr(tag, key, value)
    }
}

impl From<&Self> for Query {
    fn from(query: &Self) -> Self {
        query.clone()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByTag(tag) => write!(f, "Element `{tag}`"),
            Self::ByTagAndAttribute { tag, key, value } => {
                write!(f, "Element `{tag}` with attributes `{key} {value}`")
            }
        }
    }
}
