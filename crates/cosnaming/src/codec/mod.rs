//! Stringified name grammar
//!
//! ```text
//! name      := component ('/' component)*
//! component := '.' | escaped-id | '.' escaped-kind | escaped-id '.' escaped-kind
//! ```
//!
//! `.` and `/` inside an id or kind are written with a `\` prefix. The URL
//! form (`corbaname:<address>#<percent-encoded name>`) lives in [`url`].

pub mod escape;
pub mod url;

use crate::types::{Name, NameComponent, NamingError, Result};
use escape::{COMPONENT_SEPARATOR, KIND_SEPARATOR};

pub use url::{percent_decode, percent_encode, to_url, CorbanameUrl, ObjAddr};

/// Stringify one component
pub fn stringify_component(component: &NameComponent) -> String {
    match (component.id.is_empty(), component.kind.is_empty()) {
        (true, true) => ".".to_string(),
        (true, false) => format!(".{}", escape::add_escape(&component.kind)),
        (false, true) => escape::add_escape(&component.id),
        (false, false) => format!(
            "{}.{}",
            escape::add_escape(&component.id),
            escape::add_escape(&component.kind)
        ),
    }
}

/// Stringify a name
pub fn stringify(name: &Name) -> Result<String> {
    if name.is_empty() {
        return Err(NamingError::invalid_name("zero-length name"));
    }
    Ok(name
        .iter()
        .map(stringify_component)
        .collect::<Vec<_>>()
        .join("/"))
}

/// Parse one stringified component
///
/// A lone `.` yields the empty/empty component; callers decide whether that
/// is acceptable where it appears. Any other text that unescapes to an empty
/// id and kind is rejected.
pub fn parse_component(value: &str) -> Result<NameComponent> {
    if value.is_empty() {
        return Err(NamingError::invalid_name("empty name component"));
    }
    if value == "." {
        return Ok(NameComponent::default());
    }
    if escape::ends_with_unescaped(value, KIND_SEPARATOR) {
        return Err(NamingError::invalid_name(format!(
            "component `{}` ends with an unescaped `.`",
            value
        )));
    }

    let component = match escape::find_unescaped(value, KIND_SEPARATOR) {
        None => NameComponent::with_id(escape::remove_escape(value)),
        Some(dot) => NameComponent::new(
            escape::remove_escape(&value[..dot]),
            escape::remove_escape(&value[dot + 1..]),
        ),
    };
    // Only a literal `.` denotes the empty component.
    if component.is_empty() {
        return Err(NamingError::invalid_name(format!(
            "component `{}` unescapes to nothing",
            value
        )));
    }
    Ok(component)
}

/// Parse a stringified name
pub fn parse(sn: &str) -> Result<Name> {
    if sn.is_empty() {
        return Err(NamingError::invalid_name("empty stringified name"));
    }
    escape::split_unescaped(sn, COMPONENT_SEPARATOR)
        .into_iter()
        .map(parse_component)
        .collect()
}
