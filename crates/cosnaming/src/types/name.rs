//! Name components and compound names
//!
//! A [`Name`] is an ordered path of [`NameComponent`]s, each an `(id, kind)`
//! pair. Names are plain values: validation of what a given operation accepts
//! happens in the naming context, not here.

use std::fmt;

use crate::codec;

/// One step of a compound name
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NameComponent {
    /// Identifier
    pub id: String,
    /// Kind qualifier (may be empty)
    pub kind: String,
}

impl NameComponent {
    /// Create a component from an id and a kind
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
        }
    }

    /// Create a component with an empty kind
    pub fn with_id(id: impl Into<String>) -> Self {
        Self::new(id, String::new())
    }

    /// True when both id and kind are empty
    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && self.kind.is_empty()
    }
}

impl fmt::Display for NameComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::stringify_component(self))
    }
}

/// Compound name
///
/// A zero-length `Name` is representable (the exhausted-iterator binding
/// carries one) but every lookup rejects it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Name(Vec<NameComponent>);

impl Name {
    /// Create a name from its components
    pub fn new(components: Vec<NameComponent>) -> Self {
        Self(components)
    }

    /// Create a one-component name
    pub fn single(component: NameComponent) -> Self {
        Self(vec![component])
    }

    /// Create a name of kind-less components from a list of ids
    pub fn from_ids(ids: &[&str]) -> Self {
        ids.iter().map(|id| NameComponent::with_id(*id)).collect()
    }

    /// The one-component name with empty id and kind, denoting "this context"
    pub fn self_reference() -> Self {
        Self::single(NameComponent::default())
    }

    /// True for the self-reference sentinel
    pub fn is_self_reference(&self) -> bool {
        self.0.len() == 1 && self.0[0].is_empty()
    }

    pub fn components(&self) -> &[NameComponent] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&NameComponent> {
        self.0.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NameComponent> {
        self.0.iter()
    }

    /// Split into the head component and the remaining name
    pub fn split_first(&self) -> Option<(&NameComponent, Name)> {
        self.0
            .split_first()
            .map(|(head, rest)| (head, Self(rest.to_vec())))
    }
}

impl From<Vec<NameComponent>> for Name {
    fn from(components: Vec<NameComponent>) -> Self {
        Self(components)
    }
}

impl From<NameComponent> for Name {
    fn from(component: NameComponent) -> Self {
        Self::single(component)
    }
}

impl FromIterator<NameComponent> for Name {
    fn from_iter<I: IntoIterator<Item = NameComponent>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Name {
    type Item = &'a NameComponent;
    type IntoIter = std::slice::Iter<'a, NameComponent>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Renders the stringified form; a zero-length name renders as nothing.
impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", component)?;
        }
        Ok(())
    }
}
