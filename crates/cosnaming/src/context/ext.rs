//! String and URL conveniences layered on [`NamingContextHandle`]

use super::handle::NamingContextHandle;
use crate::codec;
use crate::types::{Name, ObjectRef, Result};

/// Extended operations available on every naming context
///
/// All of them are pure conversions except [`resolve_str`], which parses its
/// argument and then calls [`NamingContextHandle::resolve`].
///
/// [`resolve_str`]: NamingContextExt::resolve_str
pub trait NamingContextExt: NamingContextHandle {
    /// Stringify `name`
    fn to_string(&self, name: &Name) -> Result<String> {
        codec::stringify(name)
    }

    /// Parse a stringified name
    fn to_name(&self, sn: &str) -> Result<Name> {
        codec::parse(sn)
    }

    /// Build a `corbaname:` URL for `sn` at `address`
    fn to_url(&self, address: &str, sn: &str) -> Result<String> {
        codec::to_url(address, sn)
    }

    /// Parse `sn` and resolve it here
    fn resolve_str(&self, sn: &str) -> Result<ObjectRef> {
        let name = codec::parse(sn)?;
        self.resolve(&name)
    }
}

impl<T: NamingContextHandle + ?Sized> NamingContextExt for T {}
