//! corbaname URL construction and parsing
//!
//! ```text
//! corbaname:<obj_addr_list>[/<key_string>][#<string_name>]
//! obj_addr_list := obj_addr (',' obj_addr)*
//! obj_addr      := 'rir:' | [iiop] ':' [major '.' minor '@'] host [':' port]
//! ```
//!
//! The name fragment is percent-encoded. Characters that RFC 2396 leaves
//! unescaped pass through (ASCII alphanumerics, the mark set, the reserved
//! set and space); everything else is written as `%xx` per UTF-8 byte with
//! lowercase hex digits.

use std::fmt;

use crate::config::NamingConfig;
use crate::types::{Name, NamingError, Result};

/// URL scheme prefix
pub const CORBANAME_SCHEME: &str = "corbaname:";

const RIR_ADDRESS: &str = "rir:";
const IIOP_PROTOCOL: &str = "iiop";
const DEFAULT_HOST: &str = "localhost";

/// Characters written without escaping besides ASCII alphanumerics
const PASS_THROUGH: &[char] = &[
    ';', '/', '?', ':', '@', '&', '=', '+', '$', '-', '_', '.', '!', '~', '*', ' ', '(', ')',
];

/// Percent-encode a stringified name for use as a URL fragment
pub fn percent_encode(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for c in value.chars() {
        if c.is_ascii_alphanumeric() || PASS_THROUGH.contains(&c) {
            encoded.push(c);
        } else {
            let mut utf8 = [0u8; 4];
            for byte in c.encode_utf8(&mut utf8).bytes() {
                encoded.push_str(&format!("%{:02x}", byte));
            }
        }
    }
    encoded
}

/// Decode `%xx` sequences (either hex case); the result must be UTF-8
///
/// Every `%` must introduce two hex digits. `urlencoding` passes malformed
/// escapes through untouched, so they are rejected up front.
pub fn percent_decode(value: &str) -> Result<String> {
    let bytes = value.as_bytes();
    if let Some(offset) = (0..bytes.len()).find(|&i| {
        bytes[i] == b'%'
            && !bytes
                .get(i + 1..i + 3)
                .map_or(false, |pair| pair.iter().all(u8::is_ascii_hexdigit))
    }) {
        return Err(NamingError::invalid_name(format!(
            "bad percent escape at offset {}",
            offset
        )));
    }
    urlencoding::decode(value)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| NamingError::invalid_name("percent-decoded name is not UTF-8"))
}

/// Build and validate `corbaname:<address>#<encoded name>`
pub fn to_url(address: &str, sn: &str) -> Result<String> {
    if sn.is_empty() {
        return Err(NamingError::invalid_name("empty stringified name"));
    }
    super::parse(sn)?;
    if address.trim().is_empty() {
        return Err(NamingError::invalid_address("empty address"));
    }

    let url = format!("{}{}#{}", CORBANAME_SCHEME, address, percent_encode(sn));
    CorbanameUrl::parse(&url, &NamingConfig::default())?;
    Ok(url)
}

/// One entry of the address list
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObjAddr {
    /// Resolve through the local ORB's initial references
    Rir,
    /// IIOP endpoint
    Iiop {
        major: u8,
        minor: u8,
        host: String,
        port: u16,
    },
}

impl ObjAddr {
    fn parse(value: &str, default_port: u16) -> Result<Self> {
        if value.eq_ignore_ascii_case(RIR_ADDRESS) {
            return Ok(Self::Rir);
        }
        let (protocol, rest) = value.split_once(':').ok_or_else(|| {
            NamingError::invalid_address(format!("`{}` has no protocol separator", value))
        })?;
        if !protocol.is_empty() && !protocol.eq_ignore_ascii_case(IIOP_PROTOCOL) {
            return Err(NamingError::invalid_address(format!(
                "unsupported protocol `{}`",
                protocol
            )));
        }

        let (major, minor, endpoint) = match rest.split_once('@') {
            Some((version, endpoint)) => {
                let (major, minor) = parse_version(version)?;
                (major, minor, endpoint)
            }
            None => (1, 0, rest),
        };

        let (host, port) = parse_endpoint(endpoint, default_port)?;
        Ok(Self::Iiop {
            major,
            minor,
            host,
            port,
        })
    }
}

impl fmt::Display for ObjAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rir => f.write_str(RIR_ADDRESS),
            Self::Iiop {
                major,
                minor,
                host,
                port,
            } => {
                if host.contains(':') {
                    write!(f, "iiop:{}.{}@[{}]:{}", major, minor, host, port)
                } else {
                    write!(f, "iiop:{}.{}@{}:{}", major, minor, host, port)
                }
            }
        }
    }
}

fn parse_version(version: &str) -> Result<(u8, u8)> {
    let bad = || NamingError::invalid_address(format!("bad IIOP version `{}`", version));
    let (major, minor) = version.split_once('.').ok_or_else(bad)?;
    let major = major.parse::<u8>().map_err(|_| bad())?;
    let minor = minor.parse::<u8>().map_err(|_| bad())?;
    Ok((major, minor))
}

fn parse_endpoint(endpoint: &str, default_port: u16) -> Result<(String, u16)> {
    let (host, port) = if let Some(bracketed) = endpoint.strip_prefix('[') {
        let (host, after) = bracketed.split_once(']').ok_or_else(|| {
            NamingError::invalid_address(format!("unterminated IPv6 literal in `{}`", endpoint))
        })?;
        if host.is_empty() || !host.chars().all(|c| c.is_ascii_hexdigit() || c == ':' || c == '.') {
            return Err(NamingError::invalid_address(format!("bad IPv6 literal `{}`", host)));
        }
        let port = match after {
            "" => None,
            other => Some(other.strip_prefix(':').ok_or_else(|| {
                NamingError::invalid_address(format!("junk after IPv6 literal in `{}`", endpoint))
            })?),
        };
        (host.to_string(), port)
    } else {
        let (host, port) = match endpoint.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (endpoint, None),
        };
        if !host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_'))
        {
            return Err(NamingError::invalid_address(format!("bad host `{}`", host)));
        }
        let host = if host.is_empty() { DEFAULT_HOST } else { host };
        (host.to_string(), port)
    };

    let port = match port {
        None | Some("") => default_port,
        Some(port) => port
            .parse::<u16>()
            .map_err(|_| NamingError::invalid_address(format!("bad port `{}`", port)))?,
    };
    Ok((host, port))
}

/// Parsed corbaname URL
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorbanameUrl {
    /// Candidate endpoints, in preference order
    pub addresses: Vec<ObjAddr>,
    /// Object key of the naming context to start from
    pub key_string: String,
    /// Name to resolve; `None` denotes the context itself
    pub name: Option<Name>,
}

impl CorbanameUrl {
    /// Parse and validate a corbaname URL
    ///
    /// Address problems are `InvalidAddress`; a bad name fragment is
    /// `InvalidName`.
    pub fn parse(url: &str, config: &NamingConfig) -> Result<Self> {
        let rest = url
            .get(..CORBANAME_SCHEME.len())
            .filter(|scheme| scheme.eq_ignore_ascii_case(CORBANAME_SCHEME))
            .map(|_| &url[CORBANAME_SCHEME.len()..])
            .ok_or_else(|| NamingError::invalid_address(format!("`{}` is not a corbaname URL", url)))?;

        let (locator, fragment) = match rest.split_once('#') {
            Some((locator, fragment)) => (locator, Some(fragment)),
            None => (rest, None),
        };
        let (addr_list, key) = match locator.split_once('/') {
            Some((addr_list, key)) => (addr_list, Some(key)),
            None => (locator, None),
        };

        if addr_list.is_empty() {
            return Err(NamingError::invalid_address("empty address list"));
        }
        let addresses = addr_list
            .split(',')
            .map(|addr| ObjAddr::parse(addr, config.default_port))
            .collect::<Result<Vec<_>>>()?;
        if addresses.len() > 1 && addresses.contains(&ObjAddr::Rir) {
            return Err(NamingError::invalid_address(
                "`rir:` cannot be combined with other addresses",
            ));
        }

        let key_string = match key {
            None | Some("") => config.service_key.clone(),
            Some(key) => percent_decode(key)
                .map_err(|_| NamingError::invalid_address(format!("bad object key `{}`", key)))?,
        };

        let name = match fragment {
            None | Some("") => None,
            Some(fragment) => Some(super::parse(&percent_decode(fragment)?)?),
        };

        Ok(Self {
            addresses,
            key_string,
            name,
        })
    }
}
