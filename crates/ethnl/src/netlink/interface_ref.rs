//! Device selector for ethtool requests.
//!
//! An ethtool request names its device either by ifindex or by name. The
//! kernel header carries both fields; exactly one of them is filled in.
//!
//! # Example
//!
//! ```
//! use ethnl::netlink::InterfaceRef;
//!
//! let by_name: InterfaceRef = "eth0".into();
//! let by_index: InterfaceRef = 2u32.into();
//! assert_eq!(by_name.as_name(), Some("eth0"));
//! assert_eq!(by_index.to_string(), "ifindex:2");
//! ```

use std::fmt;

/// A network device, by name or by index.
///
/// Names are sent as-is and resolved by the kernel. Anything past
/// [`IFNAMSIZ`](super::genl::ethtool::IFNAMSIZ) - 1 bytes is cut off when
/// the request header is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InterfaceRef {
    /// Device name, e.g. `eth0`.
    Name(String),
    /// Device ifindex.
    Index(u32),
}

impl InterfaceRef {
    /// Select a device by name.
    #[inline]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Select a device by ifindex.
    #[inline]
    pub fn index(index: u32) -> Self {
        Self::Index(index)
    }

    /// Returns `true` for a name selector.
    #[inline]
    pub fn is_name(&self) -> bool {
        matches!(self, Self::Name(_))
    }

    /// Returns `true` for an index selector.
    #[inline]
    pub fn is_index(&self) -> bool {
        matches!(self, Self::Index(_))
    }

    /// Get the name if this is a name reference.
    #[inline]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Index(_) => None,
        }
    }

    /// Get the index if this is an index reference.
    #[inline]
    pub fn as_index(&self) -> Option<u32> {
        match self {
            Self::Name(_) => None,
            Self::Index(idx) => Some(*idx),
        }
    }
}

impl fmt::Display for InterfaceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{}", name),
            Self::Index(idx) => write!(f, "ifindex:{}", idx),
        }
    }
}

impl From<&str> for InterfaceRef {
    #[inline]
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for InterfaceRef {
    #[inline]
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&String> for InterfaceRef {
    #[inline]
    fn from(name: &String) -> Self {
        Self::Name(name.clone())
    }
}

impl From<u32> for InterfaceRef {
    #[inline]
    fn from(index: u32) -> Self {
        Self::Index(index)
    }
}
