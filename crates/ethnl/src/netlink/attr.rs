//! Netlink attribute (nlattr) handling.
//!
//! Two views over a packed attribute stream live here:
//!
//! - [`AttrIter`] walks records leniently and simply stops at the first record
//!   that does not fit. It is used where a best-effort look is enough, such as
//!   extended ACK payloads.
//! - [`AttrTable`] validates every record and indexes them by id over a
//!   bounded id space declared by an [`AttrSet`]. Reply decoders work on this.

use std::fmt;
use std::marker::PhantomData;

use super::error::{Error, Result};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Netlink attribute alignment.
pub const NLA_ALIGNTO: usize = 4;

/// Align a length to NLA_ALIGNTO boundary.
#[inline]
pub const fn nla_align(len: usize) -> usize {
    (len + NLA_ALIGNTO - 1) & !(NLA_ALIGNTO - 1)
}

/// Size of the attribute header.
pub const NLA_HDRLEN: usize = 4; // nla_align(size_of::<NlAttr>())

/// Netlink attribute header (mirrors struct nlattr).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct NlAttr {
    /// Length including header.
    pub nla_len: u16,
    /// Attribute type.
    pub nla_type: u16,
}

/// Attribute type flags.
pub const NLA_F_NESTED: u16 = 1 << 15;
pub const NLA_F_NET_BYTEORDER: u16 = 1 << 14;
pub const NLA_TYPE_MASK: u16 = !(NLA_F_NESTED | NLA_F_NET_BYTEORDER);

impl NlAttr {
    /// Create a new attribute header.
    pub fn new(attr_type: u16, data_len: usize) -> Self {
        Self {
            nla_len: (NLA_HDRLEN + data_len) as u16,
            nla_type: attr_type,
        }
    }

    /// Get the attribute type without flags.
    pub fn kind(&self) -> u16 {
        self.nla_type & NLA_TYPE_MASK
    }

    /// Check if this is a nested attribute.
    pub fn is_nested(&self) -> bool {
        self.nla_type & NLA_F_NESTED != 0
    }

    /// Get the payload length (total length minus header).
    pub fn payload_len(&self) -> usize {
        (self.nla_len as usize).saturating_sub(NLA_HDRLEN)
    }

    /// Convert to bytes.
    pub fn as_bytes(&self) -> &[u8] {
        <Self as IntoBytes>::as_bytes(self)
    }

    /// Parse from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<&Self> {
        Self::ref_from_prefix(data)
            .map(|(r, _)| r)
            .map_err(|_| Error::Truncated {
                expected: std::mem::size_of::<Self>(),
                actual: data.len(),
            })
    }
}

/// Iterator over netlink attributes in a buffer.
pub struct AttrIter<'a> {
    data: &'a [u8],
}

impl<'a> AttrIter<'a> {
    /// Create a new attribute iterator.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Check if there are no more attributes.
    pub fn is_empty(&self) -> bool {
        self.data.len() < NLA_HDRLEN
    }
}

impl<'a> Iterator for AttrIter<'a> {
    /// Returns (attribute type, payload data).
    type Item = (u16, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let attr = NlAttr::from_bytes(self.data).ok()?;

        let len = attr.nla_len as usize;
        if len < NLA_HDRLEN || len > self.data.len() {
            return None;
        }

        let payload = &self.data[NLA_HDRLEN..len];
        let aligned_len = nla_align(len);

        // Move to next attribute
        if aligned_len >= self.data.len() {
            self.data = &[];
        } else {
            self.data = &self.data[aligned_len..];
        }

        Some((attr.kind(), payload))
    }
}

/// Typed extraction of attribute payloads.
///
/// Every helper takes the attribute id only to report it in errors.
pub mod get {
    use super::*;

    fn mismatch(id: u16, expected: &'static str, data: &[u8]) -> Error {
        Error::AttributeTypeMismatch {
            id,
            expected,
            len: data.len(),
        }
    }

    /// Extract a u8 value.
    pub fn u8(id: u16, data: &[u8]) -> Result<u8> {
        match data {
            [v] => Ok(*v),
            _ => Err(mismatch(id, "u8", data)),
        }
    }

    /// Extract a u16 value (native endian).
    pub fn u16_ne(id: u16, data: &[u8]) -> Result<u16> {
        let bytes: [u8; 2] = data.try_into().map_err(|_| mismatch(id, "u16", data))?;
        Ok(u16::from_ne_bytes(bytes))
    }

    /// Extract a u32 value (native endian).
    pub fn u32_ne(id: u16, data: &[u8]) -> Result<u32> {
        let bytes: [u8; 4] = data.try_into().map_err(|_| mismatch(id, "u32", data))?;
        Ok(u32::from_ne_bytes(bytes))
    }

    /// Extract a string, stopping at the first NUL if there is one.
    pub fn string(id: u16, data: &[u8]) -> Result<&str> {
        let len = data.iter().position(|&b| b == 0).unwrap_or(data.len());
        std::str::from_utf8(&data[..len]).map_err(|_| mismatch(id, "string", data))
    }
}

/// A closed set of attribute ids belonging to one command or family.
///
/// `MAX` is the highest id the decoder knows about. It sizes the
/// [`AttrTable`]; records above it are counted as unknown and dropped.
pub trait AttrSet: Copy {
    /// Highest known attribute id.
    const MAX: u16;

    /// Numeric id of this attribute.
    fn id(self) -> u16;
}

/// Attributes of one message, indexed by id.
///
/// Slots borrow the buffer the message was received into, so a table never
/// outlives the receive iteration that produced it. When an id repeats, the
/// last record wins.
pub struct AttrTable<'a, A: AttrSet> {
    slots: Vec<Option<&'a [u8]>>,
    unknown: usize,
    _set: PhantomData<A>,
}

impl<'a, A: AttrSet> AttrTable<'a, A> {
    /// Validate and index the attribute records in `data`.
    ///
    /// Any record whose header or declared length does not fit in the
    /// remaining bytes fails the whole parse.
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let mut slots = vec![None; A::MAX as usize + 1];
        let mut unknown = 0;
        let mut offset = 0;

        while offset < data.len() {
            let rest = &data[offset..];
            let attr = NlAttr::from_bytes(rest).map_err(|_| {
                Error::MalformedFrame(format!(
                    "{} trailing bytes at offset {} cannot hold an attribute header",
                    rest.len(),
                    offset
                ))
            })?;

            let len = attr.nla_len as usize;
            if len < NLA_HDRLEN || len > rest.len() {
                return Err(Error::MalformedFrame(format!(
                    "attribute {} at offset {} claims {} bytes, {} remain",
                    attr.kind(),
                    offset,
                    len,
                    rest.len()
                )));
            }

            let id = attr.kind();
            if id <= A::MAX {
                slots[id as usize] = Some(&rest[NLA_HDRLEN..len]);
            } else {
                unknown += 1;
            }

            offset += nla_align(len).min(rest.len());
        }

        Ok(Self {
            slots,
            unknown,
            _set: PhantomData,
        })
    }

    /// Raw payload for a numeric id, if present.
    pub fn get_raw(&self, id: u16) -> Option<&'a [u8]> {
        self.slots.get(id as usize).copied().flatten()
    }

    /// Raw payload for an attribute, if present.
    pub fn get(&self, attr: A) -> Option<&'a [u8]> {
        self.get_raw(attr.id())
    }

    /// Check whether an attribute is present.
    pub fn contains(&self, attr: A) -> bool {
        self.get(attr).is_some()
    }

    /// Number of records dropped because their id is above `A::MAX`.
    pub fn unknown(&self) -> usize {
        self.unknown
    }

    /// Number of known ids that are present.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Check if no known attribute is present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn require(&self, attr: A) -> Result<&'a [u8]> {
        self.get(attr).ok_or(Error::AttributeAbsent { id: attr.id() })
    }

    /// Opaque payload.
    pub fn bytes(&self, attr: A) -> Result<&'a [u8]> {
        self.require(attr)
    }

    /// String payload (trailing NUL and anything after it ignored).
    pub fn str(&self, attr: A) -> Result<&'a str> {
        get::string(attr.id(), self.require(attr)?)
    }

    /// u8 payload.
    pub fn u8(&self, attr: A) -> Result<u8> {
        get::u8(attr.id(), self.require(attr)?)
    }

    /// u16 payload (native endian).
    pub fn u16(&self, attr: A) -> Result<u16> {
        get::u16_ne(attr.id(), self.require(attr)?)
    }

    /// u32 payload (native endian).
    pub fn u32(&self, attr: A) -> Result<u32> {
        get::u32_ne(attr.id(), self.require(attr)?)
    }

    /// Boolean encoded as a u32 that is nonzero when set.
    pub fn flag_u32(&self, attr: A) -> Result<bool> {
        self.u32(attr).map(|v| v != 0)
    }
}

impl<A: AttrSet> fmt::Debug for AttrTable<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let present: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(id, s)| s.map(|_| id))
            .collect();
        f.debug_struct("AttrTable")
            .field("max", &A::MAX)
            .field("present", &present)
            .field("unknown", &self.unknown)
            .finish()
    }
}
