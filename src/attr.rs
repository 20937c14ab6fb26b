//! TLV attribute encoding/decoding.
//!
//! Every netlink and generic-netlink attribute shares the same
//! `nla_len`/`nla_type`/payload shape; this module is the one place
//! that knows how to read and write it, including the alignment
//! padding and the two high bits the kernel reserves in `nla_type`
//! (`NLA_F_NESTED`, `NLA_F_NET_BYTEORDER`).

use byteorder::{ByteOrder, NativeEndian};

use crate::{consts::nl::align, err::CodecError};

/// High bit of `nla_type` marking a nested attribute stream.
pub const NLA_F_NESTED: u16 = 1 << 15;
/// Second-highest bit of `nla_type` marking a big-endian payload.
pub const NLA_F_NET_BYTEORDER: u16 = 1 << 14;

const ATTR_HEADER_LEN: usize = 4;

/// A single decoded or to-be-encoded TLV attribute.
///
/// `identifier` never carries the nested/byte-order flag bits; those
/// are tracked separately so callers can match on a plain
/// [`crate::consts::nl80211::Nl80211Attr`] value regardless of how the
/// kernel tagged it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    identifier: u16,
    nested: bool,
    net_byteorder: bool,
    payload: Vec<u8>,
}

impl Attribute {
    /// Build an attribute from a raw identifier and payload.
    pub fn new(identifier: u16, payload: Vec<u8>) -> Self {
        Attribute {
            identifier,
            nested: false,
            net_byteorder: false,
            payload,
        }
    }

    /// Build a `u8`-valued attribute.
    pub fn from_u8(identifier: u16, value: u8) -> Self {
        Attribute::new(identifier, vec![value])
    }

    /// Build a `u16`-valued attribute (native endian).
    pub fn from_u16(identifier: u16, value: u16) -> Self {
        let mut payload = vec![0u8; 2];
        NativeEndian::write_u16(&mut payload, value);
        Attribute::new(identifier, payload)
    }

    /// Build a `u32`-valued attribute (native endian).
    pub fn from_u32(identifier: u16, value: u32) -> Self {
        let mut payload = vec![0u8; 4];
        NativeEndian::write_u32(&mut payload, value);
        Attribute::new(identifier, payload)
    }

    /// Build a `u64`-valued attribute (native endian).
    pub fn from_u64(identifier: u16, value: u64) -> Self {
        let mut payload = vec![0u8; 8];
        NativeEndian::write_u64(&mut payload, value);
        Attribute::new(identifier, payload)
    }

    /// Build a NUL-terminated string attribute.
    pub fn from_string(identifier: u16, value: &str) -> Self {
        let mut payload = Vec::with_capacity(value.len() + 1);
        payload.extend_from_slice(value.as_bytes());
        payload.push(0);
        Attribute::new(identifier, payload)
    }

    /// Build a zero-length flag attribute; presence is the value.
    pub fn flag(identifier: u16) -> Self {
        Attribute::new(identifier, Vec::new())
    }

    /// Mark this attribute as carrying a nested attribute stream.
    pub fn nested(mut self) -> Self {
        self.nested = true;
        self
    }

    pub fn identifier(&self) -> u16 {
        self.identifier
    }

    pub fn is_nested(&self) -> bool {
        self.nested
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn as_u8(&self) -> Result<u8, CodecError> {
        self.payload.first().copied().ok_or(CodecError::WrongWidth {
            attr: self.identifier,
            found: self.payload.len(),
        })
    }

    pub fn as_u16(&self) -> Result<u16, CodecError> {
        if self.payload.len() < 2 {
            return Err(CodecError::WrongWidth {
                attr: self.identifier,
                found: self.payload.len(),
            });
        }
        Ok(if self.net_byteorder {
            byteorder::BigEndian::read_u16(&self.payload)
        } else {
            NativeEndian::read_u16(&self.payload)
        })
    }

    pub fn as_u32(&self) -> Result<u32, CodecError> {
        if self.payload.len() < 4 {
            return Err(CodecError::WrongWidth {
                attr: self.identifier,
                found: self.payload.len(),
            });
        }
        Ok(if self.net_byteorder {
            byteorder::BigEndian::read_u32(&self.payload)
        } else {
            NativeEndian::read_u32(&self.payload)
        })
    }

    pub fn as_u64(&self) -> Result<u64, CodecError> {
        if self.payload.len() < 8 {
            return Err(CodecError::WrongWidth {
                attr: self.identifier,
                found: self.payload.len(),
            });
        }
        Ok(if self.net_byteorder {
            byteorder::BigEndian::read_u64(&self.payload)
        } else {
            NativeEndian::read_u64(&self.payload)
        })
    }

    /// Decode a NUL-terminated (or bare) string payload.
    pub fn as_string(&self) -> Result<String, CodecError> {
        let bytes = match self.payload.iter().position(|&b| b == 0) {
            Some(nul) => &self.payload[..nul],
            None => &self.payload[..],
        };
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| CodecError::Utf8)
    }

    /// Parse this attribute's payload as a nested attribute stream.
    pub fn as_nested(&self) -> Result<Vec<Attribute>, CodecError> {
        decode_all(&self.payload)
    }

    fn encoded_len(&self) -> usize {
        ATTR_HEADER_LEN + self.payload.len()
    }

    /// Serialize, including trailing alignment padding, appending to
    /// `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        let mut nla_type = self.identifier;
        if self.nested {
            nla_type |= NLA_F_NESTED;
        }
        if self.net_byteorder {
            nla_type |= NLA_F_NET_BYTEORDER;
        }
        let nla_len = self.encoded_len() as u16;
        out.extend_from_slice(&nla_len.to_ne_bytes());
        out.extend_from_slice(&nla_type.to_ne_bytes());
        out.extend_from_slice(&self.payload);
        let padded = align(self.encoded_len());
        out.resize(out.len() + (padded - self.encoded_len()), 0);
    }
}

/// Decode one attribute from the front of `buf`, returning it along
/// with the number of (alignment-padded) bytes consumed.
pub fn decode_one(buf: &[u8]) -> Result<(Attribute, usize), CodecError> {
    if buf.len() < ATTR_HEADER_LEN {
        return Err(CodecError::Truncated);
    }
    let nla_len = NativeEndian::read_u16(&buf[0..2]) as usize;
    let nla_type = NativeEndian::read_u16(&buf[2..4]);
    if nla_len < ATTR_HEADER_LEN || nla_len > buf.len() {
        return Err(CodecError::Truncated);
    }
    let payload = buf[ATTR_HEADER_LEN..nla_len].to_vec();
    let consumed = align(nla_len);
    if consumed > buf.len() {
        return Err(CodecError::Truncated);
    }
    Ok((
        Attribute {
            identifier: nla_type & !(NLA_F_NESTED | NLA_F_NET_BYTEORDER),
            nested: nla_type & NLA_F_NESTED != 0,
            net_byteorder: nla_type & NLA_F_NET_BYTEORDER != 0,
            payload,
        },
        consumed,
    ))
}

/// Decode every attribute in `buf` back to back.
pub fn decode_all(mut buf: &[u8]) -> Result<Vec<Attribute>, CodecError> {
    let mut out = Vec::new();
    while !buf.is_empty() {
        let (attr, consumed) = decode_one(buf)?;
        out.push(attr);
        buf = &buf[consumed..];
    }
    Ok(out)
}

/// Read-only view over a decoded attribute stream, mirroring the
/// owned/borrowed handle shape used elsewhere in netlink libraries,
/// but specialized to the concrete [`Attribute`] this crate decodes
/// into.
pub enum AttrHandle<'a> {
    Owned(Vec<Attribute>),
    Borrowed(&'a [Attribute]),
}

impl<'a> AttrHandle<'a> {
    pub fn new(owned: Vec<Attribute>) -> Self {
        AttrHandle::Owned(owned)
    }

    pub fn new_borrowed(borrowed: &'a [Attribute]) -> Self {
        AttrHandle::Borrowed(borrowed)
    }

    pub fn attrs(&self) -> &[Attribute] {
        match self {
            AttrHandle::Owned(v) => v.as_slice(),
            AttrHandle::Borrowed(v) => v,
        }
    }

    /// First attribute with the given identifier, if any.
    pub fn find(&self, identifier: u16) -> Option<&Attribute> {
        self.attrs().iter().find(|a| a.identifier() == identifier)
    }

    /// Every attribute with the given identifier, in wire order.
    ///
    /// Used for the nl80211 monitor-flags quirk, where each flag is
    /// sent as its own top-level attribute rather than one nested
    /// container.
    pub fn find_all(&self, identifier: u16) -> Vec<&Attribute> {
        self.attrs()
            .iter()
            .filter(|a| a.identifier() == identifier)
            .collect()
    }

    /// Decode the first attribute matching `attr` according to its
    /// schema kind, tolerating a payload whose length doesn't match
    /// the declared kind by returning it as raw bytes instead of
    /// failing — the schema is policy, not contract.
    pub fn get(&self, attr: crate::consts::nl80211::Nl80211Attr) -> AttrValue {
        use crate::consts::nl80211::AttributeKind;
        let identifier = attr.into();
        let found = match self.find(identifier) {
            Some(a) => a,
            None => return AttrValue::NotPresent,
        };
        match crate::consts::nl80211::attribute_kind(attr) {
            AttributeKind::U8 => found
                .as_u8()
                .map(AttrValue::U8)
                .unwrap_or_else(|_| AttrValue::Bytes(found.payload().to_vec())),
            AttributeKind::U16 => found
                .as_u16()
                .map(AttrValue::U16)
                .unwrap_or_else(|_| AttrValue::Bytes(found.payload().to_vec())),
            AttributeKind::U32 => found
                .as_u32()
                .map(AttrValue::U32)
                .unwrap_or_else(|_| AttrValue::Bytes(found.payload().to_vec())),
            AttributeKind::U64 => found
                .as_u64()
                .map(AttrValue::U64)
                .unwrap_or_else(|_| AttrValue::Bytes(found.payload().to_vec())),
            AttributeKind::String => found
                .as_string()
                .map(AttrValue::String)
                .unwrap_or_else(|_| AttrValue::Bytes(found.payload().to_vec())),
            AttributeKind::Flag => AttrValue::Flag,
            AttributeKind::Nested => found
                .as_nested()
                .map(AttrValue::Nested)
                .unwrap_or_else(|_| AttrValue::Bytes(found.payload().to_vec())),
            AttributeKind::Unspec => AttrValue::Bytes(found.payload().to_vec()),
        }
    }

    /// Second form of lookup that always returns the raw triple
    /// (identifier, payload, declared kind) regardless of whether the
    /// payload actually matches that kind's width.
    pub fn get_raw(
        &self,
        attr: crate::consts::nl80211::Nl80211Attr,
    ) -> Option<(u16, Vec<u8>, crate::consts::nl80211::AttributeKind)> {
        let identifier = attr.into();
        let found = self.find(identifier)?;
        Some((
            identifier,
            found.payload().to_vec(),
            crate::consts::nl80211::attribute_kind(attr),
        ))
    }
}

/// Heterogeneous decode result for [`AttrHandle::get`].
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    String(String),
    Bytes(Vec<u8>),
    Nested(Vec<Attribute>),
    /// Present with a zero-length payload.
    Flag,
    /// No attribute with the requested identifier was present.
    NotPresent,
}

/// Decode a nested list of supported/software interface types.
///
/// The kernel encodes each entry's [`crate::consts::nl80211::Nl80211Iftype`]
/// value in the nested attribute's *identifier* slot, big-endian, with
/// an empty payload — not as a `u32` payload the way every other
/// attribute in this crate works. Confirmed against PyRIC, which reads
/// `nla_type` rather than the attribute's data for this one list.
pub fn decode_iftype_list(nested: &Attribute) -> Result<Vec<u32>, CodecError> {
    let raw = nested.payload();
    let mut out = Vec::new();
    let mut rest = raw;
    while !rest.is_empty() {
        if rest.len() < ATTR_HEADER_LEN {
            break;
        }
        let nla_len = NativeEndian::read_u16(&rest[0..2]) as usize;
        let nla_type = u16::from_be_bytes([rest[2], rest[3]]);
        out.push(u32::from(nla_type));
        if nla_len < ATTR_HEADER_LEN {
            break;
        }
        let consumed = align(nla_len);
        if consumed == 0 || consumed > rest.len() {
            break;
        }
        rest = &rest[consumed..];
    }
    Ok(out)
}

/// Scan a raw `NL80211_ATTR_WIPHY_BANDS` payload for 4-byte
/// little-endian encodings of each frequency in `candidates`.
///
/// `NL80211_ATTR_WIPHY_BANDS` nests several levels deep (band ->
/// frequency list -> per-frequency attributes) in a layout this crate
/// does not attempt to walk structurally; PyRIC falls back to scanning
/// the raw bytes for known frequency values instead, and so does this
/// function. The caller supplies the candidate
/// frequency table (an external channel-table concern, out of scope
/// for this crate); this function only reports which candidates
/// actually appear in the payload, in the order given.
pub fn scan_known_frequencies(raw: &[u8], candidates: &[u32]) -> Vec<u32> {
    candidates
        .iter()
        .copied()
        .filter(|&freq| {
            let needle = freq.to_le_bytes();
            raw.windows(needle.len()).any(|w| w == needle)
        })
        .collect()
}
