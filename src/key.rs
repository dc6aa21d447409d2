use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use ipnet::IpNet;

use crate::error::{Error, Result};

/// Size of a key in bytes.
pub const KEY_LEN: usize = 16;

/// Prefix lengths of IPv4 subnets are shifted by this many bits once mapped into the IPv6 space.
pub const IPV4_MAPPED_OFFSET: usize = 12 * 8;

const V4_IN_V6_PREFIX: [u8; 12] = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff];

/// A 128-bit trie key in IPv6 byte layout.
///
/// IPv4 addresses are carried in their IPv4-mapped IPv6 form (`::ffff:a.b.c.d`), so an address
/// reaches the same key whether it came in as 4 raw bytes or as its mapped 16 byte form.
///
/// ```rust
/// use std::net::Ipv4Addr;
/// use subnet_trie::Key;
///
/// let key = Key::from(Ipv4Addr::new(12, 13, 14, 15));
/// assert_eq!(
///     key.as_bytes(),
///     &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 255, 255, 12, 13, 14, 15]
/// );
/// assert!(key.is_ipv4_mapped());
/// ```
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
pub struct Key([u8; KEY_LEN]);

impl Key {
    pub const fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Canonicalizes a raw address.
    ///
    /// Accepts 4 byte IPv4 and 16 byte IPv6 addresses. An empty slice stands for an absent
    /// address and yields the all-zero key. Any other length is rejected.
    pub fn from_slice(raw: &[u8]) -> Result<Self> {
        let mut data = [0; KEY_LEN];
        match raw.len() {
            0 => {}
            4 => {
                data[..12].copy_from_slice(&V4_IN_V6_PREFIX);
                data[12..].copy_from_slice(raw);
            }
            KEY_LEN => data.copy_from_slice(raw),
            len => return Err(Error::InvalidAddressLength(len)),
        }
        Ok(Self(data))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Returns bit `pos` of the key, counting from the most significant bit of the first byte,
    /// as a child slot index.
    #[inline(always)]
    pub fn bit(&self, pos: usize) -> usize {
        debug_assert!(pos < KEY_LEN * 8, "bit position out of range");
        ((self.0[pos >> 3] & (0x80 >> (pos & 7))) != 0) as usize
    }

    pub fn is_ipv4_mapped(&self) -> bool {
        self.0[..12] == V4_IN_V6_PREFIX
    }

    pub fn to_ip_addr(&self) -> IpAddr {
        let v6 = Ipv6Addr::from(self.0);
        match v6.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(v6),
        }
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ip_addr())
    }
}

impl From<[u8; KEY_LEN]> for Key {
    fn from(data: [u8; KEY_LEN]) -> Self {
        Self(data)
    }
}

impl From<[u8; 4]> for Key {
    fn from(data: [u8; 4]) -> Self {
        let mut arr = [0; KEY_LEN];
        arr[..12].copy_from_slice(&V4_IN_V6_PREFIX);
        arr[12..].copy_from_slice(&data);
        Self(arr)
    }
}

impl From<Ipv4Addr> for Key {
    fn from(addr: Ipv4Addr) -> Self {
        addr.octets().into()
    }
}

impl From<Ipv6Addr> for Key {
    fn from(addr: Ipv6Addr) -> Self {
        addr.octets().into()
    }
}

impl From<IpAddr> for Key {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(v4) => v4.into(),
            IpAddr::V6(v6) => v6.into(),
        }
    }
}

impl From<&IpAddr> for Key {
    fn from(addr: &IpAddr) -> Self {
        (*addr).into()
    }
}

/// Converts a raw 4 or 16 byte address into a trie key. See [`Key::from_slice`].
pub fn to_key(raw: &[u8]) -> Result<Key> {
    Key::from_slice(raw)
}

/// Turns a network into the key and prefix length the trie expects.
///
/// Host bits are cleared, and IPv4 prefix lengths are shifted into the mapped address space.
pub fn subnet_key(net: &IpNet) -> (Key, usize) {
    match net {
        IpNet::V4(v4) => (
            v4.network().into(),
            v4.prefix_len() as usize + IPV4_MAPPED_OFFSET,
        ),
        IpNet::V6(v6) => (v6.network().into(), v6.prefix_len() as usize),
    }
}

/// Parses a subnet in CIDR notation (`192.168.1.0/24`, `2001:db8::/32`) into everything needed to
/// add it to a [`crate::PrefixTrie`].
pub fn parse_subnet(subnet: &str) -> Result<(Key, usize)> {
    let net: IpNet = subnet.parse()?;
    Ok(subnet_key(&net))
}
