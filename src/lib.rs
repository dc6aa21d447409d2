//! # subnet-trie
//!
//! Membership tests of IP addresses against a changing set of CIDR subnets.
//!
//! Both address families share one 128-bit key space: IPv4 addresses are keyed by their
//! IPv4-mapped IPv6 form (`::ffff:a.b.c.d`) and IPv4 prefix lengths are shifted by 96 bits to
//! match. The set itself is a binary trie walked one key bit at a time, so a lookup costs at most
//! 127 steps regardless of how many subnets are registered.
//!
//! ```rust
//! use std::net::IpAddr;
//! use subnet_trie::{parse_subnet, Key, PrefixTrie};
//!
//! let mut trie = PrefixTrie::new();
//! let (key, length) = parse_subnet("10.0.0.0/8").unwrap();
//! trie.add(&key, length).unwrap();
//! trie.add_subnet("2001:db8::/32").unwrap();
//!
//! let addr: IpAddr = "10.20.30.40".parse().unwrap();
//! assert!(trie.matches(&Key::from(addr)));
//! assert!(trie.matches_addr("2001:db8::42".parse::<IpAddr>().unwrap()));
//! assert!(!trie.matches_addr("192.0.2.1".parse::<IpAddr>().unwrap()));
//! ```
//!
//! A [`PrefixTrie`] does no locking of its own; wrap it in a `RwLock` to share it between
//! threads.

pub mod error;
pub mod key;
pub mod stats;
pub mod trie;
pub mod utils;

pub use error::{Error, Result};
pub use key::{parse_subnet, subnet_key, to_key, Key, IPV4_MAPPED_OFFSET, KEY_LEN};
pub use stats::{TreeStats, TreeStatsTrait};
pub use trie::{PrefixTrie, MATCH_DEPTH, MAX_PREFIX_LEN};
