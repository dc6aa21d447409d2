use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid prefix length {0}, must be below 127")]
    InvalidLength(usize),
    #[error("prefix not contained in trie")]
    NotContained,
    #[error("invalid CIDR notation: {0}")]
    Parse(#[from] ipnet::AddrParseError),
    #[error("invalid raw address length {0}, expected 0, 4 or 16 bytes")]
    InvalidAddressLength(usize),
}
