/// Error types for script operations.
///
/// Covers format generation, key capability mismatches, address
/// encoding and address parsing.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Generic invalid script error.
    #[error("invalid script: {0}")]
    InvalidScript(String),

    /// The format name is not in the format table.
    #[error("unsupported format {0}")]
    UnsupportedFormat(String),

    /// The key type cannot produce the requested encoding.
    #[error("pubkey of type {key_type} does not support {encoding} export")]
    UnsupportedKeyEncoding {
        /// Name of the key type.
        key_type: &'static str,
        /// Requested encoding.
        encoding: &'static str,
    },

    /// The script cannot be rendered as an address.
    #[error("could not transform outscript of format {0}")]
    UnsupportedOutScript(String),

    /// The format is understood but not on this network.
    #[error("format {format} is not supported on network {network}")]
    UnsupportedNetworkFormat {
        /// Format name.
        format: String,
        /// Network name.
        network: String,
    },

    /// Network name not recognized for address parsing.
    #[error("unsupported {0} network for address parsing")]
    UnsupportedNetwork(String),

    /// Invalid address string.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// No decoding strategy accepted the address.
    #[error("unsupported address {0}")]
    UnsupportedAddress(String),

    /// Address decoded for a different network than requested.
    #[error("address {address} is for {found}, not {expected}")]
    NetworkMismatch {
        /// The parsed address.
        address: String,
        /// Network detected from the address.
        found: String,
        /// Network requested by the caller.
        expected: String,
    },

    /// Mixed-case address whose checksum capitalisation is wrong.
    #[error("invalid checksum in address {0}")]
    BadChecksum(String),

    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    /// Error from primitives crate.
    #[error("primitives error: {0}")]
    Primitives(#[from] outscript_primitives::PrimitivesError),
}
