//! Address encoding and parsing for Bitcoin-derived and EVM networks.
//!
//! Legacy key-hash and script-hash outputs use Base58Check with a
//! network version byte (CashAddr on Bitcoin Cash), segwit outputs use
//! Bech32/Bech32m with a network prefix, and EVM outputs use EIP-55 hex.

use std::fmt;

use outscript_primitives::{base58, cashaddr, segwit};

use crate::eip55::eip55;
use crate::opcodes::*;
use crate::out::Out;
use crate::pushdata::{parse_push_bytes, push_bytes};
use crate::ScriptError;

/// Network name accepted by [`parse_bitcoin_based_address`] to auto-detect.
pub const AUTO: &str = "auto";

const CASHADDR_PREFIX: &str = "bitcoincash";

/// A Bitcoin-derived network with its own address encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    /// Bitcoin mainnet.
    Bitcoin,
    /// Bitcoin Cash, CashAddr encoded.
    BitcoinCash,
    /// Bitcoin testnet.
    BitcoinTestnet,
    /// Litecoin.
    Litecoin,
    /// Dogecoin.
    Dogecoin,
    /// Namecoin.
    Namecoin,
    /// Monacoin.
    Monacoin,
    /// Electraproto.
    Electraproto,
    /// Dash.
    Dash,
}

/// Address parameters of a [`Network`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkParams {
    /// Canonical network name.
    pub name: &'static str,
    /// Base58Check version byte of key-hash addresses.
    pub p2pkh: u8,
    /// Base58Check version byte of script-hash addresses.
    pub p2sh: u8,
    /// Segwit human-readable prefix, if the network supports segwit.
    pub hrp: Option<&'static str>,
    /// CashAddr prefix, if addresses are CashAddr rather than Base58Check.
    pub cashaddr: Option<&'static str>,
}

static NETWORKS: [(Network, NetworkParams); 9] = [
    (Network::Bitcoin, NetworkParams { name: "bitcoin", p2pkh: 0x00, p2sh: 0x05, hrp: Some("bc"), cashaddr: None }),
    (Network::BitcoinCash, NetworkParams { name: "bitcoin-cash", p2pkh: 0x00, p2sh: 0x05, hrp: None, cashaddr: Some(CASHADDR_PREFIX) }),
    (Network::BitcoinTestnet, NetworkParams { name: "bitcoin-testnet", p2pkh: 0x6f, p2sh: 0xc4, hrp: Some("tb"), cashaddr: None }),
    (Network::Litecoin, NetworkParams { name: "litecoin", p2pkh: 0x30, p2sh: 0x32, hrp: Some("ltc"), cashaddr: None }),
    (Network::Dogecoin, NetworkParams { name: "dogecoin", p2pkh: 0x1e, p2sh: 0x16, hrp: None, cashaddr: None }),
    (Network::Namecoin, NetworkParams { name: "namecoin", p2pkh: 0x34, p2sh: 0x0d, hrp: Some("nc"), cashaddr: None }),
    (Network::Monacoin, NetworkParams { name: "monacoin", p2pkh: 0x32, p2sh: 0x37, hrp: Some("mona"), cashaddr: None }),
    (Network::Electraproto, NetworkParams { name: "electraproto", p2pkh: 0x37, p2sh: 0x89, hrp: Some("ep"), cashaddr: None }),
    (Network::Dash, NetworkParams { name: "dash", p2pkh: 0x4c, p2sh: 0x10, hrp: None, cashaddr: None }),
];

impl Network {
    /// Resolve a network name. `bitcoincash` is accepted as an alias.
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "bitcoincash" {
            return Some(Network::BitcoinCash);
        }
        NETWORKS
            .iter()
            .find(|(_, p)| p.name == name)
            .map(|(n, _)| *n)
    }

    /// Resolve a segwit human-readable prefix.
    pub fn from_hrp(hrp: &str) -> Option<Self> {
        NETWORKS
            .iter()
            .find(|(_, p)| p.hrp == Some(hrp))
            .map(|(n, _)| *n)
    }

    /// The address parameters of this network.
    pub fn params(self) -> &'static NetworkParams {
        // every variant has a row
        &NETWORKS[self as usize].1
    }

    /// Canonical name.
    pub fn name(self) -> &'static str {
        self.params().name
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy)]
enum HashKind {
    KeyHash,
    ScriptHash,
}

impl HashKind {
    fn out(self, hash: &[u8], flags: &[&str]) -> Out {
        match self {
            HashKind::KeyHash => Out::with_flags("p2pkh", p2pkh_script(hash), flags),
            HashKind::ScriptHash => Out::with_flags("p2sh", p2sh_script(hash), flags),
        }
    }
}

/// Version bytes tried when the network is auto-detected. Where two
/// networks share a byte the first listed wins.
static AUTO_BASE58: &[(u8, HashKind, &[&str])] = &[
    (0x00, HashKind::KeyHash, &["bitcoin", "bitcoin-cash"]),
    (0x05, HashKind::ScriptHash, &["bitcoin", "bitcoin-cash"]),
    (0x0d, HashKind::ScriptHash, &["namecoin"]),
    (0x10, HashKind::ScriptHash, &["dash"]),
    (0x16, HashKind::ScriptHash, &["dogecoin"]),
    (0x1e, HashKind::KeyHash, &["dogecoin"]),
    (0x30, HashKind::KeyHash, &["litecoin"]),
    (0x32, HashKind::ScriptHash, &["litecoin"]),
    (0x34, HashKind::KeyHash, &["namecoin"]),
    (0x37, HashKind::ScriptHash, &["monacoin"]),
    (0x4c, HashKind::KeyHash, &["dash"]),
    (0x6f, HashKind::KeyHash, &["bitcoin-testnet"]),
    (0x89, HashKind::ScriptHash, &["electraproto"]),
    (0xc4, HashKind::ScriptHash, &["bitcoin-testnet"]),
];

fn p2pkh_script(hash: &[u8]) -> Vec<u8> {
    let mut s = vec![OP_DUP, OP_HASH160];
    s.extend_from_slice(&push_bytes(hash));
    s.extend_from_slice(&[OP_EQUALVERIFY, OP_CHECKSIG]);
    s
}

fn p2sh_script(hash: &[u8]) -> Vec<u8> {
    let mut s = vec![OP_HASH160];
    s.extend_from_slice(&push_bytes(hash));
    s.push(OP_EQUAL);
    s
}

fn witness_script(version_op: u8, program: &[u8]) -> Vec<u8> {
    let mut s = vec![version_op];
    s.extend_from_slice(&push_bytes(program));
    s
}

/// The push inside `raw` after dropping `head` leading and `tail` trailing bytes.
fn inner_push(raw: &[u8], head: usize, tail: usize) -> Option<&[u8]> {
    let end = raw.len().checked_sub(tail)?;
    parse_push_bytes(raw.get(head..end)?).0
}

impl Out {
    /// Render this script as an address.
    ///
    /// The network is the first entry of `hints` followed by the Out's own
    /// flags; when that is absent or not a known network, bitcoin is used.
    /// This holds for segwit formats too, which encode with the `bc` prefix
    /// when no network is given.
    pub fn address(&self, hints: &[&str]) -> Result<String, ScriptError> {
        let network = hints
            .iter()
            .copied()
            .chain(self.flags().iter().map(String::as_str))
            .next()
            .and_then(Network::from_name)
            .unwrap_or(Network::Bitcoin);
        let params = network.params();
        let invalid = || ScriptError::InvalidScript(format!("invalid script for {} address", self.name()));
        let raw = self.bytes();

        match self.base_name() {
            "eth" | "evm" => Ok(eip55(raw)),
            "p2pkh" | "p2pukh" => {
                let hash = inner_push(raw, 2, 2).ok_or_else(invalid)?;
                match params.cashaddr {
                    Some(prefix) => Ok(cashaddr::encode(prefix, cashaddr::TYPE_P2KH, hash)?),
                    None => Ok(base58::encode_address(params.p2pkh, hash)),
                }
            }
            "p2sh" => {
                let hash = inner_push(raw, 1, 1).ok_or_else(invalid)?;
                match params.cashaddr {
                    Some(prefix) => Ok(cashaddr::encode(prefix, cashaddr::TYPE_P2SH, hash)?),
                    None => Ok(base58::encode_address(params.p2sh, hash)),
                }
            }
            base @ ("p2wpkh" | "p2wsh" | "p2tr") => {
                let program = inner_push(raw, 1, 0).ok_or_else(invalid)?;
                let hrp = params.hrp.ok_or_else(|| ScriptError::UnsupportedNetworkFormat {
                    format: self.name().to_string(),
                    network: network.name().to_string(),
                })?;
                let version = if base == "p2tr" { 1 } else { 0 };
                Ok(segwit::encode(hrp, version, program)?)
            }
            _ => Err(ScriptError::UnsupportedOutScript(self.name().to_string())),
        }
    }
}

/// Parse an EVM address into an `eth` [`Out`] flagged `evm`.
///
/// All-lowercase addresses are accepted as-is. Any other casing must match
/// the EIP-55 checksum exactly.
pub fn parse_evm_address(address: &str) -> Result<Out, ScriptError> {
    let body = match address.strip_prefix("0x") {
        Some(body) if address.len() == 42 => body,
        _ => {
            return Err(ScriptError::InvalidAddress(
                "EVM addresses must be 42 characters long and start with 0x".to_string(),
            ))
        }
    };
    let raw = hex::decode(body)?;
    if address != address.to_lowercase() && address != eip55(&raw) {
        return Err(ScriptError::BadChecksum(address.to_string()));
    }
    Ok(Out::with_flags("eth", raw, &["evm"]))
}

/// Parse an address of any supported Bitcoin-derived network.
///
/// Same as [`parse_bitcoin_based_address`] with [`AUTO`].
pub fn parse_bitcoin_address(address: &str) -> Result<Out, ScriptError> {
    parse_bitcoin_based_address(AUTO, address)
}

/// Parse an address for `network` into the matching output script.
///
/// `network` is a network name or [`AUTO`]. CashAddr is tried first, then
/// segwit, then Base58Check, and finally CashAddr without its prefix. The
/// returned Out's flags name the network(s) the address belongs to.
///
/// # Returns
/// An error if no encoding accepts the address, the address belongs to a
/// network other than `network`, or `network` is not known.
pub fn parse_bitcoin_based_address(network: &str, address: &str) -> Result<Out, ScriptError> {
    let wanted = if network == AUTO {
        None
    } else {
        Some(Network::from_name(network).ok_or_else(|| ScriptError::UnsupportedNetwork(network.to_string()))?)
    };
    let mismatch = |found: Network| ScriptError::NetworkMismatch {
        address: address.to_string(),
        found: found.name().to_string(),
        expected: network.to_string(),
    };

    if address.starts_with("bitcoincash:") {
        if wanted.is_some_and(|n| n != Network::BitcoinCash) {
            return Err(mismatch(Network::BitcoinCash));
        }
        return parse_cashaddr(address);
    }

    if address.rfind('1').is_some_and(|pos| pos > 0) {
        match segwit::decode(address) {
            Ok((hrp, version, program)) => {
                let found = Network::from_hrp(&hrp)
                    .ok_or_else(|| ScriptError::InvalidAddress(format!("unsupported hrp value {}", hrp)))?;
                if wanted.is_some_and(|n| n != found) {
                    return Err(mismatch(found));
                }
                let flags = [found.name()];
                return match (version, program.len()) {
                    (0, 20) => Ok(Out::with_flags("p2wpkh", witness_script(OP_0, &program), &flags)),
                    (0, 32) => Ok(Out::with_flags("p2wsh", witness_script(OP_0, &program), &flags)),
                    (0, n) => Err(ScriptError::InvalidAddress(format!("invalid segwit address length {}", n))),
                    (1, 32) => Ok(Out::with_flags("p2tr", witness_script(OP_1, &program), &flags)),
                    (v, _) => Err(ScriptError::InvalidAddress(format!("unsupported segwit type {}", v))),
                };
            }
            Err(e) => log::trace!("{} is not a segwit address: {}", address, e),
        }
    }

    match base58::decode_address(address) {
        Ok((version, hash)) => return parse_base58(wanted, network, version, &hash),
        Err(e) => log::trace!("{} is not a base58 address: {}", address, e),
    }

    if matches!(wanted, None | Some(Network::BitcoinCash)) {
        let prefixed = format!("{}:{}", CASHADDR_PREFIX, address);
        match parse_cashaddr(&prefixed) {
            Ok(out) => return Ok(out),
            Err(e) => log::trace!("{} is not a cashaddr address: {}", address, e),
        }
    }

    Err(ScriptError::UnsupportedAddress(address.to_string()))
}

fn parse_cashaddr(address: &str) -> Result<Out, ScriptError> {
    let (kind, hash) = cashaddr::decode(CASHADDR_PREFIX, address)?;
    let flags = [Network::BitcoinCash.name()];
    match kind {
        cashaddr::TYPE_P2KH => Ok(HashKind::KeyHash.out(&hash, &flags)),
        cashaddr::TYPE_P2SH => Ok(HashKind::ScriptHash.out(&hash, &flags)),
        other => Err(ScriptError::InvalidAddress(format!(
            "unsupported bitcoincash address type {}",
            other
        ))),
    }
}

fn parse_base58(
    wanted: Option<Network>,
    network: &str,
    version: u8,
    hash: &[u8],
) -> Result<Out, ScriptError> {
    if hash.len() != 20 {
        return Err(ScriptError::InvalidAddress(format!(
            "base58 address payload must be 20 bytes, got {}",
            hash.len()
        )));
    }
    let unsupported = || {
        ScriptError::InvalidAddress(format!(
            "unsupported {} base58 address version={:02x}",
            network, version
        ))
    };

    match wanted {
        None => {
            let (_, kind, flags) = AUTO_BASE58
                .iter()
                .find(|(v, _, _)| *v == version)
                .ok_or_else(unsupported)?;
            Ok(kind.out(hash, flags))
        }
        Some(net) => {
            let params = net.params();
            let flags = [params.name];
            if version == params.p2pkh {
                Ok(HashKind::KeyHash.out(hash, &flags))
            } else if version == params.p2sh {
                Ok(HashKind::ScriptHash.out(hash, &flags))
            } else {
                Err(unsupported())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Script;
    use outscript_primitives::ec::PrivateKey;

    const PRIV: &str = "eb696a065ef48a2192da5b28b694f87544b30fae8327c4510137a922f32c6dcf";
    const P2PKH_BTC: &str = "1C2yfT2NNAPPHBqXQxxBPvguht2whJWRSi";

    fn key() -> outscript_primitives::ec::PublicKey {
        PrivateKey::from_hex(PRIV).unwrap().pub_key()
    }

    // -----------------------------------------------------------------------
    // address generation
    // -----------------------------------------------------------------------

    #[test]
    fn test_address_vectors() {
        let key = key();
        let mut s = Script::new(&key);
        let cases = [
            ("eth", "ethereum", "0x2AeB8ADD8337360E088B7D9ce4e857b9BE60f3a7"),
            ("p2pkh", "bitcoin", P2PKH_BTC),
            ("p2pkh", "bitcoin-cash", "bitcoincash:qpusjxtjrpkyf843mmfzk78yp5qfhhcq3yv38ma5lm"),
            ("p2pkh", "litecoin", "LWFvvfLCSpdSXzXgb6wUfwkfv6QDipAzJc"),
            ("p2sh:p2pkh", "litecoin", "MNBNbudWqRT5MhorGVnpk7DDuMX5XCxKnR"),
            ("p2wpkh", "bitcoin", "bc1q0yy3juscd3zfavw76g4h3eqdqzda7qyf58rj4m"),
            ("p2wpkh", "litecoin", "ltc1q0yy3juscd3zfavw76g4h3eqdqzda7qyfsmekdt"),
            (
                "p2wsh:p2wpkh",
                "bitcoin",
                "bc1qwg7r0yn6t7ctfaplxuwvlu2yk8q6fd3xsvr3lkq5ud4ylsecczzqgq9ste",
            ),
        ];
        for (format, net, expected) in cases {
            assert_eq!(s.address(format, &[net]).unwrap(), expected, "{} on {}", format, net);
        }
    }

    /// Without hints the default is bitcoin, segwit included; the bitcoincash alias selects CashAddr.
    #[test]
    fn test_address_default_network_and_alias() {
        let key = key();
        let mut s = Script::new(&key);
        assert_eq!(s.address("p2pkh", &[]).unwrap(), P2PKH_BTC);
        assert_eq!(s.address("p2pkh", &["no-such-net"]).unwrap(), P2PKH_BTC);
        assert_eq!(
            s.address("p2wpkh", &[]).unwrap(),
            "bc1q0yy3juscd3zfavw76g4h3eqdqzda7qyf58rj4m"
        );
        assert!(s.address("p2wsh:p2pkh", &[]).unwrap().starts_with("bc1q"));
        assert!(s.address("p2pkh", &["bitcoincash"]).unwrap().starts_with("bitcoincash:q"));
    }

    #[test]
    fn test_address_errors() {
        let key = key();
        let mut s = Script::new(&key);
        assert!(matches!(
            s.address("p2wpkh", &["dogecoin"]),
            Err(ScriptError::UnsupportedNetworkFormat { .. })
        ));
        let op_return = Out::new("op_return", vec![OP_RETURN], Vec::new());
        assert_eq!(
            op_return.address(&[]).unwrap_err().to_string(),
            "could not transform outscript of format op_return"
        );
        let short = Out::new("p2pkh", vec![OP_DUP], Vec::new());
        assert!(short.address(&[]).is_err());
    }

    // -----------------------------------------------------------------------
    // round trips
    // -----------------------------------------------------------------------

    const ALL_NETWORKS: [&str; 9] = [
        "bitcoin",
        "bitcoin-cash",
        "bitcoin-testnet",
        "litecoin",
        "dogecoin",
        "namecoin",
        "monacoin",
        "electraproto",
        "dash",
    ];

    /// Every registered format either round-trips through its address on
    /// every network or is refused with an error.
    #[test]
    fn test_network_roundtrip() {
        let key = key();
        let mut s = Script::new(&key);
        for net in ALL_NETWORKS {
            let params = Network::from_name(net).unwrap().params();
            for format in crate::FORMATS {
                let name = format.name;
                let out = s.out(name).unwrap();
                let result = out.address(&[net]);
                let base = out.base_name();
                match base {
                    "p2pk" | "p2puk" => {
                        assert!(
                            matches!(result, Err(ScriptError::UnsupportedOutScript(_))),
                            "{} on {}",
                            name,
                            net
                        );
                        continue;
                    }
                    "p2wpkh" | "p2wsh" if params.hrp.is_none() => {
                        assert!(
                            matches!(result, Err(ScriptError::UnsupportedNetworkFormat { .. })),
                            "{} on {}",
                            name,
                            net
                        );
                        continue;
                    }
                    "eth" => {
                        let addr = result.unwrap();
                        assert!(parse_bitcoin_based_address(net, &addr).is_err(), "{} on {}", addr, net);
                        assert_eq!(parse_evm_address(&addr).unwrap().bytes(), out.bytes());
                        continue;
                    }
                    _ => {}
                }

                let addr = result.unwrap_or_else(|e| panic!("{} on {}: {}", name, net, e));
                if params.cashaddr.is_some() {
                    assert!(addr.starts_with("bitcoincash:"), "{}", addr);
                }
                let parsed = parse_bitcoin_based_address(net, &addr).unwrap();
                assert_eq!(parsed.name(), base, "{} on {}", name, net);
                assert_eq!(parsed.flags(), &[net.to_string()]);
                assert_eq!(parsed.bytes(), out.bytes(), "{} on {}", name, net);
                assert_eq!(parsed.address(&[]).unwrap(), addr, "{} on {}", name, net);
            }
        }
    }

    /// Taproot outputs encode as Bech32m wherever the network has a segwit prefix.
    #[test]
    fn test_taproot_network_roundtrip() {
        let mut raw = vec![OP_1, 0x20];
        raw.extend_from_slice(&[0x42; 32]);
        let out = Out::new("p2tr", raw, Vec::new());
        for net in ALL_NETWORKS {
            let params = Network::from_name(net).unwrap().params();
            let result = out.address(&[net]);
            let Some(hrp) = params.hrp else {
                assert!(
                    matches!(result, Err(ScriptError::UnsupportedNetworkFormat { .. })),
                    "p2tr on {}",
                    net
                );
                continue;
            };
            let addr = result.unwrap();
            assert!(addr.starts_with(&format!("{}1p", hrp)), "{}", addr);
            let parsed = parse_bitcoin_based_address(net, &addr).unwrap();
            assert_eq!(parsed.name(), "p2tr");
            assert_eq!(parsed.bytes(), out.bytes());
            assert_eq!(parsed.address(&[]).unwrap(), addr);
        }
    }

    /// Flipping any single data character of a segwit address breaks its checksum.
    #[test]
    fn test_segwit_flipped_char_rejected() {
        let key = key();
        let mut s = Script::new(&key);
        let v0 = s.address("p2wpkh", &["bitcoin"]).unwrap();
        let v1 = "bc1pgf6m46mr8c55veujxg3qvqxfektwmmpfrt5mhwtvwrzeacmm7xaqdndj5l".to_string();
        for addr in [v0, v1] {
            assert!(parse_bitcoin_based_address("bitcoin", &addr).is_ok());
            for i in "bc1".len()..addr.len() {
                let mut chars: Vec<char> = addr.chars().collect();
                chars[i] = if chars[i] == 'q' { 'p' } else { 'q' };
                let bad: String = chars.into_iter().collect();
                assert!(parse_bitcoin_based_address("bitcoin", &bad).is_err(), "{}", bad);
                assert!(parse_bitcoin_based_address(AUTO, &bad).is_err(), "{}", bad);
            }
        }
    }

    #[test]
    fn test_auto_detection() {
        let key = key();
        let mut s = Script::new(&key);
        for net in ["dogecoin", "namecoin", "dash", "bitcoin-testnet", "litecoin"] {
            let addr = s.address("p2pkh", &[net]).unwrap();
            let out = parse_bitcoin_address(&addr).unwrap();
            assert_eq!(out.flags(), &[net.to_string()], "{}", addr);
            assert_eq!(out.address(&[]).unwrap(), addr);
        }

        let out = parse_bitcoin_address(P2PKH_BTC).unwrap();
        assert_eq!(out.flags(), &["bitcoin".to_string(), "bitcoin-cash".to_string()]);
        assert_eq!(out.address(&[]).unwrap(), P2PKH_BTC);
    }

    #[test]
    fn test_parse_cashaddr() {
        let addr = "bitcoincash:qpusjxtjrpkyf843mmfzk78yp5qfhhcq3yv38ma5lm";
        let expected = Script::new(&key()).generate("p2pkh").unwrap();
        for input in [addr, &addr["bitcoincash:".len()..]] {
            let out = parse_bitcoin_address(input).unwrap();
            assert_eq!(out.name(), "p2pkh");
            assert_eq!(out.bytes(), &expected[..]);
            assert_eq!(out.address(&[]).unwrap(), addr);
        }
        assert!(parse_bitcoin_based_address("bitcoin-cash", addr).is_ok());
        assert!(matches!(
            parse_bitcoin_based_address("litecoin", addr),
            Err(ScriptError::NetworkMismatch { .. })
        ));
    }

    /// Version 1 witness programs parse as taproot and re-encode as Bech32m.
    #[test]
    fn test_parse_taproot() {
        let addr = "bc1pgf6m46mr8c55veujxg3qvqxfektwmmpfrt5mhwtvwrzeacmm7xaqdndj5l";
        let out = parse_bitcoin_based_address("bitcoin", addr).unwrap();
        assert_eq!(out.name(), "p2tr");
        assert_eq!(&out.bytes()[..2], &[OP_1, 0x20]);
        assert_eq!(out.hash().unwrap().len(), 32);
        assert_eq!(out.address(&[]).unwrap(), addr);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_bitcoin_based_address("unsupported-net", P2PKH_BTC),
            Err(ScriptError::UnsupportedNetwork(_))
        ));
        assert!(matches!(
            parse_bitcoin_address("not-an-address!!!"),
            Err(ScriptError::UnsupportedAddress(_))
        ));
        assert!(matches!(
            parse_bitcoin_based_address("litecoin", "bc1q0yy3juscd3zfavw76g4h3eqdqzda7qyf58rj4m"),
            Err(ScriptError::NetworkMismatch { .. })
        ));
        // bitcoin version byte on litecoin
        assert!(parse_bitcoin_based_address("litecoin", P2PKH_BTC).is_err());
        // corrupted checksum
        assert!(parse_bitcoin_address("1C2yfT2NNAPPHBqXQxxBPvguht2whJWRSj").is_err());
    }

    // -----------------------------------------------------------------------
    // EVM
    // -----------------------------------------------------------------------

    #[test]
    fn test_parse_evm_address() {
        let out = parse_evm_address("0x2AeB8ADD8337360E088B7D9ce4e857b9BE60f3a7").unwrap();
        assert_eq!(out.name(), "eth");
        assert_eq!(out.flags(), &["evm".to_string()]);
        assert_eq!(out.script(), "2aeb8add8337360e088b7d9ce4e857b9be60f3a7");
        assert_eq!(out.address(&[]).unwrap(), "0x2AeB8ADD8337360E088B7D9ce4e857b9BE60f3a7");

        assert!(parse_evm_address("0x2aeb8add8337360e088b7d9ce4e857b9be60f3a7").is_ok());
    }

    #[test]
    fn test_parse_evm_address_errors() {
        assert!(matches!(
            parse_evm_address("0x2AEB8ADD8337360E088B7D9ce4e857b9BE60f3a7"),
            Err(ScriptError::BadChecksum(_))
        ));
        assert!(parse_evm_address("0x1234").is_err());
        assert!(parse_evm_address("0xzzeb8add8337360e088b7d9ce4e857b9be60f3a7").is_err());
        assert!(parse_evm_address("002aeb8add8337360e088b7d9ce4e857b9be60f3a7").is_err());
    }

    #[test]
    fn test_network_lookup() {
        assert_eq!(Network::from_name("bitcoincash"), Some(Network::BitcoinCash));
        assert_eq!(Network::from_hrp("tb"), Some(Network::BitcoinTestnet));
        assert_eq!(Network::from_hrp("xx"), None);
        for (net, params) in NETWORKS.iter() {
            assert_eq!(net.params(), params);
            assert_eq!(Network::from_name(params.name), Some(*net));
        }
    }
}
