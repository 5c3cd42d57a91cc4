use outscript::primitives::ec::PrivateKey;
use outscript::primitives::hex32::Hex32;
use outscript::{get_outs, guess_out, parse_bitcoin_based_address, BtcTx, BtcTxSign, Script};

const KEY: &str = "eb696a065ef48a2192da5b28b694f87544b30fae8327c4510137a922f32c6dcf";
const PREV_TXID: &str = "77541aeb3c4dac9260b68f74f44c973081a9cbd4ab8ec0a07723b0aa201b6bdb";

/// Every address a key can be paid to parses back to the script it came from.
#[test]
fn addresses_parse_back_to_their_scripts() {
    let pubkey = PrivateKey::from_hex(KEY).unwrap().pub_key();
    let mut script = Script::new(&pubkey);
    for name in ["p2pkh", "p2wpkh", "p2sh:p2wpkh", "p2wsh:p2pkh"] {
        let address = script.address(name, &["bitcoin"]).unwrap();
        let out = parse_bitcoin_based_address("bitcoin", &address).unwrap();
        assert_eq!(out.bytes(), script.generate(name).unwrap().as_slice(), "{}", address);
    }
    assert!(get_outs(&pubkey).len() > 4);
}

/// Build, estimate, sign and re-parse a spend of a P2WPKH output.
#[test]
fn build_and_sign_p2wpkh_spend() {
    let key = PrivateKey::from_hex(KEY).unwrap();
    let pubkey = key.pub_key();
    let change = Script::new(&pubkey).address("p2wpkh", &["bitcoin"]).unwrap();

    let mut tx = BtcTx::new();
    tx.add_input(Hex32::from_hex(PREV_TXID).unwrap(), 1);
    tx.add_output("1JbQFixVxena8GGN2wgofqbKZvAcVt58zj", 50_000u64).unwrap();
    tx.add_output(&change, 40_000u64).unwrap();

    let mut estimate = tx.dup();
    estimate.inputs[0].prefill("p2wpkh").unwrap();
    let estimated = estimate.compute_size();

    tx.sign(&[BtcTxSign::new(&key, "p2wpkh").unwrap().with_amount(100_000u64)])
        .unwrap();
    assert!(tx.has_witness());
    assert!(estimated >= tx.compute_size());

    let parsed = BtcTx::from_hex(&tx.to_hex()).unwrap();
    assert_eq!(parsed, tx);
    assert_eq!(guess_out(&parsed.outputs[1].script, Some(&pubkey)).name(), "p2wpkh");
}
