use proptest::prelude::*;

use outscript_script::{guess_out, parse_push_bytes, push_bytes};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn push_bytes_roundtrip(data in prop::collection::vec(any::<u8>(), 0..1024)) {
        let pushed = push_bytes(&data);
        let (parsed, used) = parse_push_bytes(&pushed);
        prop_assert_eq!(parsed, Some(&data[..]));
        prop_assert_eq!(used, pushed.len());
    }

    #[test]
    fn parse_push_bytes_never_panics(data in prop::collection::vec(any::<u8>(), 0..96)) {
        let (parsed, used) = parse_push_bytes(&data);
        match parsed {
            Some(p) => prop_assert!(used <= data.len() && p.len() < used),
            None => prop_assert_eq!(used, 0),
        }
    }

    #[test]
    fn guess_out_never_panics(data in prop::collection::vec(any::<u8>(), 0..96)) {
        let out = guess_out(&data, None);
        prop_assert_eq!(out.bytes(), &data[..]);
    }
}
