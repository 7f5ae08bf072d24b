use proptest::prelude::*;

use zec_primitives::ec::PrivateKey;
use zec_script::address::{address_from_public_key, is_valid, public_key_hash_from_address};
use zec_script::script::{Script, MAX_MEMO_LEN};
use zec_script::Network;

/// Strategy producing valid private keys (rejecting the rare invalid scalar).
fn arb_private_key() -> impl Strategy<Value = PrivateKey> {
    prop::array::uniform32(any::<u8>())
        .prop_filter_map("scalar out of range", |seed| PrivateKey::from_bytes(&seed).ok())
}

fn arb_network() -> impl Strategy<Value = Network> {
    prop::sample::select(Network::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn derived_address_is_valid_on_its_network(key in arb_private_key(), net in arb_network()) {
        let addr = address_from_public_key(&key.public_key_compressed(), net);
        prop_assert!(is_valid(&addr, net));
    }

    #[test]
    fn mainnet_address_rejected_elsewhere(key in arb_private_key()) {
        let addr = address_from_public_key(&key.public_key_compressed(), Network::Main);
        prop_assert!(!is_valid(&addr, Network::Test));
        prop_assert!(!is_valid(&addr, Network::Regtest));
    }

    #[test]
    fn p2pkh_script_embeds_address_hash(hash in prop::array::uniform20(any::<u8>()), net in arb_network()) {
        let addr = zec_script::Address::new(hash, net).to_string();
        prop_assert_eq!(public_key_hash_from_address(&addr).unwrap(), hash);

        let script = Script::p2pkh_from_address(&addr).unwrap();
        prop_assert!(script.is_p2pkh());
        prop_assert_eq!(&script.to_bytes()[3..23], &hash[..]);
    }

    #[test]
    fn memo_script_length_byte_covers_rest(memo in prop::collection::vec(any::<u8>(), 1..=MAX_MEMO_LEN)) {
        let script = Script::memo(&memo).unwrap();
        let bytes = script.to_bytes();
        prop_assert_eq!(bytes[0] as usize, bytes.len() - 1);
        prop_assert!(bytes.ends_with(&memo));
    }
}
