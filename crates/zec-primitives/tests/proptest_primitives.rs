use proptest::prelude::*;

use zec_primitives::base58;
use zec_primitives::ec::PrivateKey;
use zec_primitives::hash::sha256;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn base58check_decode_inverts_encode(payload in prop::collection::vec(any::<u8>(), 0..64)) {
        let encoded = base58::check_encode(&payload);
        prop_assert_eq!(base58::check_decode(&encoded).unwrap(), payload);
    }

    #[test]
    fn hex_and_raw_keys_agree(seed in prop::array::uniform32(any::<u8>())) {
        // Not all 32-byte arrays are valid scalars (zero or >= curve order).
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let from_hex = PrivateKey::parse(&hex::encode(seed)).unwrap();
            prop_assert_eq!(pk.public_key_compressed(), from_hex.public_key_compressed());
        }
    }

    #[test]
    fn signatures_are_der(
        seed in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..128)
    ) {
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let der = pk.sign_digest(&sha256(&msg)).unwrap();
            prop_assert_eq!(der[0], 0x30);
            prop_assert_eq!(der[1] as usize, der.len() - 2);
        }
    }
}
