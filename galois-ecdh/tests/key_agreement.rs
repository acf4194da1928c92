use galois_curve::parse::parse_point;
use galois_curve::{BigUint, CurveParams, EllipticCurve, NamedCurve};
use galois_ecdh::{ExchangeError, KeyExchange, Phase};
use rand::rngs::OsRng;

use std::sync::Arc;
use std::thread;

fn agree(curve: &Arc<EllipticCurve>) -> (KeyExchange, KeyExchange) {
    let mut rng = OsRng;
    let mut alice = KeyExchange::random(&mut rng, Arc::clone(curve)).unwrap();
    let mut bob = KeyExchange::random(&mut rng, Arc::clone(curve)).unwrap();
    alice
        .set_peer_public_key_bytes(&bob.encoded_public_key())
        .unwrap();
    bob.set_peer_public_key_bytes(&alice.encoded_public_key())
        .unwrap();
    (alice, bob)
}

#[test]
fn random_agreement_on_presets() {
    let _ = env_logger::try_init();
    for named in [
        NamedCurve::Secp256k1,
        NamedCurve::Tom256k1,
        NamedCurve::Curve25519,
    ] {
        let curve = Arc::new(named.curve().unwrap());
        let (mut alice, mut bob) = agree(&curve);
        let alice_secret = alice.compute_shared_secret().unwrap().clone();
        let bob_secret = bob.compute_shared_secret().unwrap().clone();
        assert_eq!(alice_secret, bob_secret, "{}", named);
        assert_eq!(alice_secret.as_bytes().len(), curve.byte_len());
        assert!(bob.validate_communication(alice_secret.as_bytes()).unwrap());
    }
}

#[test]
fn secp256k1_known_vector() {
    let curve = Arc::new(NamedCurve::Secp256k1.curve().unwrap());
    let mut alice = KeyExchange::new(Arc::clone(&curve), BigUint::from(2u8)).unwrap();
    let bob = KeyExchange::new(Arc::clone(&curve), BigUint::from(3u8)).unwrap();

    let expected_bob = parse_point(
        &curve,
        "04\
         f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9\
         388f7b0f632de8140fe337e62a37f3566500a99934c2231b6cb9fd7584b8e672",
    )
    .unwrap();
    assert_eq!(bob.public_key(), &expected_bob);

    alice.set_peer_public_key(expected_bob).unwrap();
    // x-coordinate of 6G
    let expected =
        hex::decode("fff97bd5755eeea420453a14355235d382f6472f8568a18b2f057a1460297556").unwrap();
    assert_eq!(
        alice.compute_shared_secret().unwrap().as_bytes(),
        expected.as_slice()
    );
}

#[test]
fn curve_shared_between_threads() {
    let curve = Arc::new(NamedCurve::Curve25519.curve().unwrap());
    let handles = (0..4)
        .map(|_| {
            let curve = Arc::clone(&curve);
            thread::spawn(move || {
                let (mut alice, mut bob) = agree(&curve);
                let alice_secret = alice.compute_shared_secret().unwrap().clone();
                bob.validate_communication(alice_secret.as_bytes()).unwrap()
            })
        })
        .collect::<Vec<_>>();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn keys_from_other_curves_are_rejected() {
    let secp = Arc::new(NamedCurve::Secp256k1.curve().unwrap());
    let tom = Arc::new(NamedCurve::Tom256k1.curve().unwrap());
    let mut alice = KeyExchange::random(&mut OsRng, Arc::clone(&secp)).unwrap();
    let bob = KeyExchange::random(&mut OsRng, tom).unwrap();

    assert!(matches!(
        alice.set_peer_public_key(bob.public_key().clone()),
        Err(ExchangeError::InvalidPeerKey(_))
    ));
    assert_eq!(
        alice.compute_shared_secret(),
        Err(ExchangeError::PeerKeyNotSet)
    );
    assert_eq!(alice.phase(), Phase::PublicDerived);
}

#[test]
fn custom_curve_from_json() {
    let params: CurveParams = serde_json::from_str(
        r#"{ "name": "toy", "a": "2", "b": "3", "p": "97",
             "generator": { "x": "0", "y": "10", "order": "50" } }"#,
    )
    .unwrap();
    let curve = Arc::new(EllipticCurve::from_params(&params).unwrap());

    let mut alice = KeyExchange::new(Arc::clone(&curve), BigUint::from(3u8)).unwrap();
    let mut bob = KeyExchange::new(Arc::clone(&curve), BigUint::from(5u8)).unwrap();
    alice
        .set_peer_public_key(bob.public_key().clone())
        .unwrap();
    bob.set_peer_public_key(alice.public_key().clone())
        .unwrap();
    assert_eq!(alice.compute_shared_secret().unwrap().as_bytes(), &[53]);
    assert!(bob.validate_communication(&[53]).unwrap());
}

#[test]
fn curve_without_generator() {
    let curve = Arc::new(NamedCurve::M221.curve().unwrap());
    assert_eq!(
        KeyExchange::random(&mut OsRng, curve).unwrap_err(),
        ExchangeError::MissingGenerator
    );
}
