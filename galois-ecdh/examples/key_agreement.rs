use galois_curve::{CurveParams, EllipticCurve, NamedCurve};
use galois_ecdh::KeyExchange;
use rand::rngs::OsRng;
use structopt::StructOpt;

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

// RUST_LOG=debug cargo run --example key_agreement -- --curve curve25519

#[derive(StructOpt)]
struct Opt {
    #[structopt(long, default_value = "secp256k1", help = "name of a built-in curve")]
    curve: NamedCurve,
    #[structopt(long, help = "json file with custom curve parameters, overrides --curve")]
    params: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let _ = env_logger::try_init();
    let opt = Opt::from_args();

    let curve = match opt.params {
        Some(path) => {
            let params: CurveParams = serde_json::from_reader(File::open(path)?)?;
            EllipticCurve::from_params(&params)?
        }
        None => opt.curve.curve()?,
    };
    println!("{}", curve);
    let curve = Arc::new(curve);

    let mut rng = OsRng;
    let mut alice = KeyExchange::random(&mut rng, Arc::clone(&curve))?;
    let mut bob = KeyExchange::random(&mut rng, Arc::clone(&curve))?;
    println!("alice pubkey: {}", hex::encode(alice.encoded_public_key()));
    println!("bob pubkey:   {}", hex::encode(bob.encoded_public_key()));

    alice.set_peer_public_key_bytes(&bob.encoded_public_key())?;
    bob.set_peer_public_key_bytes(&alice.encoded_public_key())?;

    let alice_secret = alice.compute_shared_secret()?.clone();
    anyhow::ensure!(
        bob.validate_communication(alice_secret.as_bytes())?,
        "shared secrets differ"
    );
    println!("shared secret: {}", hex::encode(alice_secret.as_bytes()));
    Ok(())
}
