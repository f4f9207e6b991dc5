//! Crypto utilities providing the BIP340 arithmetic needed to anchor adaptor
//! signatures to an oracle attestation, not available in rust-secp256k1 or
//! rust-secp256k1-zkp.

use crate::Error;
use bitcoin::hashes::{sha256t_hash_newtype, Hash};
use secp256k1_zkp::{
    schnorr::Signature as SchnorrSignature, KeyPair, Message, Parity, PublicKey, Scalar,
    Secp256k1, SecretKey, Signing, Verification, XOnlyPublicKey,
};

// Midstate of sha256(sha256("BIP0340/challenge") || sha256("BIP0340/challenge")).
const BIP340_MIDSTATE: [u8; 32] = [
    0x9c, 0xec, 0xba, 0x11, 0x23, 0x92, 0x53, 0x81, 0x11, 0x67, 0x91, 0x12, 0xd1, 0x62, 0x7e, 0x0f,
    0x97, 0xc8, 0x75, 0x50, 0x00, 0x3c, 0xc7, 0x65, 0x90, 0xf6, 0x11, 0x64, 0x33, 0xe9, 0xb6, 0x6a,
];

sha256t_hash_newtype!(
    BIP340Hash,
    BIP340HashTag,
    BIP340_MIDSTATE,
    64,
    doc = "bip340 challenge hash",
    backward
);

/// Create a Schnorr signature using the provided nonce instead of generating one.
///
/// This is what an oracle does when attesting to an outcome using a nonce it
/// committed to beforehand.
pub fn schnorrsig_sign_with_nonce<S: Signing>(
    secp: &Secp256k1<S>,
    msg: &Message,
    keypair: &KeyPair,
    nonce: &SecretKey,
) -> Result<SchnorrSignature, Error> {
    let (pubkey, key_parity) = keypair.x_only_public_key();
    let nonce_keypair = KeyPair::from_secret_key(secp, nonce);
    let (nonce_pubkey, nonce_parity) = nonce_keypair.x_only_public_key();

    // BIP340 keys and nonces are implicitly even, negate the secrets otherwise.
    let sk = match key_parity {
        Parity::Even => keypair.secret_key(),
        Parity::Odd => keypair.secret_key().negate(),
    };
    let k = match nonce_parity {
        Parity::Even => *nonce,
        Parity::Odd => nonce.negate(),
    };

    let challenge = create_schnorr_challenge(msg, &nonce_pubkey, &pubkey)?;
    let s = sk.mul_tweak(&challenge)?.add_tweak(&Scalar::from(k))?;

    let mut sig = [0u8; secp256k1_zkp::constants::SCHNORR_SIGNATURE_SIZE];
    sig[..32].copy_from_slice(&nonce_pubkey.serialize());
    sig[32..].copy_from_slice(&s.secret_bytes());
    Ok(SchnorrSignature::from_slice(&sig)?)
}

/// Compute a signature point for the given public key, nonce and message.
pub fn schnorrsig_compute_sig_point<C: Verification>(
    secp: &Secp256k1<C>,
    pubkey: &XOnlyPublicKey,
    nonce: &XOnlyPublicKey,
    message: &Message,
) -> Result<PublicKey, Error> {
    let challenge = create_schnorr_challenge(message, nonce, pubkey)?;
    let pk = schnorr_pubkey_to_pubkey(pubkey)?.mul_tweak(secp, &challenge)?;
    let npk = schnorr_pubkey_to_pubkey(nonce)?;
    Ok(npk.combine(&pk)?)
}

/// Decompose a bip340 signature into a nonce and a secret key (as byte array)
pub fn schnorrsig_decompose(
    signature: &SchnorrSignature,
) -> Result<(XOnlyPublicKey, &[u8]), Error> {
    let bytes = signature.as_ref();
    Ok((XOnlyPublicKey::from_slice(&bytes[0..32])?, &bytes[32..64]))
}

fn create_schnorr_challenge(
    msg: &Message,
    nonce: &XOnlyPublicKey,
    pubkey: &XOnlyPublicKey,
) -> Result<Scalar, Error> {
    let mut buf = Vec::<u8>::with_capacity(32 + 32 + 32);
    buf.extend(&nonce.serialize());
    buf.extend(&pubkey.serialize());
    buf.extend(&msg[..]);
    let hash = BIP340Hash::hash(&buf);
    Scalar::from_be_bytes(hash.to_byte_array()).map_err(|_| Error::InvalidArgument)
}

fn schnorr_pubkey_to_pubkey(schnorr_pubkey: &XOnlyPublicKey) -> Result<PublicKey, Error> {
    let mut buf = Vec::<u8>::with_capacity(33);
    buf.push(0x02);
    buf.extend(&schnorr_pubkey.serialize());
    Ok(PublicKey::from_slice(&buf)?)
}
