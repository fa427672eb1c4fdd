//! Chunked RSA PKCS#1 v1.5 encryption for payloads larger than one block.

use rand::rngs::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};

use crate::error::Error;
use crate::keys::{load_private_key_pem, load_public_key_pem, PrivateKeyEncoding};

/// PKCS#1 v1.5 encryption padding overhead in bytes.
pub const PKCS1V15_OVERHEAD: usize = 11;

/// Largest plaintext block for `key`.
pub fn encrypt_block_size(key: &RsaPublicKey) -> usize {
    modulus_bytes(key).saturating_sub(PKCS1V15_OVERHEAD)
}

/// Ciphertext block size for `key`.
pub fn decrypt_block_size(key: &RsaPrivateKey) -> usize {
    modulus_bytes(key)
}

fn modulus_bytes(key: &impl PublicKeyParts) -> usize {
    key.n().bits() / 8
}

/// Split `data` into consecutive blocks of at most `block_size` bytes.
///
/// Input no longer than one block (including empty input) is returned as a
/// single block.
fn split_blocks(data: &[u8], block_size: usize) -> Vec<&[u8]> {
    if data.len() <= block_size || block_size == 0 {
        return vec![data];
    }
    data.chunks(block_size).collect()
}

/// Encrypt `plaintext` block by block and concatenate the ciphertexts.
pub fn encrypt(plaintext: &[u8], public_key: &RsaPublicKey) -> Result<Vec<u8>, Error> {
    let blocks = split_blocks(plaintext, encrypt_block_size(public_key));
    let mut rng = OsRng;
    let mut out = Vec::with_capacity(blocks.len() * modulus_bytes(public_key));
    for (index, block) in blocks.into_iter().enumerate() {
        if block.is_empty() {
            continue;
        }
        let encrypted = public_key
            .encrypt(&mut rng, Pkcs1v15Encrypt, block)
            .map_err(|e| Error::Crypto(format!("encrypting block {}: {}", index, e)))?;
        out.extend_from_slice(&encrypted);
    }
    Ok(out)
}

/// Decrypt concatenated ciphertext blocks and concatenate the plaintexts.
pub fn decrypt(ciphertext: &[u8], private_key: &RsaPrivateKey) -> Result<Vec<u8>, Error> {
    let blocks = split_blocks(ciphertext, decrypt_block_size(private_key));
    let mut out = Vec::with_capacity(ciphertext.len());
    for (index, block) in blocks.into_iter().enumerate() {
        if block.is_empty() {
            continue;
        }
        let decrypted = private_key
            .decrypt(Pkcs1v15Encrypt, block)
            .map_err(|e| Error::Crypto(format!("decrypting block {}: {}", index, e)))?;
        out.extend_from_slice(&decrypted);
    }
    Ok(out)
}

/// [`encrypt`] with a PEM (PKIX) public key.
pub fn encrypt_with_pem(plaintext: &[u8], public_key_pem: &[u8]) -> Result<Vec<u8>, Error> {
    let public_key = load_public_key_pem(public_key_pem)?;
    encrypt(plaintext, &public_key)
}

/// [`decrypt`] with a PEM private key in the given container format.
pub fn decrypt_with_pem(
    ciphertext: &[u8],
    private_key_pem: &[u8],
    encoding: PrivateKeyEncoding,
) -> Result<Vec<u8>, Error> {
    let private_key = load_private_key_pem(private_key_pem, encoding)?;
    decrypt(ciphertext, &private_key)
}
