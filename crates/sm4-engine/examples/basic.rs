//! Encrypts a message in every mode and checks each result round-trips.

use sm4_engine::{CipherConfig, Mode, Sm4Engine, Verifier};

fn main() -> Result<(), sm4_engine::CipherError> {
    let message = b"first block here, then some more";
    for mode in Mode::ALL {
        let config = CipherConfig::new(b"1234123412341234", b"0000111122223333", mode)?;
        let verifier = Verifier::new(Sm4Engine::new(config));
        let ciphertext = verifier.encrypt(message)?;
        let plaintext = verifier.decrypt(&ciphertext)?;
        assert_eq!(plaintext, message);
        println!("{mode}: {}", hex::encode(&ciphertext));
    }
    Ok(())
}
