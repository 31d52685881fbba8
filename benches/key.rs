#![feature(test)]

extern crate test;

use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use test::Bencher;
use textbook_rsa::{decrypt, encrypt, PublicKeyParts, RsaPrivateKey};

fn get_key() -> RsaPrivateKey {
    let mut rng = ChaCha8Rng::from_seed([42; 32]);
    RsaPrivateKey::new(&mut rng, 2048).unwrap()
}

#[bench]
fn bench_rsa_1024_gen_key(b: &mut Bencher) {
    let mut rng = ChaCha8Rng::from_seed([42; 32]);

    b.iter(|| {
        let key = RsaPrivateKey::new(&mut rng, 1024).unwrap();
        test::black_box(key);
    });
}

#[bench]
fn bench_rsa_2048_gen_key(b: &mut Bencher) {
    let mut rng = ChaCha8Rng::from_seed([42; 32]);

    b.iter(|| {
        let key = RsaPrivateKey::new(&mut rng, 2048).unwrap();
        test::black_box(key);
    });
}

#[bench]
fn bench_rsa_2048_encrypt(b: &mut Bencher) {
    let priv_key = get_key();
    let pub_key = priv_key.to_public_key();
    let msg = vec![0x5au8; pub_key.size() - 1];

    b.iter(|| {
        let res = encrypt(&msg, &pub_key).unwrap();
        test::black_box(res);
    });
}

#[bench]
fn bench_rsa_2048_decrypt_crt(b: &mut Bencher) {
    let priv_key = get_key();
    let x = encrypt(b"testing", priv_key.as_ref()).unwrap();

    b.iter(|| {
        let res = decrypt(&x, &priv_key).unwrap();
        test::black_box(res);
    });
}

#[bench]
fn bench_rsa_2048_decrypt_direct(b: &mut Bencher) {
    let mut priv_key = get_key();
    priv_key.clear_precomputed();
    let x = encrypt(b"testing", priv_key.as_ref()).unwrap();

    b.iter(|| {
        let res = decrypt(&x, &priv_key).unwrap();
        test::black_box(res);
    });
}
