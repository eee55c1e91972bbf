//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

const RATE_44100: [u8; 10] = [0x40, 0x0E, 0xAC, 0x44, 0, 0, 0, 0, 0, 0];

fn chunk(id: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut out = id.to_vec();
    out.extend_from_slice(&(body.len() as i32).to_be_bytes());
    out.extend_from_slice(body);
    if body.len() % 2 == 1 {
        out.push(0);
    }
    out
}

fn comm(compression: &[u8; 4]) -> Vec<u8> {
    let mut body = vec![0x00, 0x02, 0x00, 0x00, 0x00, 0x04, 0x00, 0x10];
    body.extend_from_slice(&RATE_44100);
    body.extend_from_slice(compression);
    body.extend_from_slice(&[0, 0]);
    chunk(b"COMM", &body)
}

fn ssnd(payload: &[u8]) -> Vec<u8> {
    let mut body = vec![0; 8];
    body.extend_from_slice(payload);
    chunk(b"SSND", &body)
}

fn form(chunks: &[Vec<u8>]) -> Vec<u8> {
    let mut body = b"AIFC".to_vec();
    for c in chunks {
        body.extend_from_slice(c);
    }
    chunk(b"FORM", &body)
}

/// Sample bytes used by every fixture
pub fn sample_payload() -> Vec<u8> {
    (0..16u8).map(|i| i.wrapping_mul(17)).collect()
}

/// An able-encrypted AIFC file holding `payload`
pub fn encrypted_file(payload: &[u8], key: &[u8]) -> Vec<u8> {
    let mut ciphertext = payload.to_vec();
    unable_aifc::cipher::apply_keystream(key, &mut ciphertext);

    let mut able = (key.len() as u32).to_be_bytes().to_vec();
    able.extend_from_slice(key);

    form(&[
        chunk(b"FVER", &[0xA2, 0x80, 0x51, 0x40]),
        chunk(b"ABLE", &able),
        comm(b"able"),
        ssnd(&ciphertext),
    ])
}

/// A plain AIFC file holding `payload`
pub fn plain_file(payload: &[u8]) -> Vec<u8> {
    form(&[comm(b"NONE"), ssnd(payload)])
}

/// A file whose Common chunk names an unsupported codec
pub fn unsupported_file() -> Vec<u8> {
    form(&[comm(b"ima4"), ssnd(&[0; 4])])
}

/// Write `data` to `dir/name` and return the path
pub fn write_fixture(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).unwrap();
    path
}

/// The sound data payload of a written AIFC file
pub fn ssnd_payload(file: &[u8]) -> Vec<u8> {
    let mut pos = 12;
    while pos + 8 <= file.len() {
        let size = i32::from_be_bytes(file[pos + 4..pos + 8].try_into().unwrap()) as usize;
        if &file[pos..pos + 4] == b"SSND" {
            return file[pos + 16..pos + 8 + size].to_vec();
        }
        pos += 8 + size + size % 2;
    }
    panic!("no SSND chunk");
}
