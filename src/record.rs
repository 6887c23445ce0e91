//! On-disk record for the persisted player settings.
//!
//! The save file is a fixed-order, versionless layout: the five fields
//! encoded little-endian into [`RECORD_LEN`] bytes, followed by a SHA-256
//! digest of those bytes. The digest lets a load reject truncated or
//! bit-flipped files instead of handing corrupt values back to the game.

use std::io;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Encoded length of the five settings fields.
pub const RECORD_LEN: usize = 14;

/// Length of a complete save file: the encoded record plus its digest.
pub const FILE_LEN: usize = RECORD_LEN + 32;

/// The five persisted settings fields.
///
/// Defaults are the first-run values. Volumes are expected to stay in
/// `[0, 1]` and the high score non-negative; neither is enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SettingsRecord {
    pub music_volume: f32,
    pub sound_volume: f32,
    pub music_on: bool,
    pub sound_on: bool,
    pub high_score: i32,
}

impl Default for SettingsRecord {
    fn default() -> Self {
        Self {
            music_volume: 0.5,
            sound_volume: 0.0,
            music_on: true,
            sound_on: false,
            high_score: 0,
        }
    }
}

impl SettingsRecord {
    /// Encodes the five fields in their fixed on-disk order.
    pub fn encode(&self) -> [u8; RECORD_LEN] {
        let mut bytes = [0u8; RECORD_LEN];
        bytes[0..4].copy_from_slice(&self.music_volume.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.sound_volume.to_le_bytes());
        bytes[8] = self.music_on as u8;
        bytes[9] = self.sound_on as u8;
        bytes[10..14].copy_from_slice(&self.high_score.to_le_bytes());
        bytes
    }

    /// Decodes a record from its fixed on-disk layout.
    pub fn decode(bytes: &[u8]) -> io::Result<Self> {
        if bytes.len() != RECORD_LEN {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "settings record is {} bytes, expected {RECORD_LEN}",
                    bytes.len()
                ),
            ));
        }
        Ok(Self {
            music_volume: f32_at(bytes, 0),
            sound_volume: f32_at(bytes, 4),
            music_on: flag_at(bytes, 8)?,
            sound_on: flag_at(bytes, 9)?,
            high_score: i32_at(bytes, 10),
        })
    }

    /// Serializes the record followed by the SHA-256 digest of its bytes.
    pub fn to_file_bytes(&self) -> Vec<u8> {
        let payload = self.encode();
        let digest = payload_digest(&payload);
        let mut bytes = Vec::with_capacity(FILE_LEN);
        bytes.extend_from_slice(&payload);
        bytes.extend_from_slice(&digest);
        bytes
    }

    /// Parses a complete save file, verifying its digest.
    pub fn from_file_bytes(bytes: &[u8]) -> io::Result<Self> {
        if bytes.len() != FILE_LEN {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("settings file is {} bytes, expected {FILE_LEN}", bytes.len()),
            ));
        }
        let (payload, stored) = bytes.split_at(RECORD_LEN);
        let digest = payload_digest(payload);
        if digest != stored {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "settings digest mismatch: stored {}, computed {}",
                    hex::encode(stored),
                    hex::encode(digest)
                ),
            ));
        }
        Self::decode(payload)
    }
}

fn payload_digest(payload: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(payload);
    hasher.finalize().to_vec()
}

fn f32_at(bytes: &[u8], at: usize) -> f32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[at..at + 4]);
    f32::from_le_bytes(buf)
}

fn i32_at(bytes: &[u8], at: usize) -> i32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[at..at + 4]);
    i32::from_le_bytes(buf)
}

fn flag_at(bytes: &[u8], at: usize) -> io::Result<bool> {
    match bytes[at] {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("flag byte at offset {at} is {other}, expected 0 or 1"),
        )),
    }
}
