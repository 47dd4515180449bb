//! Audio output encoding — 16-bit PCM, mono, 22 050 Hz.
//!
//! 16-bit PCM is used instead of IEEE-float WAV because several mobile media
//! players accept a float header and then play silence; integer PCM decodes
//! everywhere.

use std::io::Cursor;
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::engine::SAMPLE_RATE;
use crate::error::Result;

fn wav_spec() -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Convert f32 samples in [-1.0, 1.0] to i16 PCM, clamping out-of-range values.
pub fn pcm16_from_f32(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| (s * i16::MAX as f32).clamp(i16::MIN as f32, i16::MAX as f32) as i16)
        .collect()
}

/// Write samples to a WAV file.
pub fn write_wav(samples: &[f32], path: &Path) -> Result<()> {
    let mut writer = WavWriter::create(path, wav_spec())?;
    for s in pcm16_from_f32(samples) {
        writer.write_sample(s)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Encode samples to an in-memory WAV: the canonical 44-byte RIFF/WAVE
/// header followed by little-endian PCM data.
pub fn wav_bytes(samples: &[f32]) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, wav_spec())?;
        for s in pcm16_from_f32(samples) {
            writer.write_sample(s)?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}
