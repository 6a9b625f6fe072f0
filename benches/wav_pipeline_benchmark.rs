//! Benchmark for the narration pipeline
//!
//! Times each stage on a minute of 24 kHz mono speech-like audio:
//! 1. base64 payload -> raw bytes
//! 2. raw bytes -> AudioBuffer
//! 3. AudioBuffer -> WAVE bytes

use scene_audio::{PcmSpec, decode_base64, decode_pcm, encode_base64, encode_wav};
use std::time::{Duration, Instant};

/// Generate a one-minute 24 kHz payload (220 Hz tone with a slow envelope)
fn generate_payload(seconds: usize) -> String {
    let sample_rate = 24_000usize;
    let bytes: Vec<u8> = (0..seconds * sample_rate)
        .flat_map(|i| {
            let t = i as f64 / sample_rate as f64;
            let envelope = 0.5 + 0.5 * (2.0 * std::f64::consts::PI * 0.5 * t).sin();
            let sample = (2.0 * std::f64::consts::PI * 220.0 * t).sin() * envelope * 0.8;
            ((sample * 32767.0) as i16).to_le_bytes()
        })
        .collect();
    encode_base64(&bytes)
}

fn time<R>(label: &str, iterations: u32, mut f: impl FnMut() -> R) -> Duration {
    // Warm up
    for _ in 0..3 {
        std::hint::black_box(f());
    }

    let start = Instant::now();
    for _ in 0..iterations {
        std::hint::black_box(f());
    }
    let per_iter = start.elapsed() / iterations;
    println!("  {label:<24} {:>10.3} ms", per_iter.as_secs_f64() * 1_000.0);
    per_iter
}

fn main() {
    let payload = generate_payload(60);
    let iterations = 20;
    println!("Benchmarking 60s of 24 kHz mono ({} base64 chars)", payload.len());

    let Ok(bytes) = decode_base64(&payload) else {
        eprintln!("payload did not decode");
        return;
    };
    let Ok(audio) = decode_pcm::<f32>(&bytes, PcmSpec::TTS) else {
        eprintln!("PCM did not decode");
        return;
    };

    let total = time("base64 decode", iterations, || decode_base64(&payload))
        + time("pcm decode", iterations, || decode_pcm::<f32>(&bytes, PcmSpec::TTS))
        + time("wav encode", iterations, || encode_wav(&audio));

    let realtime_factor = 60.0 / total.as_secs_f64();
    println!("  {:<24} {:>10.3} ms ({realtime_factor:.0}x realtime)", "total", total.as_secs_f64() * 1_000.0);
}
