//! Basic kokoro-tts example — runs the full text-to-synthesis-input pipeline.
//!
//! Usage:
//!   cargo run --example basic -- --dict resources/cmudict_ipa.txt \
//!       --styles resources/voices --text "Hello from Rust!"
//!
//! Prints the phoneme string, the padded token sequence and the blended
//! style vector summary. Plug in a `SynthesisEngine` implementation to turn
//! the request into audio.

use std::path::Path;

use kokoro_tts::{
    mix, InterpolationMode, Lexicon, Phonemizer, StyleStore, SynthesisRequest,
};

fn main() -> anyhow::Result<()> {
    // ── Parse simple CLI arguments ───────────────────────────────────────────
    let mut args = std::env::args().skip(1);

    let mut dict = "resources/cmudict_ipa.txt".to_string();
    let mut styles = "resources/voices".to_string();
    let mut text = "Dr. Smith has 1,000 cats.".to_string();
    let mut voices = vec!["af_sarah".to_string()];
    let mut speed = 1.0f32;
    let mut spherical = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--dict" => { if let Some(v) = args.next() { dict = v; } }
            "--styles" => { if let Some(v) = args.next() { styles = v; } }
            "--text" => { if let Some(v) = args.next() { text = v; } }
            "--voices" => {
                if let Some(v) = args.next() {
                    voices = v.split(',').map(str::to_string).collect();
                }
            }
            "--speed" => { if let Some(v) = args.next() { speed = v.parse().unwrap_or(1.0); } }
            "--spherical" => { spherical = true; }
            "--help" => {
                println!(
                    "Usage: basic [--dict FILE] [--styles DIR] [--text TEXT] \
                     [--voices NAME,NAME,…] [--speed FLOAT] [--spherical]"
                );
                return Ok(());
            }
            _ => {}
        }
    }

    // ── One-time resource loads ──────────────────────────────────────────────
    let lexicon = Lexicon::load(Path::new(&dict));
    println!("Lexicon : {} entries", lexicon.len());

    let store = StyleStore::from_dir(Path::new(&styles))?;
    println!("Presets : {:?}", store.names());

    // ── Text → phonemes → tokens ─────────────────────────────────────────────
    let phonemizer = Phonemizer::new(lexicon);
    let phonemes = phonemizer.phonemize(&text);
    println!("Text    : {text:?}");
    println!("Phonemes: {phonemes}");

    // ── Blend the selected presets with equal weights ────────────────────────
    let names: Vec<&str> = voices.iter().map(String::as_str).collect();
    let weights: std::collections::HashMap<String, f32> =
        voices.iter().map(|v| (v.clone(), 1.0)).collect();
    let mode = if spherical {
        InterpolationMode::Spherical
    } else {
        InterpolationMode::Linear
    };
    let style = mix(&store, &names, &weights, mode)?;

    let request = SynthesisRequest::new(&phonemes, style, speed)?;
    println!("Tokens  : {} ids (padded)", request.tokens.len());
    println!("          {:?}", request.tokens);
    let norm: f32 = request.style.iter().map(|v| v * v).sum::<f32>().sqrt();
    println!("Style   : {} dims, |v| = {norm:.4}, speed = {}", request.style.len(), request.speed);

    Ok(())
}
