//! midiblip CLI — offline SMF to WAV rendering.
//!
//! Usage:
//!   blip-cli input.mid [output.wav]
//!
//! The output path defaults to the input path with a `.wav` extension.

use blip_master::{render_smf, AudioSpec};
use std::path::{Path, PathBuf};
use std::{env, fs};

fn main() {
    let args: Vec<String> = env::args().collect();
    let input = args.get(1).unwrap_or_else(|| {
        eprintln!("Usage: blip-cli <input.mid> [output.wav]");
        std::process::exit(1);
    });
    let output = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(input).with_extension("wav"));

    let data = fs::read(input).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {}", input, e);
        std::process::exit(1);
    });

    let out = fs::File::create(&output).unwrap_or_else(|e| {
        eprintln!("Failed to create {}: {}", output.display(), e);
        std::process::exit(1);
    });

    let spec = AudioSpec::cd_mono();
    let stats = render_smf(&data, out, spec).unwrap_or_else(|e| {
        eprintln!("Render failed: {}", e);
        std::process::exit(1);
    });

    println!("Format:   {}", stats.header.format);
    println!("Tracks:   {}", stats.header.track_count);
    println!("Division: {} ticks/quarter", stats.header.division);
    println!("Clock:    {} samples/tick", stats.samples_per_tick);
    println!(
        "Rendered: {} samples ({:.2}s) to {}",
        stats.samples,
        stats.seconds(&spec),
        output.display()
    );
}
