//! # FX Preview
//!
//! Mounts the hero section headlessly, drives it with a scripted pointer
//! path and prints what each simulated second rendered.
//!
//! ## Usage
//!
//! ```bash
//! fx_preview --config data/effects.toml --seconds 20 --seed 42
//! ```

use std::process::ExitCode;

use algae_fx::preview::{self, PreviewOptions};
use algae_fx::{section, EffectsConfig, ScrollTracker};

fn main() -> ExitCode {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         ALGAE FX PREVIEW                                         ║");
    println!("║         HEADLESS HERO SECTION                                    ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    // Parse command line arguments (simple parsing, no external deps)
    let args: Vec<String> = std::env::args().collect();
    let mut config_path = String::from("data/effects.toml");
    let mut options = PreviewOptions::default();
    let mut seed_override: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--seconds" | "-s" => {
                if i + 1 < args.len() {
                    options.seconds = args[i + 1].parse().unwrap_or(10);
                    i += 1;
                }
            }
            "--frame-ms" | "-f" => {
                if i + 1 < args.len() {
                    options.frame_ms = args[i + 1].parse().unwrap_or(16);
                    i += 1;
                }
            }
            "--seed" => {
                if i + 1 < args.len() {
                    seed_override = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Usage: fx_preview [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>      Effects config (default: data/effects.toml)");
                println!("  -s, --seconds <SECS>     Simulated seconds (default: 10)");
                println!("  -f, --frame-ms <MS>      Frame length (default: 16)");
                println!("      --seed <SEED>        Override the configured seed");
                println!("  -h, --help               Show this help");
                return ExitCode::SUCCESS;
            }
            _ => {}
        }
        i += 1;
    }

    let mut config = match EffectsConfig::from_file(&config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("✗ {err}");
            return ExitCode::FAILURE;
        }
    };
    if seed_override.is_some() {
        config.seed = seed_override;
    }
    let seed = preview::resolve_seed(&config);

    println!("┌─ CONFIGURATION ─────────────────────────────────────────────────┐");
    println!("│ Config:             {config_path}");
    println!("│ Seed:               {seed}");
    println!("│ Duration:           {} seconds", options.seconds);
    println!("│ Frame:              {} ms", options.frame_ms);
    println!("│ Section:            {} x {} px", options.width, options.height);
    println!("│ Dwell:              {} ms", config.cells.dwell_ms);
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    let mut hero = match section::hero(&config, seed) {
        Ok(hero) => hero,
        Err(err) => {
            eprintln!("✗ {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut tracker = ScrollTracker::new(config.scroll.clone());
    let report = preview::run(&mut hero, &mut tracker, options);

    println!(" SEC │ FRAMES │ CMDS │ DOTS │ BUBBLES │ CELLS │ TOOLTIP │ TIMERS │ SCROLLED");
    println!("─────┼────────┼──────┼──────┼─────────┼───────┼─────────┼────────┼─────────");
    for s in &report.seconds {
        println!(
            "{:>4} │ {:>6} │ {:>4} │ {:>4} │ {:>7} │ {:>5} │ {:>7} │ {:>6} │ {:>8}",
            s.second,
            s.frames,
            s.commands,
            s.dots,
            s.bubbles,
            s.cells,
            if s.tooltips > 0 { "yes" } else { "-" },
            s.pending_timers,
            if s.scrolled { "yes" } else { "-" },
        );
    }
    println!();

    println!("═══════════════════════════════════════════════════════════════════");
    println!("                         TEARDOWN");
    println!("═══════════════════════════════════════════════════════════════════");
    println!("  Timers left:   {}", report.timers_after_unmount);
    println!("  Elements left: {}", report.elements_after_unmount);
    println!("  Scroll flips:  {}", report.scroll_flips);

    if report.timers_after_unmount == 0 && report.elements_after_unmount == 0 {
        println!("  ✓ Clean unmount");
        ExitCode::SUCCESS
    } else {
        println!("  ✗ Leaked state after unmount");
        ExitCode::FAILURE
    }
}
