//! Cycle a line of text through scramble transitions in the terminal.
//!
//! Run with: `cargo run -p glyphfx --example marquee`

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use glyphfx::prelude::*;

/// Prints each presented frame to stdout, dimming scrambling runs.
struct ConsoleSurface {
    segments: Vec<Segment>,
}

impl TextSurface for ConsoleSurface {
    fn plain_text(&self) -> String {
        glyphfx::plain_text(&self.segments)
    }

    fn present(&mut self, segments: &[Segment]) {
        self.segments = segments.to_vec();
        let mut line = String::from("\r\x1b[2K");
        for seg in segments {
            match seg.role {
                SegmentRole::Settled => line.push_str(&seg.text),
                SegmentRole::Scrambling => {
                    line.push_str("\x1b[2m");
                    line.push_str(&seg.text);
                    line.push_str("\x1b[0m");
                }
            }
        }
        print!("{line}");
        let _ = std::io::stdout().flush();
    }
}

fn main() {
    let driver = ScrambleDriver::new(
        ConsoleSurface {
            segments: Vec::new(),
        },
        Arc::new(ThreadScheduler::new()),
    );

    let phrases = [
        "Neural interface calibrated.",
        "Downloading the entire internet...",
        "All glyphs accounted for.",
        "Goodbye.",
    ];

    for phrase in phrases {
        let done = driver.set_text(phrase);
        done.wait();
        std::thread::sleep(Duration::from_millis(900));
    }
    println!();
}
