//! Key-tone playback. The handset beeps on every accepted key press; the
//! shell decides whether sound is enabled, this module only makes noise.

use std::time::Duration;

use rodio::source::SineWave;
use rodio::{OutputStream, Sink, Source};

// ── Tone catalogue ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Short high beep on every accepted dispatch.
    Keypress,
    /// Lower tone when a snake run ends.
    GameOver,
}

fn params(tone: Tone) -> (f32, u64) {
    match tone {
        Tone::Keypress => (1200.0, 50),
        Tone::GameOver => (400.0, 180),
    }
}

// ── Playback ──────────────────────────────────────────────────────────────────

/// Play a tone on a background thread. Audio failures are swallowed — a
/// missing output device must never block input dispatch.
pub fn play(tone: Tone) {
    std::thread::spawn(move || {
        if let Err(err) = play_tone(tone) {
            log::debug!("audio playback failed: {err:#}");
        }
    });
}

fn play_tone(tone: Tone) -> anyhow::Result<()> {
    let (freq, ms) = params(tone);
    // Keep _stream alive for the full duration — dropping it stops audio.
    let (_stream, handle) = OutputStream::try_default()?;
    let sink = Sink::try_new(&handle)?;
    let source = SineWave::new(freq)
        .take_duration(Duration::from_millis(ms))
        .amplify(0.30);
    sink.append(source);
    sink.sleep_until_end();
    Ok(())
}
