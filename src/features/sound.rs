//! Audible cues for timer events.
//!
//! Each cue keeps the tone recipe it is designed around. In a terminal the
//! closest thing available is the bell, rung once per tone.

use std::io::Write;

use crate::error::FocusFlowError;
use crate::features::focus::FocusEvents;

/// Oscillator shape of a tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    /// Pure tone
    Sine,
    /// Hollow tone
    Square,
    /// Buzzy tone
    Sawtooth,
    /// Soft tone
    Triangle,
}

/// A single tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Frequency in hertz
    pub frequency_hz: f32,
    /// Length in milliseconds
    pub duration_ms: u32,
    /// Delay after the cue starts, in milliseconds
    pub offset_ms: u32,
    /// Oscillator shape
    pub waveform: Waveform,
}

const START: [Tone; 2] = [
    Tone {
        frequency_hz: 1046.5,
        duration_ms: 120,
        offset_ms: 0,
        waveform: Waveform::Sine,
    },
    Tone {
        frequency_hz: 1568.0,
        duration_ms: 120,
        offset_ms: 0,
        waveform: Waveform::Sine,
    },
];

const PAUSE: [Tone; 1] = [Tone {
    frequency_hz: 392.0,
    duration_ms: 120,
    offset_ms: 0,
    waveform: Waveform::Square,
}];

const STOP: [Tone; 1] = [Tone {
    frequency_hz: 220.0,
    duration_ms: 160,
    offset_ms: 0,
    waveform: Waveform::Sawtooth,
}];

const SESSION_END: [Tone; 2] = [
    Tone {
        frequency_hz: 1318.5,
        duration_ms: 140,
        offset_ms: 0,
        waveform: Waveform::Triangle,
    },
    Tone {
        frequency_hz: 1760.0,
        duration_ms: 140,
        offset_ms: 150,
        waveform: Waveform::Triangle,
    },
];

/// Named sound cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Countdown or stopwatch started
    Start,
    /// Paused
    Pause,
    /// Stopped and rewound
    Stop,
    /// A phase ran out
    SessionEnd,
}

impl SoundCue {
    /// Tones making up this cue.
    #[must_use]
    pub const fn tones(self) -> &'static [Tone] {
        match self {
            Self::Start => &START,
            Self::Pause => &PAUSE,
            Self::Stop => &STOP,
            Self::SessionEnd => &SESSION_END,
        }
    }

    /// Distinct onsets, i.e. how many times a listener hears something.
    #[must_use]
    pub fn beats(self) -> usize {
        let mut offsets: Vec<u32> = self.tones().iter().map(|t| t.offset_ms).collect();
        offsets.dedup();
        offsets.len()
    }
}

/// Rings the terminal bell for timer events.
pub struct Chime<W: Write> {
    enabled: bool,
    out: W,
}

impl Chime<std::io::Stderr> {
    /// Chime on standard error.
    #[must_use]
    pub fn stderr(enabled: bool) -> Self {
        Self::new(enabled, std::io::stderr())
    }
}

impl<W: Write> Chime<W> {
    /// Chime writing to `out`.
    pub const fn new(enabled: bool, out: W) -> Self {
        Self { enabled, out }
    }

    /// Play a cue.
    ///
    /// # Errors
    ///
    /// Returns `FocusFlowError::Sound` if the output cannot be written.
    pub fn play(&mut self, cue: SoundCue) -> Result<(), FocusFlowError> {
        if !self.enabled {
            return Ok(());
        }
        let bells = "\x07".repeat(cue.beats());
        self.out
            .write_all(bells.as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(|e| FocusFlowError::Sound(format!("Failed to play {cue:?} cue: {e}")))
    }

    /// Get the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FocusEvents for Chime<W> {
    fn on_start(&mut self) -> Result<(), FocusFlowError> {
        self.play(SoundCue::Start)
    }

    fn on_pause(&mut self) -> Result<(), FocusFlowError> {
        self.play(SoundCue::Pause)
    }

    fn on_stop(&mut self) -> Result<(), FocusFlowError> {
        self.play(SoundCue::Stop)
    }

    fn on_session_end(&mut self) -> Result<(), FocusFlowError> {
        self.play(SoundCue::SessionEnd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_cue_beats() {
        assert_eq!(SoundCue::Start.beats(), 1);
        assert_eq!(SoundCue::Pause.beats(), 1);
        assert_eq!(SoundCue::SessionEnd.beats(), 2);
        assert_eq!(SoundCue::Stop.tones()[0].waveform, Waveform::Sawtooth);
    }

    #[test]
    fn test_chime_rings_bell() {
        let mut chime = Chime::new(true, Vec::new());
        chime.on_start().unwrap();
        chime.on_session_end().unwrap();
        chime.on_focus_second_elapsed().unwrap();

        assert_eq!(chime.into_inner(), b"\x07\x07\x07".to_vec());
    }

    #[test]
    fn test_disabled_chime_is_silent() {
        let mut chime = Chime::new(false, Vec::new());
        chime.on_stop().unwrap();
        assert!(chime.into_inner().is_empty());
    }

    #[test]
    fn test_write_failure_is_sound_error() {
        let mut chime = Chime::new(true, BrokenPipe);
        assert!(matches!(chime.on_pause(), Err(FocusFlowError::Sound(_))));
    }
}
