use rodio::Source;
use std::f32::consts::PI;
use std::time::Duration;

const SAMPLE_RATE: u32 = 44100;
const SEGMENT_SECS: f32 = 0.15;
const SEGMENTS: usize = 4;

/// Synthesized proximity warning: a short two-tone warble, used when no
/// alert sound asset is configured.
pub struct WarningTone {
    high_freq: f32,
    low_freq: f32,
    num_sample: usize,
    total_samples: usize,
    segment_samples: usize,
}

impl WarningTone {
    pub fn new() -> Self {
        let segment_samples = (SAMPLE_RATE as f32 * SEGMENT_SECS) as usize;
        Self {
            high_freq: 880.0,
            low_freq: 660.0,
            num_sample: 0,
            total_samples: segment_samples * SEGMENTS,
            segment_samples,
        }
    }
}

impl Default for WarningTone {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for WarningTone {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.num_sample >= self.total_samples {
            return None;
        }

        // Alternate high/low every segment for the warble effect
        let freq = if (self.num_sample / self.segment_samples) % 2 == 0 {
            self.high_freq
        } else {
            self.low_freq
        };

        let t = self.num_sample as f32 / SAMPLE_RATE as f32;
        self.num_sample += 1;

        Some((2.0 * PI * freq * t).sin() * 0.25) // Lower amplitude to prevent clipping
    }
}

impl Source for WarningTone {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1 // Mono
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f32(SEGMENT_SECS * SEGMENTS as f32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_is_finite() {
        let tone = WarningTone::new();
        let expected = tone.total_samples;
        assert_eq!(tone.count(), expected);
    }

    #[test]
    fn samples_stay_in_unit_range() {
        for sample in WarningTone::new() {
            assert!(sample.abs() <= 1.0);
        }
    }
}
