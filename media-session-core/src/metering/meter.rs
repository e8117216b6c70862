use crate::traits::capture_backend::AudioAnalyser;

/// Normalized loudness of one frequency-domain snapshot.
///
/// Average byte magnitude scaled so that mid-scale energy (128) maps
/// to 100%, clamped to [0, 100] regardless of input magnitude.
pub fn level_percent(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&b| u32::from(b)).sum();
    let average = sum as f32 / bins.len() as f32;
    ((average / 128.0) * 100.0).clamp(0.0, 100.0)
}

/// Ephemeral analysis state bound 1:1 to the current audio track.
///
/// Destroyed and rebuilt whenever the audio track changes; never
/// reused across a microphone switch.
pub struct AudioMeter {
    analyser: Box<dyn AudioAnalyser>,
    bins: Vec<u8>,
}

impl AudioMeter {
    pub fn new(analyser: Box<dyn AudioAnalyser>) -> Self {
        let bins = vec![0; analyser.bin_count()];
        Self { analyser, bins }
    }

    /// Read current frequency energy and reduce it to a loudness
    /// percentage in [0, 100].
    pub fn sample_percent(&mut self) -> f32 {
        self.analyser.read_frequency_data(&mut self.bins);
        level_percent(&self.bins)
    }

    /// Release the underlying audio-processing context.
    pub fn close(&mut self) {
        self.analyser.close();
    }
}
