/// Named visual effect applied to the video preview.
///
/// Purely presentational: the session only tracks which single effect
/// is active; rendering the filter is the presentation layer's job.
/// Effects are mutually exclusive, applying one clears the previous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisualEffect {
    Sepia,
    Blur,
    Brightness,
    Contrast,
    Grayscale,
    Saturate,
    #[default]
    None,
}

impl VisualEffect {
    /// Map an effect name to its variant. Unknown names are `None`,
    /// there is no error case.
    pub fn from_name(name: &str) -> Self {
        match name {
            "sepia" => Self::Sepia,
            "blur" => Self::Blur,
            "brightness" => Self::Brightness,
            "contrast" => Self::Contrast,
            "grayscale" => Self::Grayscale,
            "saturate" => Self::Saturate,
            _ => Self::None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sepia => "sepia",
            Self::Blur => "blur",
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Grayscale => "grayscale",
            Self::Saturate => "saturate",
            Self::None => "none",
        }
    }

    /// The single active CSS filter description for this effect.
    pub fn css_filter(&self) -> &'static str {
        match self {
            Self::Sepia => "sepia(1)",
            Self::Blur => "blur(4px)",
            Self::Brightness => "brightness(1.4)",
            Self::Contrast => "contrast(1.6)",
            Self::Grayscale => "grayscale(1)",
            Self::Saturate => "saturate(2)",
            Self::None => "none",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_round_trip() {
        for name in ["sepia", "blur", "brightness", "contrast", "grayscale", "saturate", "none"] {
            assert_eq!(VisualEffect::from_name(name).name(), name);
        }
    }

    #[test]
    fn unknown_names_fall_back_to_none() {
        assert_eq!(VisualEffect::from_name("vignette"), VisualEffect::None);
        assert_eq!(VisualEffect::from_name(""), VisualEffect::None);
        assert_eq!(VisualEffect::from_name("SEPIA"), VisualEffect::None);
    }

    #[test]
    fn none_has_identity_filter() {
        assert_eq!(VisualEffect::None.css_filter(), "none");
    }
}
