use crate::foundation::error::{OverlayError, OverlayResult};

/// Closed catalog of compositing operators.
///
/// `x` is the base sample and `y` the overlay sample in every formula (see [`crate::blend_planes`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Overlay used verbatim, only the mask decides. Alias `blend`.
    #[default]
    Normal,
    /// `x + y`. Alias `lineardodge`.
    Add,
    /// `(x + y) / 2`.
    Average,
    /// Color burn. Alias `colorburn`.
    Burn,
    /// `min(x, y)`.
    Darken,
    /// `|x - y|`.
    Difference,
    /// `peak * x / y`.
    Divide,
    /// Color dodge. Alias `colordodge`.
    Dodge,
    /// `x + y - 2xy / peak`.
    Exclusion,
    /// `|peak - x - y|`.
    Extremity,
    /// Inverted, squared burn.
    Freeze,
    /// Reflect with roles swapped.
    Glow,
    /// `x - y + neutral`.
    GrainExtract,
    /// `x + y - neutral`.
    GrainMerge,
    /// Overlay keyed on the overlay sample.
    HardLight,
    /// Threshold to 0 or peak.
    HardMix,
    /// Freeze with roles swapped.
    Heat,
    /// Cosine interpolation.
    Interpolation,
    /// `max(x, y)`.
    Lighten,
    /// `sqrt(x^2 + y^2)`. Alias `hypot`.
    LinearAdd,
    /// `x + y - peak`, floored at 0.
    LinearBurn,
    /// Linear burn below neutral, linear dodge above.
    LinearLight,
    /// `sqrt(max(0, x^2 - y^2))`.
    LinearSubtract,
    /// `xy / peak`.
    Multiply,
    /// Multiply around neutral.
    Multiply128,
    /// `peak - |peak - x - y|`.
    Negation,
    /// Multiply/screen keyed on the base sample.
    Overlay,
    /// `min - max + peak`.
    Phoenix,
    /// Darken/lighten keyed on the overlay sample.
    PinLight,
    /// `x^2 / (peak - y)`.
    Reflect,
    /// `peak - (peak - x)(peak - y) / peak`.
    Screen,
    /// Soft burn.
    SoftBurn,
    /// Soft dodge.
    SoftDodge,
    /// `x / peak * (x + 2y - xy / neutral)`.
    SoftLight,
    /// Photoshop-style soft light.
    SoftLight2,
    /// `x - y`.
    Subtract,
    /// Burn below neutral, dodge above.
    VividLight,
}

impl BlendMode {
    /// Every mode in catalog order.
    pub const ALL: [BlendMode; 37] = [
        Self::Normal,
        Self::Add,
        Self::Average,
        Self::Burn,
        Self::Darken,
        Self::Difference,
        Self::Divide,
        Self::Dodge,
        Self::Exclusion,
        Self::Extremity,
        Self::Freeze,
        Self::Glow,
        Self::GrainExtract,
        Self::GrainMerge,
        Self::HardLight,
        Self::HardMix,
        Self::Heat,
        Self::Interpolation,
        Self::Lighten,
        Self::LinearAdd,
        Self::LinearBurn,
        Self::LinearLight,
        Self::LinearSubtract,
        Self::Multiply,
        Self::Multiply128,
        Self::Negation,
        Self::Overlay,
        Self::Phoenix,
        Self::PinLight,
        Self::Reflect,
        Self::Screen,
        Self::SoftBurn,
        Self::SoftDodge,
        Self::SoftLight,
        Self::SoftLight2,
        Self::Subtract,
        Self::VividLight,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Add => "add",
            Self::Average => "average",
            Self::Burn => "burn",
            Self::Darken => "darken",
            Self::Difference => "difference",
            Self::Divide => "divide",
            Self::Dodge => "dodge",
            Self::Exclusion => "exclusion",
            Self::Extremity => "extremity",
            Self::Freeze => "freeze",
            Self::Glow => "glow",
            Self::GrainExtract => "grainextract",
            Self::GrainMerge => "grainmerge",
            Self::HardLight => "hardlight",
            Self::HardMix => "hardmix",
            Self::Heat => "heat",
            Self::Interpolation => "interpolation",
            Self::Lighten => "lighten",
            Self::LinearAdd => "linearadd",
            Self::LinearBurn => "linearburn",
            Self::LinearLight => "linearlight",
            Self::LinearSubtract => "linearsubtract",
            Self::Multiply => "multiply",
            Self::Multiply128 => "multiply128",
            Self::Negation => "negation",
            Self::Overlay => "overlay",
            Self::Phoenix => "phoenix",
            Self::PinLight => "pinlight",
            Self::Reflect => "reflect",
            Self::Screen => "screen",
            Self::SoftBurn => "softburn",
            Self::SoftDodge => "softdodge",
            Self::SoftLight => "softlight",
            Self::SoftLight2 => "softlight2",
            Self::Subtract => "subtract",
            Self::VividLight => "vividlight",
        }
    }

    /// Alternate names accepted by [`str::parse`].
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Normal => &["blend"],
            Self::Add => &["lineardodge"],
            Self::Burn => &["colorburn"],
            Self::Dodge => &["colordodge"],
            Self::LinearAdd => &["hypot"],
            _ => &[],
        }
    }

    /// `true` when the overlay is used verbatim and no per-sample formula runs.
    pub fn is_passthrough(self) -> bool {
        self == Self::Normal
    }
}

impl std::fmt::Display for BlendMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for BlendMode {
    type Err = OverlayError;

    /// Case-insensitive. `_`, `-` and spaces may separate words (`Hard_Light`, `soft light 2`,
    /// `Color-Dodge`) but may not split a word.
    fn from_str(s: &str) -> OverlayResult<Self> {
        let lower = s.trim().to_ascii_lowercase();
        if lower.is_empty() {
            return Err(OverlayError::invalid_argument("blend mode must be non-empty"));
        }
        let unknown = || OverlayError::invalid_argument(format!("unknown blend mode '{}'", s.trim()));
        let segments: Vec<&str> = lower.split(['_', '-', ' ']).collect();
        if segments.iter().any(|seg| seg.is_empty()) {
            return Err(unknown());
        }
        let key = segments.concat();
        let cuts: Vec<usize> = segments[..segments.len() - 1]
            .iter()
            .scan(0, |end, seg| {
                *end += seg.len();
                Some(*end)
            })
            .collect();

        Self::ALL
            .iter()
            .copied()
            .find(|m| {
                let canonical = m.name() == key && cuts.iter().all(|c| m.word_breaks().contains(c));
                let alias = m.aliases().iter().any(|a| {
                    *a == key && cuts.iter().all(|c| alias_word_breaks(a).contains(c))
                });
                canonical || alias
            })
            .ok_or_else(unknown)
    }
}

impl BlendMode {
    // Offsets inside `name()` where a new word starts: "softlight2" -> [4, 9].
    fn word_breaks(self) -> Vec<usize> {
        let camel = format!("{self:?}");
        let bytes = camel.as_bytes();
        (1..bytes.len())
            .filter(|&i| {
                bytes[i].is_ascii_uppercase()
                    || (bytes[i].is_ascii_digit() && !bytes[i - 1].is_ascii_digit())
            })
            .collect()
    }
}

fn alias_word_breaks(alias: &str) -> &'static [usize] {
    match alias {
        "lineardodge" => &[6],
        "colorburn" | "colordodge" => &[5],
        _ => &[],
    }
}

impl serde::Serialize for BlendMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> serde::Deserialize<'de> for BlendMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/mode.rs"]
mod tests;
