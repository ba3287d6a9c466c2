use std::f64::consts::PI;

/// Easing functions used to map normalized animation progress.
///
/// Serialized by the identifiers documents use (`"easeInOutQuad"`, `"linear"`, ...). Unknown
/// identifiers deserialize to [`Ease::Linear`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Ease {
    /// Linear interpolation.
    #[default]
    Linear,
    /// Quadratic ease-in.
    EaseInQuad,
    /// Quadratic ease-out.
    EaseOutQuad,
    /// Quadratic ease-in/out.
    EaseInOutQuad,
    /// Cubic ease-in.
    EaseInCubic,
    /// Cubic ease-out.
    EaseOutCubic,
    /// Cubic ease-in/out.
    EaseInOutCubic,
    /// Exponential ease-in.
    EaseInExpo,
    /// Exponential ease-out.
    EaseOutExpo,
    /// Exponential ease-in/out.
    EaseInOutExpo,
    /// Bounce ease-in.
    EaseInBounce,
    /// Bounce ease-out.
    EaseOutBounce,
    /// Bounce ease-in/out.
    EaseInOutBounce,
    /// Elastic ease-in.
    EaseInElastic,
    /// Elastic ease-out.
    EaseOutElastic,
    /// Overshooting ease-in.
    EaseInBack,
    /// Overshooting ease-out.
    EaseOutBack,
}

const NAMES: [(Ease, &str); 17] = [
    (Ease::Linear, "linear"),
    (Ease::EaseInQuad, "easeInQuad"),
    (Ease::EaseOutQuad, "easeOutQuad"),
    (Ease::EaseInOutQuad, "easeInOutQuad"),
    (Ease::EaseInCubic, "easeInCubic"),
    (Ease::EaseOutCubic, "easeOutCubic"),
    (Ease::EaseInOutCubic, "easeInOutCubic"),
    (Ease::EaseInExpo, "easeInExpo"),
    (Ease::EaseOutExpo, "easeOutExpo"),
    (Ease::EaseInOutExpo, "easeInOutExpo"),
    (Ease::EaseInBounce, "easeInBounce"),
    (Ease::EaseOutBounce, "easeOutBounce"),
    (Ease::EaseInOutBounce, "easeInOutBounce"),
    (Ease::EaseInElastic, "easeInElastic"),
    (Ease::EaseOutElastic, "easeOutElastic"),
    (Ease::EaseInBack, "easeInBack"),
    (Ease::EaseOutBack, "easeOutBack"),
];

impl Ease {
    /// Resolve a persisted easing identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        NAMES.iter().find(|(_, n)| *n == name).map(|(e, _)| *e)
    }

    /// Identifier used in documents.
    pub fn name(self) -> &'static str {
        NAMES
            .iter()
            .find(|(e, _)| *e == self)
            .map(|(_, n)| *n)
            .unwrap_or("linear")
    }

    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    ///
    /// Back and elastic curves overshoot outside `[0, 1]` by design of the curve; every curve
    /// maps `0 -> 0` and `1 -> 1`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInQuad => t * t,
            Self::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::EaseInCubic => t * t * t,
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::EaseInExpo => {
                if t == 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * (t - 1.0))
                }
            }
            Self::EaseOutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Self::EaseInOutExpo => {
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else if t < 0.5 {
                    2f64.powf(10.0 * (2.0 * t - 1.0)) / 2.0
                } else {
                    (2.0 - 2f64.powf(-10.0 * (2.0 * t - 1.0))) / 2.0
                }
            }
            Self::EaseInBounce => 1.0 - bounce_out(1.0 - t),
            Self::EaseOutBounce => bounce_out(t),
            Self::EaseInOutBounce => {
                if t < 0.5 {
                    (1.0 - bounce_out(1.0 - 2.0 * t)) / 2.0
                } else {
                    (1.0 + bounce_out(2.0 * t - 1.0)) / 2.0
                }
            }
            Self::EaseInElastic => {
                let c4 = (2.0 * PI) / 3.0;
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    -(2f64.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * c4).sin()
                }
            }
            Self::EaseOutElastic => {
                let c4 = (2.0 * PI) / 3.0;
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    2f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c4).sin() + 1.0
                }
            }
            Self::EaseInBack => {
                let c1 = 1.70158;
                let c3 = c1 + 1.0;
                c3 * t * t * t - c1 * t * t
            }
            Self::EaseOutBack => {
                let c1 = 1.70158;
                let c3 = c1 + 1.0;
                1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
            }
        }
    }
}

fn bounce_out(t: f64) -> f64 {
    const N1: f64 = 7.5625;
    const D1: f64 = 2.75;
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

impl serde::Serialize for Ease {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> serde::Deserialize<'de> for Ease {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name).unwrap_or_else(|| {
            tracing::warn!(easing = %name, "unknown easing identifier, using linear");
            Self::Linear
        }))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
