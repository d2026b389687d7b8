use thiserror::Error;

/// Failures raised by the orbit engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrbitError {
    #[error(
        "semi-major axis {semi_major_axis_km} km must exceed the central body radius \
         {body_radius_km} km"
    )]
    SemiMajorAxisInsideBody {
        semi_major_axis_km: f64,
        body_radius_km: f64,
    },
    #[error("eccentricity {0} is outside the bound-orbit range [0, 1)")]
    EccentricityOutOfRange(f64),
    #[error("{quantity} must be finite (got {value})")]
    NonFinite { quantity: &'static str, value: f64 },
    #[error("state vector computation produced a non-finite {0}")]
    Degenerate(&'static str),
}

impl OrbitError {
    /// True for rejected inputs, false for failures raised while computing from valid inputs.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, OrbitError::Degenerate(_))
    }
}
