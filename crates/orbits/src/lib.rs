//! Two-body orbit engine: orbital elements, Kepler's equation, state vectors and derived
//! orbital characteristics.
//!
//! Every function here is pure. Inputs are plain values plus the [`CentralBody`] they orbit,
//! and outputs are freshly computed records.

pub mod characteristics;
pub mod elements;
pub mod error;
pub mod kepler;
pub mod state;

pub use astro_core::CentralBody;
pub use characteristics::{OrbitClass, OrbitalCharacteristics, calculate_characteristics};
pub use elements::OrbitalElements;
pub use error::OrbitError;
pub use kepler::{KeplerOptions, KeplerSolution, solve_kepler};
pub use state::{StateVector, TrajectoryPoint, elements_to_state_vector, generate_trajectory};
