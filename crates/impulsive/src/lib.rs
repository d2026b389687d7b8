//! Impulsive transfer utilities: coplanar Hohmann and bi-elliptic transfers between circular
//! orbits.

pub mod transfers;

pub use transfers::{
    TransferError, TransferKind, TransferResult, bi_elliptic_transfer, bi_elliptic_transfer_now,
    hohmann_transfer, hohmann_transfer_now,
};
