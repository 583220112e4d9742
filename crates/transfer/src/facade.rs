//! Re-exported APIs for consumers of the transfer crate.

pub use crate::capture::{AEROBRAKING_LIMIT_KM_S, CaptureTarget, capture_delta_v};
pub use crate::cost::{
    CYCLER_DELTA_V_FACTOR, CYCLER_TIME_FACTOR, DEFAULT_DIFFICULTY_SCALE, FAST_CAPTURE_SURCHARGE,
    FAST_DELTA_V_FACTOR, FAST_TIME_FACTOR, TransferCost, TransferCosts, TransferError,
    TransferModel,
};
pub use crate::mode::TransferMode;
