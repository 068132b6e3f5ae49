//! Fusion peptide prediction: reading frame resolution, translation across the
//! junction and in-frame classification.

pub mod classify;
pub mod frame;
pub mod layout;
pub mod synthesis;

pub use classify::{FrameStatus, is_in_frame};
pub use frame::{ReadingFrame, get_reading_frame};
pub use synthesis::{FusionPartner, NO_PEPTIDE, get_fusion_peptide_sequence};
