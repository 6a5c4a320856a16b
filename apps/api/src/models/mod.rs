//! Shared data model for the HireWrite generation gateway.

pub mod generation;

pub use generation::{
    ActionKind, GenerationRequest, GenerationResponse, ModelKind, SectionKind, ToneKind,
};
