//! Project detection and scaffolding.
//!
//! ## Modules
//!
//! - [`detect`] - Target directory classification and metadata carry-over
//! - [`manifest`] - `package.json` parsing
//! - [`descriptor`] - `src/package.xml` parsing and version normalization
//! - [`scaffold`] - Template-driven file emission
//!
//! ## Key Types
//!
//! - [`detect::DetectedState`] - What detection learned about the target
//! - [`scaffold::WidgetSpec`] - The merged inputs of the writing stage

pub mod descriptor;
pub mod detect;
pub mod manifest;
pub mod scaffold;
