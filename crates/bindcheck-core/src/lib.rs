//! Header/binding cross-referencing engine.
//!
//! This crate provides:
//! - Comment stripping for C-like header text
//! - Header extraction: exported function pointer arguments and simple struct layouts
//! - Binding argument checks: pointer arguments must stay references/pointers in Rust
//! - Structure override checks: build-script structs must carry the header's field set
//!
//! Everything here operates on text or reads whole files; nothing is written back.

#![forbid(unsafe_code)]

pub mod binding;
pub mod comments;
pub mod error;
pub mod failure;
pub mod header;
pub mod normalize;
pub mod observer;
pub mod overrides;

pub use binding::{ArgumentCheckOptions, check_binding_arguments};
pub use error::CheckError;
pub use failure::{CheckFailure, CheckerKind};
pub use header::{FunctionSignature, HeaderIndex, StructureLayout};
pub use normalize::normalize_name;
pub use observer::{CheckObserver, NullObserver};
pub use overrides::check_structure_overrides;
