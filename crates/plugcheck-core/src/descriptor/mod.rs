//! # Plugcheck Core Descriptor Model
//!
//! The in-memory form of plugin descriptor documents. [`element`] defines the
//! tree ([`Element`], [`Node`], [`IncludeDirective`]) and [`parser`] turns raw
//! XML bytes into it. No checking happens here.
pub mod element;
pub mod parser;

pub use element::{Element, IncludeDirective, Node};
pub use parser::parse_document;
