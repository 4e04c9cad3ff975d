//! HTML rendering for the home and preview pages.
//!
//! All rendering uses [maud](https://maud.lambda.xyz/) so every dynamic value
//! is escaped.

pub mod components;
pub mod preview;
