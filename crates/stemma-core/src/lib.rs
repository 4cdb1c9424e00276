//! Stemma Core Types and Definitions
//!
//! This crate provides the foundational types for rendering Stemma
//! relationship diagrams:
//!
//! - **Colors**: CSS color handling ([`color::Color`])
//! - **Geometry**: points, sizes, bounds, and the measured node box with its
//!   border-anchor routine ([`geometry`] module)
//! - **Draw**: drawable diagram elements - node boxes, connectors, union
//!   points - and the layered SVG output they render into ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
