//! Data models for the Leena's Boutique storefront.
//!
//! These models match the frontend TypeScript interfaces exactly for seamless interoperability.

mod cart;
mod filter;
mod product;
mod visit;

pub use cart::*;
pub use filter::*;
pub use product::*;
pub use visit::*;
