#![deny(unsafe_code)]
//! Procedural animation rig for the ocquarium octopus.
//!
//! Leaf to root: [`Transform2D`] maps logical design space to pixels,
//! [`SpringLink`] is one spring-driven joint, [`ArmChain`] chains three joints
//! into a limb, [`Octopus`] owns eight limbs and the body, and
//! [`DriftController`] moves the body around. [`Rig`] is the handle a host
//! shell drives from its frame ticker.
//!
//! Each frame runs in a fixed order: drift moves the anchor, limb bases
//! follow, every joint spring advances once, and end positions propagate from
//! base to tip.

pub mod arm;
pub mod drift;
pub mod link;
pub mod octopus;
pub mod rig;
pub mod spring;
pub mod transform;

#[cfg(test)]
mod testing;

pub use arm::ArmChain;
pub use drift::{DriftController, DriftStep};
pub use link::SpringLink;
pub use octopus::Octopus;
pub use rig::Rig;
pub use spring::{SpringAxis, StiffnessTier};
pub use transform::{Transform2D, BASE_SCALE};
