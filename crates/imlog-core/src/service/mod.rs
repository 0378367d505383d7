//! Service layer: the Send/Pull facade exposed over the service boundary.

pub mod im;
