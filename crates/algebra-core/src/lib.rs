pub mod algorithms;
pub mod common;
pub mod domain;
pub mod harness;
pub mod numerics;
