pub mod elements;
pub mod force;
pub mod kinematics;
pub mod nucleus;
pub mod particle;
