pub mod install;
pub mod selftest;
pub mod validate;
