// Core modules: the decode engine and the shell error model.
pub mod decode;
pub mod error;
