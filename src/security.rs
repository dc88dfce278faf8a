pub mod signature;

pub use signature::{sign, signature_header, SIGNATURE_HEADER};
