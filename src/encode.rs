pub mod fingerprint;
pub mod sink;
