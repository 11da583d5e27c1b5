pub mod net;
pub mod source;
