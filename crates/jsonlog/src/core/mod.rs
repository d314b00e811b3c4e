pub mod encoder;
pub mod field;
pub mod gate;
pub mod record;
pub mod severity;
pub mod sink;
