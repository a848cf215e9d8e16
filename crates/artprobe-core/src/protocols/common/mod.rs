pub mod byteorder;
pub mod hex;
