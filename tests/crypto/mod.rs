//! Encryption Subsystem Tests
//!
//! Test suite for the cipher implementations, the handler dispatch and
//! the metadata codec.

mod test_aes_gcm;
mod test_handler;
mod test_metadata;
