//! Global allocator.
//!
//! Batch runs hold many short-lived plaintext and ciphertext buffers at once;
//! mimalloc replaces the system allocator for the whole binary.

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;
