pub mod cleanup;
pub mod snapshot;
