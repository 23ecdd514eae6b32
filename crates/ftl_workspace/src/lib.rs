// This is a stub lib.rs generated by cargo hakari. The contents of this crate are managed
// through its Cargo.toml.
