//! Command families dispatched from the top-level CLI.

pub mod docs;
