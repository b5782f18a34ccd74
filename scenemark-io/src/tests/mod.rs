//! Test modules for scenemark-io
//!
//! Scene document parsing, path resolution and marker output.
