//! Database initialization and sketch record queries

pub mod init;
pub mod sketches;

pub use init::{create_schema, init_database};
pub use sketches::{delete_sketch, fetch_sketch_rows, insert_sketch, parse_sketch_id, NewSketch};
