// Storage layer
//
// File-system side of the tool:
// - reading sheet exports and mapping files (csv + encoding detection)
// - creating the mapping file in the output folder

pub mod decode;
pub mod error;
pub mod sheet;
pub mod sink;
