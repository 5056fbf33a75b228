//! Config file parsers

pub mod include_map;
