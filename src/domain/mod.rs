// Domain layer: record types for the three dataset families, the dataset
// envelope, and the ports the pipeline is written against.

pub mod literal;

pub mod covid;
pub mod facility;
pub mod geo;
pub mod model;
pub mod ports;
