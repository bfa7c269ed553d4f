pub mod boundary;
pub mod searcher;

pub use boundary::{BoundaryMap, Segment};
pub use searcher::{DEFAULT_PARALLEL_THRESHOLD, Searcher};
