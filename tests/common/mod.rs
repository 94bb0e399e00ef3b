pub mod fixtures;
pub mod heap_gauge;
