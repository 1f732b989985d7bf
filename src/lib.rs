pub mod cluster;
pub mod dedup;
pub mod dto;
pub mod error;
pub mod report;
pub mod scoring;
pub mod similarity;
pub mod util;
