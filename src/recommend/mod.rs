pub mod accuracy;
pub mod engine;
pub mod similarity;
pub mod storage;
