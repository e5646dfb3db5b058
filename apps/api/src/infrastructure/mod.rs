pub mod provider;
pub mod storage;
