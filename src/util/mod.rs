//! Support code with no page or network knowledge.

pub mod storage;
