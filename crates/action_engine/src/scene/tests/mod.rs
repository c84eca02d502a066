//! Multi-frame world scenarios

mod hierarchy;
