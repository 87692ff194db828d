#![allow(dead_code, unused_imports)]

pub use ecsrun_test_utils::builders;
pub use ecsrun_test_utils::init_tracing;
pub use ecsrun_test_utils::scripted_backend;
