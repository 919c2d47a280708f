pub mod demo;

pub use demo::DemoSession;
