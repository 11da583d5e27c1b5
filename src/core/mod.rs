pub mod cleanup;
pub mod invoker;
pub mod locator;
pub mod materializer;
pub mod report;
