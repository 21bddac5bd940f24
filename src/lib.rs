pub mod batch;
pub mod config;
pub mod fetch;
pub mod grades;
pub mod output;
pub mod parser;
pub mod session;
