pub mod file;
pub mod providers;
pub mod stdin;
