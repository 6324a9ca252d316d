pub mod config;
pub mod info;
pub mod regions;
pub mod run;
