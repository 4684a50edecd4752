pub mod answer;
pub mod init;
pub mod list;
pub mod mark;
pub mod progress;
pub mod report;
pub mod show;
pub mod stats;
pub mod transfer;
pub mod validate;
