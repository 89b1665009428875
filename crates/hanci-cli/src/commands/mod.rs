pub mod init;
pub mod list;
pub mod review;
