pub mod deploy;
pub mod exec;
pub mod init;
