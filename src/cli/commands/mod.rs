pub mod init;
pub mod migrate;
pub mod now;
pub mod status;
