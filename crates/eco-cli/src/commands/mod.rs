pub mod classify;
pub mod dispatch;
pub mod establishment;
pub mod evaluate;
pub mod init;
pub mod inspection;
pub mod question;
pub mod report;
pub mod result;
pub mod schema;
pub mod shared;
