pub mod init;
pub mod resolve;
pub mod transfer;

pub use init::Init;
pub use resolve::Resolve;
pub use transfer::Transfer;
