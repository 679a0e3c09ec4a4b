/// In-memory drive for exercising the walker and the transferor
///
/// [`MemoryDrive`] implements [`DriveStore`](crate::store::DriveStore)
/// over a tree built in the test, records every call made against it,
/// and can be told to fail specific calls.
///
/// # Example
///
/// ```rust,ignore
/// use common::testkit::MemoryDrive;
///
/// #[tokio::test]
/// async fn test_transfer() {
///     let drive = MemoryDrive::new("me");
///     let docs = drive.add_folder("root", "Docs");
///     drive.add_file(&docs, "a.txt");
///
///     // ... walk with a Transferor ...
///
///     assert!(drive.mutations().is_empty());
/// }
/// ```
mod drive;

pub use drive::{Call, MemoryDrive};
