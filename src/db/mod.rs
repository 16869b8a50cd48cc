//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    /// Weekly activities ("horaris" predates the English naming)
    pub const ACTIVITIES: &str = "horaris";
}
