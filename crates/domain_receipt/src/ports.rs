//! Receipt Domain Ports
//!
//! Image recognition and artifact storage are external capabilities. The
//! core consumes only the text recognition hands back and the opaque
//! reference the vault returns; receipt file contents are never inspected
//! here.

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError, ReceiptId};

/// External image recognition service
///
/// Recognition is best-effort: the returned text may be empty or garbled,
/// and the extractor downstream treats every field as optional.
#[async_trait]
pub trait TextRecognition: DomainPort {
    /// Recognizes raw text from a receipt image
    async fn recognize(&self, image: &[u8]) -> Result<String, PortError>;
}

/// External receipt artifact store
///
/// Accepts an uploaded file and returns an opaque reference the claim
/// carries from then on.
#[async_trait]
pub trait ReceiptVault: DomainPort {
    /// Stores a receipt file and returns its reference
    async fn store(&self, filename: &str, content: &[u8]) -> Result<ReceiptId, PortError>;
}

/// In-memory stand-ins for the external services, for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    /// Mock recognizer that returns a canned text for any image
    #[derive(Debug, Default)]
    pub struct StubRecognition {
        text: String,
    }

    impl StubRecognition {
        /// Creates a recognizer that always returns the given text
        pub fn returning(text: impl Into<String>) -> Self {
            Self { text: text.into() }
        }
    }

    impl DomainPort for StubRecognition {}

    #[async_trait]
    impl TextRecognition for StubRecognition {
        async fn recognize(&self, _image: &[u8]) -> Result<String, PortError> {
            Ok(self.text.clone())
        }
    }

    /// Mock vault that keeps uploads in a hash map
    #[derive(Debug, Default)]
    pub struct MemoryReceiptVault {
        files: RwLock<HashMap<ReceiptId, (String, Vec<u8>)>>,
    }

    impl MemoryReceiptVault {
        /// Creates an empty vault
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns the stored filename for a reference, if present
        pub async fn filename_of(&self, id: ReceiptId) -> Option<String> {
            self.files.read().await.get(&id).map(|(name, _)| name.clone())
        }
    }

    impl DomainPort for MemoryReceiptVault {}

    #[async_trait]
    impl ReceiptVault for MemoryReceiptVault {
        async fn store(&self, filename: &str, content: &[u8]) -> Result<ReceiptId, PortError> {
            let id = ReceiptId::new_v7();
            self.files
                .write()
                .await
                .insert(id, (filename.to_string(), content.to_vec()));
            Ok(id)
        }
    }
}
