//! Receipt reading collaborator
//!
//! Implementations send the photo to a vision service and return its
//! best-effort extraction. The dialogue only needs the result; how the
//! service is called is up to the implementation.

use async_trait::async_trait;
use crate::models::ReceiptAnalysis;
use crate::utils::errors::Result;

#[async_trait]
pub trait ReceiptAnalyzer: Send + Sync {
    /// Read a receipt from the raw image bytes (JPEG as sent by Telegram)
    async fn analyze(&self, image: &[u8]) -> Result<ReceiptAnalysis>;
}
