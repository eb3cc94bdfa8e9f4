//! Receipt analyzer returning a canned result

use std::sync::Mutex;
use async_trait::async_trait;
use gedie::models::ReceiptAnalysis;
use gedie::services::ReceiptAnalyzer;
use gedie::utils::errors::{GedieError, Result};

pub struct StubAnalyzer {
    outcome: Option<ReceiptAnalysis>,
    seen: Mutex<Vec<Vec<u8>>>,
}

impl StubAnalyzer {
    pub fn returning(analysis: ReceiptAnalysis) -> Self {
        Self { outcome: Some(analysis), seen: Mutex::new(Vec::new()) }
    }

    /// Every call fails as if the vision service were down
    pub fn failing() -> Self {
        Self { outcome: None, seen: Mutex::new(Vec::new()) }
    }

    /// Images passed to `analyze`, in call order
    pub fn images(&self) -> Vec<Vec<u8>> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReceiptAnalyzer for StubAnalyzer {
    async fn analyze(&self, image: &[u8]) -> Result<ReceiptAnalysis> {
        self.seen.lock().unwrap().push(image.to_vec());
        self.outcome
            .clone()
            .ok_or_else(|| GedieError::InvalidInput("vision service unavailable".to_string()))
    }
}
