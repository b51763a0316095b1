//! Service-specific tests
//!
//! Each store has its own test file; shared fixtures live in `common`.


// Common test utilities for services
#[cfg(test)]
pub mod common {
    use chrono::Utc;
    use shared::{ImportedSource, RawUseCase, SourceSystem, Workshop};
    use std::time::Duration;
    use tokio::time::timeout;

    /// Standard timeout for async operations in tests
    pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

    /// Helper to run async operations with timeout
    pub async fn with_timeout<T, F>(future: F) -> Result<T, tokio::time::error::Elapsed>
    where
        F: std::future::Future<Output = T>,
    {
        timeout(TEST_TIMEOUT, future).await
    }

    pub fn test_workshop(company: &str) -> Workshop {
        Workshop::new(company.to_string(), "Manufacturing".to_string(), "Dana".to_string())
    }

    pub fn research_import(titles: &[&str]) -> ImportedSource {
        ImportedSource {
            source: SourceSystem::ResearchApp,
            report_id: "rr-100".to_string(),
            use_cases: titles
                .iter()
                .map(|title| RawUseCase {
                    title: title.to_string(),
                    assumptions: vec![format!("{title} data is available")],
                    ..RawUseCase::default()
                })
                .collect(),
            imported_at: Utc::now(),
        }
    }
}
