//! Test helpers and builder patterns for orchestrator tests

use generator::{ApiFailure, GenerationResponse, GeneratorError, MockTextGenerator, OfflineGenerator, ProviderId, TextGenerator};
use orchestrator::{EngineConfig, MemoryWorkshopStore, WorkshopOrchestrator};
use shared::{CreateWorkshopRequest, Workshop};
use std::time::Duration;

use super::fixtures::TestFixtures;

pub type TestOrchestrator = WorkshopOrchestrator<MemoryWorkshopStore, Box<dyn TextGenerator>>;

/// Builder for orchestrators over an in-memory store
pub struct OrchestratorBuilder {
    generator: Box<dyn TextGenerator>,
    config: EngineConfig,
}

impl OrchestratorBuilder {
    /// Offline generator and default engine settings
    pub fn new() -> Self {
        Self {
            generator: Box::new(OfflineGenerator),
            config: EngineConfig::default(),
        }
    }

    pub fn with_generator(mut self, generator: impl TextGenerator + 'static) -> Self {
        self.generator = Box::new(generator);
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> TestOrchestrator {
        WorkshopOrchestrator::new(MemoryWorkshopStore::new(), self.generator, self.config)
    }
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TestHelpers;

impl TestHelpers {
    pub fn demo_orchestrator() -> TestOrchestrator {
        OrchestratorBuilder::new().build()
    }

    /// A provider that answers each step from `TestFixtures`
    ///
    /// Workflow requests get unparseable text so that step falls back.
    pub fn scripted_generator() -> MockTextGenerator {
        let mut generator = MockTextGenerator::new();
        generator.expect_is_live().return_const(true);
        generator.expect_generate().returning(|request| {
            let content = if request.instructions.contains("skeptical") {
                TestFixtures::challenge_reply()
            } else if request.instructions.contains("financial analyst") {
                TestFixtures::benefit_reply()
            } else if request.instructions.contains("solutions architect") {
                "I would rather describe this in prose.".to_string()
            } else {
                TestFixtures::CHAT_REPLY.to_string()
            };
            Ok(GenerationResponse {
                content,
                provider: ProviderId::OpenAI,
                model: ProviderId::OpenAI.default_model().to_string(),
                tokens_used: 42,
                response_time: Duration::from_millis(5),
            })
        });
        generator
    }

    /// A provider that is configured but always fails upstream
    pub fn failing_generator() -> MockTextGenerator {
        let mut generator = MockTextGenerator::new();
        generator.expect_is_live().return_const(true);
        generator.expect_generate().returning(|_| {
            Err(GeneratorError::UpstreamGenerationFailure {
                provider: ProviderId::OpenAI,
                reason: ApiFailure::ServiceUnavailable,
            })
        });
        generator
    }

    pub async fn create_workshop(orchestrator: &TestOrchestrator) -> Workshop {
        orchestrator
            .create_workshop(CreateWorkshopRequest {
                company_name: TestFixtures::COMPANY.to_string(),
                industry: TestFixtures::INDUSTRY.to_string(),
                facilitator_name: TestFixtures::FACILITATOR.to_string(),
            })
            .await
            .unwrap()
    }

    /// Workshop with both imports and a survey attached, reconciled
    pub async fn reconciled_workshop(orchestrator: &TestOrchestrator) -> Workshop {
        let workshop = Self::create_workshop(orchestrator).await;
        orchestrator.import_research(workshop.id, TestFixtures::research_import()).await.unwrap();
        orchestrator.import_cognition(workshop.id, TestFixtures::cognition_import()).await.unwrap();
        orchestrator.submit_survey(workshop.id, TestFixtures::survey()).await.unwrap();
        orchestrator.reconcile(workshop.id).await.unwrap();
        orchestrator.get_workshop(workshop.id).await.unwrap()
    }
}
