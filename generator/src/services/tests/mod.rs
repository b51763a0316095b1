//! Tests for generator services against a mocked provider endpoint

pub mod provider_client;
