//! # DataCite REST Client
//!
//! Typed client for the two registration operations: minting a DOI for
//! a new resource and refreshing the metadata of a registered one. Both
//! talk JSON:API to the `/dois` endpoint of whichever registry mode the
//! policy resolved.

use std::time::Duration;

use serde_json::Value;

use datapub_core::{Doi, Resource};
use datapub_export::registration_document;
use datapub_schema::{SchemaError, SchemaValidator};

use crate::config::{RegistryMode, RegistrySettings};
use crate::error::RegistryError;
use crate::retry::send_with_retry;

/// A successful mint: the DOI the registry assigned plus its full
/// response document.
#[derive(Debug, Clone)]
pub struct RegistrationOutcome {
    pub doi: Doi,
    pub response: Value,
}

/// Client for the DataCite REST API, holding both mode configurations.
pub struct DataCiteClient {
    http: reqwest::Client,
    settings: RegistrySettings,
    validator: SchemaValidator,
}

impl DataCiteClient {
    /// Build a client over `settings`, compiling the schema once.
    pub fn new(settings: RegistrySettings) -> Result<Self, SchemaError> {
        Ok(Self {
            http: reqwest::Client::new(),
            settings,
            validator: SchemaValidator::new()?,
        })
    }

    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    /// Mint a DOI for `resource` against the registry of `mode`.
    ///
    /// The document is validated before anything is sent; the registry
    /// picks the suffix under the configured prefix. Does not write the
    /// DOI back, that is the caller's transaction.
    pub async fn register(
        &self,
        resource: &Resource,
        mode: RegistryMode,
    ) -> Result<RegistrationOutcome, RegistryError> {
        if let Some(existing) = &resource.doi {
            return Err(datapub_core::CoreError::AlreadyRegistered {
                existing: existing.clone(),
            }
            .into());
        }

        let config = self.settings.config_for(mode);
        let body = registration_document(resource, &self.validator, Some(&config.doi_prefix))?;
        let endpoint = format!("{}/dois", config.base_url.as_str().trim_end_matches('/'));

        tracing::info!(resource = %resource.id, registry = %mode, "minting DOI");

        let response = send_with_retry(
            || {
                self.http
                    .post(&endpoint)
                    .basic_auth(&config.username, Some(config.password.as_str()))
                    .timeout(Duration::from_secs(config.timeout_secs))
                    .json(&body)
            },
            mode,
        )
        .await?;

        let document = self.success_body(response, mode).await?;
        let doi = doi_from_response(&document, mode)?;

        tracing::info!(resource = %resource.id, doi = %doi, registry = %mode, "DOI minted");

        Ok(RegistrationOutcome {
            doi,
            response: document,
        })
    }

    /// Push the current metadata of a registered resource to `mode`.
    ///
    /// No prefix is sent; the DOI already exists and names the record.
    pub async fn update_metadata(
        &self,
        doi: &Doi,
        resource: &Resource,
        mode: RegistryMode,
    ) -> Result<Value, RegistryError> {
        let config = self.settings.config_for(mode);
        let body = registration_document(resource, &self.validator, None)?;
        let endpoint = format!(
            "{}/dois/{}",
            config.base_url.as_str().trim_end_matches('/'),
            doi.as_str()
        );

        tracing::info!(resource = %resource.id, doi = %doi, registry = %mode, "updating metadata");

        let response = send_with_retry(
            || {
                self.http
                    .put(&endpoint)
                    .basic_auth(&config.username, Some(config.password.as_str()))
                    .timeout(Duration::from_secs(config.timeout_secs))
                    .json(&body)
            },
            mode,
        )
        .await?;

        self.success_body(response, mode).await
    }

    /// Turn a non-5xx response into its JSON body or a final error.
    async fn success_body(
        &self,
        response: reqwest::Response,
        mode: RegistryMode,
    ) -> Result<Value, RegistryError> {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(RegistryError::BadCredentials {
                mode,
                status: status.as_u16(),
            });
        }

        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(RegistryError::Rejected {
                mode,
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| RegistryError::UnexpectedResponse {
                mode,
                reason: format!("body was not JSON: {e}"),
            })
    }
}

/// Extract the minted DOI from a registry response document.
///
/// JSON:API puts it at `/data/id`; older payloads carry it only at
/// `/data/attributes/doi`.
fn doi_from_response(document: &Value, mode: RegistryMode) -> Result<Doi, RegistryError> {
    let raw = document
        .pointer("/data/id")
        .or_else(|| document.pointer("/data/attributes/doi"))
        .and_then(Value::as_str)
        .ok_or_else(|| RegistryError::UnexpectedResponse {
            mode,
            reason: "response carries no DOI at /data/id".to_string(),
        })?;

    Doi::parse(raw).map_err(|_| RegistryError::UnexpectedResponse {
        mode,
        reason: format!("response DOI is not a DOI: {raw}"),
    })
}
