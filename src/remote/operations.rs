//! Catalog operations against the template service.

use super::*;
use crate::model::{Category, DashboardSnapshot, Template, ViewQuery};
use crate::mutation::TemplateDraft;

impl RemoteGateway {
    pub async fn list_featured(&self, limit: u32) -> Result<Vec<Template>, GatewayError> {
        let resp = self
            .client
            .get(self.url("/templates/featured"))
            .query(&[("limit", limit.to_string())])
            .send()
            .await
            .map_err(|err| Self::network("list featured", err))?;

        let env: Envelope<Vec<RawTemplate>> = self.read_envelope(resp, "list featured").await?;
        normalize::templates(env.require_data("list featured")?)
    }

    pub async fn search(&self, query: &ViewQuery) -> Result<SearchPage, GatewayError> {
        let resp = self
            .client
            .get(self.url("/templates"))
            .query(&query.params())
            .send()
            .await
            .map_err(|err| Self::network("search templates", err))?;

        let env: Envelope<Vec<RawTemplate>> = self.read_envelope(resp, "search templates").await?;
        let total = env.total;
        let templates = normalize::templates(env.require_data("search templates")?)?;
        Ok(SearchPage { templates, total })
    }

    pub async fn get(&self, id: &str) -> Result<Template, GatewayError> {
        let resp = self
            .client
            .get(self.url(&format!("/templates/{id}")))
            .send()
            .await
            .map_err(|err| Self::network("get template", err))?;

        let env: Envelope<RawTemplate> = self.read_envelope(resp, "get template").await?;
        normalize::template(env.require_data("get template")?)
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, GatewayError> {
        let resp = self
            .client
            .get(self.url("/categories"))
            .send()
            .await
            .map_err(|err| Self::network("list categories", err))?;

        let env: Envelope<Vec<RawCategory>> = self.read_envelope(resp, "list categories").await?;
        Ok(env
            .require_data("list categories")?
            .into_iter()
            .map(normalize::category)
            .collect())
    }

    pub async fn dashboard(&self) -> Result<DashboardSnapshot, GatewayError> {
        let resp = self
            .client
            .get(self.url("/dashboard"))
            .send()
            .await
            .map_err(|err| Self::network("get dashboard", err))?;

        let env: Envelope<RawDashboard> = self.read_envelope(resp, "get dashboard").await?;
        Ok(normalize::dashboard(env.require_data("get dashboard")?))
    }

    pub async fn create(&self, draft: &TemplateDraft) -> Result<Template, GatewayError> {
        let resp = self
            .client
            .post(self.url("/templates"))
            .json(draft)
            .send()
            .await
            .map_err(|err| Self::network("create template", err))?;

        let env: Envelope<RawTemplate> = self.read_envelope(resp, "create template").await?;
        normalize::template(env.require_data("create template")?)
    }

    pub async fn update(&self, id: &str, draft: &TemplateDraft) -> Result<Template, GatewayError> {
        let resp = self
            .client
            .put(self.url(&format!("/templates/{id}")))
            .json(draft)
            .send()
            .await
            .map_err(|err| Self::network("update template", err))?;

        let env: Envelope<RawTemplate> = self.read_envelope(resp, "update template").await?;
        normalize::template(env.require_data("update template")?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        let resp = self
            .client
            .delete(self.url(&format!("/templates/{id}")))
            .send()
            .await
            .map_err(|err| Self::network("delete template", err))?;

        // The delete envelope may echo the removed record; only the verdict
        // matters here.
        let _env: Envelope<serde_json::Value> = self.read_envelope(resp, "delete template").await?;
        Ok(())
    }

    /// Fire-and-forget usage counter increment. Callers swallow failures;
    /// this still classifies them so the catalog layer can log the reason.
    pub async fn record_usage(&self, id: &str) -> Result<(), GatewayError> {
        let resp = self
            .client
            .post(self.url(&format!("/templates/{id}/use")))
            .send()
            .await
            .map_err(|err| Self::network("record usage", err))?;

        let _env: Envelope<serde_json::Value> = self.read_envelope(resp, "record usage").await?;
        Ok(())
    }
}
