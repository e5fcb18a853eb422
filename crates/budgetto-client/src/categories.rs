// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP implementation of [`CategoryApi`].

use std::sync::Arc;

use async_trait::async_trait;
use budgetto_core::validation::{
    parse_categories, parse_category, parse_delete_message, validate_create, validate_update,
};
use budgetto_core::{
    AccessToken, BudgettoError, Category, CategoryApi, CategoryId, CreateCategoryInput,
    DeleteMessage, IdentityProvider, UpdateCategoryInput,
};
use reqwest::Method;
use tracing::debug;

use crate::client::ApiClient;

const CATEGORIES_PATH: &str = "v1/categories";

fn category_path(id: CategoryId) -> String {
    format!("{CATEGORIES_PATH}/{id}")
}

/// Category service backed by the REST API.
///
/// Each call asks the identity provider for a token first; a token failure
/// aborts the call before any request is sent.
pub struct HttpCategoryService {
    api: ApiClient,
    identity: Arc<dyn IdentityProvider>,
}

impl HttpCategoryService {
    pub fn new(api: ApiClient, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { api, identity }
    }

    async fn token(&self) -> Result<AccessToken, BudgettoError> {
        self.identity.access_token().await.map_err(|e| match e {
            auth @ BudgettoError::Auth { .. } => auth,
            other => BudgettoError::Auth {
                message: format!("failed to obtain access token: {other}"),
                source: Some(Box::new(other)),
            },
        })
    }
}

#[async_trait]
impl CategoryApi for HttpCategoryService {
    async fn list(&self) -> Result<Vec<Category>, BudgettoError> {
        let token = self.token().await?;
        let body = self
            .api
            .execute(self.api.request(Method::GET, CATEGORIES_PATH, &token))
            .await?;
        let categories = parse_categories(&body)?;
        debug!(count = categories.len(), "categories listed");
        Ok(categories)
    }

    async fn get(&self, id: CategoryId) -> Result<Category, BudgettoError> {
        let token = self.token().await?;
        let body = self
            .api
            .execute(self.api.request(Method::GET, &category_path(id), &token))
            .await?;
        parse_category(&body)
    }

    async fn create(&self, input: &CreateCategoryInput) -> Result<Category, BudgettoError> {
        validate_create(input)?;
        let token = self.token().await?;
        let request = self
            .api
            .request(Method::POST, CATEGORIES_PATH, &token)
            .json(&input.payload());
        let created = parse_category(&self.api.execute(request).await?)?;
        debug!(id = created.id, "category created");
        Ok(created)
    }

    async fn update(&self, input: &UpdateCategoryInput) -> Result<Category, BudgettoError> {
        validate_update(input)?;
        let token = self.token().await?;
        let request = self
            .api
            .request(Method::PUT, &category_path(input.id), &token)
            .json(&input.payload());
        let updated = parse_category(&self.api.execute(request).await?)?;
        debug!(id = updated.id, "category updated");
        Ok(updated)
    }

    async fn delete(&self, id: CategoryId) -> Result<DeleteMessage, BudgettoError> {
        let token = self.token().await?;
        let body = self
            .api
            .execute(self.api.request(Method::DELETE, &category_path(id), &token))
            .await?;
        let message = parse_delete_message(&body)?;
        debug!(id, "category deleted");
        Ok(message)
    }
}
