pub mod models;
pub mod routes;
pub mod store;
pub mod validation;

use std::sync::Arc;

use async_trait::async_trait;
use authors_kernel::{InitCtx, Module};
use axum::Router;

use store::AuthorStore;

/// Authors module: owns the store and serves it under `/authors`
pub struct AuthorsModule {
    store: Arc<AuthorStore>,
}

impl AuthorsModule {
    pub fn new(store: Arc<AuthorStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<AuthorStore> {
        &self.store
    }
}

#[async_trait]
impl Module for AuthorsModule {
    fn name(&self) -> &'static str {
        "authors"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        if ctx.settings.store.seed_demo {
            let added = self.store.seed(models::demo_authors()).await;
            tracing::info!(module = self.name(), added, "seeded demo authors");
        }

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "authors module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = |description: &str| {
            serde_json::json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            })
        };
        let author = |description: &str| {
            serde_json::json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/Author" }
                    }
                }
            })
        };
        let request_body = serde_json::json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/AuthorInput" }
                }
            }
        });
        let id_parameter = serde_json::json!({
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64" }
        });

        Some(serde_json::json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List authors",
                        "tags": ["Authors"],
                        "responses": {
                            "200": {
                                "description": "Every author, in insertion order",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Author" }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create author",
                        "tags": ["Authors"],
                        "requestBody": request_body,
                        "responses": {
                            "201": author("Created author"),
                            "400": error("Missing field or malformed email"),
                            "409": error("Email already exists")
                        }
                    }
                },
                "/{id}": {
                    "put": {
                        "summary": "Update author",
                        "tags": ["Authors"],
                        "parameters": [id_parameter],
                        "requestBody": request_body,
                        "responses": {
                            "200": author("Updated author"),
                            "400": error("Missing field or malformed email"),
                            "404": error("Author not found"),
                            "409": error("Email belongs to another author")
                        }
                    },
                    "delete": {
                        "summary": "Delete author",
                        "description": "Deleting an unknown id also succeeds",
                        "tags": ["Authors"],
                        "parameters": [id_parameter],
                        "responses": {
                            "204": { "description": "Deleted or absent" }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Author": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "first": { "type": "string" },
                            "last": { "type": "string" },
                            "email": { "type": "string", "format": "email" }
                        },
                        "required": ["id", "first", "last", "email"]
                    },
                    "AuthorInput": {
                        "type": "object",
                        "properties": {
                            "first": { "type": "string", "minLength": 1 },
                            "last": { "type": "string", "minLength": 1 },
                            "email": { "type": "string", "format": "email" }
                        },
                        "required": ["first", "last", "email"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let authors = self.store.len().await;
        tracing::info!(module = self.name(), authors, "authors module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "authors module stopped");
        Ok(())
    }
}

/// Create a new instance of the authors module with an empty store
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(AuthorsModule::new(Arc::new(AuthorStore::new())))
}
