//! Resource handlers and their registry
//!
//! Each managed resource type is served by one [`ResourceHandler`]. Handlers
//! are registered by type name when the provider starts; the registry is only
//! read afterwards.

use crate::error::{CloudError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Identifier and attributes of one resource instance
///
/// An empty `id` means the resource does not exist (or no longer exists).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    pub id: String,
    pub attributes: HashMap<String, serde_json::Value>,
}

impl ResourceData {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: HashMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.attributes.insert(key.into(), value);
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Mark the resource as gone
    pub fn clear_id(&mut self) {
        self.id.clear();
    }

    pub fn exists(&self) -> bool {
        !self.id.is_empty()
    }

    /// Get an optional attribute as `T`
    ///
    /// A missing key or a JSON `null` is `Ok(None)`; a value of the wrong type
    /// is an error.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.attributes.get(key) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => T::deserialize(value)
                .map(Some)
                .map_err(|e| CloudError::InvalidAttribute {
                    attribute: key.to_string(),
                    reason: e.to_string(),
                }),
        }
    }

    /// Get a required attribute as `T`
    pub fn require<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        self.get(key)?
            .ok_or_else(|| CloudError::MissingAttribute(key.to_string()))
    }

    /// Get a required, non-empty string attribute
    pub fn require_str(&self, key: &str) -> Result<String> {
        let value: String = self.require(key)?;
        if value.is_empty() {
            return Err(CloudError::MissingAttribute(key.to_string()));
        }
        Ok(value)
    }
}

/// CRUD operations of one resource type against a client `C`
#[async_trait]
pub trait ResourceHandler<C>: Send + Sync
where
    C: Send + Sync,
{
    /// Resource type name (e.g. "osc_vpc_dhcp_options_association")
    fn resource_type(&self) -> &str;

    async fn create(&self, client: &C, data: &mut ResourceData) -> Result<()>;

    /// Refresh `data` from the API; clears the id when the resource is gone
    async fn read(&self, client: &C, data: &mut ResourceData) -> Result<()>;

    async fn update(&self, client: &C, data: &mut ResourceData) -> Result<()>;

    async fn delete(&self, client: &C, data: &mut ResourceData) -> Result<()>;

    /// Import an existing resource by id
    ///
    /// The default accepts the id as-is and leaves the rest to `read`.
    async fn import(&self, _client: &C, id: &str) -> Result<ResourceData> {
        Ok(ResourceData::new(id))
    }
}

/// Resource type name → handler
pub struct ResourceRegistry<C: Send + Sync> {
    handlers: HashMap<String, Arc<dyn ResourceHandler<C>>>,
}

impl<C: Send + Sync> Default for ResourceRegistry<C> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<C: Send + Sync> ResourceRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under its resource type name
    ///
    /// A later registration for the same name replaces the earlier one.
    pub fn register(&mut self, handler: impl ResourceHandler<C> + 'static) {
        let name = handler.resource_type().to_string();
        tracing::debug!("Registering resource type {}", name);
        self.handlers.insert(name, Arc::new(handler));
    }

    pub fn with(mut self, handler: impl ResourceHandler<C> + 'static) -> Self {
        self.register(handler);
        self
    }

    pub fn get(&self, resource_type: &str) -> Result<Arc<dyn ResourceHandler<C>>> {
        self.handlers
            .get(resource_type)
            .cloned()
            .ok_or_else(|| CloudError::UnknownResourceType(resource_type.to_string()))
    }

    pub fn contains(&self, resource_type: &str) -> bool {
        self.handlers.contains_key(resource_type)
    }

    /// Registered resource type names, sorted
    pub fn resource_types(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter {
        calls: AtomicUsize,
    }

    struct NoteHandler {
        name: &'static str,
    }

    #[async_trait]
    impl ResourceHandler<Counter> for NoteHandler {
        fn resource_type(&self) -> &str {
            self.name
        }

        async fn create(&self, client: &Counter, data: &mut ResourceData) -> Result<()> {
            client.calls.fetch_add(1, Ordering::SeqCst);
            let text = data.require_str("text")?;
            data.set_id(format!("note-{}", text));
            Ok(())
        }

        async fn read(&self, _client: &Counter, _data: &mut ResourceData) -> Result<()> {
            Ok(())
        }

        async fn update(&self, client: &Counter, data: &mut ResourceData) -> Result<()> {
            self.create(client, data).await
        }

        async fn delete(&self, _client: &Counter, data: &mut ResourceData) -> Result<()> {
            data.clear_id();
            Ok(())
        }
    }

    fn counter() -> Counter {
        Counter {
            calls: AtomicUsize::new(0),
        }
    }

    #[test]
    fn test_typed_getters() {
        let data = ResourceData::new("r-1")
            .with_attribute("port", json!(443))
            .with_attribute("name", json!("web"))
            .with_attribute("unset", json!(null));

        assert_eq!(data.get::<i32>("port").unwrap(), Some(443));
        assert_eq!(data.require::<String>("name").unwrap(), "web");
        assert_eq!(data.get::<String>("unset").unwrap(), None);
        assert_eq!(data.get::<String>("absent").unwrap(), None);
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let data = ResourceData::new("r-1").with_attribute("port", json!("https"));

        match data.get::<i32>("port") {
            Err(CloudError::InvalidAttribute { attribute, .. }) => assert_eq!(attribute, "port"),
            other => panic!("expected InvalidAttribute, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_attribute() {
        let data = ResourceData::new("r-1").with_attribute("empty", json!(""));

        assert!(matches!(
            data.require::<String>("absent"),
            Err(CloudError::MissingAttribute(_))
        ));
        assert!(matches!(
            data.require_str("empty"),
            Err(CloudError::MissingAttribute(_))
        ));
    }

    #[test]
    fn test_registry_lookup() {
        let registry = ResourceRegistry::<Counter>::new()
            .with(NoteHandler { name: "note" })
            .with(NoteHandler { name: "memo" });

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("note"));
        assert_eq!(registry.resource_types(), vec!["memo", "note"]);

        match registry.get("missing") {
            Err(CloudError::UnknownResourceType(name)) => assert_eq!(name, "missing"),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected UnknownResourceType"),
        }
    }

    #[tokio::test]
    async fn test_dispatch_through_registry() {
        let registry = ResourceRegistry::<Counter>::new().with(NoteHandler { name: "note" });
        let client = counter();

        let handler = registry.get("note").unwrap();
        let mut data = ResourceData::default().with_attribute("text", json!("hello"));
        handler.create(&client, &mut data).await.unwrap();

        assert_eq!(data.id, "note-hello");
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);

        handler.delete(&client, &mut data).await.unwrap();
        assert!(!data.exists());
    }

    #[tokio::test]
    async fn test_default_import_passes_id_through() {
        let handler = NoteHandler { name: "note" };
        let data = handler.import(&counter(), "note-imported").await.unwrap();
        assert_eq!(data.id, "note-imported");
        assert!(data.attributes.is_empty());
    }
}
