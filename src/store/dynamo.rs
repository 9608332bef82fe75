use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{AttributeValue, DeleteRequest, WriteRequest};
use aws_sdk_dynamodb::Client;
use tracing::{debug, warn};

use super::conversions::{attributes_to_item, item_to_attributes};
use super::{DocumentStore, Filter, Item, Key, StoreError};

fn backend<E: std::error::Error + 'static>(err: E) -> StoreError {
    StoreError::Backend(DisplayErrorContext(err).to_string())
}

#[derive(Clone)]
pub struct DynamoStore {
    client: Client,
}

impl DynamoStore {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl DocumentStore for DynamoStore {
    async fn get(&self, table: &str, key: &Key) -> Result<Option<Item>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(table)
            .key(&key.attribute, AttributeValue::S(key.value.clone()))
            .send()
            .await
            .map_err(backend)?;

        output.item.map(attributes_to_item).transpose()
    }

    async fn put(&self, table: &str, item: Item) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(item_to_attributes(item)))
            .send()
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn put_if_absent(
        &self,
        table: &str,
        key_attribute: &str,
        item: Item,
    ) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(item_to_attributes(item)))
            .condition_expression("attribute_not_exists(#k)")
            .expression_attribute_names("#k", key_attribute)
            .send()
            .await
            .map_err(|err| {
                let exists = err
                    .as_service_error()
                    .is_some_and(|e| e.is_conditional_check_failed_exception());
                if exists {
                    StoreError::AlreadyExists
                } else {
                    backend(err)
                }
            })?;
        Ok(())
    }

    async fn scan(&self, table: &str, filter: Option<&Filter>) -> Result<Vec<Item>, StoreError> {
        let mut items = Vec::new();
        let mut start_key = None;
        let mut pages = 0usize;

        loop {
            let mut request = self
                .client
                .scan()
                .table_name(table)
                .set_exclusive_start_key(start_key.take());
            if let Some(filter) = filter {
                request = request
                    .filter_expression("#f = :v")
                    .expression_attribute_names("#f", &filter.attribute)
                    .expression_attribute_values(":v", AttributeValue::S(filter.equals.clone()));
            }

            let output = request.send().await.map_err(backend)?;
            pages += 1;
            for raw in output.items.unwrap_or_default() {
                items.push(attributes_to_item(raw)?);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        debug!(table, pages, count = items.len(), "Scan complete");
        Ok(items)
    }

    async fn delete(&self, table: &str, key: &Key) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(table)
            .key(&key.attribute, AttributeValue::S(key.value.clone()))
            .send()
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn batch_delete(&self, table: &str, keys: &[Key]) -> Result<(), StoreError> {
        if keys.is_empty() {
            return Ok(());
        }

        let requests = keys
            .iter()
            .map(|key| {
                DeleteRequest::builder()
                    .key(&key.attribute, AttributeValue::S(key.value.clone()))
                    .build()
                    .map(|delete| WriteRequest::builder().delete_request(delete).build())
                    .map_err(backend)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let output = self
            .client
            .batch_write_item()
            .request_items(table, requests)
            .send()
            .await
            .map_err(backend)?;

        // Not retried; the caller only learns about whole-request failures.
        let unprocessed = output
            .unprocessed_items
            .as_ref()
            .and_then(|pending| pending.get(table))
            .map_or(0, Vec::len);
        if unprocessed > 0 {
            warn!(table, unprocessed, "Batch delete left unprocessed items");
        }
        Ok(())
    }
}
