use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType,
    ScalarAttributeType,
};
use tracing::{debug, error, info, instrument};

use dropgate_coordinator::{BackendError, MetadataRecorder};
use dropgate_core::UploadRecord;

use crate::auth::build_sdk_config;
use crate::config::AwsBaseConfig;
use crate::error::classify_sdk_error;

/// Partition key of the upload table.
pub const PARTITION_KEY: &str = "id";

/// Convert an [`UploadRecord`] into a `DynamoDB` item.
///
/// Attribute names follow the table's established layout: `email`,
/// `imageUrl` and `datetime`, keyed by `id`.
pub fn record_to_item(record: &UploadRecord) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();
    item.insert(
        PARTITION_KEY.to_owned(),
        AttributeValue::S(record.id.to_string()),
    );
    item.insert("email".to_owned(), AttributeValue::S(record.email.clone()));
    item.insert(
        "imageUrl".to_owned(),
        AttributeValue::S(record.image_url.clone()),
    );
    item.insert(
        "datetime".to_owned(),
        AttributeValue::S(record.datetime_iso8601()),
    );
    item
}

/// [`MetadataRecorder`] that writes upload records with `PutItem`.
///
/// Writes are conditional on the `id` being unused, so a record is never
/// replaced.
pub struct DynamoRecorder {
    client: Client,
}

impl std::fmt::Debug for DynamoRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamoRecorder")
            .field("client", &"<DynamoDbClient>")
            .finish()
    }
}

impl DynamoRecorder {
    pub async fn new(aws: &AwsBaseConfig) -> Self {
        let sdk_config = build_sdk_config(aws).await;
        Self::from_sdk_config(&sdk_config)
    }

    pub fn from_sdk_config(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }

    /// Create a recorder with a pre-built client (for testing).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl MetadataRecorder for DynamoRecorder {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "aws-dynamodb"
    }

    #[instrument(skip(self, record), fields(backend = "aws-dynamodb", record_id = %record.id))]
    async fn put_record(&self, table: &str, record: &UploadRecord) -> Result<(), BackendError> {
        debug!(table = %table, "writing upload record");

        let mut put = self
            .client
            .put_item()
            .table_name(table)
            .condition_expression("attribute_not_exists(#pk)")
            .expression_attribute_names("#pk", PARTITION_KEY);
        for (k, v) in record_to_item(record) {
            put = put.item(k, v);
        }

        put.send().await.map_err(|e| {
            let err_str = DisplayErrorContext(&e).to_string();
            error!(error = %err_str, table = %table, "DynamoDB PutItem failed");
            BackendError::from(classify_sdk_error(&err_str))
        })?;

        info!(table = %table, "DynamoDB record written");
        Ok(())
    }

    #[instrument(skip(self), fields(backend = "aws-dynamodb"))]
    async fn health_check(&self) -> Result<(), BackendError> {
        debug!("performing DynamoDB health check");
        self.client
            .list_tables()
            .limit(1)
            .send()
            .await
            .map_err(|e| {
                error!(error = %DisplayErrorContext(&e), "DynamoDB health check failed");
                BackendError::Connection(format!("DynamoDB health check failed: {e}"))
            })?;
        info!("DynamoDB health check passed");
        Ok(())
    }
}

/// Create the upload table with an `id` string partition key and on-demand
/// billing.
///
/// Intended for local development; production tables are provisioned
/// elsewhere. A table that already exists is left untouched.
///
/// # Errors
///
/// Returns an error if the `CreateTable` call fails for any reason other
/// than the table already existing.
pub async fn create_table(client: &Client, table_name: &str) -> Result<(), BackendError> {
    let key_schema = KeySchemaElement::builder()
        .attribute_name(PARTITION_KEY)
        .key_type(KeyType::Hash)
        .build()
        .map_err(|e| BackendError::Configuration(e.to_string()))?;
    let attribute = AttributeDefinition::builder()
        .attribute_name(PARTITION_KEY)
        .attribute_type(ScalarAttributeType::S)
        .build()
        .map_err(|e| BackendError::Configuration(e.to_string()))?;

    let result = client
        .create_table()
        .table_name(table_name)
        .key_schema(key_schema)
        .attribute_definitions(attribute)
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await;

    match result {
        Ok(_) => {
            info!(table = %table_name, "DynamoDB table created");
            Ok(())
        }
        Err(err) => {
            let service_err = err.into_service_error();
            if service_err.is_resource_in_use_exception() {
                debug!(table = %table_name, "DynamoDB table already exists");
                Ok(())
            } else {
                let err_str = DisplayErrorContext(&service_err).to_string();
                Err(classify_sdk_error(&err_str).into())
            }
        }
    }
}
