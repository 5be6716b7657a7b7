use anyhow::{Context, Result};
use gcloud_gax::grpc::Code;
use gcloud_googleapis::spanner::admin::database::v1::{
    CreateDatabaseRequest, GetDatabaseDdlRequest, GetDatabaseRequest, UpdateDatabaseDdlRequest,
};
use gcloud_googleapis::spanner::admin::instance::v1::{
    CreateInstanceRequest, GetInstanceRequest, Instance,
};
use gcloud_spanner::admin::client::Client as AdminClient;
use gcloud_spanner::admin::AdminClientConfig;
use gcloud_spanner::client::{Client, ClientConfig};
use gcloud_spanner::key::Key;
use gcloud_spanner::mutation::{delete, insert_or_update};
use gcloud_spanner::row::Row;
use gcloud_spanner::statement::Statement;
use gcloud_spanner::value::CommitTimestamp;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::SpannerConfig;
use crate::models::{AttributeValue, Record};

/// Record table backed by Cloud Spanner
///
/// Attributes live in a JSON column using the tagged stored encoding of
/// [`AttributeValue`], so decimals come back as decimals.
#[derive(Clone)]
pub struct SpannerStore {
    inner: Arc<Client>,
    table: Arc<str>,
}

impl SpannerStore {
    /// Connect to the configured database, provisioning it first if needed.
    ///
    /// The gcloud-spanner library picks up `SPANNER_EMULATOR_HOST` from the
    /// environment and talks to the emulator when it is set.
    pub async fn from_config(config: &SpannerConfig) -> Result<Self> {
        auto_provision(config).await?;

        let database_path = config.database_path();

        match &config.emulator_host {
            Some(host) => tracing::info!("Connecting to Spanner emulator at: {}", host),
            None => tracing::info!("Connecting to production Spanner"),
        }

        let client = Client::new(&database_path, ClientConfig::default())
            .await
            .context("Failed to create Spanner client")?;

        tracing::info!(
            "Successfully connected to Spanner database: {} (table: {})",
            database_path,
            config.table
        );

        Ok(Self {
            inner: Arc::new(client),
            table: Arc::from(config.table.as_str()),
        })
    }

    pub async fn get(&self, id: &str) -> Result<Option<Record>> {
        let mut statement = Statement::new(&format!(
            "SELECT id, attributes, last_modified FROM {} WHERE id = @id",
            self.table
        ));
        statement.add_param("id", &id.to_string());

        let mut tx = self.inner
            .single()
            .await
            .context("Failed to create read transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to query record from Spanner")?;

        match result_set.next().await? {
            Some(row) => {
                tracing::debug!("Read record with id: {}", id);
                Ok(Some(record_from_row(&row)?))
            }
            None => {
                tracing::debug!("Record not found with id: {}", id);
                Ok(None)
            }
        }
    }

    /// Every column is written, so an existing row is replaced entirely
    pub async fn put(&self, record: &Record) -> Result<()> {
        let attributes = serde_json::to_string(&record.attributes)
            .context("Failed to serialize record attributes")?;

        let mutation = insert_or_update(
            &self.table,
            &["id", "attributes", "last_modified", "updated_at"],
            &[&record.id, &attributes, &record.last_modified, &CommitTimestamp::new()],
        );

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to write record to Spanner")?;

        tracing::debug!("Stored record with id: {}", record.id);
        Ok(())
    }

    /// Spanner deletes of a missing key are no-ops
    pub async fn delete(&self, id: &str) -> Result<()> {
        let mutation = delete(&self.table, Key::new(&id.to_string()));

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to delete record from Spanner")?;

        tracing::debug!("Deleted record with id: {}", id);
        Ok(())
    }

    pub async fn scan_all(&self) -> Result<Vec<Record>> {
        let statement = Statement::new(&format!(
            "SELECT id, attributes, last_modified FROM {}",
            self.table
        ));

        let mut tx = self.inner
            .single()
            .await
            .context("Failed to create read transaction for scan")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to scan records from Spanner")?;

        let mut records = Vec::new();
        while let Some(row) = result_set.next().await? {
            records.push(record_from_row(&row)?);
        }

        tracing::debug!("Scanned {} records from {}", records.len(), self.table);
        Ok(records)
    }
}

fn record_from_row(row: &Row) -> Result<Record> {
    let id: String = row.column_by_name("id")?;
    let attributes_json: String = row.column_by_name("attributes")?;
    let last_modified: String = row.column_by_name("last_modified")?;

    let attributes: BTreeMap<String, AttributeValue> = serde_json::from_str(&attributes_json)
        .with_context(|| format!("Failed to deserialize attributes of record {}", id))?;

    Ok(Record {
        id,
        attributes,
        last_modified,
    })
}

/// Create the instance, database and table if they don't exist yet.
///
/// With the emulator this gives a zero-setup local environment.
async fn auto_provision(config: &SpannerConfig) -> Result<()> {
    tracing::info!("Starting auto-provisioning checks...");

    let admin_client = AdminClient::new(AdminClientConfig::default())
        .await
        .context("Failed to create Spanner admin client")?;

    let project_path = format!("projects/{}", config.project);
    let instance_path = format!("{}/instances/{}", project_path, config.instance);
    let database_path = config.database_path();

    ensure_instance_exists(&admin_client, config, &project_path, &instance_path).await?;
    ensure_database_exists(&admin_client, config, &instance_path, &database_path).await?;
    ensure_table_exists(&admin_client, &database_path, &config.table).await?;

    tracing::info!("Auto-provisioning complete");
    Ok(())
}

async fn ensure_instance_exists(
    admin_client: &AdminClient,
    config: &SpannerConfig,
    project_path: &str,
    instance_path: &str,
) -> Result<()> {
    let get_request = GetInstanceRequest {
        name: instance_path.to_string(),
        field_mask: None,
    };

    match admin_client.instance().get_instance(get_request, None).await {
        Ok(_) => {
            tracing::info!("Instance already exists: {}", instance_path);
            Ok(())
        }
        Err(status) if status.code() == Code::NotFound => {
            tracing::info!("Instance not found, creating: {}", instance_path);

            let instance_config = if config.emulator_host.is_some() {
                format!("{}/instanceConfigs/emulator-config", project_path)
            } else {
                format!("{}/instanceConfigs/regional-us-east1", project_path)
            };

            let create_request = CreateInstanceRequest {
                parent: project_path.to_string(),
                instance_id: config.instance.clone(),
                instance: Some(Instance {
                    name: instance_path.to_string(),
                    config: instance_config,
                    display_name: format!("{} instance", config.instance),
                    node_count: 1,
                    ..Default::default()
                }),
            };

            admin_client
                .instance()
                .create_instance(create_request, None)
                .await
                .context("Failed to start instance creation")?
                .wait(None)
                .await
                .context("Failed to create instance")?;

            tracing::info!("Instance created: {}", instance_path);
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(
            "Failed to check instance existence: {}",
            e.message()
        )),
    }
}

async fn ensure_database_exists(
    admin_client: &AdminClient,
    config: &SpannerConfig,
    instance_path: &str,
    database_path: &str,
) -> Result<()> {
    let get_request = GetDatabaseRequest {
        name: database_path.to_string(),
    };

    match admin_client.database().get_database(get_request, None).await {
        Ok(_) => {
            tracing::info!("Database already exists: {}", database_path);
            Ok(())
        }
        Err(status) if status.code() == Code::NotFound => {
            tracing::info!("Database not found, creating: {}", database_path);

            let create_request = CreateDatabaseRequest {
                parent: instance_path.to_string(),
                create_statement: format!("CREATE DATABASE `{}`", config.database),
                extra_statements: vec![],
                encryption_config: None,
                database_dialect: 1, // Google Standard SQL
                proto_descriptors: vec![],
            };

            admin_client
                .database()
                .create_database(create_request, None)
                .await
                .context("Failed to start database creation")?
                .wait(None)
                .await
                .context("Failed to create database")?;

            tracing::info!("Database created: {}", database_path);
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(
            "Failed to check database existence: {}",
            e.message()
        )),
    }
}

fn create_table_ddl(table: &str) -> String {
    format!(
        "CREATE TABLE {} (
    id STRING(MAX) NOT NULL,
    attributes JSON NOT NULL,
    last_modified STRING(64) NOT NULL,
    updated_at TIMESTAMP NOT NULL OPTIONS (allow_commit_timestamp=true),
) PRIMARY KEY (id)",
        table
    )
}

fn ddl_creates_table(statement: &str, table: &str) -> bool {
    statement.starts_with(&format!("CREATE TABLE {} ", table))
        || statement.starts_with(&format!("CREATE TABLE `{}` ", table))
        || statement.starts_with(&format!("CREATE TABLE {}(", table))
}

async fn ensure_table_exists(
    admin_client: &AdminClient,
    database_path: &str,
    table: &str,
) -> Result<()> {
    let get_ddl_request = GetDatabaseDdlRequest {
        database: database_path.to_string(),
    };

    let ddl_response = admin_client
        .database()
        .get_database_ddl(get_ddl_request, None)
        .await
        .context("Failed to get database DDL")?;

    let table_exists = ddl_response
        .into_inner()
        .statements
        .iter()
        .any(|stmt| ddl_creates_table(stmt.trim_start(), table));

    if table_exists {
        tracing::info!("Table '{}' already exists", table);
        return Ok(());
    }

    tracing::info!("Table '{}' not found, creating...", table);

    let update_request = UpdateDatabaseDdlRequest {
        database: database_path.to_string(),
        statements: vec![create_table_ddl(table)],
        operation_id: String::new(),
        proto_descriptors: vec![],
        throughput_mode: false,
    };

    admin_client
        .database()
        .update_database_ddl(update_request, None)
        .await
        .context("Failed to start table creation")?
        .wait(None)
        .await
        .context("Failed to create table")?;

    tracing::info!("Table '{}' created", table);
    Ok(())
}
