//! Job-related API endpoints

use crate::AdminClient;
use crate::error::Result;
use jobwatch_core::domain::{JobKind, JobRecord};
use jobwatch_core::dto::job::{CreateDeletionRequest, CreateExportRequest, CreateValidationRequest};
use reqwest::Method;

impl AdminClient {
    // =============================================================================
    // Job Collections
    // =============================================================================

    /// List every job of one kind
    ///
    /// # Arguments
    /// * `kind` - Which collection to list
    ///
    /// # Returns
    /// The full current collection, in the order the API reports it
    pub async fn list_jobs(&self, kind: JobKind) -> Result<Vec<JobRecord>> {
        let response = self
            .request(Method::GET, kind.collection_path())
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get a single job by ID
    ///
    /// # Arguments
    /// * `kind` - Which collection the job belongs to
    /// * `id` - The job identifier
    pub async fn get_job(&self, kind: JobKind, id: &str) -> Result<JobRecord> {
        let path = format!("{}/{}", kind.collection_path(), id);
        let response = self.request(Method::GET, &path).send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Job Submission
    // =============================================================================

    /// Request a GDPR data export
    ///
    /// # Example
    /// ```no_run
    /// # use jobwatch_client::AdminClient;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = AdminClient::new("http://localhost:3000");
    /// let job = client.submit_export("customer-42").await?;
    /// println!("export {} is {}", job.id, job.status);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn submit_export(&self, customer_id: &str) -> Result<JobRecord> {
        let response = self
            .request(Method::POST, JobKind::Export.collection_path())
            .json(&CreateExportRequest {
                customer_id: customer_id.to_string(),
            })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Request a GDPR data deletion
    pub async fn submit_deletion(
        &self,
        customer_id: &str,
        reason: Option<String>,
    ) -> Result<JobRecord> {
        let response = self
            .request(Method::POST, JobKind::Deletion.collection_path())
            .json(&CreateDeletionRequest {
                customer_id: customer_id.to_string(),
                reason,
            })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Start a product integrity validation task
    ///
    /// # Arguments
    /// * `product_ids` - Products to validate; empty validates the whole catalogue
    pub async fn submit_validation(&self, product_ids: Vec<String>) -> Result<JobRecord> {
        let response = self
            .request(Method::POST, JobKind::Validation.collection_path())
            .json(&CreateValidationRequest { product_ids })
            .send()
            .await?;

        self.handle_response(response).await
    }
}
