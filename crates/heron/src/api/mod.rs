//! REST API server for document classification.
//!
//! # Endpoints
//!
//! - `POST /classify_file` - Classify one uploaded file (multipart field `file`)
//! - `POST /classify_files` - Classify several files (multipart field `files`, repeated)
//! - `GET /classifications/{id}` - Fetch a stored result
//! - `GET /health` - Health check endpoint
//!
//! Uploads are rejected with 400 when the filename is missing, the extension is not in
//! the allowed list, or the file exceeds the configured size.
//!
//! # Starting the server
//!
//! ```no_run
//! use heron::api::serve;
//!
//! #[tokio::main]
//! async fn main() -> heron::Result<()> {
//!     serve("127.0.0.1", 8000).await?;
//!     Ok(())
//! }
//! ```
//!
//! # cURL Examples
//!
//! ```bash
//! curl -F "file=@bank_statement.pdf" http://localhost:8000/classify_file
//! curl -F "files=@a.pdf" -F "files=@b.png" http://localhost:8000/classify_files
//! curl http://localhost:8000/classifications/0b6c7a5e-8d0e-4b8e-9b7a-3f1f2f4f5a6b
//! ```

mod error;
mod handlers;
mod server;
mod types;

pub use error::ApiError;
pub use server::{create_router, create_router_with_state, serve, serve_default, serve_with_config};
pub use types::{ApiSizeLimits, ApiState, ClassificationResponse, ErrorResponse, HealthResponse};
