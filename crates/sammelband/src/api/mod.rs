//! HTTP upload API for the conversion pipelines.
//!
//! This module provides an Axum-based server exposing the two pipelines to
//! web clients.
//!
//! # Endpoints
//!
//! - `POST /upload_images_pdfs` - combine uploaded JPEGs and PDFs into one
//!   merged PDF (multipart field `file`, repeatable)
//! - `POST /upload_rtf` - convert one uploaded RTF file to UTF-8 plain text
//!   with a provenance header (multipart field `file`)
//! - `GET /health` - health check
//!
//! # Examples
//!
//! ## Starting the server
//!
//! ```no_run
//! use sammelband::{ServiceConfig, api::serve};
//!
//! #[tokio::main]
//! async fn main() -> sammelband::Result<()> {
//!     serve("127.0.0.1", 9000, ServiceConfig::default()).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Embedding the router in your app
//!
//! ```no_run
//! use axum::Router;
//! use sammelband::{ServiceConfig, api::create_router};
//!
//! # #[tokio::main]
//! # async fn main() -> sammelband::Result<()> {
//! let config = ServiceConfig::default();
//! config.ensure_dirs()?;
//! let app = Router::new().nest("/convert", create_router(config));
//! # Ok(())
//! # }
//! ```
//!
//! # cURL Examples
//!
//! ```bash
//! # Combine two files into one PDF
//! curl -F "file=@scan.jpg" -F "file=@report.pdf" \
//!      -o combined_output.pdf http://localhost:9000/upload_images_pdfs
//!
//! # Convert an RTF document
//! curl -F "file=@notes.rtf" -OJ http://localhost:9000/upload_rtf
//!
//! # Health check
//! curl http://localhost:9000/health
//! ```

mod error;
mod handlers;
mod server;
mod types;

pub use error::ApiError;
pub use server::{create_router, create_router_with_limits, serve};
pub use types::{ApiSizeLimits, ApiState, HealthResponse};
