//! AWS backends for the Dropgate upload coordinator.
//!
//! This crate provides feature-gated implementations of the coordinator's
//! collaborator traits:
//!
//! - **S3** (`s3` feature): presigned `PutObject` URLs ([`S3Issuer`])
//! - **`DynamoDB`** (`dynamodb` feature): `PutItem` upload records ([`DynamoRecorder`])
//! - **SNS** (`sns` feature): topic notifications ([`SnsNotifier`])
//!
//! All backends share a common [`AwsBaseConfig`](config::AwsBaseConfig) for
//! region, endpoint override, operation timeout, and optional STS
//! assume-role credentials.

pub mod auth;
pub mod config;
pub mod error;

#[cfg(feature = "s3")]
pub mod s3;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(feature = "sns")]
pub mod sns;

pub use config::AwsBaseConfig;
pub use error::AwsProviderError;

#[cfg(feature = "s3")]
pub use s3::{S3Issuer, S3IssuerConfig};

#[cfg(feature = "dynamodb")]
pub use dynamodb::{DynamoRecorder, create_table};

#[cfg(feature = "sns")]
pub use sns::SnsNotifier;
