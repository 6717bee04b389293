//! Account credential entity

mod credential;

pub use credential::AwsCredentials;
